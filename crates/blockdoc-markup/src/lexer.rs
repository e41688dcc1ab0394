//! # Lexer - Tokenizing Markup Source
//!
//! First stage of markup parsing: breaking source text into tokens using the
//! [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input appears in exactly one token. Nothing is skipped,
//! so concatenating the token texts gives back the original:
//!
//! ```
//! use blockdoc_markup::lexer::lex;
//!
//! let input = "<p class=\"lead\">Hello</p>";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are context-free. The lexer does not know whether a tag is void,
//! whether a close tag has a matching opener, or whether text sits inside a
//! `<script>`. That is the tree builder's job.
//!
//! - `<name ...>` / `<name ... />` → [`TokenKind::OpenTag`]
//! - `</name>` → [`TokenKind::CloseTag`]
//! - `<!-- ... -->` → [`TokenKind::Comment`] (an unterminated comment runs to
//!   end of input)
//! - `<!DOCTYPE ...>` → [`TokenKind::Declaration`]
//! - a `<` that starts none of the above → [`TokenKind::Lt`]
//! - everything else → [`TokenKind::Text`], grouped into runs

use logos::{Lexer, Logos};

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<!-- ... -->`
    #[token("<!--", comment_body)]
    Comment,

    /// `<!DOCTYPE html>` and similar declarations
    #[regex(r"<![a-zA-Z][^>]*>")]
    Declaration,

    /// Start tag, including self-closing form. Quoted attribute values may
    /// contain `>`.
    #[regex(r#"<[a-zA-Z][a-zA-Z0-9-]*([^>"']|"[^"]*"|'[^']*')*>"#)]
    OpenTag,

    /// End tag
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[^>]*>")]
    CloseTag,

    /// A `<` that does not begin a tag
    #[token("<")]
    Lt,

    /// Character data between tags
    #[regex(r"[^<]+")]
    Text,
}

/// Extend a comment token through the next `-->`, or to end of input.
fn comment_body(lex: &mut Lexer<TokenKind>) {
    let rest = lex.remainder();
    let len = rest.find("-->").map_or(rest.len(), |end| end + 3);
    lex.bump(len);
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let span = offset + span.start..offset + span.end;
        let kind = match result {
            Ok(kind) => kind,
            // A tag that never closes (e.g. an unbalanced attribute quote):
            // keep only its `<` and resume lexing right after it
            Err(()) if span.len() > 1 && input[span.clone()].starts_with('<') => {
                let lt = span.start..span.start + 1;
                let text = &input[lt.clone()];
                tokens.push((Token { kind: TokenKind::Lt, text }, lt));
                offset = span.start + 1;
                lexer = TokenKind::lexer(&input[offset..]);
                continue;
            }
            // Logos error means unrecognized input - treat as TEXT
            Err(()) => TokenKind::Text,
        };
        let text = &input[span.clone()];
        tokens.push((Token { kind, text }, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text() {
        assert_eq!(lex("hello world"), vec![token(TokenKind::Text, "hello world")]);
    }

    #[test]
    fn lex_simple_element() {
        assert_eq!(
            lex("<p>Body</p>"),
            vec![
                token(TokenKind::OpenTag, "<p>"),
                token(TokenKind::Text, "Body"),
                token(TokenKind::CloseTag, "</p>"),
            ]
        );
    }

    #[test]
    fn lex_self_closing_tag_with_attributes() {
        assert_eq!(
            lex(r#"<img src="a.png" alt="A" />"#),
            vec![token(TokenKind::OpenTag, r#"<img src="a.png" alt="A" />"#)]
        );
    }

    #[test]
    fn lex_quoted_gt_stays_inside_tag() {
        assert_eq!(
            lex(r#"<img alt="a > b">x"#),
            vec![
                token(TokenKind::OpenTag, r#"<img alt="a > b">"#),
                token(TokenKind::Text, "x"),
            ]
        );
    }

    #[test]
    fn lex_comment_and_doctype() {
        assert_eq!(
            lex("<!DOCTYPE html><!-- note - here --><p>"),
            vec![
                token(TokenKind::Declaration, "<!DOCTYPE html>"),
                token(TokenKind::Comment, "<!-- note - here -->"),
                token(TokenKind::OpenTag, "<p>"),
            ]
        );
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        assert_eq!(
            lex("<p>a</p><!-- draft <p>b</p>"),
            vec![
                token(TokenKind::OpenTag, "<p>"),
                token(TokenKind::Text, "a"),
                token(TokenKind::CloseTag, "</p>"),
                token(TokenKind::Comment, "<!-- draft <p>b</p>"),
            ]
        );
    }

    #[test]
    fn comment_closed_by_extra_dashes() {
        assert_eq!(
            lex("<!-- a -- b ---><p>"),
            vec![
                token(TokenKind::Comment, "<!-- a -- b --->"),
                token(TokenKind::OpenTag, "<p>"),
            ]
        );
    }

    #[test]
    fn unbalanced_quote_does_not_swallow_later_tags() {
        let input = r#"<p title="oops>Intro</p><h2>Specs</h2>"#;
        let tokens = lex(input);

        assert_eq!(tokens[0], token(TokenKind::Lt, "<"));
        assert!(tokens.contains(&token(TokenKind::OpenTag, "<h2>")));
        assert!(tokens.contains(&token(TokenKind::CloseTag, "</h2>")));
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn lex_stray_lt_is_not_a_tag() {
        assert_eq!(
            lex("1 < 2"),
            vec![
                token(TokenKind::Text, "1 "),
                token(TokenKind::Lt, "<"),
                token(TokenKind::Text, " 2"),
            ]
        );
    }

    #[test]
    fn all_bytes_preserved() {
        let input = "<h2>Title</h2>\n<p>Body <b>text</b> < 3</p><!-- x --><ul><li>a</li></ul>";
        let reconstructed: String = lex(input).iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn spans_are_correct() {
        let input = "<div class='x'>hi</div>";
        for (token, span) in &lex_with_spans(input) {
            assert_eq!(token.text, &input[span.clone()]);
        }
    }
}
