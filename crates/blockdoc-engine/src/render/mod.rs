//! # Markup Serialization
//!
//! Renders a block sequence back into the persisted markup string.
//!
//! Blocks are rendered strictly in ascending `order` (not slice order), one
//! line per block, joined with `\n`. The serializer is a pure function of the
//! blocks; it holds no editor state and does not repair invariants. Table row
//! widths and checklist flags are the editor's responsibility.
//!
//! Everything emitted here is recognized by [`crate::import`], so
//! `import(serialize(blocks))` reproduces the blocks' content.

pub mod style;

use std::borrow::Cow;

use crate::model::{
    Block, BlockContent, CodeBlock, DividerBlock, ImageBlock, ListBlock, ListType, QuoteBlock,
    TableBlock, TextBlock, VideoBlock, baseline_document, resolve_embed_url,
};

/// Serialize a block sequence to markup.
///
/// An empty slice renders as the baseline document (one empty paragraph).
pub fn serialize_blocks(blocks: &[Block]) -> String {
    if blocks.is_empty() {
        return serialize_blocks(&baseline_document());
    }

    let mut ordered: Vec<&Block> = blocks.iter().collect();
    ordered.sort_by_key(|block| block.order);

    ordered
        .into_iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markup for a single block.
pub fn render_block(block: &Block) -> String {
    match &block.content {
        BlockContent::Text(text) => render_text(text),
        BlockContent::Image(image) => render_image(image),
        BlockContent::Video(video) => render_video(video),
        BlockContent::Table(table) => render_table(table),
        BlockContent::Divider(divider) => render_divider(divider),
        BlockContent::Quote(quote) => render_quote(quote),
        BlockContent::List(list) => render_list(list),
        BlockContent::Code(code) => render_code(code),
    }
}

fn text(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

fn attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

fn caption_line(caption: &str) -> String {
    format!("<p><em>{}</em></p>", text(caption))
}

fn render_text(block: &TextBlock) -> String {
    let tag = block.text_type.tag();
    format!("<{tag}>{}</{tag}>", text(&block.content))
}

fn render_image(block: &ImageBlock) -> String {
    let mut out = format!(
        "<div style=\"text-align: {}; {}\">",
        block.alignment.keyword(),
        style::BLOCK_MARGIN
    );
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\" style=\"{}\" />",
        attr(&block.url),
        attr(&block.alt),
        style::IMAGE
    ));
    if let Some(caption) = &block.caption {
        out.push_str(&caption_line(caption));
    }
    out.push_str("</div>");
    out
}

fn render_video(block: &VideoBlock) -> String {
    let embed = resolve_embed_url(&block.url);
    let title_attr = block
        .title
        .as_deref()
        .map(|title| format!(" title=\"{}\"", attr(title)))
        .unwrap_or_default();

    let mut out = format!(
        "<div data-block=\"video\" style=\"{}\"><div style=\"{}\">",
        style::BLOCK_MARGIN,
        style::VIDEO_WRAPPER
    );
    out.push_str(&format!(
        "<iframe src=\"{}\" data-source-url=\"{}\"{} style=\"{}\" frameborder=\"0\" allowfullscreen></iframe>",
        attr(&embed),
        attr(&block.url),
        title_attr,
        style::VIDEO_FRAME
    ));
    out.push_str("</div>");
    if let Some(title) = &block.title {
        out.push_str(&caption_line(title));
    }
    out.push_str("</div>");
    out
}

fn render_table(block: &TableBlock) -> String {
    let cell = |tag: &str, content: &str| {
        format!(
            "<{tag} style=\"{}\">{}</{tag}>",
            style::TABLE_CELL,
            text(content)
        )
    };

    let mut out = format!("<table style=\"{}\"><thead><tr>", style::TABLE);
    for header in &block.headers {
        out.push_str(&cell("th", header));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &block.rows {
        out.push_str("<tr>");
        for value in row {
            out.push_str(&cell("td", value));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

fn render_divider(block: &DividerBlock) -> String {
    match block.style.glyphs() {
        None => format!("<hr style=\"{}\" />", style::BLOCK_MARGIN),
        Some(glyphs) => format!(
            "<div data-divider=\"{}\" style=\"{}\">{}</div>",
            block.style.name(),
            style::CENTERED,
            glyphs
        ),
    }
}

fn render_quote(block: &QuoteBlock) -> String {
    let mut out = format!(
        "<blockquote style=\"{}\"><p>{}</p>",
        style::QUOTE,
        text(&block.content)
    );
    if let Some(author) = &block.author {
        out.push_str(&format!("<cite>— {}</cite>", text(author)));
    }
    out.push_str("</blockquote>");
    out
}

fn render_list(block: &ListBlock) -> String {
    let (open, close) = match block.list_type {
        ListType::Numbered => (format!("<ol style=\"{}\">", style::BLOCK_MARGIN), "</ol>"),
        ListType::Bullet => (format!("<ul style=\"{}\">", style::BLOCK_MARGIN), "</ul>"),
        ListType::Checklist => (
            format!(
                "<ul data-list=\"checklist\" style=\"{}\">",
                style::CHECKLIST
            ),
            "</ul>",
        ),
    };

    let mut out = open;
    for (idx, item) in block.items.iter().enumerate() {
        out.push_str("<li>");
        if block.list_type == ListType::Checklist {
            let checked = if block.is_checked(idx) { " checked" } else { "" };
            out.push_str(&format!("<input type=\"checkbox\" disabled{checked} /> "));
        }
        out.push_str(&text(item));
        out.push_str("</li>");
    }
    out.push_str(close);
    out
}

fn render_code(block: &CodeBlock) -> String {
    let class = block
        .language
        .as_deref()
        .map(|lang| format!(" class=\"language-{}\"", attr(lang)))
        .unwrap_or_default();
    format!(
        "<pre style=\"{}\"><code{}>{}</code></pre>",
        style::BLOCK_MARGIN,
        class,
        text(&block.content)
    )
}
