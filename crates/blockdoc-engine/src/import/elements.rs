//! Element → block conversion rules.
//!
//! Each top-level element maps to at most one block. `None` means the element
//! is skipped (for example a paragraph with no text).

use blockdoc_markup::{Element, Node};

use crate::model::{
    Alignment, BlockContent, CodeBlock, DividerBlock, DividerStyle, ImageBlock, ListBlock,
    ListType, QuoteBlock, TableBlock, TextBlock, TextType, VideoBlock, VideoPlatform,
};

pub(super) fn content_from_element(el: &Element) -> Option<BlockContent> {
    match el.tag.as_str() {
        "p" => text_block(el, TextType::Paragraph),
        "h1" => text_block(el, TextType::Heading1),
        "h2" => text_block(el, TextType::Heading2),
        "h3" => text_block(el, TextType::Heading3),
        "img" => Some(image_from_img(el, Alignment::default(), None).into()),
        "div" | "figure" => container(el),
        "hr" => Some(DividerBlock::default().into()),
        "blockquote" => Some(quote(el).into()),
        "ul" | "ol" => Some(list(el).into()),
        "table" => Some(table(el).into()),
        "pre" => Some(code(el).into()),
        "iframe" => Some(video(el, el).into()),
        // Fallback: flatten whatever this is to text
        _ => text_block(el, TextType::Paragraph),
    }
}

fn trimmed_text(el: &Element) -> String {
    el.text_content().trim().to_string()
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn text_block(el: &Element, text_type: TextType) -> Option<BlockContent> {
    non_empty(trimmed_text(el)).map(|content| TextBlock { content, text_type }.into())
}

/// Value of a property in an inline `style` attribute.
fn style_property(el: &Element, property: &str) -> Option<String> {
    el.attr("style")?
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim().to_string())
}

/// Generic container: divider marker, embedded video, single image, or text.
fn container(el: &Element) -> Option<BlockContent> {
    if let Some(style) = el.attr("data-divider") {
        return Some(
            DividerBlock {
                style: DividerStyle::from_name(style).unwrap_or_default(),
            }
            .into(),
        );
    }

    if let Some(iframe) = el.find("iframe") {
        return Some(video(el, iframe).into());
    }

    let images = el.find_all("img");
    if let [img] = images.as_slice() {
        let alignment = style_property(el, "text-align")
            .and_then(|keyword| Alignment::from_keyword(&keyword))
            .unwrap_or_default();
        let caption = non_empty(trimmed_text(el));
        return Some(image_from_img(img, alignment, caption).into());
    }

    let text = trimmed_text(el);
    if let Some(style) = DividerStyle::from_glyphs(&text) {
        return Some(DividerBlock { style }.into());
    }
    non_empty(text).map(|content| TextBlock::paragraph(content).into())
}

fn image_from_img(img: &Element, alignment: Alignment, caption: Option<String>) -> ImageBlock {
    ImageBlock {
        url: img.attr("src").unwrap_or_default().to_string(),
        alt: img.attr("alt").unwrap_or_default().to_string(),
        caption,
        alignment,
    }
}

/// Video from an iframe, captioned by the surrounding container's text.
fn video(container: &Element, iframe: &Element) -> VideoBlock {
    let url = iframe
        .attr("data-source-url")
        .or_else(|| iframe.attr("src"))
        .unwrap_or_default()
        .to_string();
    let title = non_empty(trimmed_text(container))
        .or_else(|| iframe.attr("title").map(str::trim).map(str::to_string))
        .and_then(non_empty);
    let platform = VideoPlatform::detect(&url);
    VideoBlock {
        url,
        title,
        platform,
    }
}

/// Blockquote; a `cite` child carries the attribution.
fn quote(el: &Element) -> QuoteBlock {
    let mut content = String::new();
    let mut author = None;

    for child in &el.children {
        match child {
            Node::Element(cite) if cite.is("cite") => {
                let name = cite.text_content();
                let name = name.trim();
                let name = name.strip_prefix('—').unwrap_or(name).trim();
                author = non_empty(name.to_string());
            }
            other => content.push_str(&other.text_content()),
        }
    }

    QuoteBlock {
        content: content.trim().to_string(),
        author,
    }
}

fn is_checkbox(el: &Element) -> bool {
    el.is("input")
        && el
            .attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
}

fn list(el: &Element) -> ListBlock {
    let items: Vec<&Element> = el.child_elements().filter(|c| c.is("li")).collect();

    let is_checklist = el.attr("data-list") == Some("checklist")
        || items
            .iter()
            .any(|li| li.descendants().into_iter().any(is_checkbox));

    let list_type = if el.is("ol") {
        ListType::Numbered
    } else if is_checklist {
        ListType::Checklist
    } else {
        ListType::Bullet
    };

    let checked = match list_type {
        ListType::Checklist => items
            .iter()
            .map(|li| {
                li.descendants()
                    .into_iter()
                    .any(|input| is_checkbox(input) && input.has_attr("checked"))
            })
            .collect(),
        ListType::Bullet | ListType::Numbered => vec![],
    };

    ListBlock {
        items: items.iter().map(|li| trimmed_text(li)).collect(),
        list_type,
        checked,
    }
}

fn row_cells(tr: &Element) -> Vec<String> {
    tr.child_elements()
        .filter(|cell| cell.is("th") || cell.is("td"))
        .map(trimmed_text)
        .collect()
}

/// Table; the first row holding `th` cells is the header row, or the first
/// row when there are none. Rows are fitted to the header width.
fn table(el: &Element) -> TableBlock {
    let rows = el.find_all("tr");
    let header_idx = rows
        .iter()
        .position(|tr| tr.child_elements().any(|cell| cell.is("th")))
        .unwrap_or(0);

    let headers = rows.get(header_idx).map(|tr| row_cells(tr)).unwrap_or_default();
    let body = rows
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != header_idx)
        .map(|(_, tr)| row_cells(tr))
        .collect();

    let mut table = TableBlock {
        headers,
        rows: body,
    };
    table.normalize_rows();
    table
}

/// Preformatted code; content is kept verbatim (not trimmed).
fn code(el: &Element) -> CodeBlock {
    let language = el
        .find("code")
        .and_then(|inner| {
            inner
                .classes()
                .find_map(|class| class.strip_prefix("language-"))
                .map(str::to_string)
                .or_else(|| inner.attr("data-language").map(str::to_string))
        })
        .or_else(|| el.attr("data-language").map(str::to_string))
        .and_then(non_empty);

    CodeBlock {
        content: el.text_content(),
        language,
    }
}
