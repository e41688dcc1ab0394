use serde::{Deserialize, Serialize};

use crate::model::video::VideoPlatform;

/// Opaque, unique block identifier (UUID v4 string).
///
/// Ids are generated fresh for every block the importer or factory creates
/// and stay stable until the block is deleted. They carry no meaning beyond
/// identity and must not be assumed stable across repeated imports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of block variants.
///
/// Every match over block type must handle all eight; there is no "unknown"
/// variant at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Image,
    Video,
    Table,
    Divider,
    Quote,
    List,
    Code,
}

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        BlockType::Text,
        BlockType::Image,
        BlockType::Video,
        BlockType::Table,
        BlockType::Divider,
        BlockType::Quote,
        BlockType::List,
        BlockType::Code,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BlockType::Text => "Text",
            BlockType::Image => "Image",
            BlockType::Video => "Video",
            BlockType::Table => "Table",
            BlockType::Divider => "Divider",
            BlockType::Quote => "Quote",
            BlockType::List => "List",
            BlockType::Code => "Code",
        }
    }
}

/// One atomic, typed unit of document content with identity and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identifier, unique within a block sequence
    pub id: BlockId,
    /// Position within the sequence; contiguous `0..n-1` after every mutation
    pub order: usize,
    /// Variant-specific fields
    pub content: BlockContent,
}

impl Block {
    /// Create a block with a freshly generated id. `order` is left at 0 for
    /// the caller (importer or editor) to assign.
    pub fn new(content: impl Into<BlockContent>) -> Self {
        Self {
            id: BlockId::generate(),
            order: 0,
            content: content.into(),
        }
    }

    /// The type tag, derived from the content so the two can never disagree.
    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }
}

/// Variant payload of a [`Block`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockContent {
    Text(TextBlock),
    Image(ImageBlock),
    Video(VideoBlock),
    Table(TableBlock),
    Divider(DividerBlock),
    Quote(QuoteBlock),
    List(ListBlock),
    Code(CodeBlock),
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Image(_) => BlockType::Image,
            BlockContent::Video(_) => BlockType::Video,
            BlockContent::Table(_) => BlockType::Table,
            BlockContent::Divider(_) => BlockType::Divider,
            BlockContent::Quote(_) => BlockType::Quote,
            BlockContent::List(_) => BlockType::List,
            BlockContent::Code(_) => BlockType::Code,
        }
    }

    /// Factory defaults for a block type.
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => TextBlock::default().into(),
            BlockType::Image => ImageBlock::default().into(),
            BlockType::Video => VideoBlock::default().into(),
            BlockType::Table => TableBlock::default().into(),
            BlockType::Divider => DividerBlock::default().into(),
            BlockType::Quote => QuoteBlock::default().into(),
            BlockType::List => ListBlock::default().into(),
            BlockType::Code => CodeBlock::default().into(),
        }
    }
}

macro_rules! impl_into_content {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for BlockContent {
                fn from(value: $ty) -> Self {
                    BlockContent::$variant(value)
                }
            }
        )*
    };
}

impl_into_content! {
    TextBlock => Text,
    ImageBlock => Image,
    VideoBlock => Video,
    TableBlock => Table,
    DividerBlock => Divider,
    QuoteBlock => Quote,
    ListBlock => List,
    CodeBlock => Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    #[default]
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
}

impl TextType {
    /// Markup element that carries this text type.
    pub fn tag(self) -> &'static str {
        match self {
            TextType::Paragraph => "p",
            TextType::Heading1 => "h1",
            TextType::Heading2 => "h2",
            TextType::Heading3 => "h3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub content: String,
    pub text_type: TextType,
}

impl TextBlock {
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            text_type: TextType::Paragraph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    /// CSS `text-align` keyword
    pub fn keyword(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageBlock {
    pub url: String,
    pub alt: String,
    pub caption: Option<String>,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoBlock {
    pub url: String,
    pub title: Option<String>,
    pub platform: Option<VideoPlatform>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub headers: Vec<String>,
    /// Every row holds exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl Default for TableBlock {
    /// A 1×2 grid
    fn default() -> Self {
        Self {
            headers: vec!["Column 1".to_string(), "Column 2".to_string()],
            rows: vec![vec![String::new(), String::new()]],
        }
    }
}

impl TableBlock {
    /// Pad or truncate every row to the header width.
    ///
    /// Returns whether anything changed.
    pub fn normalize_rows(&mut self) -> bool {
        let width = self.headers.len();
        let mut changed = false;
        for row in &mut self.rows {
            if row.len() != width {
                row.resize(width, String::new());
                changed = true;
            }
        }
        changed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Line,
    Dots,
    Stars,
}

impl DividerStyle {
    /// Glyph line for the centered styles; `None` for a plain rule.
    pub fn glyphs(self) -> Option<&'static str> {
        match self {
            DividerStyle::Line => None,
            DividerStyle::Dots => Some("• • •"),
            DividerStyle::Stars => Some("★ ★ ★"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DividerStyle::Line => "line",
            DividerStyle::Dots => "dots",
            DividerStyle::Stars => "stars",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "line" => Some(DividerStyle::Line),
            "dots" => Some(DividerStyle::Dots),
            "stars" => Some(DividerStyle::Stars),
            _ => None,
        }
    }

    /// Style whose glyph line is exactly `text` (ignoring surrounding whitespace).
    pub fn from_glyphs(text: &str) -> Option<Self> {
        let text = text.trim();
        [DividerStyle::Dots, DividerStyle::Stars]
            .into_iter()
            .find(|style| style.glyphs() == Some(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerBlock {
    pub style: DividerStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteBlock {
    pub content: String,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Bullet,
    Numbered,
    Checklist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlock {
    pub items: Vec<String>,
    pub list_type: ListType,
    /// Per-item checked state. Same length as `items` for checklists, empty
    /// for other list types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checked: Vec<bool>,
}

impl Default for ListBlock {
    fn default() -> Self {
        Self {
            items: vec![String::new()],
            list_type: ListType::Bullet,
            checked: vec![],
        }
    }
}

impl ListBlock {
    /// Whether item `index` is ticked. Always false outside checklists.
    pub fn is_checked(&self, index: usize) -> bool {
        self.list_type == ListType::Checklist && self.checked.get(index).copied().unwrap_or(false)
    }

    /// Keep `checked` in step with `items` and `list_type`.
    ///
    /// Returns whether anything changed.
    pub fn normalize_checked(&mut self) -> bool {
        let want = match self.list_type {
            ListType::Checklist => self.items.len(),
            ListType::Bullet | ListType::Numbered => 0,
        };
        if self.checked.len() == want {
            return false;
        }
        self.checked.resize(want, false);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    pub content: String,
    pub language: Option<String>,
}
