//! Block factory.
//!
//! [`create_block`] fills type-appropriate defaults. To override fields, build
//! the variant struct with struct-update syntax and hand it to [`Block::new`]:
//!
//! ```
//! use blockdoc_engine::model::{Block, TextBlock, TextType};
//!
//! let heading = Block::new(TextBlock {
//!     content: "Specifications".into(),
//!     text_type: TextType::Heading2,
//! });
//! assert_eq!(heading.order, 0);
//! ```

use crate::model::block::{Block, BlockContent, BlockType, TextBlock};

/// Fresh block of `block_type` with default field values and a new id.
///
/// `order` is left at 0; the importer or editor assigns the real position.
pub fn create_block(block_type: BlockType) -> Block {
    Block::new(BlockContent::default_for(block_type))
}

/// The baseline document: a single empty paragraph at order 0.
pub fn baseline_document() -> Vec<Block> {
    vec![Block::new(TextBlock::default())]
}
