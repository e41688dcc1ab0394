//! # Markup Import
//!
//! Converts a persisted markup string into an ordered block sequence.
//!
//! ## Algorithm
//!
//! 1. Parse the input into an element tree ([`blockdoc_markup::parse`])
//! 2. Walk the top-level children once, left to right
//! 3. Map each node to at most one block ([`elements`]); nested structure is
//!    flattened to text
//! 4. Number `order` sequentially from 0
//!
//! Import is a pure function of its input and never fails. Input that yields no
//! blocks (empty, whitespace, content-free containers, unparseable garbage)
//! produces the baseline document: one empty paragraph.
//!
//! Ids are generated fresh on every import; importing the same text twice gives
//! the same content under different ids.

mod elements;

use blockdoc_markup::Node;

use crate::model::{Block, BlockContent, TextBlock, baseline_document};

/// Import a markup string into a block sequence with `order` set `0..n-1`.
pub fn import_markup(input: &str) -> Vec<Block> {
    let fragment = blockdoc_markup::parse(input);

    let mut blocks: Vec<Block> = fragment
        .children
        .iter()
        .filter_map(content_from_node)
        .map(Block::new)
        .collect();

    if blocks.is_empty() {
        log::debug!("import produced no blocks, using baseline document");
        blocks = baseline_document();
    }

    for (order, block) in blocks.iter_mut().enumerate() {
        block.order = order;
    }

    log::debug!(
        "imported {} blocks from {} bytes of markup",
        blocks.len(),
        input.len()
    );
    blocks
}

fn content_from_node(node: &Node) -> Option<BlockContent> {
    match node {
        Node::Text(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| {
                TextBlock {
                    content: text.to_string(),
                    ..Default::default()
                }
                .into()
            })
        }
        Node::Element(el) => elements::content_from_element(el),
    }
}
