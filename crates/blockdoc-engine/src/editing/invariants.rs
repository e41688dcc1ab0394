use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Block, BlockContent, BlockId, ListType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("block at position {position} has order {order}")]
    NonContiguousOrder { position: usize, order: usize },

    #[error("duplicate block id {0}")]
    DuplicateId(BlockId),

    #[error("table {id} row {row} has {found} cells, expected {expected}")]
    RaggedTableRow {
        id: BlockId,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("list {id} has {items} items but {flags} checked flags")]
    ChecklistMismatch {
        id: BlockId,
        items: usize,
        flags: usize,
    },

    #[error("document has no blocks")]
    EmptyDocument,
}

/// Check the sequence invariants the editor maintains after every mutation:
/// contiguous `order`, unique ids, rectangular tables, checklist flags in step
/// with items.
pub fn check_invariants(blocks: &[Block]) -> Result<(), InvariantError> {
    let mut seen = HashSet::new();

    for (position, block) in blocks.iter().enumerate() {
        if block.order != position {
            return Err(InvariantError::NonContiguousOrder {
                position,
                order: block.order,
            });
        }
        if !seen.insert(&block.id) {
            return Err(InvariantError::DuplicateId(block.id.clone()));
        }
        match &block.content {
            BlockContent::Table(table) => {
                let expected = table.headers.len();
                if let Some((row, cells)) = table
                    .rows
                    .iter()
                    .enumerate()
                    .find(|(_, cells)| cells.len() != expected)
                {
                    return Err(InvariantError::RaggedTableRow {
                        id: block.id.clone(),
                        row,
                        expected,
                        found: cells.len(),
                    });
                }
            }
            BlockContent::List(list) => {
                let want = match list.list_type {
                    ListType::Checklist => list.items.len(),
                    ListType::Bullet | ListType::Numbered => 0,
                };
                if list.checked.len() != want {
                    return Err(InvariantError::ChecklistMismatch {
                        id: block.id.clone(),
                        items: list.items.len(),
                        flags: list.checked.len(),
                    });
                }
            }
            BlockContent::Text(_)
            | BlockContent::Image(_)
            | BlockContent::Video(_)
            | BlockContent::Divider(_)
            | BlockContent::Quote(_)
            | BlockContent::Code(_) => {}
        }
    }

    Ok(())
}

/// [`check_invariants`] plus the document-level guarantee that there is at least one
/// block, which holds for every imported document.
pub fn check_document(blocks: &[Block]) -> Result<(), InvariantError> {
    if blocks.is_empty() {
        return Err(InvariantError::EmptyDocument);
    }
    check_invariants(blocks)
}
