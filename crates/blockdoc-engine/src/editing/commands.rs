use crate::editing::BlockEditor;
use crate::model::{Block, BlockContent, BlockId, VideoPlatform};

/// Direction for an adjacent swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Edit commands understood by [`BlockEditor::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Append at the end of the sequence
    Add { block: Block },
    /// Replace the block with `id`, keeping its id and position
    Update { id: BlockId, block: Block },
    /// Remove the block with `id` and re-number the rest
    Delete { id: BlockId },
    /// Swap the block with `id` with its neighbour
    Move { id: BlockId, direction: Direction },
}

/// Execute a command against the editor's sequence.
///
/// Returns the id of the block that changed, or `None` when the command was
/// discarded (unknown id, or a move at the boundary).
pub(crate) fn execute(editor: &mut BlockEditor, cmd: Cmd) -> Option<BlockId> {
    match cmd {
        Cmd::Add { block } => Some(add(editor, block)),
        Cmd::Update { id, block } => update(editor, &id, block),
        Cmd::Delete { id } => delete(editor, &id),
        Cmd::Move { id, direction } => move_adjacent(editor, &id, direction),
    }
}

fn add(editor: &mut BlockEditor, mut block: Block) -> BlockId {
    if editor.position(&block.id).is_some() {
        log::debug!("add_block: id {} already present, assigning a fresh one", block.id);
        block.id = BlockId::generate();
    }
    normalize_content(&mut block.content);
    block.order = editor.blocks.len();
    let id = block.id.clone();
    editor.blocks.push(block);
    id
}

fn update(editor: &mut BlockEditor, id: &BlockId, mut block: Block) -> Option<BlockId> {
    let Some(idx) = editor.position(id) else {
        // Typically a late upload result for a block that has since been deleted
        log::debug!("update_block: no block with id {id}, discarding");
        return None;
    };
    block.id = id.clone();
    block.order = idx;
    normalize_content(&mut block.content);
    editor.blocks[idx] = block;
    Some(id.clone())
}

fn delete(editor: &mut BlockEditor, id: &BlockId) -> Option<BlockId> {
    let Some(idx) = editor.position(id) else {
        log::debug!("delete_block: no block with id {id}, discarding");
        return None;
    };
    let removed = editor.blocks.remove(idx);
    renumber(&mut editor.blocks);
    Some(removed.id)
}

fn move_adjacent(editor: &mut BlockEditor, id: &BlockId, direction: Direction) -> Option<BlockId> {
    let Some(idx) = editor.position(id) else {
        log::debug!("move_block: no block with id {id}, discarding");
        return None;
    };
    let target = match direction {
        Direction::Up => idx.checked_sub(1)?,
        Direction::Down => Some(idx + 1).filter(|t| *t < editor.blocks.len())?,
    };
    editor.blocks.swap(idx, target);
    renumber(&mut editor.blocks);
    Some(id.clone())
}

/// Assign `order = position` to every block.
pub(crate) fn renumber(blocks: &mut [Block]) {
    for (order, block) in blocks.iter_mut().enumerate() {
        block.order = order;
    }
}

/// Bring a block's fields in line with the sequence invariants: rectangular
/// tables, checklist flags matching items, and a detected video platform.
///
/// Returns whether anything was changed.
pub(crate) fn normalize_content(content: &mut BlockContent) -> bool {
    match content {
        BlockContent::Table(table) => table.normalize_rows(),
        BlockContent::List(list) => list.normalize_checked(),
        BlockContent::Video(video) => {
            if video.platform.is_none() {
                video.platform = VideoPlatform::detect(&video.url);
                video.platform.is_some()
            } else {
                false
            }
        }
        BlockContent::Text(_)
        | BlockContent::Image(_)
        | BlockContent::Divider(_)
        | BlockContent::Quote(_)
        | BlockContent::Code(_) => false,
    }
}
