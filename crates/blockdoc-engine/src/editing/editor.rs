use std::collections::HashSet;

use crate::editing::commands::{self, Cmd, Direction};
use crate::editing::{Patch, invariants};
use crate::import::import_markup;
use crate::model::{Block, BlockId, baseline_document};
use crate::render::serialize_blocks;

/// Session-scoped owner of one block sequence.
///
/// Every mutation goes through [`BlockEditor::apply`] (or one of the
/// convenience wrappers), which keeps `order` contiguous, ids unique and
/// tables rectangular.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEditor {
    pub(crate) blocks: Vec<Block>,
    pub(crate) version: u64,
}

impl Default for BlockEditor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl BlockEditor {
    /// Seed an editor with an existing sequence.
    ///
    /// The seed is sorted by `order` and re-numbered. Duplicate ids get fresh
    /// ones and ragged tables are repaired. An empty seed becomes the baseline
    /// document.
    pub fn new(mut blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            blocks = baseline_document();
        }
        blocks.sort_by_key(|block| block.order);

        let mut seen = HashSet::new();
        for block in &mut blocks {
            if !seen.insert(block.id.clone()) {
                let fresh = BlockId::generate();
                log::warn!("seed: duplicate block id {}, replaced with {fresh}", block.id);
                block.id = fresh.clone();
                seen.insert(fresh);
            }
            if commands::normalize_content(&mut block.content) {
                log::warn!("seed: repaired {} block {}", block.block_type().label(), block.id);
            }
        }
        commands::renumber(&mut blocks);

        let editor = Self { blocks, version: 0 };
        debug_assert!(invariants::check_document(&editor.blocks).is_ok());
        editor
    }

    /// Import markup and seed an editor with the result.
    pub fn from_markup(markup: &str) -> Self {
        Self::new(import_markup(markup))
    }

    /// Import markup from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_markup(text))
    }

    /// Serialize the current sequence.
    pub fn to_markup(&self) -> String {
        serialize_blocks(&self.blocks)
    }

    /// Blocks in `order`.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    /// Current index of the block with `id`, which is also its `order`.
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| &block.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Incremented once per command that changed the sequence.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Apply a command.
    ///
    /// Discarded commands (unknown id, boundary move) leave both the sequence
    /// and the version untouched and report `changed: None`.
    ///
    /// ```
    /// use blockdoc_engine::editing::{BlockEditor, Cmd, Direction};
    ///
    /// let mut editor = BlockEditor::from_markup("<p>a</p><p>b</p>");
    /// let first = editor.blocks()[0].id.clone();
    ///
    /// let patch = editor.apply(Cmd::Move { id: first.clone(), direction: Direction::Up });
    /// assert!(patch.is_noop());
    ///
    /// let patch = editor.apply(Cmd::Move { id: first, direction: Direction::Down });
    /// assert_eq!(patch.version, 1);
    /// assert_eq!(editor.to_markup(), "<p>b</p>\n<p>a</p>");
    /// ```
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let changed = commands::execute(self, cmd);
        if changed.is_some() {
            self.version += 1;
        }
        debug_assert!(invariants::check_invariants(&self.blocks).is_ok());
        Patch {
            changed,
            version: self.version,
        }
    }

    /// Append `block`, assigning it the next `order`.
    pub fn add_block(&mut self, block: Block) -> &[Block] {
        self.apply(Cmd::Add { block });
        &self.blocks
    }

    /// Replace the block with `id` in place. Unknown ids are ignored.
    pub fn update_block(&mut self, id: &BlockId, block: Block) -> &[Block] {
        self.apply(Cmd::Update {
            id: id.clone(),
            block,
        });
        &self.blocks
    }

    pub fn delete_block(&mut self, id: &BlockId) -> &[Block] {
        self.apply(Cmd::Delete { id: id.clone() });
        &self.blocks
    }

    pub fn move_block(&mut self, id: &BlockId, direction: Direction) -> &[Block] {
        self.apply(Cmd::Move {
            id: id.clone(),
            direction,
        });
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BlockContent, BlockType, ListBlock, ListType, TableBlock, TextBlock, TextType,
        VideoBlock, VideoPlatform, create_block,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn three_paragraphs() -> BlockEditor {
        BlockEditor::from_markup("<p>one</p><p>two</p><p>three</p>")
    }

    fn contents(editor: &BlockEditor) -> Vec<String> {
        editor
            .blocks()
            .iter()
            .map(|block| match &block.content {
                BlockContent::Text(text) => text.content.clone(),
                other => format!("{:?}", other.block_type()),
            })
            .collect()
    }

    fn orders(editor: &BlockEditor) -> Vec<usize> {
        editor.blocks().iter().map(|block| block.order).collect()
    }

    #[test]
    fn empty_seed_becomes_baseline() {
        let editor = BlockEditor::new(vec![]);
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.to_markup(), "<p></p>");
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn seed_is_sorted_and_renumbered() {
        let mut a = Block::new(TextBlock::paragraph("a"));
        a.order = 7;
        let mut b = Block::new(TextBlock::paragraph("b"));
        b.order = 3;
        let editor = BlockEditor::new(vec![a, b]);
        assert_eq!(contents(&editor), vec!["b", "a"]);
        assert_eq!(orders(&editor), vec![0, 1]);
    }

    #[test]
    fn seed_duplicate_ids_are_replaced() {
        let a = Block::new(TextBlock::paragraph("a"));
        let mut b = Block::new(TextBlock::paragraph("b"));
        b.id = a.id.clone();
        b.order = 1;
        let editor = BlockEditor::new(vec![a.clone(), b]);
        assert_eq!(editor.blocks()[0].id, a.id);
        assert_ne!(editor.blocks()[1].id, a.id);
    }

    #[test]
    fn add_appends_with_next_order() {
        let mut editor = three_paragraphs();
        let blocks = editor.add_block(create_block(BlockType::Divider));
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[3].order, 3);
        assert_eq!(blocks[3].block_type(), BlockType::Divider);
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn add_with_existing_id_gets_fresh_one() {
        let mut editor = three_paragraphs();
        let mut copy = editor.blocks()[0].clone();
        copy.order = 99;
        let patch = editor.apply(Cmd::Add { block: copy.clone() });
        let added = patch.changed.unwrap();
        assert_ne!(added, copy.id);
        assert_eq!(editor.position(&added), Some(3));
    }

    #[test]
    fn update_preserves_position_and_id() {
        let mut editor = three_paragraphs();
        let target = editor.blocks()[1].id.clone();
        let mut replacement = Block::new(TextBlock {
            content: "Two".into(),
            text_type: TextType::Heading2,
        });
        replacement.order = 42;

        editor.update_block(&target, replacement);

        let updated = &editor.blocks()[1];
        assert_eq!(updated.id, target);
        assert_eq!(updated.order, 1);
        assert_eq!(contents(&editor), vec!["one", "Two", "three"]);
    }

    #[test]
    fn update_of_deleted_block_is_discarded() {
        let mut editor = three_paragraphs();
        let target = editor.blocks()[2].id.clone();
        editor.delete_block(&target);
        let before = editor.clone();

        let patch = editor.apply(Cmd::Update {
            id: target,
            block: Block::new(VideoBlock {
                url: "https://youtu.be/abc".into(),
                ..Default::default()
            }),
        });

        assert!(patch.is_noop());
        assert_eq!(editor, before);
    }

    #[test]
    fn update_repairs_ragged_table() {
        let mut editor = BlockEditor::new(vec![create_block(BlockType::Table)]);
        let id = editor.blocks()[0].id.clone();
        editor.update_block(
            &id,
            Block::new(TableBlock {
                headers: vec!["A".into(), "B".into(), "C".into()],
                rows: vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into(), "4".into()]],
            }),
        );
        let BlockContent::Table(table) = &editor.blocks()[0].content else {
            panic!("expected table");
        };
        assert!(table.rows.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn update_keeps_checklist_flags_in_step() {
        let mut editor = BlockEditor::new(vec![create_block(BlockType::List)]);
        let id = editor.blocks()[0].id.clone();
        editor.update_block(
            &id,
            Block::new(ListBlock {
                items: vec!["a".into(), "b".into(), "c".into()],
                list_type: ListType::Checklist,
                checked: vec![true],
            }),
        );
        let BlockContent::List(list) = &editor.blocks()[0].content else {
            panic!("expected list");
        };
        assert_eq!(list.checked, vec![true, false, false]);
    }

    #[test]
    fn update_detects_video_platform() {
        let mut editor = BlockEditor::new(vec![create_block(BlockType::Video)]);
        let id = editor.blocks()[0].id.clone();
        editor.update_block(
            &id,
            Block::new(VideoBlock {
                url: "https://vimeo.com/76979871".into(),
                ..Default::default()
            }),
        );
        let BlockContent::Video(video) = &editor.blocks()[0].content else {
            panic!("expected video");
        };
        assert_eq!(video.platform, Some(VideoPlatform::Vimeo));
    }

    #[test]
    fn delete_middle_of_three() {
        let mut editor = three_paragraphs();
        let middle = editor.blocks()[1].id.clone();
        let blocks = editor.delete_block(&middle);
        assert_eq!(blocks.len(), 2);
        assert_eq!(orders(&editor), vec![0, 1]);
        assert_eq!(contents(&editor), vec!["one", "three"]);
    }

    #[test]
    fn delete_last_remaining_block_serializes_baseline() {
        let mut editor = BlockEditor::from_markup("<p>only</p>");
        let id = editor.blocks()[0].id.clone();
        editor.delete_block(&id);
        assert!(editor.is_empty());
        assert_eq!(editor.to_markup(), "<p></p>");
    }

    #[rstest]
    #[case::first_up(0, Direction::Up)]
    #[case::last_down(2, Direction::Down)]
    fn boundary_move_is_noop(#[case] index: usize, #[case] direction: Direction) {
        let mut editor = three_paragraphs();
        let id = editor.blocks()[index].id.clone();
        let before = editor.clone();
        let markup = editor.to_markup();

        let patch = editor.apply(Cmd::Move { id, direction });

        assert!(patch.is_noop());
        assert_eq!(patch.version, 0);
        assert_eq!(editor, before);
        assert_eq!(editor.to_markup(), markup);
    }

    #[rstest]
    #[case::down(0, Direction::Down, vec!["two", "one", "three"])]
    #[case::up(2, Direction::Up, vec!["one", "three", "two"])]
    fn move_swaps_with_neighbour(
        #[case] index: usize,
        #[case] direction: Direction,
        #[case] expected: Vec<&str>,
    ) {
        let mut editor = three_paragraphs();
        let id = editor.blocks()[index].id.clone();
        editor.move_block(&id, direction);
        assert_eq!(contents(&editor), expected);
        assert_eq!(orders(&editor), vec![0, 1, 2]);
    }

    #[test]
    fn version_counts_only_effective_commands() {
        let mut editor = three_paragraphs();
        let unknown = BlockId::generate();
        editor.delete_block(&unknown);
        assert_eq!(editor.version(), 0);
        let first = editor.blocks()[0].id.clone();
        editor.delete_block(&first);
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(BlockEditor::from_bytes(&[0xff, 0xfe]).is_err());
        let editor = BlockEditor::from_bytes(b"<h1>Hi</h1>").unwrap();
        assert_eq!(editor.to_markup(), "<h1>Hi</h1>");
    }
}
