/*!
 * # Block Editor
 *
 * Session-scoped mutation engine over one block sequence.
 *
 * ## Architecture Overview
 *
 * - A [`BlockEditor`] owns its `Vec<Block>` exclusively. There is no global
 *   "current document"; open as many editors as there are documents.
 * - All edits are **Commands** (`Cmd` enum). `apply` executes one and returns
 *   a [`Patch`] naming the block it touched and the new version.
 * - After every command `order` is `0..n-1`, ids are unique, table rows match
 *   the header width and checklist flags match the items.
 * - Commands that target a missing id (for example an upload finishing after
 *   its block was deleted) are discarded and logged at `debug`.
 *
 * ## Module Structure
 *
 * - **`editor`**: `BlockEditor` and the add/update/delete/move wrappers
 * - **`commands`**: `Cmd`, `Direction` and command execution
 * - **`invariants`**: sequence checks used by the editor and by tests
 * - **`patch`**: edit result metadata
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blockdoc_engine::editing::*;
 * use blockdoc_engine::model::{BlockType, create_block};
 *
 * // 1. Seed from persisted markup
 * let mut editor = BlockEditor::from_markup("<h2>Title</h2><p>Body text</p>");
 *
 * // 2. Apply edits via commands
 * let patch = editor.apply(Cmd::Add { block: create_block(BlockType::Divider) });
 * assert_eq!(patch.version, editor.version());
 *
 * // 3. Serialize on save
 * let markup = editor.to_markup();
 * assert!(markup.ends_with("<hr style=\"margin: 20px 0;\" />"));
 * ```
 */

pub mod commands;
pub mod editor;
pub mod invariants;
pub mod patch;

pub use commands::{Cmd, Direction};
pub use editor::BlockEditor;
pub use invariants::{InvariantError, check_document, check_invariants};
pub use patch::Patch;
