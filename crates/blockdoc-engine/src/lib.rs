//! Block-based document core: the typed block model, markup import, the
//! block editor and markup serialization.
//!
//! ```
//! use blockdoc_engine::{BlockEditor, import_markup, serialize_blocks};
//!
//! let blocks = import_markup("<h2>Title</h2><p>Body text</p>");
//! assert_eq!(blocks.len(), 2);
//!
//! let editor = BlockEditor::new(blocks);
//! assert_eq!(editor.to_markup(), serialize_blocks(editor.blocks()));
//! ```

pub mod editing;
pub mod import;
pub mod io;
pub mod model;
pub mod render;

// Re-export key types for easier usage
pub use editing::{BlockEditor, Cmd, Direction, InvariantError, Patch, check_invariants};
pub use import::import_markup;
pub use io::*;
pub use model::*;
pub use render::{render_block, serialize_blocks};
