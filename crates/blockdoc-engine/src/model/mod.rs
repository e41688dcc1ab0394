pub mod block;
pub mod factory;
pub mod video;

pub use block::*;
pub use factory::{baseline_document, create_block};
pub use video::{VideoPlatform, resolve_embed_url};
