//! Fixed inline styling for emitted markup.

/// Vertical spacing around block-level media and structural elements
pub const BLOCK_MARGIN: &str = "margin: 20px 0;";

pub const IMAGE: &str = "max-width: 100%; border-radius: 8px;";

/// 16:9 responsive container (padding-bottom aspect-ratio)
pub const VIDEO_WRAPPER: &str =
    "position: relative; padding-bottom: 56.25%; height: 0; overflow: hidden;";

pub const VIDEO_FRAME: &str = "position: absolute; top: 0; left: 0; width: 100%; height: 100%;";

pub const TABLE: &str = "width: 100%; border-collapse: collapse; margin: 20px 0;";

pub const TABLE_CELL: &str = "border: 1px solid #ddd; padding: 8px;";

pub const CENTERED: &str = "text-align: center; margin: 20px 0;";

pub const QUOTE: &str = "margin: 20px 0; padding-left: 16px; border-left: 4px solid #ddd;";

pub const CHECKLIST: &str = "list-style: none; padding-left: 0; margin: 20px 0;";
