use crate::model::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Block the command touched; `None` when the command was discarded
    pub changed: Option<BlockId>,
    pub version: u64,
}

impl Patch {
    pub fn is_noop(&self) -> bool {
        self.changed.is_none()
    }
}
