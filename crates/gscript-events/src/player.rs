use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a connected player, as passed to script callbacks.
///
/// The host owns the player; scripts only ever see this handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: u32,
    pub account: String,
}

impl PlayerRef {
    pub fn new(id: u32, account: impl Into<String>) -> Self {
        Self {
            id,
            account: account.into(),
        }
    }
}

impl fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.account, self.id)
    }
}
