use std::any::Any;

use gscript_events::EventKind;
use strum_macros::Display;
use thiserror::Error;

/// Failure raised by a script callback.
///
/// `name` is the error's category (`TypeError`, `ReferenceError`, ...) and
/// `message` its text, both of which end up in the host diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} - {message}")]
pub struct ScriptError {
    pub name: String,
    pub message: String,
}

impl ScriptError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new("TypeError", message)
    }

    pub fn reference_error(message: impl Into<String>) -> Self {
        Self::new("ReferenceError", message)
    }

    /// Convert a caught panic payload
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "callback panicked".to_string());
        Self::new("Panic", message)
    }

    pub(crate) fn mismatched_payload(expected: EventKind, actual: EventKind) -> Self {
        Self::type_error(format!("{} handler received a {} payload", expected, actual))
    }
}

/// Where a failure happened, which picks the diagnostic prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FailureSite {
    #[strum(to_string = "NPC Exception")]
    Npc,
    #[strum(to_string = "NPC Timeout Exception")]
    NpcTimeout,
    #[strum(to_string = "NPC Trigger Exception")]
    NpcTrigger,
    #[strum(to_string = "Weapon Exception")]
    Weapon,
    #[strum(to_string = "Weapon Trigger Exception")]
    WeaponTrigger,
}

impl FailureSite {
    pub fn for_event(kind: EventKind) -> Self {
        match kind {
            EventKind::NpcCreated
            | EventKind::NpcPlayerChats
            | EventKind::NpcPlayerEnters
            | EventKind::NpcPlayerLeaves
            | EventKind::NpcPlayerTouchsMe => FailureSite::Npc,
            EventKind::NpcTimeout => FailureSite::NpcTimeout,
            EventKind::NpcTrigger => FailureSite::NpcTrigger,
            EventKind::WeaponCreated => FailureSite::Weapon,
            EventKind::WeaponServerSide => FailureSite::WeaponTrigger,
        }
    }
}

/// A callback failure caught at the dispatch boundary.
///
/// Its `Display` output is the one line handed to the host's error sink,
/// e.g. `NPC Exception at town,10,5: TypeError - x is undefined`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{site} at {location}: {source}")]
pub struct DispatchFailure {
    pub site: FailureSite,
    pub location: String,
    pub source: ScriptError,
}

impl DispatchFailure {
    pub fn new(site: FailureSite, location: impl Into<String>, source: ScriptError) -> Self {
        Self {
            site,
            location: location.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown capability slot: {0}")]
pub struct UnknownSlotError(pub String);
