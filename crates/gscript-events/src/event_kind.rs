use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Error returned when parsing an unknown event name
pub type ParseEventKindError = strum::ParseError;

/// Every event the host can deliver to a script.
///
/// The string form is the event name the host registers handlers under
/// (`npc.created`, `weapon.serverside`, ...). It is used for `Display`,
/// `FromStr` and serde alike.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum EventKind {
    #[strum(to_string = "npc.created")]
    NpcCreated,
    #[strum(to_string = "npc.playerchats")]
    NpcPlayerChats,
    #[strum(to_string = "npc.playerenters")]
    NpcPlayerEnters,
    #[strum(to_string = "npc.playerleaves")]
    NpcPlayerLeaves,
    #[strum(to_string = "npc.playertouchsme")]
    NpcPlayerTouchsMe,
    #[strum(to_string = "npc.timeout")]
    NpcTimeout,
    #[strum(to_string = "npc.trigger")]
    NpcTrigger,
    #[strum(to_string = "weapon.created")]
    WeaponCreated,
    #[strum(to_string = "weapon.serverside")]
    WeaponServerSide,
}

/// Which kind of entity an event is delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum EntityKind {
    #[strum(to_string = "npc")]
    Npc,
    #[strum(to_string = "weapon")]
    Weapon,
}

impl EventKind {
    /// All event kinds, in registration order
    pub const ALL: [EventKind; 9] = [
        EventKind::NpcCreated,
        EventKind::NpcPlayerChats,
        EventKind::NpcPlayerEnters,
        EventKind::NpcPlayerLeaves,
        EventKind::NpcPlayerTouchsMe,
        EventKind::NpcTimeout,
        EventKind::NpcTrigger,
        EventKind::WeaponCreated,
        EventKind::WeaponServerSide,
    ];

    /// The name the host registers this event under
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    pub fn entity(&self) -> EntityKind {
        match self {
            EventKind::WeaponCreated | EventKind::WeaponServerSide => EntityKind::Weapon,
            _ => EntityKind::Npc,
        }
    }

    /// Script slot the event is forwarded to.
    ///
    /// `npc.trigger` has no slot: its callable is supplied with the event.
    pub fn slot(&self) -> Option<&'static str> {
        match self {
            EventKind::NpcCreated | EventKind::WeaponCreated => Some("onCreated"),
            EventKind::NpcPlayerChats => Some("onPlayerChats"),
            EventKind::NpcPlayerEnters => Some("onPlayerEnters"),
            EventKind::NpcPlayerLeaves => Some("onPlayerLeaves"),
            EventKind::NpcPlayerTouchsMe => Some("onPlayerTouchsMe"),
            EventKind::NpcTimeout => Some("onTimeout"),
            EventKind::NpcTrigger => None,
            EventKind::WeaponServerSide => Some("onActionServerSide"),
        }
    }

    /// Human readable shape of the arguments forwarded after the entity
    pub fn argument_shape(&self) -> &'static str {
        match self {
            EventKind::NpcCreated | EventKind::NpcTimeout | EventKind::WeaponCreated => "args...",
            EventKind::NpcPlayerChats => "player, message",
            EventKind::NpcPlayerEnters
            | EventKind::NpcPlayerLeaves
            | EventKind::NpcPlayerTouchsMe => "player",
            EventKind::NpcTrigger => "handler, data",
            EventKind::WeaponServerSide => "player, data",
        }
    }
}

impl TryFrom<String> for EventKind {
    type Error = ParseEventKindError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}
