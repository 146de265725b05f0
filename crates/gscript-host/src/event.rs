use std::fmt;
use std::sync::Arc;

use gscript_events::{EventKind, PlayerRef, ScriptValue};

use crate::entity::Npc;
use crate::script::{ScriptResult, TriggerCallback};

/// An event delivered to an NPC, with its arguments in forwarding order
#[derive(Clone)]
pub enum NpcEvent {
    Created { args: Vec<ScriptValue> },
    PlayerChats { player: PlayerRef, message: String },
    PlayerEnters { player: PlayerRef },
    PlayerLeaves { player: PlayerRef },
    PlayerTouchsMe { player: PlayerRef },
    Timeout { args: Vec<ScriptValue> },
    /// A trigger action: `action` is invoked directly with the NPC as
    /// receiver, whatever slots the NPC implements.
    Trigger {
        action: TriggerCallback,
        data: ScriptValue,
    },
}

impl NpcEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NpcEvent::Created { .. } => EventKind::NpcCreated,
            NpcEvent::PlayerChats { .. } => EventKind::NpcPlayerChats,
            NpcEvent::PlayerEnters { .. } => EventKind::NpcPlayerEnters,
            NpcEvent::PlayerLeaves { .. } => EventKind::NpcPlayerLeaves,
            NpcEvent::PlayerTouchsMe { .. } => EventKind::NpcPlayerTouchsMe,
            NpcEvent::Timeout { .. } => EventKind::NpcTimeout,
            NpcEvent::Trigger { .. } => EventKind::NpcTrigger,
        }
    }

    pub fn created(args: impl IntoIterator<Item = ScriptValue>) -> Self {
        NpcEvent::Created {
            args: args.into_iter().collect(),
        }
    }

    pub fn timeout(args: impl IntoIterator<Item = ScriptValue>) -> Self {
        NpcEvent::Timeout {
            args: args.into_iter().collect(),
        }
    }

    pub fn player_chats(player: PlayerRef, message: impl Into<String>) -> Self {
        NpcEvent::PlayerChats {
            player,
            message: message.into(),
        }
    }

    pub fn trigger<F>(action: F, data: impl Into<ScriptValue>) -> Self
    where
        F: Fn(&Npc, &ScriptValue) -> ScriptResult + Send + Sync + 'static,
    {
        NpcEvent::Trigger {
            action: Arc::new(action),
            data: data.into(),
        }
    }
}

impl fmt::Debug for NpcEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NpcEvent::Created { args } => f.debug_struct("Created").field("args", args).finish(),
            NpcEvent::PlayerChats { player, message } => f
                .debug_struct("PlayerChats")
                .field("player", player)
                .field("message", message)
                .finish(),
            NpcEvent::PlayerEnters { player } => {
                f.debug_struct("PlayerEnters").field("player", player).finish()
            }
            NpcEvent::PlayerLeaves { player } => {
                f.debug_struct("PlayerLeaves").field("player", player).finish()
            }
            NpcEvent::PlayerTouchsMe { player } => f
                .debug_struct("PlayerTouchsMe")
                .field("player", player)
                .finish(),
            NpcEvent::Timeout { args } => f.debug_struct("Timeout").field("args", args).finish(),
            NpcEvent::Trigger { data, .. } => f
                .debug_struct("Trigger")
                .field("data", data)
                .finish_non_exhaustive(),
        }
    }
}

/// An event delivered to a weapon
#[derive(Debug, Clone, PartialEq)]
pub enum WeaponEvent {
    Created { args: Vec<ScriptValue> },
    ServerSide { player: PlayerRef, data: ScriptValue },
}

impl WeaponEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WeaponEvent::Created { .. } => EventKind::WeaponCreated,
            WeaponEvent::ServerSide { .. } => EventKind::WeaponServerSide,
        }
    }

    pub fn created(args: impl IntoIterator<Item = ScriptValue>) -> Self {
        WeaponEvent::Created {
            args: args.into_iter().collect(),
        }
    }

    pub fn server_side(player: PlayerRef, data: impl Into<ScriptValue>) -> Self {
        WeaponEvent::ServerSide {
            player,
            data: data.into(),
        }
    }
}
