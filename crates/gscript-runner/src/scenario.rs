//! Scenario files: a set of NPCs and weapons plus the events a game server
//! would deliver to them, in order.
//!
//! ```toml
//! [[npcs]]
//! id = 1
//! level = "town.nw"
//! x = 10
//! y = 5
//! script = "greeter"
//!
//! [[weapons]]
//! name = "Bow"
//! script = "bow"
//!
//! [[events]]
//! event = "npc.playerchats"
//! npc = 1
//! player = { id = 7, account = "alice" }
//! message = "hello there"
//!
//! [[events]]
//! event = "weapon.serverside"
//! weapon = "Bow"
//! player = { id = 7, account = "alice" }
//! data = "fire"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gscript_events::{EntityKind, EventKind, PlayerRef, ScriptValue};
use gscript_host::{NpcEvent, WeaponEvent};
use serde::Deserialize;
use thiserror::Error;

use crate::scripts::ScriptRegistry;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no {entity} script named {script}")]
    UnknownScript { entity: EntityKind, script: String },
    #[error("no trigger action named {0}")]
    UnknownTrigger(String),
    #[error("scenario has no NPC with id {0}")]
    UnknownNpc(u32),
    #[error("scenario has no weapon named {0}")]
    UnknownWeapon(String),
    #[error("{event} event is missing `{field}`")]
    MissingField {
        event: EventKind,
        field: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub npcs: Vec<NpcSpec>,
    #[serde(default)]
    pub weapons: Vec<WeaponSpec>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

/// An NPC placed on a level when the scenario starts
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NpcSpec {
    pub id: u32,
    pub level: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub script: String,
    /// Arguments passed with `npc.created`
    #[serde(default)]
    pub args: Vec<ScriptValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    pub script: String,
}

/// One event, addressed to an NPC or a weapon.
///
/// Which of the optional fields are required depends on `event`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioEvent {
    pub event: EventKind,
    #[serde(default)]
    pub npc: Option<u32>,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub player: Option<PlayerRef>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ScriptValue>,
    #[serde(default)]
    pub args: Vec<ScriptValue>,
    /// Trigger action name, for `npc.trigger`
    #[serde(default)]
    pub action: Option<String>,
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(content)?)
    }
}

impl ScenarioEvent {
    fn missing(&self, field: &'static str) -> ScenarioError {
        ScenarioError::MissingField {
            event: self.event,
            field,
        }
    }

    fn player(&self) -> Result<PlayerRef, ScenarioError> {
        self.player.clone().ok_or_else(|| self.missing("player"))
    }

    /// The NPC this event is addressed to
    pub fn npc_id(&self) -> Result<u32, ScenarioError> {
        self.npc.ok_or_else(|| self.missing("npc"))
    }

    /// The weapon this event is addressed to
    pub fn weapon_name(&self) -> Result<&str, ScenarioError> {
        self.weapon.as_deref().ok_or_else(|| self.missing("weapon"))
    }

    /// Build the NPC payload, resolving trigger actions through `registry`
    pub fn to_npc_event(&self, registry: &ScriptRegistry) -> Result<NpcEvent, ScenarioError> {
        let event = match self.event {
            EventKind::NpcCreated => NpcEvent::created(self.args.iter().cloned()),
            EventKind::NpcTimeout => NpcEvent::timeout(self.args.iter().cloned()),
            EventKind::NpcPlayerChats => NpcEvent::PlayerChats {
                player: self.player()?,
                message: self.message.clone().ok_or_else(|| self.missing("message"))?,
            },
            EventKind::NpcPlayerEnters => NpcEvent::PlayerEnters {
                player: self.player()?,
            },
            EventKind::NpcPlayerLeaves => NpcEvent::PlayerLeaves {
                player: self.player()?,
            },
            EventKind::NpcPlayerTouchsMe => NpcEvent::PlayerTouchsMe {
                player: self.player()?,
            },
            EventKind::NpcTrigger => {
                let name = self.action.as_deref().ok_or_else(|| self.missing("action"))?;
                let action = registry
                    .trigger(name)
                    .ok_or_else(|| ScenarioError::UnknownTrigger(name.to_string()))?;
                NpcEvent::Trigger {
                    action,
                    data: self.data.clone().unwrap_or_default(),
                }
            }
            EventKind::WeaponCreated | EventKind::WeaponServerSide => {
                return Err(self.missing("npc"));
            }
        };
        Ok(event)
    }

    pub fn to_weapon_event(&self) -> Result<WeaponEvent, ScenarioError> {
        match self.event {
            EventKind::WeaponCreated => Ok(WeaponEvent::created(self.args.iter().cloned())),
            EventKind::WeaponServerSide => Ok(WeaponEvent::ServerSide {
                player: self.player()?,
                data: self.data.clone().unwrap_or_default(),
            }),
            _ => Err(self.missing("weapon")),
        }
    }
}
