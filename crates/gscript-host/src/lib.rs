/// Host-side bridge between a game server and its entity scripts
///
/// The host owns NPCs and weapons and decides when events happen. This crate
/// provides the handlers it registers for those events: each one looks up the
/// optional callback slot on the entity, forwards the event's arguments, and
/// turns any failure into a single diagnostic line for the host.
///
/// NPC creation additionally negotiates capabilities: the set of slots the
/// NPC implements is reported to the host as a bitmask so the host can skip
/// events nobody listens for.
pub mod capabilities;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod event;
pub mod execution;
pub mod host;
pub mod registry;
pub mod script;

pub use capabilities::NpcCapabilities;
pub use entity::{Npc, Weapon};
pub use error::{DispatchFailure, FailureSite, ScriptError, UnknownSlotError};
pub use event::{NpcEvent, WeaponEvent};
pub use execution::ExecutionContext;
pub use host::{EventHandler, HandlerRegistrar, NpcHandler, ScriptHost, WeaponHandler};
pub use registry::EventTable;
pub use script::{NpcScript, ScriptResult, TriggerCallback, WeaponScript};

pub use gscript_events::{EntityKind, EventKind, PlayerRef, ScriptValue};
