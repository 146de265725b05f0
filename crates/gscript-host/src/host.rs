use std::fmt;

use gscript_events::{EntityKind, EventKind};

use crate::capabilities::NpcCapabilities;
use crate::entity::{Npc, Weapon};
use crate::event::{NpcEvent, WeaponEvent};

/// Call-in points the host provides to the bridge.
///
/// Both calls are made while the host is dispatching an event, so
/// implementations that record state need interior mutability.
pub trait ScriptHost {
    /// Receives the NPC's capability mask once per `npc.created`
    fn report_capabilities(&self, npc: &Npc, capabilities: NpcCapabilities);

    /// Receives one diagnostic line per failed callback
    fn report_error(&self, message: &str);
}

/// Handler the host invokes for NPC events
pub type NpcHandler = fn(&dyn ScriptHost, &Npc, &NpcEvent);
/// Handler the host invokes for weapon events
pub type WeaponHandler = fn(&dyn ScriptHost, &Weapon, &WeaponEvent);

/// A registered event handler
#[derive(Clone, Copy)]
pub enum EventHandler {
    Npc(NpcHandler),
    Weapon(WeaponHandler),
}

impl EventHandler {
    pub fn entity(&self) -> EntityKind {
        match self {
            EventHandler::Npc(_) => EntityKind::Npc,
            EventHandler::Weapon(_) => EntityKind::Weapon,
        }
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventHandler::Npc(_) => f.write_str("EventHandler::Npc"),
            EventHandler::Weapon(_) => f.write_str("EventHandler::Weapon"),
        }
    }
}

/// Receives the handler table at startup
pub trait HandlerRegistrar {
    fn register_handler(&mut self, kind: EventKind, handler: EventHandler);
}
