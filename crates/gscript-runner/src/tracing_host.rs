use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use gscript_host::{
    EventHandler, EventKind, EventTable, HandlerRegistrar, Npc, NpcCapabilities, NpcEvent,
    ScriptHost, Weapon, WeaponEvent,
};
use tracing::{debug, error, warn};

/// Host that keeps its own handler table and reports through `tracing`.
///
/// Capability masks and error lines are also kept so callers can inspect
/// them after a run.
#[derive(Default)]
pub struct TracingHost {
    handlers: HashMap<EventKind, EventHandler>,
    capabilities: RefCell<BTreeMap<u32, NpcCapabilities>>,
    errors: RefCell<Vec<String>>,
}

impl TracingHost {
    /// Create a host with the event table already installed
    pub fn new() -> Self {
        let mut host = Self::default();
        let installed = EventTable::global().install(&mut host);
        debug!(target: "host", "Installed {} event handlers", installed);
        host
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn capabilities_of(&self, npc_id: u32) -> Option<NpcCapabilities> {
        self.capabilities.borrow().get(&npc_id).copied()
    }

    pub fn capabilities(&self) -> BTreeMap<u32, NpcCapabilities> {
        self.capabilities.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Forget an NPC's negotiated capabilities
    pub fn forget_npc(&self, npc_id: u32) {
        self.capabilities.borrow_mut().remove(&npc_id);
    }

    /// Call the handler registered for the event's kind
    pub fn deliver_npc(&self, npc: &Npc, event: &NpcEvent) -> bool {
        match self.handlers.get(&event.kind()) {
            Some(EventHandler::Npc(handler)) => {
                handler(self, npc, event);
                true
            }
            _ => {
                warn!(target: "host", "No NPC handler registered for {}", event.kind());
                false
            }
        }
    }

    pub fn deliver_weapon(&self, weapon: &Weapon, event: &WeaponEvent) -> bool {
        match self.handlers.get(&event.kind()) {
            Some(EventHandler::Weapon(handler)) => {
                handler(self, weapon, event);
                true
            }
            _ => {
                warn!(target: "host", "No weapon handler registered for {}", event.kind());
                false
            }
        }
    }
}

impl ScriptHost for TracingHost {
    fn report_capabilities(&self, npc: &Npc, capabilities: NpcCapabilities) {
        debug!(
            target: "host",
            "NPC {} at {} handles {:?}",
            npc.id(),
            npc.location(),
            capabilities.slot_names()
        );
        self.capabilities
            .borrow_mut()
            .insert(npc.id(), capabilities);
    }

    fn report_error(&self, message: &str) {
        error!(target: "scripting", "{}", message);
        self.errors.borrow_mut().push(message.to_string());
    }
}

impl HandlerRegistrar for TracingHost {
    fn register_handler(&mut self, kind: EventKind, handler: EventHandler) {
        if self.handlers.insert(kind, handler).is_some() {
            warn!(target: "host", "Replaced handler for {}", kind);
        }
    }
}
