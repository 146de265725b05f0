use std::collections::BTreeMap;
use std::sync::OnceLock;

use gscript_events::EventKind;
use tracing::{debug, warn};

use crate::dispatch;
use crate::entity::{Npc, Weapon};
use crate::event::{NpcEvent, WeaponEvent};
use crate::host::{EventHandler, HandlerRegistrar, ScriptHost};

/// Mapping from event kind to the handler the host should call.
///
/// Built once per process on first use and never changed afterwards.
#[derive(Debug)]
pub struct EventTable {
    handlers: BTreeMap<EventKind, EventHandler>,
}

impl EventTable {
    fn build() -> Self {
        let entries = [
            (EventKind::NpcCreated, EventHandler::Npc(dispatch::npc_created)),
            (
                EventKind::NpcPlayerChats,
                EventHandler::Npc(dispatch::npc_player_chats),
            ),
            (
                EventKind::NpcPlayerEnters,
                EventHandler::Npc(dispatch::npc_player_enters),
            ),
            (
                EventKind::NpcPlayerLeaves,
                EventHandler::Npc(dispatch::npc_player_leaves),
            ),
            (
                EventKind::NpcPlayerTouchsMe,
                EventHandler::Npc(dispatch::npc_player_touchs_me),
            ),
            (EventKind::NpcTimeout, EventHandler::Npc(dispatch::npc_timeout)),
            (EventKind::NpcTrigger, EventHandler::Npc(dispatch::npc_trigger)),
            (
                EventKind::WeaponCreated,
                EventHandler::Weapon(dispatch::weapon_created),
            ),
            (
                EventKind::WeaponServerSide,
                EventHandler::Weapon(dispatch::weapon_server_side),
            ),
        ];

        Self {
            handlers: entries.into_iter().collect(),
        }
    }

    /// The process-wide table
    pub fn global() -> &'static EventTable {
        static TABLE: OnceLock<EventTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            debug!(target: "scripting", "Building event handler table");
            EventTable::build()
        })
    }

    pub fn get(&self, kind: EventKind) -> Option<EventHandler> {
        self.handlers.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (EventKind, EventHandler)> + '_ {
        self.handlers.iter().map(|(kind, handler)| (*kind, *handler))
    }

    /// Register every handler with the host, returning how many were installed
    pub fn install(&self, registrar: &mut dyn HandlerRegistrar) -> usize {
        for (kind, handler) in self.iter() {
            debug!(target: "scripting", "Registering handler for {}", kind);
            registrar.register_handler(kind, handler);
        }
        self.handlers.len()
    }

    /// Route an NPC event to its handler by the payload's kind
    pub fn dispatch_npc(&self, host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
        match self.get(event.kind()) {
            Some(EventHandler::Npc(handler)) => handler(host, npc, event),
            other => warn!(
                target: "scripting",
                "No NPC handler registered for {} (found {:?})",
                event.kind(),
                other
            ),
        }
    }

    /// Route a weapon event to its handler by the payload's kind
    pub fn dispatch_weapon(&self, host: &dyn ScriptHost, weapon: &Weapon, event: &WeaponEvent) {
        match self.get(event.kind()) {
            Some(EventHandler::Weapon(handler)) => handler(host, weapon, event),
            other => warn!(
                target: "scripting",
                "No weapon handler registered for {} (found {:?})",
                event.kind(),
                other
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_kind() {
        let table = EventTable::global();
        assert_eq!(table.len(), EventKind::ALL.len());
        for kind in EventKind::ALL {
            let handler = table.get(kind).expect("handler registered");
            assert_eq!(handler.entity(), kind.entity());
        }
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let kinds: Vec<_> = EventTable::global().iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, EventKind::ALL.to_vec());
    }

    #[test]
    fn test_global_is_built_once() {
        assert!(std::ptr::eq(EventTable::global(), EventTable::global()));
    }
}
