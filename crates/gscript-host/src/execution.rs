use std::collections::VecDeque;

use gscript_events::{PlayerRef, ScriptValue};

use crate::entity::{Npc, Weapon};
use crate::event::{NpcEvent, WeaponEvent};
use crate::host::ScriptHost;
use crate::registry::EventTable;

/// Per-entity queue of events waiting to be delivered.
///
/// The host queues work as it happens (a weapon script finished loading, a
/// player fired a weapon) and drains the queue on its own update tick.
#[derive(Debug)]
pub struct ExecutionContext<E> {
    actions: VecDeque<E>,
}

impl<E> ExecutionContext<E> {
    pub fn new() -> Self {
        Self {
            actions: VecDeque::new(),
        }
    }

    pub fn add_action(&mut self, action: E) {
        self.actions.push_back(action);
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Hand every queued action to `deliver` in order.
    ///
    /// Returns the number of actions delivered.
    pub fn drain<F>(&mut self, mut deliver: F) -> usize
    where
        F: FnMut(&E),
    {
        let mut delivered = 0;
        while let Some(action) = self.actions.pop_front() {
            deliver(&action);
            delivered += 1;
        }
        delivered
    }

    /// Drop every pending action, returning how many were discarded
    pub fn reset_execution(&mut self) -> usize {
        let dropped = self.actions.len();
        self.actions.clear();
        dropped
    }
}

impl<E> Default for ExecutionContext<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext<NpcEvent> {
    /// Deliver every queued event to `npc` in order.
    ///
    /// Returns the number of events delivered.
    pub fn run(&mut self, table: &EventTable, host: &dyn ScriptHost, npc: &Npc) -> usize {
        self.drain(|event| table.dispatch_npc(host, npc, event))
    }
}

impl ExecutionContext<WeaponEvent> {
    /// Queue `weapon.serverside` for a player's weapon action
    pub fn queue_weapon_action(&mut self, player: PlayerRef, data: impl Into<ScriptValue>) {
        self.add_action(WeaponEvent::server_side(player, data));
    }

    /// Deliver every queued event to `weapon` in order.
    ///
    /// Returns the number of events delivered.
    pub fn run(&mut self, table: &EventTable, host: &dyn ScriptHost, weapon: &Weapon) -> usize {
        self.drain(|event| table.dispatch_weapon(host, weapon, event))
    }
}
