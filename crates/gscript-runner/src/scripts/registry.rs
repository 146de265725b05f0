use std::collections::HashMap;

use gscript_events::EntityKind;
use gscript_host::{NpcScript, TriggerCallback, WeaponScript};
use tracing::debug;

use super::{bow, gate_guard, greeter, triggers};

/// Factory for a fresh script instance
#[derive(Debug, Clone, Copy)]
pub enum ScriptFactory {
    Npc(fn() -> NpcScript),
    Weapon(fn() -> WeaponScript),
}

impl ScriptFactory {
    pub fn entity(&self) -> EntityKind {
        match self {
            ScriptFactory::Npc(_) => EntityKind::Npc,
            ScriptFactory::Weapon(_) => EntityKind::Weapon,
        }
    }
}

/// Registry of available scripts and trigger actions, by ID
pub struct ScriptRegistry {
    factories: HashMap<String, ScriptFactory>,
    triggers: HashMap<String, TriggerCallback>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            triggers: HashMap::new(),
        }
    }

    /// Registry holding every built-in script
    pub fn with_builtin_scripts() -> Self {
        let mut registry = Self::new();
        registry.register(greeter::ID, ScriptFactory::Npc(greeter::script));
        registry.register(gate_guard::ID, ScriptFactory::Npc(gate_guard::script));
        registry.register(bow::ID, ScriptFactory::Weapon(bow::script));
        registry.register_trigger(triggers::ANNOUNCE, triggers::announce());
        registry.register_trigger(triggers::FAIL, triggers::fail());
        registry
    }

    pub fn register(&mut self, id: impl Into<String>, factory: ScriptFactory) {
        let id = id.into();
        debug!(target: "scripting", "Registering script factory: {}", id);
        self.factories.insert(id, factory);
    }

    pub fn register_trigger(&mut self, id: impl Into<String>, action: TriggerCallback) {
        let id = id.into();
        debug!(target: "scripting", "Registering trigger action: {}", id);
        self.triggers.insert(id, action);
    }

    pub fn factory(&self, id: &str) -> Option<ScriptFactory> {
        self.factories.get(id).copied()
    }

    /// Create an NPC script, if `id` names one
    pub fn npc_script(&self, id: &str) -> Option<NpcScript> {
        match self.factory(id)? {
            ScriptFactory::Npc(factory) => Some(factory()),
            ScriptFactory::Weapon(_) => None,
        }
    }

    /// Create a weapon script, if `id` names one
    pub fn weapon_script(&self, id: &str) -> Option<WeaponScript> {
        match self.factory(id)? {
            ScriptFactory::Weapon(factory) => Some(factory()),
            ScriptFactory::Npc(_) => None,
        }
    }

    pub fn trigger(&self, id: &str) -> Option<TriggerCallback> {
        self.triggers.get(id).cloned()
    }

    /// Script IDs with the entity they script, sorted by ID
    pub fn available_scripts(&self) -> Vec<(String, EntityKind)> {
        let mut scripts: Vec<_> = self
            .factories
            .iter()
            .map(|(id, factory)| (id.clone(), factory.entity()))
            .collect();
        scripts.sort();
        scripts
    }

    pub fn available_triggers(&self) -> Vec<String> {
        let mut triggers: Vec<_> = self.triggers.keys().cloned().collect();
        triggers.sort();
        triggers
    }
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::new()
    }
}
