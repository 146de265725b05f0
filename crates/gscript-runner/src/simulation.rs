use std::collections::BTreeMap;

use gscript_events::{EntityKind, EventKind};
use gscript_host::{ExecutionContext, Npc, NpcCapabilities, NpcEvent, Weapon, WeaponEvent};
use tracing::{debug, info};

use crate::config::DispatchConfig;
use crate::scenario::{NpcSpec, Scenario, ScenarioError, ScenarioEvent, WeaponSpec};
use crate::scripts::ScriptRegistry;
use crate::tracing_host::TracingHost;

/// What happened during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    /// Events handed to a handler
    pub delivered: usize,
    /// NPC events dropped because the NPC declared no slot for them
    pub skipped: usize,
    /// Diagnostic lines reported by the handlers, in order
    pub failures: Vec<String>,
    /// Last negotiated capabilities per NPC id
    pub capabilities: BTreeMap<u32, NpcCapabilities>,
}

struct LoadedWeapon {
    weapon: Weapon,
    context: ExecutionContext<WeaponEvent>,
}

impl LoadedWeapon {
    /// Drain the queue through the host's own handlers
    fn run(&mut self, host: &TracingHost) -> usize {
        let weapon = &self.weapon;
        let mut delivered = 0;
        self.context.drain(|event| {
            if host.deliver_weapon(weapon, event) {
                delivered += 1;
            }
        });
        delivered
    }
}

/// A small game server: owns NPCs and weapons and delivers events to them
/// through a [`TracingHost`].
///
/// NPC events are gated on the capabilities each NPC reported at creation
/// when `skip_unhandled` is set. Weapon events go through the weapon's
/// execution queue and are drained straight away, through the same host
/// handler table as NPC events.
pub struct Simulation {
    host: TracingHost,
    registry: ScriptRegistry,
    dispatch: DispatchConfig,
    npcs: BTreeMap<u32, Npc>,
    weapons: BTreeMap<String, LoadedWeapon>,
    delivered: usize,
    skipped: usize,
}

impl Simulation {
    pub fn new(registry: ScriptRegistry, dispatch: DispatchConfig) -> Self {
        Self {
            host: TracingHost::new(),
            registry,
            dispatch,
            npcs: BTreeMap::new(),
            weapons: BTreeMap::new(),
            delivered: 0,
            skipped: 0,
        }
    }

    /// Load every entity in `scenario`, deliver its events and report
    pub fn run(
        scenario: &Scenario,
        registry: ScriptRegistry,
        dispatch: DispatchConfig,
    ) -> Result<SimulationReport, ScenarioError> {
        let mut simulation = Self::new(registry, dispatch);
        for spec in &scenario.npcs {
            simulation.add_npc(spec)?;
        }
        for spec in &scenario.weapons {
            simulation.add_weapon(spec)?;
        }
        for event in &scenario.events {
            simulation.send(event)?;
        }

        let report = simulation.report();
        info!(
            "Scenario finished: {} delivered, {} skipped, {} failures",
            report.delivered,
            report.skipped,
            report.failures.len()
        );
        Ok(report)
    }

    pub fn host(&self) -> &TracingHost {
        &self.host
    }

    /// Place an NPC and deliver `npc.created` to it.
    ///
    /// An NPC with the same id is replaced, along with its capabilities.
    pub fn add_npc(&mut self, spec: &NpcSpec) -> Result<(), ScenarioError> {
        let script =
            self.registry
                .npc_script(&spec.script)
                .ok_or_else(|| ScenarioError::UnknownScript {
                    entity: EntityKind::Npc,
                    script: spec.script.clone(),
                })?;
        let npc = Npc::new(spec.id, spec.level.as_str(), spec.x, spec.y).with_script(script);

        if self.npcs.contains_key(&spec.id) {
            debug!(target: "host", "Replacing NPC {}", spec.id);
            self.host.forget_npc(spec.id);
        }

        let created = NpcEvent::created(spec.args.iter().cloned());
        if self.host.deliver_npc(&npc, &created) {
            self.delivered += 1;
        }
        self.npcs.insert(spec.id, npc);
        Ok(())
    }

    /// Load a weapon and queue `weapon.created` for it
    pub fn add_weapon(&mut self, spec: &WeaponSpec) -> Result<(), ScenarioError> {
        let script = self.registry.weapon_script(&spec.script).ok_or_else(|| {
            ScenarioError::UnknownScript {
                entity: EntityKind::Weapon,
                script: spec.script.clone(),
            }
        })?;

        let mut loaded = LoadedWeapon {
            weapon: Weapon::new(spec.name.as_str()).with_script(script),
            context: ExecutionContext::new(),
        };
        loaded.context.add_action(WeaponEvent::created([]));
        self.delivered += loaded.run(&self.host);

        if self.weapons.insert(spec.name.clone(), loaded).is_some() {
            debug!(target: "host", "Replaced weapon {}", spec.name);
        }
        Ok(())
    }

    /// Deliver one scenario event.
    ///
    /// Returns whether the event reached a handler; `false` means it was
    /// skipped by capability gating.
    pub fn send(&mut self, event: &ScenarioEvent) -> Result<bool, ScenarioError> {
        match event.event.entity() {
            EntityKind::Npc => self.send_npc(event),
            EntityKind::Weapon => self.send_weapon(event),
        }
    }

    fn send_npc(&mut self, event: &ScenarioEvent) -> Result<bool, ScenarioError> {
        let id = event.npc_id()?;
        let npc = self.npcs.get(&id).ok_or(ScenarioError::UnknownNpc(id))?;
        let payload = event.to_npc_event(&self.registry)?;

        if self.dispatch.skip_unhandled && !self.is_handled(id, event.event) {
            debug!(target: "host", "Skipping {} for NPC {}: no callback", event.event, id);
            self.skipped += 1;
            return Ok(false);
        }

        let delivered = self.host.deliver_npc(npc, &payload);
        if delivered {
            self.delivered += 1;
        }
        Ok(delivered)
    }

    fn send_weapon(&mut self, event: &ScenarioEvent) -> Result<bool, ScenarioError> {
        let name = event.weapon_name()?;
        let payload = event.to_weapon_event()?;
        let loaded = self
            .weapons
            .get_mut(name)
            .ok_or_else(|| ScenarioError::UnknownWeapon(name.to_string()))?;

        loaded.context.add_action(payload);
        let delivered = loaded.run(&self.host);
        self.delivered += delivered;
        Ok(delivered > 0)
    }

    /// NPCs that never reported capabilities get every event
    fn is_handled(&self, npc_id: u32, kind: EventKind) -> bool {
        self.host
            .capabilities_of(npc_id)
            .map_or(true, |capabilities| capabilities.handles(kind))
    }

    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            delivered: self.delivered,
            skipped: self.skipped,
            failures: self.host.errors(),
            capabilities: self.host.capabilities(),
        }
    }
}
