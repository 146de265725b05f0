//! Event handlers registered with the host.
//!
//! Every handler follows the same protocol: look up the optional slot on the
//! entity, invoke it with the entity as receiver and the event's arguments
//! in order, and turn a failure into one diagnostic for the host. A missing
//! slot is not an error. Nothing raised by a callback, including a panic,
//! crosses back into the host.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use gscript_events::EventKind;
use tracing::debug;

use crate::entity::{Npc, Weapon};
use crate::error::{DispatchFailure, FailureSite, ScriptError};
use crate::event::{NpcEvent, WeaponEvent};
use crate::host::ScriptHost;
use crate::script::ScriptResult;

fn run_guarded<F>(callback: F) -> ScriptResult
where
    F: FnOnce() -> ScriptResult,
{
    panic::catch_unwind(AssertUnwindSafe(callback))
        .unwrap_or_else(|payload| Err(ScriptError::from_panic(payload.as_ref())))
}

/// Invoke a slot if the script implements it
fn forward<C, F>(slot: &Option<Arc<C>>, call: F) -> ScriptResult
where
    C: ?Sized,
    F: FnOnce(&C) -> ScriptResult,
{
    match slot {
        Some(callback) => run_guarded(|| call(&**callback)),
        None => Ok(()),
    }
}

/// Deliver an event to an NPC and return the outcome.
///
/// For `npc.created` the NPC's capabilities are reported to the host before
/// `onCreated` runs; a failure in either is caught the same way.
pub fn invoke_npc(
    host: &dyn ScriptHost,
    npc: &Npc,
    event: &NpcEvent,
) -> Result<(), DispatchFailure> {
    let script = npc.script();

    let result = match event {
        NpcEvent::Created { args } => run_guarded(|| {
            let capabilities = script.capabilities();
            debug!(
                target: "scripting",
                "NPC {} at {} supports {:?} (mask {})",
                npc.id(),
                npc.location(),
                capabilities.slot_names(),
                capabilities.bits()
            );
            host.report_capabilities(npc, capabilities);
            forward(&script.on_created, |callback| callback(npc, args.as_slice()))
        }),
        NpcEvent::PlayerChats { player, message } => {
            forward(&script.on_player_chats, |callback| {
                callback(npc, player, message.as_str())
            })
        }
        NpcEvent::PlayerEnters { player } => {
            forward(&script.on_player_enters, |callback| callback(npc, player))
        }
        NpcEvent::PlayerLeaves { player } => {
            forward(&script.on_player_leaves, |callback| callback(npc, player))
        }
        NpcEvent::PlayerTouchsMe { player } => {
            forward(&script.on_player_touchs_me, |callback| callback(npc, player))
        }
        NpcEvent::Timeout { args } => {
            forward(&script.on_timeout, |callback| callback(npc, args.as_slice()))
        }
        NpcEvent::Trigger { action, data } => run_guarded(|| action(npc, data)),
    };

    result.map_err(|source| {
        DispatchFailure::new(FailureSite::for_event(event.kind()), npc.location(), source)
    })
}

/// Deliver an event to a weapon and return the outcome.
///
/// Weapons take no part in capability negotiation.
pub fn invoke_weapon(
    _host: &dyn ScriptHost,
    weapon: &Weapon,
    event: &WeaponEvent,
) -> Result<(), DispatchFailure> {
    let script = weapon.script();

    let result = match event {
        WeaponEvent::Created { args } => {
            forward(&script.on_created, |callback| callback(weapon, args.as_slice()))
        }
        WeaponEvent::ServerSide { player, data } => {
            forward(&script.on_action_server_side, |callback| {
                callback(weapon, player, data)
            })
        }
    };

    result.map_err(|source| {
        DispatchFailure::new(
            FailureSite::for_event(event.kind()),
            weapon.location(),
            source,
        )
    })
}

fn report(host: &dyn ScriptHost, result: Result<(), DispatchFailure>) {
    if let Err(failure) = result {
        let message = failure.to_string();
        debug!(target: "scripting", "Reporting callback failure: {}", message);
        host.report_error(&message);
    }
}

fn handle_npc(expected: EventKind, host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
    let result = if event.kind() == expected {
        invoke_npc(host, npc, event)
    } else {
        Err(DispatchFailure::new(
            FailureSite::for_event(expected),
            npc.location(),
            ScriptError::mismatched_payload(expected, event.kind()),
        ))
    };
    report(host, result);
}

fn handle_weapon(
    expected: EventKind,
    host: &dyn ScriptHost,
    weapon: &Weapon,
    event: &WeaponEvent,
) {
    let result = if event.kind() == expected {
        invoke_weapon(host, weapon, event)
    } else {
        Err(DispatchFailure::new(
            FailureSite::for_event(expected),
            weapon.location(),
            ScriptError::mismatched_payload(expected, event.kind()),
        ))
    };
    report(host, result);
}

/// `npc.created`: negotiate capabilities, then `onCreated(args...)`
pub fn npc_created(host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
    handle_npc(EventKind::NpcCreated, host, npc, event);
}

/// `npc.playerchats`: `onPlayerChats(player, message)`
pub fn npc_player_chats(host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
    handle_npc(EventKind::NpcPlayerChats, host, npc, event);
}

/// `npc.playerenters`: `onPlayerEnters(player)`
pub fn npc_player_enters(host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
    handle_npc(EventKind::NpcPlayerEnters, host, npc, event);
}

/// `npc.playerleaves`: `onPlayerLeaves(player)`
pub fn npc_player_leaves(host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
    handle_npc(EventKind::NpcPlayerLeaves, host, npc, event);
}

/// `npc.playertouchsme`: `onPlayerTouchsMe(player)`
pub fn npc_player_touchs_me(host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
    handle_npc(EventKind::NpcPlayerTouchsMe, host, npc, event);
}

/// `npc.timeout`: `onTimeout(args...)`
pub fn npc_timeout(host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
    handle_npc(EventKind::NpcTimeout, host, npc, event);
}

/// `npc.trigger`: the supplied action, called with the NPC and its data
pub fn npc_trigger(host: &dyn ScriptHost, npc: &Npc, event: &NpcEvent) {
    handle_npc(EventKind::NpcTrigger, host, npc, event);
}

/// `weapon.created`: `onCreated(args...)`
pub fn weapon_created(host: &dyn ScriptHost, weapon: &Weapon, event: &WeaponEvent) {
    handle_weapon(EventKind::WeaponCreated, host, weapon, event);
}

/// `weapon.serverside`: `onActionServerSide(player, data)`
pub fn weapon_server_side(host: &dyn ScriptHost, weapon: &Weapon, event: &WeaponEvent) {
    handle_weapon(EventKind::WeaponServerSide, host, weapon, event);
}
