use std::sync::Arc;

use gscript_host::{Npc, ScriptError, ScriptResult, ScriptValue, TriggerCallback};
use tracing::info;

pub const ANNOUNCE: &str = "announce";
pub const FAIL: &str = "fail";

fn announce_action(npc: &Npc, data: &ScriptValue) -> ScriptResult {
    info!(target: "npc", "[{}] {}", npc.id(), data);
    Ok(())
}

fn fail_action(_npc: &Npc, data: &ScriptValue) -> ScriptResult {
    Err(ScriptError::type_error(format!(
        "cannot trigger with {}",
        data.type_name()
    )))
}

/// Logs the trigger data
pub fn announce() -> TriggerCallback {
    Arc::new(announce_action)
}

/// Always fails
pub fn fail() -> TriggerCallback {
    Arc::new(fail_action)
}
