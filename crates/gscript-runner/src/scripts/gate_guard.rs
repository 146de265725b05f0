use gscript_host::{NpcScript, ScriptError};
use tracing::info;

pub const ID: &str = "gate_guard";

/// NPC guarding a gate.
///
/// Touching it without an account fails, which exercises error reporting.
pub fn script() -> NpcScript {
    NpcScript::new()
        .on_timeout(|npc, args| {
            let rounds = args.first().and_then(|arg| arg.as_number()).unwrap_or(1.0);
            info!(target: "npc", "[{}] Patrolling {} round(s)", npc.id(), rounds);
            Ok(())
        })
        .on_player_touchs_me(|npc, player| {
            if player.account.is_empty() {
                return Err(ScriptError::type_error("player.account is undefined"));
            }
            info!(target: "npc", "[{}] {} may pass", npc.id(), player.account);
            Ok(())
        })
        .on_player_leaves(|npc, player| {
            info!(target: "npc", "[{}] Farewell, {}", npc.id(), player.account);
            Ok(())
        })
}
