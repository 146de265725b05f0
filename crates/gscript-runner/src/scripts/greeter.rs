use gscript_host::NpcScript;
use tracing::info;

pub const ID: &str = "greeter";

/// NPC that welcomes players and answers greetings
pub fn script() -> NpcScript {
    NpcScript::new()
        .on_created(|npc, args| {
            info!(target: "npc", "Greeter ready at {} ({} args)", npc.location(), args.len());
            Ok(())
        })
        .on_player_enters(|npc, player| {
            info!(target: "npc", "[{}] Welcome to {}, {}!", npc.id(), npc.level_name(), player.account);
            Ok(())
        })
        .on_player_chats(|npc, player, message| {
            if message.to_lowercase().contains("hello") {
                info!(target: "npc", "[{}] Hello, {}!", npc.id(), player.account);
            }
            Ok(())
        })
}
