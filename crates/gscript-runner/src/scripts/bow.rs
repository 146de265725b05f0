use gscript_host::{ScriptError, WeaponScript};
use tracing::info;

pub const ID: &str = "bow";

/// Server-side half of a bow weapon
pub fn script() -> WeaponScript {
    WeaponScript::new()
        .on_created(|weapon, _| {
            info!(target: "weapon", "{} loaded", weapon.name());
            Ok(())
        })
        .on_action_server_side(|weapon, player, data| match data.as_str() {
            Some("fire") => {
                info!(target: "weapon", "{} fired by {}", weapon.name(), player.account);
                Ok(())
            }
            _ => Err(ScriptError::type_error(format!(
                "unknown {} action: {}",
                weapon.name(),
                data
            ))),
        })
}
