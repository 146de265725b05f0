use crate::script::{NpcScript, WeaponScript};

/// A scripted NPC placed on a level.
///
/// The host owns NPCs; the bridge only borrows one for the duration of a
/// single event.
#[derive(Debug, Clone)]
pub struct Npc {
    id: u32,
    level_name: String,
    x: f32,
    y: f32,
    script: NpcScript,
}

impl Npc {
    pub fn new(id: u32, level_name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id,
            level_name: level_name.into(),
            x,
            y,
            script: NpcScript::default(),
        }
    }

    pub fn with_script(mut self, script: NpcScript) -> Self {
        self.script = script;
        self
    }

    /// Replace the NPC's script.
    ///
    /// Capabilities already reported to the host are not refreshed until
    /// the NPC is created again.
    pub fn set_script(&mut self, script: NpcScript) {
        self.script = script;
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn script(&self) -> &NpcScript {
        &self.script
    }

    /// `level,x,y`, as used in diagnostics
    pub fn location(&self) -> String {
        format!(
            "{},{},{}",
            self.level_name,
            coordinate(self.x),
            coordinate(self.y)
        )
    }
}

/// Coordinates print the way the script runtime prints numbers
fn coordinate(value: f32) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f32::INFINITY {
        "Infinity".to_string()
    } else if value == f32::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// A server-side weapon script
#[derive(Debug, Clone)]
pub struct Weapon {
    name: String,
    script: WeaponScript,
}

impl Weapon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: WeaponScript::default(),
        }
    }

    pub fn with_script(mut self, script: WeaponScript) -> Self {
        self.script = script;
        self
    }

    pub fn set_script(&mut self, script: WeaponScript) {
        self.script = script;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn script(&self) -> &WeaponScript {
        &self.script
    }

    pub fn location(&self) -> String {
        self.name.clone()
    }
}
