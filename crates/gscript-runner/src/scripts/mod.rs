/// Built-in sample scripts
///
/// These play the part of the NPC and weapon scripts a server would load,
/// so scenarios and the CLI have something to drive.
pub mod bow;
pub mod gate_guard;
pub mod greeter;
pub mod registry;
pub mod triggers;

pub use registry::{ScriptFactory, ScriptRegistry};
