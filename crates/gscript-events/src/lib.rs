/// Event vocabulary shared between the script host and the runtime
///
/// This crate holds the types every other gscript crate agrees on: the
/// names of the events a host delivers, the typed arguments forwarded to
/// script callbacks, and player handles.
pub mod event_kind;
pub mod player;
pub mod value;

pub use event_kind::{EntityKind, EventKind, ParseEventKindError};
pub use player::PlayerRef;
pub use value::ScriptValue;
