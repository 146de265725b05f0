use std::cell::RefCell;
use std::collections::BTreeMap;

use gscript_host::{
    EventHandler, EventKind, HandlerRegistrar, Npc, NpcCapabilities, ScriptHost,
};

/// Host double that records everything the bridge reports
#[derive(Default)]
pub struct RecordingHost {
    pub capabilities: RefCell<Vec<(u32, NpcCapabilities)>>,
    pub errors: RefCell<Vec<String>>,
    pub handlers: BTreeMap<EventKind, EventHandler>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn reported_masks(&self) -> Vec<(u32, u32)> {
        self.capabilities
            .borrow()
            .iter()
            .map(|(id, caps)| (*id, caps.bits()))
            .collect()
    }
}

impl ScriptHost for RecordingHost {
    fn report_capabilities(&self, npc: &Npc, capabilities: NpcCapabilities) {
        self.capabilities.borrow_mut().push((npc.id(), capabilities));
    }

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

impl HandlerRegistrar for RecordingHost {
    fn register_handler(&mut self, kind: EventKind, handler: EventHandler) {
        self.handlers.insert(kind, handler);
    }
}

/// Shared log that script callbacks append to
#[derive(Clone, Default)]
pub struct CallLog(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
