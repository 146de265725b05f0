use std::fmt;
use std::sync::Arc;

use gscript_events::{PlayerRef, ScriptValue};

use crate::capabilities::NpcCapabilities;
use crate::entity::{Npc, Weapon};
use crate::error::ScriptError;

/// What every script callback returns
pub type ScriptResult = Result<(), ScriptError>;

/// Callback receiving the entity and a variable argument list
pub type ArgsCallback<E> = Arc<dyn Fn(&E, &[ScriptValue]) -> ScriptResult + Send + Sync>;
/// Callback receiving the entity and a player
pub type PlayerCallback<E> = Arc<dyn Fn(&E, &PlayerRef) -> ScriptResult + Send + Sync>;
/// `onPlayerChats(player, message)`
pub type ChatCallback = Arc<dyn Fn(&Npc, &PlayerRef, &str) -> ScriptResult + Send + Sync>;
/// `onActionServerSide(player, data)`
pub type ActionCallback =
    Arc<dyn Fn(&Weapon, &PlayerRef, &ScriptValue) -> ScriptResult + Send + Sync>;
/// Callable supplied directly with an `npc.trigger` event
pub type TriggerCallback = Arc<dyn Fn(&Npc, &ScriptValue) -> ScriptResult + Send + Sync>;

/// The optional callback slots an NPC script may implement.
///
/// A slot is either present or absent; absent slots make the matching event
/// a silent no-op.
#[derive(Clone, Default)]
pub struct NpcScript {
    pub on_created: Option<ArgsCallback<Npc>>,
    pub on_timeout: Option<ArgsCallback<Npc>>,
    pub on_player_chats: Option<ChatCallback>,
    pub on_player_enters: Option<PlayerCallback<Npc>>,
    pub on_player_leaves: Option<PlayerCallback<Npc>>,
    pub on_player_touchs_me: Option<PlayerCallback<Npc>>,
}

impl NpcScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_created<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Npc, &[ScriptValue]) -> ScriptResult + Send + Sync + 'static,
    {
        self.on_created = Some(Arc::new(callback));
        self
    }

    pub fn on_timeout<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Npc, &[ScriptValue]) -> ScriptResult + Send + Sync + 'static,
    {
        self.on_timeout = Some(Arc::new(callback));
        self
    }

    pub fn on_player_chats<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Npc, &PlayerRef, &str) -> ScriptResult + Send + Sync + 'static,
    {
        self.on_player_chats = Some(Arc::new(callback));
        self
    }

    pub fn on_player_enters<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Npc, &PlayerRef) -> ScriptResult + Send + Sync + 'static,
    {
        self.on_player_enters = Some(Arc::new(callback));
        self
    }

    pub fn on_player_leaves<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Npc, &PlayerRef) -> ScriptResult + Send + Sync + 'static,
    {
        self.on_player_leaves = Some(Arc::new(callback));
        self
    }

    pub fn on_player_touchs_me<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Npc, &PlayerRef) -> ScriptResult + Send + Sync + 'static,
    {
        self.on_player_touchs_me = Some(Arc::new(callback));
        self
    }

    /// Which slots are present right now.
    ///
    /// This is a pure presence check: no callback is invoked.
    pub fn capabilities(&self) -> NpcCapabilities {
        let mut capabilities = NpcCapabilities::empty();
        capabilities.set(NpcCapabilities::ON_CREATED, self.on_created.is_some());
        capabilities.set(NpcCapabilities::ON_TIMEOUT, self.on_timeout.is_some());
        capabilities.set(
            NpcCapabilities::ON_PLAYER_CHATS,
            self.on_player_chats.is_some(),
        );
        capabilities.set(
            NpcCapabilities::ON_PLAYER_ENTERS,
            self.on_player_enters.is_some(),
        );
        capabilities.set(
            NpcCapabilities::ON_PLAYER_LEAVES,
            self.on_player_leaves.is_some(),
        );
        capabilities.set(
            NpcCapabilities::ON_PLAYER_TOUCHS_ME,
            self.on_player_touchs_me.is_some(),
        );
        capabilities
    }
}

impl fmt::Debug for NpcScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NpcScript")
            .field("slots", &self.capabilities().slot_names())
            .finish()
    }
}

/// The optional callback slots a weapon script may implement
#[derive(Clone, Default)]
pub struct WeaponScript {
    pub on_created: Option<ArgsCallback<Weapon>>,
    pub on_action_server_side: Option<ActionCallback>,
}

impl WeaponScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_created<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Weapon, &[ScriptValue]) -> ScriptResult + Send + Sync + 'static,
    {
        self.on_created = Some(Arc::new(callback));
        self
    }

    pub fn on_action_server_side<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Weapon, &PlayerRef, &ScriptValue) -> ScriptResult + Send + Sync + 'static,
    {
        self.on_action_server_side = Some(Arc::new(callback));
        self
    }

    pub fn slot_names(&self) -> Vec<&'static str> {
        let mut slots = Vec::new();
        if self.on_created.is_some() {
            slots.push("onCreated");
        }
        if self.on_action_server_side.is_some() {
            slots.push("onActionServerSide");
        }
        slots
    }
}

impl fmt::Debug for WeaponScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeaponScript")
            .field("slots", &self.slot_names())
            .finish()
    }
}
