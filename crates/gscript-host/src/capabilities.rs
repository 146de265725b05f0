use bitflags::bitflags;
use gscript_events::EventKind;

use crate::error::UnknownSlotError;

bitflags! {
    /// Optional NPC callback slots, one bit each.
    ///
    /// The bit order is fixed and shared with the host: a host that receives
    /// this mask at creation time uses it to decide which events to deliver.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NpcCapabilities: u32 {
        const ON_CREATED = 1 << 0;
        const ON_TIMEOUT = 1 << 1;
        const ON_PLAYER_CHATS = 1 << 2;
        const ON_PLAYER_ENTERS = 1 << 3;
        const ON_PLAYER_LEAVES = 1 << 4;
        const ON_PLAYER_TOUCHS_ME = 1 << 5;
    }
}

/// Script slot names in bit order
const SLOTS: [(&str, NpcCapabilities); 6] = [
    ("onCreated", NpcCapabilities::ON_CREATED),
    ("onTimeout", NpcCapabilities::ON_TIMEOUT),
    ("onPlayerChats", NpcCapabilities::ON_PLAYER_CHATS),
    ("onPlayerEnters", NpcCapabilities::ON_PLAYER_ENTERS),
    ("onPlayerLeaves", NpcCapabilities::ON_PLAYER_LEAVES),
    ("onPlayerTouchsMe", NpcCapabilities::ON_PLAYER_TOUCHS_ME),
];

impl NpcCapabilities {
    /// The capability bit an NPC event is forwarded through, if any
    pub fn for_event(kind: EventKind) -> Option<Self> {
        match kind {
            EventKind::NpcCreated => Some(Self::ON_CREATED),
            EventKind::NpcTimeout => Some(Self::ON_TIMEOUT),
            EventKind::NpcPlayerChats => Some(Self::ON_PLAYER_CHATS),
            EventKind::NpcPlayerEnters => Some(Self::ON_PLAYER_ENTERS),
            EventKind::NpcPlayerLeaves => Some(Self::ON_PLAYER_LEAVES),
            EventKind::NpcPlayerTouchsMe => Some(Self::ON_PLAYER_TOUCHS_ME),
            EventKind::NpcTrigger | EventKind::WeaponCreated | EventKind::WeaponServerSide => None,
        }
    }

    /// Whether a host holding this mask needs to deliver `kind` to the NPC.
    ///
    /// `npc.created` is always delivered since it is what produces the mask,
    /// and `npc.trigger` carries its own callable. Weapon events are never
    /// answered by an NPC mask.
    pub fn handles(self, kind: EventKind) -> bool {
        match kind {
            EventKind::NpcCreated | EventKind::NpcTrigger => true,
            _ => Self::for_event(kind).is_some_and(|flag| self.contains(flag)),
        }
    }

    pub fn from_slot_name(name: &str) -> Option<Self> {
        SLOTS
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, flag)| *flag)
    }

    /// Build a mask from script slot names such as `onPlayerChats`
    pub fn from_slot_names<I, S>(names: I) -> Result<Self, UnknownSlotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Self::empty(), |mask, name| {
            let name = name.as_ref();
            Self::from_slot_name(name)
                .map(|flag| mask | flag)
                .ok_or_else(|| UnknownSlotError(name.to_string()))
        })
    }

    /// Slot names present in this mask, in bit order
    pub fn slot_names(self) -> Vec<&'static str> {
        SLOTS
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(slot, _)| *slot)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_order() {
        let expected = [1, 2, 4, 8, 16, 32];
        for ((_, flag), bits) in SLOTS.iter().zip(expected) {
            assert_eq!(flag.bits(), bits);
        }
    }

    #[test]
    fn test_from_slot_names() {
        let mask = NpcCapabilities::from_slot_names(["onPlayerChats", "onTimeout"]).unwrap();
        assert_eq!(mask.bits(), 6);
        assert_eq!(mask.slot_names(), vec!["onTimeout", "onPlayerChats"]);

        let err = NpcCapabilities::from_slot_names(["onDestroyed"]).unwrap_err();
        assert_eq!(err, UnknownSlotError("onDestroyed".to_string()));
    }

    #[test]
    fn test_handles() {
        let mask = NpcCapabilities::ON_PLAYER_CHATS;
        assert!(mask.handles(EventKind::NpcPlayerChats));
        assert!(!mask.handles(EventKind::NpcPlayerEnters));
        assert!(!mask.handles(EventKind::NpcTimeout));
        assert!(mask.handles(EventKind::NpcCreated));
        assert!(mask.handles(EventKind::NpcTrigger));
        assert!(!NpcCapabilities::all().handles(EventKind::WeaponServerSide));
    }

    #[test]
    fn test_full_mask() {
        assert_eq!(NpcCapabilities::all().bits(), 0b11_1111);
        assert_eq!(NpcCapabilities::all().slot_names().len(), 6);
    }
}
