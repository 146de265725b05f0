use gscript_events::{EntityKind, EventKind, ScriptValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    event: EventKind,
    #[serde(default)]
    args: Vec<ScriptValue>,
}

#[test]
fn test_event_names_deserialize_from_toml() {
    let entry: Entry = toml::from_str(
        r#"
event = "npc.timeout"
args = [1, "two", true]
"#,
    )
    .expect("valid entry");

    assert_eq!(entry.event, EventKind::NpcTimeout);
    assert_eq!(
        entry.args,
        vec![
            ScriptValue::Number(1.0),
            ScriptValue::Text("two".to_string()),
            ScriptValue::Bool(true),
        ]
    );
}

#[test]
fn test_unknown_event_name_is_rejected() {
    let result: Result<Entry, _> = toml::from_str(r#"event = "npc.exploded""#);
    assert!(result.is_err());
}

#[test]
fn test_every_kind_round_trips_through_its_name() {
    for kind in EventKind::ALL {
        assert_eq!(kind.name().parse::<EventKind>(), Ok(kind));
    }
    assert_eq!(EventKind::ALL.len(), 9);
}

#[test]
fn test_npc_events_outnumber_weapon_events() {
    let npc = EventKind::ALL
        .iter()
        .filter(|k| k.entity() == EntityKind::Npc)
        .count();
    assert_eq!(npc, 7);
}

#[test]
fn test_event_names_serialize_to_toml() {
    let entry = Entry {
        event: EventKind::WeaponServerSide,
        args: vec![],
    };
    let text = toml::to_string(&entry).expect("serializable entry");
    assert!(text.contains(r#"event = "weapon.serverside""#));
}
