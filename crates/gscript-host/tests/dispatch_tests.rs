mod common;

use std::cell::RefCell;

use common::{CallLog, RecordingHost};
use gscript_host::dispatch;
use gscript_host::{
    EventHandler, EventKind, EventTable, Npc, NpcCapabilities, NpcEvent, NpcScript, PlayerRef,
    ScriptError, ScriptHost, ScriptValue, Weapon, WeaponEvent, WeaponScript,
};

fn alice() -> PlayerRef {
    PlayerRef::new(7, "alice")
}

fn every_npc_event() -> Vec<NpcEvent> {
    vec![
        NpcEvent::created(vec![]),
        NpcEvent::player_chats(alice(), "hi"),
        NpcEvent::PlayerEnters { player: alice() },
        NpcEvent::PlayerLeaves { player: alice() },
        NpcEvent::PlayerTouchsMe { player: alice() },
        NpcEvent::timeout(vec![]),
    ]
}

#[test]
fn test_install_registers_one_handler_per_event() {
    let mut host = RecordingHost::new();
    let installed = EventTable::global().install(&mut host);

    assert_eq!(installed, 9);
    assert_eq!(host.handlers.len(), 9);
    assert!(matches!(
        host.handlers.get(&EventKind::WeaponServerSide),
        Some(EventHandler::Weapon(_))
    ));
    assert!(matches!(
        host.handlers.get(&EventKind::NpcTrigger),
        Some(EventHandler::Npc(_))
    ));
}

#[test]
fn test_mask_is_sum_of_present_slots() {
    let cases: Vec<(NpcScript, u32)> = vec![
        (NpcScript::new(), 0),
        (NpcScript::new().on_created(|_, _| Ok(())), 1),
        (NpcScript::new().on_timeout(|_, _| Ok(())), 2),
        (
            NpcScript::new()
                .on_player_enters(|_, _| Ok(()))
                .on_player_leaves(|_, _| Ok(())),
            8 + 16,
        ),
        (
            NpcScript::new()
                .on_created(|_, _| Ok(()))
                .on_timeout(|_, _| Ok(()))
                .on_player_chats(|_, _, _| Ok(()))
                .on_player_enters(|_, _| Ok(()))
                .on_player_leaves(|_, _| Ok(()))
                .on_player_touchs_me(|_, _| Ok(())),
            63,
        ),
    ];

    for (index, (script, expected)) in cases.into_iter().enumerate() {
        let host = RecordingHost::new();
        let npc = Npc::new(index as u32, "town", 0.0, 0.0).with_script(script);
        dispatch::npc_created(&host, &npc, &NpcEvent::created(vec![]));
        assert_eq!(host.reported_masks(), vec![(index as u32, expected)]);
        assert!(host.errors().is_empty());
    }
}

#[test]
fn test_chat_only_npc_reports_mask_four_and_ignores_other_events() {
    let log = CallLog::default();
    let chats = log.clone();
    let script = NpcScript::new().on_player_chats(move |_, player, message| {
        chats.push(format!("{}: {}", player.account, message));
        Ok(())
    });
    let npc = Npc::new(1, "town", 10.0, 5.0).with_script(script);
    let host = RecordingHost::new();
    let table = EventTable::global();

    for event in every_npc_event() {
        table.dispatch_npc(&host, &npc, &event);
    }

    assert_eq!(host.reported_masks(), vec![(1, 4)]);
    assert_eq!(log.entries(), vec!["alice: hi".to_string()]);
    assert!(host.errors().is_empty());
}

#[test]
fn test_created_reports_mask_before_on_created_runs() {
    let log = CallLog::default();
    let created = log.clone();
    let script = NpcScript::new().on_created(move |npc, args| {
        created.push(format!("created {} with {} args", npc.id(), args.len()));
        Ok(())
    });
    let npc = Npc::new(3, "town", 1.0, 1.0).with_script(script);
    let host = RecordingHost::new();

    dispatch::npc_created(&host, &npc, &NpcEvent::created(vec!["a".into(), 2.into()]));

    assert_eq!(host.reported_masks(), vec![(3, 1)]);
    assert_eq!(log.entries(), vec!["created 3 with 2 args".to_string()]);
}

#[test]
fn test_absent_slots_are_silent() {
    let npc = Npc::new(1, "empty", 0.0, 0.0);
    let weapon = Weapon::new("-Empty");
    let host = RecordingHost::new();
    let table = EventTable::global();

    for event in every_npc_event() {
        table.dispatch_npc(&host, &npc, &event);
    }
    table.dispatch_weapon(&host, &weapon, &WeaponEvent::created(vec![]));
    table.dispatch_weapon(&host, &weapon, &WeaponEvent::server_side(alice(), "fire"));

    assert!(host.errors().is_empty());
    assert_eq!(host.reported_masks(), vec![(1, 0)]);
}

#[test]
fn test_touch_failure_reports_one_diagnostic_with_location() {
    let script = NpcScript::new()
        .on_player_touchs_me(|_, _| Err(ScriptError::type_error("x is undefined")));
    let npc = Npc::new(1, "town", 10.0, 5.0).with_script(script);
    let host = RecordingHost::new();

    dispatch::npc_player_touchs_me(&host, &npc, &NpcEvent::PlayerTouchsMe { player: alice() });

    let errors = host.errors();
    assert_eq!(errors.len(), 1);
    for needle in ["town", "10", "5", "TypeError", "x is undefined"] {
        assert!(errors[0].contains(needle), "{} missing from {}", needle, errors[0]);
    }
    assert_eq!(
        errors[0],
        "NPC Exception at town,10,5: TypeError - x is undefined"
    );
}

#[test]
fn test_failure_prefix_depends_on_event() {
    let script = NpcScript::new()
        .on_timeout(|_, _| Err(ScriptError::reference_error("foo is not defined")));
    let npc = Npc::new(1, "dungeon", 3.5, 4.0).with_script(script);
    let host = RecordingHost::new();

    dispatch::npc_timeout(&host, &npc, &NpcEvent::timeout(vec![]));
    dispatch::npc_trigger(
        &host,
        &npc,
        &NpcEvent::trigger(|_, _| Err(ScriptError::type_error("bad")), ScriptValue::Null),
    );

    assert_eq!(
        host.errors(),
        vec![
            "NPC Timeout Exception at dungeon,3.5,4: ReferenceError - foo is not defined"
                .to_string(),
            "NPC Trigger Exception at dungeon,3.5,4: TypeError - bad".to_string(),
        ]
    );
}

#[test]
fn test_weapon_failures_name_the_weapon() {
    let script = WeaponScript::new()
        .on_created(|_, _| Err(ScriptError::type_error("no ammo")))
        .on_action_server_side(|_, _, _| Err(ScriptError::new("RangeError", "too far")));
    let weapon = Weapon::new("-Bow").with_script(script);
    let host = RecordingHost::new();

    dispatch::weapon_created(&host, &weapon, &WeaponEvent::created(vec![]));
    dispatch::weapon_server_side(&host, &weapon, &WeaponEvent::server_side(alice(), "shoot"));

    assert_eq!(
        host.errors(),
        vec![
            "Weapon Exception at -Bow: TypeError - no ammo".to_string(),
            "Weapon Trigger Exception at -Bow: RangeError - too far".to_string(),
        ]
    );
    assert!(host.reported_masks().is_empty());
}

#[test]
fn test_failure_does_not_affect_later_events() {
    let log = CallLog::default();
    let entered = log.clone();
    let script = NpcScript::new()
        .on_player_chats(|_, _, _| Err(ScriptError::type_error("boom")))
        .on_player_enters(move |_, player| {
            entered.push(format!("enter {}", player.id));
            Ok(())
        });
    let npc = Npc::new(1, "town", 0.0, 0.0).with_script(script);
    let host = RecordingHost::new();
    let table = EventTable::global();

    table.dispatch_npc(&host, &npc, &NpcEvent::player_chats(alice(), "hi"));
    table.dispatch_npc(&host, &npc, &NpcEvent::PlayerEnters { player: alice() });

    assert_eq!(host.errors().len(), 1);
    assert_eq!(log.entries(), vec!["enter 7".to_string()]);
}

#[test]
fn test_panicking_callback_is_contained() {
    let script = NpcScript::new().on_player_leaves(|_, _| panic!("script bug"));
    let npc = Npc::new(1, "town", 2.0, 2.0).with_script(script);
    let host = RecordingHost::new();

    dispatch::npc_player_leaves(&host, &npc, &NpcEvent::PlayerLeaves { player: alice() });

    assert_eq!(
        host.errors(),
        vec!["NPC Exception at town,2,2: Panic - script bug".to_string()]
    );
}

#[test]
fn test_failing_on_created_still_reports_mask() {
    let script = NpcScript::new().on_created(|_, _| Err(ScriptError::type_error("init")));
    let npc = Npc::new(9, "town", 0.0, 0.0).with_script(script);
    let host = RecordingHost::new();

    dispatch::npc_created(&host, &npc, &NpcEvent::created(vec![]));

    assert_eq!(host.reported_masks(), vec![(9, 1)]);
    assert_eq!(host.errors().len(), 1);
}

/// Host whose capability sink panics
#[derive(Default)]
struct PanickingHost {
    errors: RefCell<Vec<String>>,
}

impl ScriptHost for PanickingHost {
    fn report_capabilities(&self, _npc: &Npc, _capabilities: NpcCapabilities) {
        panic!("host exploded");
    }

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

#[test]
fn test_panic_while_reporting_capabilities_is_contained() {
    let log = CallLog::default();
    let created = log.clone();
    let entered = log.clone();
    let script = NpcScript::new()
        .on_created(move |_, _| {
            created.push("created");
            Ok(())
        })
        .on_player_enters(move |_, _| {
            entered.push("entered");
            Ok(())
        });
    let npc = Npc::new(1, "town", 1.0, 2.0).with_script(script);
    let host = PanickingHost::default();

    dispatch::npc_created(&host, &npc, &NpcEvent::created(vec![]));

    assert_eq!(
        *host.errors.borrow(),
        vec!["NPC Exception at town,1,2: Panic - host exploded".to_string()]
    );
    // onCreated is never reached once negotiation fails
    assert!(log.entries().is_empty());

    dispatch::npc_player_enters(&host, &npc, &NpcEvent::PlayerEnters { player: alice() });
    assert_eq!(log.entries(), vec!["entered".to_string()]);
    assert_eq!(host.errors.borrow().len(), 1);
}

#[test]
fn test_arguments_are_forwarded_in_order() {
    let log = CallLog::default();
    let timeout = log.clone();
    let chats = log.clone();
    let script = NpcScript::new()
        .on_timeout(move |_, args| {
            let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
            timeout.push(rendered.join("|"));
            Ok(())
        })
        .on_player_chats(move |_, player, message| {
            chats.push(format!("{}|{}", player.id, message));
            Ok(())
        });
    let npc = Npc::new(1, "town", 0.0, 0.0).with_script(script);
    let host = RecordingHost::new();

    dispatch::npc_timeout(
        &host,
        &npc,
        &NpcEvent::timeout(vec![1.into(), "two".into(), true.into(), ScriptValue::Null]),
    );
    dispatch::npc_player_chats(&host, &npc, &NpcEvent::player_chats(alice(), "hi"));

    assert_eq!(
        log.entries(),
        vec!["1|two|true|null".to_string(), "7|hi".to_string()]
    );
}

#[test]
fn test_weapon_server_side_receives_player_and_data() {
    let log = CallLog::default();
    let actions = log.clone();
    let script = WeaponScript::new().on_action_server_side(move |weapon, player, data| {
        actions.push(format!("{} {} {}", weapon.name(), player.account, data));
        Ok(())
    });
    let weapon = Weapon::new("-Bow").with_script(script);
    let host = RecordingHost::new();

    dispatch::weapon_server_side(&host, &weapon, &WeaponEvent::server_side(alice(), "fire"));

    assert_eq!(log.entries(), vec!["-Bow alice fire".to_string()]);
}

#[test]
fn test_trigger_runs_supplied_action_regardless_of_slots() {
    let log = CallLog::default();
    let triggered = log.clone();
    let npc = Npc::new(4, "town", 0.0, 0.0);
    let host = RecordingHost::new();

    let event = NpcEvent::trigger(
        move |npc, data| {
            triggered.push(format!("{} {}", npc.id(), data));
            Ok(())
        },
        "open",
    );
    dispatch::npc_trigger(&host, &npc, &event);

    assert_eq!(log.entries(), vec!["4 open".to_string()]);
    assert!(npc.script().capabilities().is_empty());
    assert!(host.errors().is_empty());
}

#[test]
fn test_mismatched_payload_is_reported_not_dispatched() {
    let log = CallLog::default();
    let created = log.clone();
    let script = NpcScript::new().on_created(move |_, _| {
        created.push("created");
        Ok(())
    });
    let npc = Npc::new(1, "town", 1.0, 2.0).with_script(script);
    let host = RecordingHost::new();

    dispatch::npc_timeout(&host, &npc, &NpcEvent::created(vec![]));

    assert!(log.entries().is_empty());
    assert_eq!(
        host.errors(),
        vec![
            "NPC Timeout Exception at town,1,2: TypeError - npc.timeout handler received a npc.created payload"
                .to_string()
        ]
    );
}

#[test]
fn test_invoke_returns_failure_without_reporting() {
    let script = NpcScript::new().on_player_enters(|_, _| Err(ScriptError::type_error("nope")));
    let npc = Npc::new(1, "town", 0.0, 0.0).with_script(script);
    let host = RecordingHost::new();

    let failure = dispatch::invoke_npc(&host, &npc, &NpcEvent::PlayerEnters { player: alice() })
        .unwrap_err();

    assert_eq!(failure.location, "town,0,0");
    assert_eq!(failure.source, ScriptError::type_error("nope"));
    assert!(host.errors().is_empty());
}

#[test]
fn test_mask_is_not_refreshed_when_script_changes() {
    let host = RecordingHost::new();
    let mut npc = Npc::new(1, "town", 0.0, 0.0)
        .with_script(NpcScript::new().on_timeout(|_, _| Ok(())));

    dispatch::npc_created(&host, &npc, &NpcEvent::created(vec![]));
    npc.set_script(NpcScript::new().on_player_chats(|_, _, _| Ok(())));
    dispatch::npc_player_chats(&host, &npc, &NpcEvent::player_chats(alice(), "hi"));

    assert_eq!(host.reported_masks(), vec![(1, NpcCapabilities::ON_TIMEOUT.bits())]);
}
