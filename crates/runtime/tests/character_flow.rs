//! End-to-end tests: commands in, bus events out.

use std::path::Path;
use std::time::Duration;

use character_content::ItemCatalog;
use character_core::{
    ActionTag, Hand, ItemDefinition, ItemHandle, ItemKind, OverlayKind, ShieldData, WeaponData,
    tag::vocab,
};
use runtime::{EquipmentEvent, Event, InputEvent, Runtime, RuntimeConfig, RuntimeError, Topic};

fn test_catalog() -> ItemCatalog {
    ItemCatalog::from_definitions(vec![
        ItemDefinition::new(
            ItemHandle(1),
            "Straight Sword",
            ItemKind::Weapon(WeaponData {
                overlay_tag: vocab::OVERLAY_ONE_HANDED,
                stat_changes: vec![],
                guard: None,
            }),
        ),
        ItemDefinition::new(
            ItemHandle(4),
            "Kite Shield",
            ItemKind::Shield(ShieldData {
                overlay_tag: vocab::OVERLAY_SHIELD,
                stat_changes: vec![],
                guard: character_core::GuardData {
                    sequence: ActionTag::new("Anim.Guard.Shield"),
                    stability: 60,
                },
            }),
        ),
    ])
    .expect("catalog is valid")
}

fn test_runtime() -> Runtime {
    Runtime::builder()
        .items(test_catalog())
        .build()
        .expect("runtime builds")
}

#[tokio::test]
async fn buffered_action_reaches_the_bus_after_the_window_closes() {
    let mut runtime = test_runtime();
    let mut events = runtime.subscribe(Topic::Input);
    let id = runtime.spawn_character();

    runtime.toggle_buffer(id, true).unwrap();
    runtime.queue_action(id, vocab::ACTION_ATTACK_LIGHT).unwrap();
    runtime.tick();
    assert!(events.try_recv().is_err());

    runtime.toggle_buffer(id, false).unwrap();
    runtime.tick();

    match events.recv().await.unwrap() {
        Event::Input(InputEvent::ActionConsumed { character, action }) => {
            assert_eq!(character, id);
            assert_eq!(action, vocab::ACTION_ATTACK_LIGHT);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn equip_publishes_item_and_overlay_events() {
    let mut runtime = test_runtime();
    let mut events = runtime.subscribe(Topic::Equipment);
    let id = runtime.spawn_character();

    runtime
        .equip(id, ItemHandle(1), vocab::SLOT_RIGHT_WEAPON_1, true)
        .unwrap();

    match events.recv().await.unwrap() {
        Event::Equipment(EquipmentEvent::ItemEquipped { character, slot, item }) => {
            assert_eq!(character, id);
            assert_eq!(slot, vocab::SLOT_RIGHT_WEAPON_1);
            assert_eq!(item, ItemHandle(1));
        }
        other => panic!("unexpected event: {:?}", other),
    }
    match events.recv().await.unwrap() {
        Event::Equipment(EquipmentEvent::OverlayChanged { state, .. }) => {
            assert_eq!(state.active, OverlayKind::OneHanded);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn stance_toggle_publishes_stance_and_overlay_events() {
    let mut runtime = test_runtime();
    let id = runtime.spawn_character();
    runtime
        .equip(id, ItemHandle(1), vocab::SLOT_RIGHT_WEAPON_1, false)
        .unwrap();

    let mut events = runtime.subscribe(Topic::Equipment);
    runtime.toggle_two_hand_stance(id, Hand::Right).unwrap();

    match events.recv().await.unwrap() {
        Event::Equipment(EquipmentEvent::StanceChanged { hand, engaged, .. }) => {
            assert_eq!(hand, Hand::Right);
            assert!(engaged);
        }
        other => panic!("unexpected event: {:?}", other),
    }
    match events.recv().await.unwrap() {
        Event::Equipment(EquipmentEvent::OverlayChanged { state, .. }) => {
            assert_eq!(state.right_hand, OverlayKind::TwoHanded);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn command_errors_name_the_offender() {
    let mut runtime = test_runtime();
    let id = runtime.spawn_character();

    let missing = runtime.queue_action(runtime::CharacterId(99), vocab::ACTION_DODGE);
    assert!(matches!(missing, Err(RuntimeError::CharacterNotFound(_))));

    let unknown_item = runtime.equip(id, ItemHandle(42), vocab::SLOT_RIGHT_WEAPON_1, false);
    assert!(matches!(unknown_item, Err(RuntimeError::UnknownItem(_))));

    let unknown_slot = runtime.equip(id, ItemHandle(1), vocab::ACTION_DODGE, false);
    assert!(matches!(unknown_slot, Err(RuntimeError::UnknownSlot(_))));
}

#[tokio::test]
async fn despawn_cancels_parked_input() {
    let mut runtime = test_runtime();
    let mut events = runtime.subscribe(Topic::Input);
    let id = runtime.spawn_character();

    runtime.toggle_buffer(id, true).unwrap();
    runtime.queue_action(id, vocab::ACTION_DODGE).unwrap();
    runtime.despawn_character(id).unwrap();
    runtime.tick();

    assert!(events.try_recv().is_err());
    assert!(matches!(
        runtime.queue_action(id, vocab::ACTION_DODGE),
        Err(RuntimeError::CharacterNotFound(_))
    ));
}

#[tokio::test]
async fn run_loop_stops_on_shutdown_signal() {
    let mut runtime = Runtime::builder()
        .items(test_catalog())
        .config(RuntimeConfig {
            tick_interval: Duration::from_millis(1),
            ..RuntimeConfig::default()
        })
        .build()
        .unwrap();
    runtime.spawn_character();

    let handle = runtime.shutdown_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.shutdown();
    });

    tokio::time::timeout(Duration::from_secs(5), runtime.run())
        .await
        .expect("run loop honors shutdown");
}

#[tokio::test]
async fn content_dir_with_malformed_data_fails_to_build() {
    let dir = tempfile::tempdir().expect("scratch dir");
    std::fs::write(dir.path().join("items.ron"), "(items: [(handle: oops)])").unwrap();

    let result = Runtime::builder().content_dir(dir.path());
    assert!(matches!(result, Err(RuntimeError::Content(_))));
}

#[tokio::test]
async fn content_dir_builds_a_working_runtime() {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../character/content/data");
    let mut runtime = Runtime::builder()
        .content_dir(data_dir)
        .expect("sample content loads")
        .build()
        .unwrap();

    let id = runtime.spawn_character();
    runtime
        .equip(id, ItemHandle(1), vocab::SLOT_RIGHT_WEAPON_1, true)
        .unwrap();
    let character = runtime.character(id).unwrap();
    assert_eq!(
        character.equipment.overlay_state().active,
        OverlayKind::OneHanded
    );
}
