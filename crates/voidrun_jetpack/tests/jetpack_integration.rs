//! Jetpack integration test
//!
//! Headless App (MinimalPlugins + SimulationPlugin), события идут через
//! feed-системы → dispatch, как в игре.
//!
//! Проверяем:
//! - toggle через HUD action в открытом космосе
//! - gravity on → jetpack выключен + popup
//! - посадка в vehicle → jetpack выключен
//! - toggle на grid'е с гравитацией → отказ + popup
//! - drop → выключен
//! - пустой бак: не включается, расход в FixedUpdate выключает

use std::time::Duration;

use bevy::ecs::event::Events;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::Friction;
use voidrun_jetpack::actions::ActionRequest;
use voidrun_jetpack::jetpack::{can_weightless_move, item_actions, JetpackPolicy, JetpackWorld};
use voidrun_jetpack::*;

struct TestWorld {
    app: App,
    map: Entity,
    station: Entity,
    player: Entity,
    jetpack: Entity,
}

/// Helper: map + station (гравитация выключена) + игрок в открытом космосе + jetpack на спине
fn setup(config: JetpackConfig) -> TestWorld {
    let mut app = create_headless_app(&SimulationConfig {
        log_level: LogLevel::Warning,
        jetpack: config,
    });

    let world = app.world_mut();
    let map = world.spawn(Map).id();
    let station = world
        .spawn((Grid, Gravity { enabled: false }, ChildOf(map)))
        .id();
    let player = world
        .spawn((
            PhysicsBody {
                status: BodyStatus::OnGround,
                ground_friction: 0.6,
            },
            Friction::coefficient(0.6),
            MovementSpeedModifier::default(),
            ChildOf(map),
        ))
        .id();
    let jetpack = world.spawn((JetpackItem::default(), ChildOf(map))).id();

    // MapInit → toggle action
    app.update();

    app.world_mut().send_event(EquipItemIntent {
        item: jetpack,
        owner: player,
        slot: EquipSlot::Back,
    });
    app.update();

    TestWorld {
        app,
        map,
        station,
        player,
        jetpack,
    }
}

fn press_toggle(t: &mut TestWorld) {
    let action = t
        .app
        .world()
        .get::<JetpackItem>(t.jetpack)
        .and_then(|j| j.toggle_action)
        .expect("toggle action created on map init");

    t.app.world_mut().send_event(ActionRequest {
        action,
        performer: t.player,
    });
    t.app.update();
}

fn popups(app: &App) -> Vec<PopupMessage> {
    let events = app.world().resource::<Events<PopupMessage>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).copied().collect()
}

fn is_enabled(t: &TestWorld) -> bool {
    t.app.world().get::<ActiveJetpack>(t.jetpack).is_some()
}

fn is_flying(t: &TestWorld) -> bool {
    t.app.world().get::<JetpackUser>(t.player).is_some()
}

fn body_status(t: &TestWorld) -> BodyStatus {
    t.app.world().get::<PhysicsBody>(t.player).unwrap().status
}

#[test]
fn test_toggle_in_open_space() {
    let mut t = setup(JetpackConfig::default());
    assert!(!is_enabled(&t));

    press_toggle(&mut t);

    assert!(is_enabled(&t));
    assert!(is_flying(&t));
    assert_eq!(body_status(&t), BodyStatus::InAir);
    assert_eq!(t.app.world().get::<Friction>(t.player).unwrap().coefficient, 0.0);
    assert!(popups(&t.app).is_empty());

    // Повторное нажатие выключает
    press_toggle(&mut t);

    assert!(!is_enabled(&t));
    assert!(!is_flying(&t));
    assert_eq!(body_status(&t), BodyStatus::OnGround);
    assert_eq!(t.app.world().get::<Friction>(t.player).unwrap().coefficient, 0.6);
}

#[test]
fn test_gravity_on_returns_flyer_to_grid() {
    let mut t = setup(JetpackConfig::default());
    press_toggle(&mut t);

    // Залетели на станцию (гравитация выключена → полёт разрешён)
    t.app.world_mut().entity_mut(t.player).insert(ChildOf(t.station));
    t.app.update();
    assert!(is_flying(&t));

    t.app
        .world_mut()
        .get_mut::<Gravity>(t.station)
        .unwrap()
        .enabled = true;
    t.app.update();

    assert!(!is_enabled(&t));
    assert!(!is_flying(&t));
    assert_eq!(body_status(&t), BodyStatus::OnGround);
    assert_eq!(
        popups(&t.app),
        vec![PopupMessage {
            popup: JetpackPopup::ToGrid,
            viewer: t.player,
            recipient: t.player,
        }]
    );
}

#[test]
fn test_entering_vehicle_disables_jetpack() {
    let mut t = setup(JetpackConfig::default());
    press_toggle(&mut t);
    assert!(is_flying(&t));

    let shuttle_seat = t.app.world_mut().spawn(ChildOf(t.map)).id();
    t.app.world_mut().entity_mut(t.player).insert(ChildOf(shuttle_seat));
    t.app.update();

    assert!(!is_enabled(&t));
    assert!(!is_flying(&t));
    assert_eq!(body_status(&t), BodyStatus::OnGround);
    assert!(t.app.world().get::<RelayInputMover>(t.player).is_none());
}

#[test]
fn test_toggle_rejected_on_gravity_grid() {
    let mut t = setup(JetpackConfig {
        enable_anywhere: false,
        enable_in_no_gravity: false,
    });

    t.app
        .world_mut()
        .get_mut::<Gravity>(t.station)
        .unwrap()
        .enabled = true;
    t.app.world_mut().entity_mut(t.player).insert(ChildOf(t.station));
    t.app.update();

    press_toggle(&mut t);

    assert!(!is_enabled(&t));
    assert!(!is_flying(&t));
    assert_eq!(
        popups(&t.app),
        vec![PopupMessage {
            popup: JetpackPopup::NoStation,
            viewer: t.jetpack,
            recipient: t.player,
        }]
    );
}

#[test]
fn test_drop_disables_jetpack() {
    let mut t = setup(JetpackConfig::default());
    press_toggle(&mut t);

    t.app.world_mut().send_event(DropItemIntent { item: t.jetpack });
    t.app.update();

    assert!(!is_enabled(&t));
    assert!(!is_flying(&t));
    assert!(t.app.world().get::<Contained>(t.jetpack).is_none());
    assert_eq!(
        t.app.world().get::<ChildOf>(t.jetpack).map(ChildOf::parent),
        Some(t.map)
    );
}

#[test]
fn test_unworn_jetpack_cannot_enable() {
    let mut t = setup(JetpackConfig::default());

    t.app.world_mut().send_event(DropItemIntent { item: t.jetpack });
    t.app.update();

    press_toggle(&mut t);

    assert!(!is_enabled(&t));
    assert!(!is_flying(&t));
}

#[test]
fn test_config_refresh_reaches_controller() {
    let mut t = setup(JetpackConfig::default());
    assert!(!t.app.world().resource::<JetpackController>().config().enable_anywhere);

    t.app.world_mut().insert_resource(JetpackConfig {
        enable_anywhere: true,
        enable_in_no_gravity: false,
    });
    t.app.update();

    assert!(t.app.world().resource::<JetpackController>().config().enable_anywhere);
}

#[test]
fn test_weightless_move_and_item_actions_queries() {
    let mut t = setup(JetpackConfig::default());

    assert!(can_weightless_move(t.app.world_mut(), t.jetpack));
    assert!(!can_weightless_move(t.app.world_mut(), t.player));

    press_toggle(&mut t);
    assert!(can_weightless_move(t.app.world_mut(), t.player));

    let cached = t.app.world().get::<JetpackItem>(t.jetpack).unwrap().toggle_action;
    let actions = item_actions(t.app.world_mut(), t.jetpack, t.player);
    assert_eq!(actions.len(), 1);
    assert_eq!(Some(actions[0]), cached);
}

/// Policy для теста: jetpack выключен administratively
struct Grounded;

impl JetpackPolicy for Grounded {
    fn can_enable(&self, _world: &dyn JetpackWorld, _item: Entity) -> bool {
        false
    }
}

#[test]
fn test_custom_policy_inserted_before_plugin_is_kept() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(JetpackController::with_policy(
            JetpackConfig::default(),
            Box::new(Grounded),
        ))
        .add_plugins(SimulationPlugin);

    let world = app.world_mut();
    let map = world.spawn(Map).id();
    let player = world.spawn((PhysicsBody::default(), ChildOf(map))).id();
    let jetpack = world
        .spawn((
            JetpackItem::default(),
            JetpackFuel::full(10.0),
            Contained {
                owner: player,
                slot: EquipSlot::Back,
            },
            ChildOf(player),
        ))
        .id();
    app.update();

    app.world_mut().send_event(JetpackEvent::ToggleRequested {
        item: jetpack,
        performer: player,
        handled: false,
    });
    app.update();

    assert!(app.world().get::<ActiveJetpack>(jetpack).is_none());
    assert!(app.world().get::<JetpackUser>(player).is_none());
}

#[test]
fn test_empty_tank_cannot_enable() {
    let mut t = setup(JetpackConfig::default());
    t.app.world_mut().entity_mut(t.jetpack).insert(JetpackFuel {
        remaining: 0.0,
        ..JetpackFuel::full(10.0)
    });

    press_toggle(&mut t);
    assert!(!is_enabled(&t));
    assert!(!is_flying(&t));

    // Несколько кадров: jetpack не "мигает" обратно
    for _ in 0..3 {
        t.app.update();
        assert!(!is_enabled(&t));
    }
    assert_eq!(body_status(&t), BodyStatus::OnGround);
}

#[test]
fn test_fuel_drains_in_fixed_update_and_disables() {
    let mut t = setup(JetpackConfig::default());
    // 0.1 секунды полёта
    t.app.world_mut().entity_mut(t.jetpack).insert(JetpackFuel {
        remaining: 1.0,
        capacity: 1.0,
        usage_per_second: 10.0,
    });

    press_toggle(&mut t);
    assert!(is_enabled(&t));

    // Каждый кадр = 50ms виртуального времени → ~3 fixed тика по 1/60
    t.app
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)));

    let mut frames = 0;
    while is_enabled(&t) && frames < 20 {
        t.app.update();
        frames += 1;
    }

    assert!(!is_enabled(&t), "jetpack still enabled after {} frames", frames);
    assert!(!is_flying(&t));
    assert_eq!(body_status(&t), BodyStatus::OnGround);
    assert!(t.app.world().get::<JetpackFuel>(t.jetpack).unwrap().is_empty());
    assert!(popups(&t.app).contains(&PopupMessage {
        popup: JetpackPopup::OutOfFuel,
        viewer: t.player,
        recipient: t.player,
    }));

    // Пустой бак: повторное включение отклоняется
    press_toggle(&mut t);
    assert!(!is_enabled(&t));
}
