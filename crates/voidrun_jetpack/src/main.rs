//! Headless сценарий jetpack
//!
//! `voidrun_jetpack [config.toml]` — надеть jetpack, взлететь в открытом
//! космосе, залететь на станцию, включить там гравитацию.

use bevy::ecs::event::Events;
use bevy::prelude::*;
use voidrun_jetpack::actions::ActionRequest;
use voidrun_jetpack::*;

fn main() -> Result<(), ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    println!("Starting VOIDRUN jetpack scenario ({:?})", config.jetpack);

    let mut app = create_headless_app(&config);

    let map = app.world_mut().spawn(Map).id();
    let station = app
        .world_mut()
        .spawn((Grid, Gravity { enabled: false }, ChildOf(map)))
        .id();
    let player = app
        .world_mut()
        .spawn((PhysicsBody::default(), MovementSpeedModifier::default(), ChildOf(map)))
        .id();
    let jetpack = app
        .world_mut()
        .spawn((JetpackItem::default(), ChildOf(map)))
        .id();
    app.update();

    app.world_mut().send_event(EquipItemIntent {
        item: jetpack,
        owner: player,
        slot: EquipSlot::Back,
    });
    app.update();
    report(&app, "equipped", player, jetpack);

    let Some(action) = app
        .world()
        .get::<JetpackItem>(jetpack)
        .and_then(|j| j.toggle_action)
    else {
        println!("Jetpack has no toggle action, aborting");
        return Ok(());
    };

    app.world_mut().send_event(ActionRequest {
        action,
        performer: player,
    });
    app.update();
    report(&app, "toggled in open space", player, jetpack);

    app.world_mut().entity_mut(player).insert(ChildOf(station));
    app.update();
    report(&app, "drifted onto station", player, jetpack);

    if let Some(mut gravity) = app.world_mut().get_mut::<Gravity>(station) {
        gravity.enabled = true;
    }
    app.update();
    report(&app, "station gravity on", player, jetpack);

    let popups = app.world().resource::<Events<PopupMessage>>();
    let mut cursor = popups.get_cursor();
    for popup in cursor.read(popups) {
        println!("Popup → {:?}: {}", popup.recipient, popup.popup.loc_key());
    }

    println!("Scenario complete!");
    Ok(())
}

fn report(app: &App, step: &str, player: Entity, jetpack: Entity) {
    let world = app.world();
    let status = world.get::<PhysicsBody>(player).map(|b| b.status);

    println!(
        "[{}] enabled={} flying={} body={:?}",
        step,
        world.get::<ActiveJetpack>(jetpack).is_some(),
        world.get::<JetpackUser>(player).is_some(),
        status
    );
}
