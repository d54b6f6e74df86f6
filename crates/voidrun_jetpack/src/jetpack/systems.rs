//! Jetpack systems
//!
//! **Feed** (пишут [`JetpackEvent`]):
//! - `init_jetpack_items` — Added<JetpackItem> → MapInit
//! - `route_dropped_items` — ItemDropped → Dropped
//! - `detect_gravity_changes` — Changed<Gravity> → GravityChanged
//! - `detect_user_parent_changes` — Changed<ChildOf> у летящих → ParentChanged
//! - `consume_jetpack_fuel` (FixedUpdate) — пустой бак → OutOfFuel
//!
//! **Dispatch:** `dispatch_jetpack_events` — exclusive, вычитывает всё и
//! прогоняет через `JetpackController::handle` последовательно.

use std::collections::HashMap;

use bevy::ecs::event::Events;
use bevy::prelude::*;

use crate::components::{ActiveJetpack, Gravity, JetpackFuel, JetpackItem, JetpackUser};
use crate::config::JetpackConfig;
use crate::equipment::ItemDropped;
use crate::jetpack::controller::JetpackController;
use crate::jetpack::events::{JetpackEvent, Reply};
use crate::log;

/// Snapshot конфигурации в controller при изменении resource
pub fn refresh_controller_config(config: Res<JetpackConfig>, mut controller: ResMut<JetpackController>) {
    if config.is_changed() {
        controller.update_config(*config);
    }
}

pub fn init_jetpack_items(
    items: Query<Entity, Added<JetpackItem>>,
    mut events: EventWriter<JetpackEvent>,
) {
    for item in &items {
        events.write(JetpackEvent::MapInit { item });
    }
}

pub fn route_dropped_items(
    mut dropped: EventReader<ItemDropped>,
    jetpacks: Query<(), With<JetpackItem>>,
    mut events: EventWriter<JetpackEvent>,
) {
    for drop in dropped.read() {
        if jetpacks.contains(drop.item) {
            events.write(JetpackEvent::Dropped {
                item: drop.item,
                user: drop.user,
            });
        }
    }
}

/// Changed<Gravity> срабатывает на любой `get_mut`, поэтому сверяем с последним
/// увиденным значением. Added тоже считается Changed: генератор только появился, пропускаем.
pub fn detect_gravity_changes(
    grids: Query<(Entity, Ref<Gravity>), Changed<Gravity>>,
    mut last_seen: Local<HashMap<Entity, bool>>,
    mut events: EventWriter<JetpackEvent>,
) {
    for (grid, gravity) in &grids {
        let previous = last_seen.insert(grid, gravity.enabled);

        if gravity.is_added() || previous == Some(gravity.enabled) {
            continue;
        }

        events.write(JetpackEvent::GravityChanged {
            grid,
            has_gravity: gravity.enabled,
        });
    }
}

pub fn detect_user_parent_changes(
    users: Query<Entity, (With<JetpackUser>, Changed<ChildOf>)>,
    mut events: EventWriter<JetpackEvent>,
) {
    for entity in &users {
        events.write(JetpackEvent::ParentChanged { entity });
    }
}

/// Расход топлива активных jetpacks (FixedUpdate)
pub fn consume_jetpack_fuel(
    mut jetpacks: Query<(Entity, &mut JetpackFuel), With<ActiveJetpack>>,
    time: Res<Time<Fixed>>,
    mut events: EventWriter<JetpackEvent>,
) {
    let delta = time.delta_secs();

    for (item, mut fuel) in jetpacks.iter_mut() {
        if fuel.consume(delta) {
            events.write(JetpackEvent::OutOfFuel { item });
        }
    }
}

/// Exclusive: все jetpack события кадра обрабатываются по порядку
pub fn dispatch_jetpack_events(world: &mut World) {
    let events: Vec<JetpackEvent> = world
        .resource_mut::<Events<JetpackEvent>>()
        .drain()
        .collect();

    if events.is_empty() {
        return;
    }

    world.resource_scope(|world, controller: Mut<JetpackController>| {
        for event in &events {
            let reply = controller.handle(world, event);
            if reply != Reply::Ignored {
                log(&format!("{:?} → {:?}", event, reply));
            }
        }
    });
}

// ============================================================================
// Synchronous queries (для host систем)
// ============================================================================

/// Может ли entity двигаться в невесомости благодаря jetpack
pub fn can_weightless_move(world: &mut World, entity: Entity) -> bool {
    let event = JetpackEvent::CanWeightlessMove { entity };
    let reply = world.resource_scope(|world, controller: Mut<JetpackController>| {
        controller.handle(world, &event)
    });

    reply == Reply::WeightlessMove(true)
}

/// Actions, которые item выдаёт держателю
pub fn item_actions(world: &mut World, item: Entity, user: Entity) -> Vec<Entity> {
    let event = JetpackEvent::GetItemActions { item, user };
    let reply = world.resource_scope(|world, controller: Mut<JetpackController>| {
        controller.handle(world, &event)
    });

    match reply {
        Reply::Actions(actions) => actions,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(world: &mut World) -> Vec<JetpackEvent> {
        world.resource_mut::<Events<JetpackEvent>>().drain().collect()
    }

    #[test]
    fn test_gravity_events_only_on_real_change() {
        let mut world = World::new();
        world.init_resource::<Events<JetpackEvent>>();
        let mut schedule = Schedule::default();
        schedule.add_systems(detect_gravity_changes);

        let grid = world.spawn(Gravity { enabled: false }).id();
        schedule.run(&mut world);
        assert!(drain(&mut world).is_empty());

        // Запись того же значения
        world.get_mut::<Gravity>(grid).unwrap().enabled = false;
        schedule.run(&mut world);
        assert!(drain(&mut world).is_empty());

        world.get_mut::<Gravity>(grid).unwrap().enabled = true;
        schedule.run(&mut world);
        assert_eq!(
            drain(&mut world),
            vec![JetpackEvent::GravityChanged {
                grid,
                has_gravity: true,
            }]
        );

        world.get_mut::<Gravity>(grid).unwrap().enabled = true;
        schedule.run(&mut world);
        assert!(drain(&mut world).is_empty());
    }
}
