//! World layout компоненты: Map, Grid, Gravity + резолв placement
//!
//! Иерархия через Bevy `ChildOf`:
//! - Map (корень)
//! - Grid (станция/корабль) — `ChildOf(map)`
//! - Actor — `ChildOf(grid)` или `ChildOf(map)` в открытом космосе
//! - Vehicle / bag / bed — промежуточный parent между actor и grid

use bevy::prelude::*;

/// Защита от циклов в иерархии (ChildOf не должен их допускать, но всё же)
const MAX_HIERARCHY_DEPTH: usize = 64;

/// Marker: корень карты
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Map;

/// Marker: grid (станция, шаттл, астероид)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Grid;

/// Гравитационный генератор grid'а
///
/// Отсутствие компонента ≠ "гравитация выключена": это "неизвестно/нет генератора".
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Gravity {
    pub enabled: bool,
}

impl Default for Gravity {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Положение entity в иерархии мира
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    /// Прямой parent (`ChildOf`)
    pub parent: Option<Entity>,
    /// Ближайший grid вверх по иерархии (включая саму entity)
    pub grid: Option<Entity>,
    /// Map вверх по иерархии (включая саму entity)
    pub map: Option<Entity>,
}

impl Placement {
    /// Прикреплена ли entity напрямую к grid или map
    /// (не сидит в vehicle, сумке, кровати)
    pub fn is_directly_on_grid_or_map(&self) -> bool {
        self.parent == self.grid || self.parent == self.map
    }
}

/// Резолв placement через `ChildOf`. `None` если entity не существует.
pub fn resolve_placement(world: &World, entity: Entity) -> Option<Placement> {
    world.get_entity(entity).ok()?;

    let mut placement = Placement {
        parent: world.get::<ChildOf>(entity).map(ChildOf::parent),
        ..default()
    };

    let mut current = Some(entity);
    for _ in 0..MAX_HIERARCHY_DEPTH {
        let Some(node) = current else {
            break;
        };

        if placement.grid.is_none() && world.get::<Grid>(node).is_some() {
            placement.grid = Some(node);
        }

        if world.get::<Map>(node).is_some() {
            placement.map = Some(node);
            break;
        }

        current = world.get::<ChildOf>(node).map(ChildOf::parent);
    }

    Some(placement)
}
