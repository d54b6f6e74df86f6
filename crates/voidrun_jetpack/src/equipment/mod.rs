//! Equipment module — кто носит items
//!
//! **Events → Systems flow:**
//! - Player/AI пишет intent
//! - Системы меняют Contained/ChildOf
//! - Drop → `ItemDropped` (jetpack выключается через routing)

use bevy::prelude::*;

pub mod events;
pub mod systems;

// Re-exports
pub use events::*;
pub use systems::*;

use crate::SimulationSet;

/// Equipment plugin
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<EquipItemIntent>()
            .add_event::<DropItemIntent>()
            .add_event::<ItemDropped>()
            .configure_sets(Update, (SimulationSet::Equipment, SimulationSet::Jetpack).chain())
            .add_systems(
                Update,
                (process_equip_item, process_drop_item)
                    .chain()
                    .in_set(SimulationSet::Equipment),
            );
    }
}
