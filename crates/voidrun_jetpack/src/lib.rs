//! VOIDRUN Jetpack
//!
//! Jetpack feature на Bevy ECS 0.16: полёт в невесомости для носителя jetpack.
//!
//! - `components` — данные (item, user marker, grid/gravity, relay, physics)
//! - `jetpack` — controller (state machine) + события + policy
//! - `equipment` — кто носит item, drop
//! - `actions` — HUD action → toggle
//! - `physics` — body status → Rapier friction
//! - `config` / `logger` — ambient

use bevy::prelude::*;

pub mod actions;
pub mod components;
pub mod config;
pub mod equipment;
pub mod jetpack;
pub mod logger;
pub mod physics;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{ConfigError, JetpackConfig, SimulationConfig};
pub use equipment::{DropItemIntent, EquipItemIntent, EquipmentPlugin, ItemDropped};
pub use jetpack::{
    JetpackController, JetpackEvent, JetpackPlugin, JetpackPopup, PopupMessage, Reply,
    SetEnabledOutcome,
};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};

/// Порядок в Update: equipment (contain/drop) → jetpack (feed → dispatch → physics sync)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Equipment,
    Jetpack,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz (расход топлива)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((EquipmentPlugin, JetpackPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(config: &SimulationConfig) -> App {
    init_logger();
    set_log_level(config.log_level);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config.jetpack)
        .add_plugins(SimulationPlugin);

    app
}
