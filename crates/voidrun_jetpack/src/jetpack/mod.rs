//! Jetpack module — полёт в невесомости
//!
//! # Architecture
//!
//! **Два role'а:**
//! - jetpack item (`JetpackItem`) — носится, toggle через HUD action
//! - jetpack user (`JetpackUser`) — entity, которую jetpack сейчас несёт
//!
//! **Events → Controller flow:**
//! - Feed-системы пишут `JetpackEvent`
//! - `dispatch_jetpack_events` (exclusive) → `JetpackController::handle`
//! - Controller работает через `JetpackWorld`, policy подменяемая
//!
//! **Gravity policy:** grid с гравитацией блокирует jetpack (см. `JetpackConfig`).

use bevy::prelude::*;

pub mod controller;
pub mod events;
pub mod policy;
pub mod systems;
pub mod world_access;

// Re-exports
pub use controller::{JetpackController, Rejection, SetEnabledOutcome};
pub use events::*;
pub use policy::{DefaultPolicy, FuelPolicy, JetpackPolicy};
pub use systems::{can_weightless_move, item_actions};
pub use world_access::{FlyingUser, JetpackWorld};

use crate::actions::{route_action_requests, ActionRequest};
use crate::config::JetpackConfig;
use crate::equipment::ItemDropped;
use crate::physics::sync_body_friction;
use crate::SimulationSet;

/// Jetpack plugin
///
/// Custom policy: вставить `JetpackController::with_policy(..)` ДО plugin'а,
/// `init_resource` его не перезапишет.
pub struct JetpackPlugin;

impl Plugin for JetpackPlugin {
    fn build(&self, app: &mut App) {
        app
            // Events
            .add_event::<JetpackEvent>()
            .add_event::<PopupMessage>()
            .add_event::<ActionRequest>()
            .add_event::<ItemDropped>()
            // Resources
            .init_resource::<JetpackConfig>()
            .init_resource::<JetpackController>()
            // Systems
            .configure_sets(Update, (SimulationSet::Equipment, SimulationSet::Jetpack).chain())
            .add_systems(
                Update,
                (
                    systems::refresh_controller_config,
                    // Feed
                    systems::init_jetpack_items,
                    route_action_requests,
                    systems::route_dropped_items,
                    systems::detect_gravity_changes,
                    systems::detect_user_parent_changes,
                    // Dispatch
                    systems::dispatch_jetpack_events,
                    // Rapier sync после смены body status
                    sync_body_friction,
                )
                    .chain()
                    .in_set(SimulationSet::Jetpack),
            )
            .add_systems(FixedUpdate, systems::consume_jetpack_fuel);
    }
}
