//! ECS Components для jetpack feature
//!
//! Организация по доменам:
//! - jetpack: JetpackItem, ActiveJetpack, JetpackUser, JetpackFuel, Appearance
//! - world: Map, Grid, Gravity, Placement
//! - movement: relay ввода, модификаторы скорости, PhysicsBody
//! - equipment: Contained (кто носит item)
//! - actions: Action (HUD toggle)

pub mod actions;
pub mod equipment;
pub mod jetpack;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actions::*;
pub use equipment::*;
pub use jetpack::*;
pub use movement::*;
pub use world::*;
