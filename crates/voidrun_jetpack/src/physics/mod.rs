//! Physics module
//!
//! ECS владеет `PhysicsBody.status`, Rapier получает производные параметры.

pub mod body_status;

// Re-export основных типов
pub use body_status::sync_body_friction;
