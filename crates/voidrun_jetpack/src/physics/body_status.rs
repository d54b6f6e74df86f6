//! Body status → Rapier friction
//!
//! `InAir` тело не цепляется за пол: коэффициент трения 0.
//! `OnGround` восстанавливает `PhysicsBody::ground_friction`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Friction;

use crate::components::{BodyStatus, PhysicsBody};

/// Синхронизация PhysicsBody.status → Rapier Friction
pub fn sync_body_friction(
    mut query: Query<(&PhysicsBody, &mut Friction), Changed<PhysicsBody>>,
) {
    for (body, mut friction) in query.iter_mut() {
        friction.coefficient = match body.status {
            BodyStatus::InAir => 0.0,
            BodyStatus::OnGround => body.ground_friction,
        };
    }
}
