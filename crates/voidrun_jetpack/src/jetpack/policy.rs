//! Policy: можно ли включить jetpack
//!
//! Подменяемые проверки controller'а. `DefaultPolicy` разрешает всё, кроме
//! users внутри vehicle/сумки/кровати; `FuelPolicy` (default controller'а)
//! дополнительно требует топливо.

use bevy::prelude::*;

use crate::jetpack::world_access::JetpackWorld;

pub trait JetpackPolicy: Send + Sync {
    /// Extension point для проверок item'а (топливо, поломка, ...)
    fn can_enable(&self, _world: &dyn JetpackWorld, _item: Entity) -> bool {
        true
    }

    /// User прикреплён напрямую к grid/map (не сидит в vehicle, сумке, кровати).
    /// Без user или без placement — true.
    fn user_not_parented(&self, world: &dyn JetpackWorld, user: Option<Entity>, _item: Entity) -> bool {
        user.and_then(|user| world.placement(user))
            .map_or(true, |placement| placement.is_directly_on_grid_or_map())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl JetpackPolicy for DefaultPolicy {}

/// Нельзя включить jetpack с пустым баком. Items без `JetpackFuel` — бесконечные.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuelPolicy;

impl JetpackPolicy for FuelPolicy {
    fn can_enable(&self, world: &dyn JetpackWorld, item: Entity) -> bool {
        world.fuel_remaining(item).map_or(true, |remaining| remaining > 0.0)
    }
}
