//! Movement компоненты: relay ввода, модификаторы скорости, физический статус

use bevy::prelude::*;
use crate::components::jetpack::JetpackItem;

/// Ввод движения entity перенаправлен через `relay` (например jetpack)
///
/// Пока компонент есть, движением управляет relay entity, а не raw input.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RelayInputMover {
    pub relay: Entity,
}

/// Обратная ссылка на relay entity: чей ввод она принимает
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementRelayTarget {
    pub source: Entity,
}

/// Модификаторы скорости (пересчитываются `refresh`)
///
/// Weightless-параметры берутся из jetpack пока entity летит,
/// иначе возвращаются к дефолтам.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementSpeedModifier {
    pub base_walk_speed: f32,
    pub base_sprint_speed: f32,
    pub weightless_acceleration: f32,
    pub weightless_friction: f32,
    pub weightless_modifier: f32,
}

impl MovementSpeedModifier {
    pub const DEFAULT_WEIGHTLESS_ACCELERATION: f32 = 1.0;
    pub const DEFAULT_WEIGHTLESS_FRICTION: f32 = 1.0;
    pub const DEFAULT_WEIGHTLESS_MODIFIER: f32 = 0.7;

    /// Пересчитать weightless-параметры (jetpack = Some пока летим)
    pub fn refresh(&mut self, jetpack: Option<&JetpackItem>) {
        match jetpack {
            Some(jetpack) => {
                self.weightless_acceleration = jetpack.acceleration;
                self.weightless_friction = jetpack.friction;
                self.weightless_modifier = jetpack.weightless_modifier;
            }
            None => {
                self.weightless_acceleration = Self::DEFAULT_WEIGHTLESS_ACCELERATION;
                self.weightless_friction = Self::DEFAULT_WEIGHTLESS_FRICTION;
                self.weightless_modifier = Self::DEFAULT_WEIGHTLESS_MODIFIER;
            }
        }
    }
}

impl Default for MovementSpeedModifier {
    fn default() -> Self {
        Self {
            base_walk_speed: 2.5,
            base_sprint_speed: 4.5,
            weightless_acceleration: Self::DEFAULT_WEIGHTLESS_ACCELERATION,
            weightless_friction: Self::DEFAULT_WEIGHTLESS_FRICTION,
            weightless_modifier: Self::DEFAULT_WEIGHTLESS_MODIFIER,
        }
    }
}

/// Статус физического тела
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum BodyStatus {
    /// Трение о пол, обычные ground-правила
    #[default]
    OnGround,
    /// Без ground-коллизий (jetpack, полёт)
    InAir,
}

/// Физическое тело (ECS-сторона). Rapier `Friction` синхронизируется из него.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub status: BodyStatus,
    /// Коэффициент трения, восстанавливаемый при `OnGround`
    pub ground_friction: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            status: BodyStatus::OnGround,
            ground_friction: 0.5,
        }
    }
}
