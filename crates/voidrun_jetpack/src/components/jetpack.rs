//! Jetpack компоненты: item, active marker, user marker, fuel, appearance

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prototype id для toggle action (HUD кнопка)
pub const TOGGLE_JETPACK_ACTION: &str = "ActionToggleJetpack";

/// Jetpack item — носимое устройство
///
/// `enabled` НЕ хранится здесь: единственный источник правды — наличие
/// [`ActiveJetpack`] на entity.
///
/// Relay-параметры (acceleration/friction/weightless_modifier) применяются к
/// носителю через `MovementSpeedModifier::refresh` пока он летит.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct JetpackItem {
    /// Кэш toggle action entity (создаётся лениво на MapInit)
    pub toggle_action: Option<Entity>,
    /// Prototype id action
    pub toggle_action_prototype: String,
    pub acceleration: f32,
    pub friction: f32,
    pub weightless_modifier: f32,
}

impl Default for JetpackItem {
    fn default() -> Self {
        Self {
            toggle_action: None,
            toggle_action_prototype: TOGGLE_JETPACK_ACTION.to_string(),
            acceleration: 1.0,
            friction: 0.3,
            weightless_modifier: 1.2,
        }
    }
}

/// Marker: jetpack сейчас работает
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ActiveJetpack;

/// Marker на entity, которую сейчас несёт jetpack
///
/// Инвариант: существует только пока `jetpack` имеет [`ActiveJetpack`].
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct JetpackUser {
    pub jetpack: Entity,
}

/// Топливо jetpack (опционально)
///
/// Без этого компонента jetpack работает бесконечно.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct JetpackFuel {
    pub remaining: f32,
    pub capacity: f32,
    /// Расход в секунду пока [`ActiveJetpack`]
    pub usage_per_second: f32,
}

impl Default for JetpackFuel {
    fn default() -> Self {
        Self::full(100.0)
    }
}

impl JetpackFuel {
    pub fn full(capacity: f32) -> Self {
        Self {
            remaining: capacity,
            capacity,
            usage_per_second: 1.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Списать топливо за `delta` секунд. Возвращает true если бак опустел.
    pub fn consume(&mut self, delta: f32) -> bool {
        self.remaining = (self.remaining - self.usage_per_second * delta).max(0.0);
        self.is_empty()
    }

    pub fn refill(&mut self, amount: f32) {
        self.remaining = (self.remaining + amount).min(self.capacity);
    }
}

/// Ключи визуального состояния jetpack (реплицируются клиентам)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum JetpackVisuals {
    Enabled,
}

/// Appearance data (key → value), читается visual sync слоем
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Appearance {
    pub data: HashMap<JetpackVisuals, bool>,
}

impl Appearance {
    pub fn get(&self, key: JetpackVisuals) -> Option<bool> {
        self.data.get(&key).copied()
    }

    pub fn set(&mut self, key: JetpackVisuals, value: bool) {
        self.data.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_consume_clamps_at_zero() {
        let mut fuel = JetpackFuel {
            remaining: 1.5,
            capacity: 10.0,
            usage_per_second: 1.0,
        };

        assert!(!fuel.consume(1.0));
        assert_eq!(fuel.remaining, 0.5);

        assert!(fuel.consume(1.0));
        assert_eq!(fuel.remaining, 0.0);
    }

    #[test]
    fn test_fuel_refill_capped() {
        let mut fuel = JetpackFuel::full(10.0);
        fuel.consume(4.0);
        fuel.refill(100.0);
        assert_eq!(fuel.remaining, 10.0);
    }

    #[test]
    fn test_appearance_set_get() {
        let mut appearance = Appearance::default();
        assert_eq!(appearance.get(JetpackVisuals::Enabled), None);

        appearance.set(JetpackVisuals::Enabled, true);
        assert_eq!(appearance.get(JetpackVisuals::Enabled), Some(true));
    }
}
