//! Equipment компоненты: кто носит item
//!
//! # Архитектура
//!
//! **Contained** — item лежит в контейнере `owner` (спина, пояс, руки, сумка):
//! - Владелец контейнера = кандидат в jetpack user
//! - Item дополнительно `ChildOf(owner)`, чтобы grid резолвился через носителя

use bevy::prelude::*;

/// Слот контейнера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum EquipSlot {
    #[default]
    Back,
    Belt,
    Hands,
    Storage,
}

/// Item внутри контейнера `owner`
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Contained {
    pub owner: Entity,
    pub slot: EquipSlot,
}
