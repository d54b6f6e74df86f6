//! Equipment events
//!
//! - `EquipItemIntent` → положить item в контейнер владельца (Contained + ChildOf)
//! - `DropItemIntent` → выбросить item на пол (parent = parent владельца)
//! - `ItemDropped` → уведомление после drop (jetpack слушает его)

use bevy::prelude::*;
use crate::components::EquipSlot;

/// Надеть/положить item в слот `owner`
#[derive(Event, Clone, Copy, Debug)]
pub struct EquipItemIntent {
    pub item: Entity,
    pub owner: Entity,
    pub slot: EquipSlot,
}

/// Выбросить item из контейнера
#[derive(Event, Clone, Copy, Debug)]
pub struct DropItemIntent {
    pub item: Entity,
}

/// Item выброшен `user`
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemDropped {
    pub item: Entity,
    pub user: Entity,
}
