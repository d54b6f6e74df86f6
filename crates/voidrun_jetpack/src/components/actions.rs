//! Action компоненты (HUD actions, выдаваемые items)

use bevy::prelude::*;

/// Что делает action при активации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ActionKind {
    ToggleJetpack,
}

/// Action entity. `container` — item, который выдаёт этот action.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Action {
    pub kind: ActionKind,
    pub container: Entity,
    pub prototype: String,
}
