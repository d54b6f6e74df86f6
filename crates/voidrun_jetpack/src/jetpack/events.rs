//! Jetpack events
//!
//! # Architecture
//!
//! Все входящие сообщения — один enum [`JetpackEvent`]. Feed-системы
//! (Added/Changed детекторы, action routing, drop routing) пишут его,
//! `dispatch_jetpack_events` вычитывает и отдаёт `JetpackController::handle`.
//!
//! Исходящие: [`PopupMessage`] (уведомление игроку).

use bevy::prelude::*;

/// Входящее сообщение для jetpack controller
#[derive(Event, Debug, Clone, PartialEq)]
pub enum JetpackEvent {
    /// Item впервые появился на карте → ensure toggle action
    MapInit { item: Entity },

    /// Какие actions item выдаёт держателю
    GetItemActions { item: Entity, user: Entity },

    /// HUD action нажат
    ///
    /// `handled` — уже обработан кем-то раньше, пропускаем.
    ToggleRequested {
        item: Entity,
        performer: Entity,
        handled: bool,
    },

    /// Item выброшен `user`
    Dropped { item: Entity, user: Entity },

    /// Гравитация grid'а переключилась
    GravityChanged { grid: Entity, has_gravity: bool },

    /// Parent entity сменился (проверяется только для летящих users)
    ParentChanged { entity: Entity },

    /// Может ли entity двигаться в невесомости
    CanWeightlessMove { entity: Entity },

    /// Топливо активного jetpack закончилось
    OutOfFuel { item: Entity },
}

/// Результат обработки [`JetpackEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Событие не относится к jetpack (или уже было handled)
    Ignored,
    /// Обработано
    Handled,
    /// Отклонено с popup'ом игроку
    Rejected,
    /// Ответ на GetItemActions
    Actions(Vec<Entity>),
    /// Ответ на CanWeightlessMove
    WeightlessMove(bool),
}

/// Локализуемое сообщение jetpack'а
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JetpackPopup {
    /// Toggle на grid'е, где jetpack запрещён
    NoStation,
    /// Jetpack выключен: вернулись на grid с гравитацией
    ToGrid,
    /// Топливо закончилось
    OutOfFuel,
}

impl JetpackPopup {
    /// Ключ локализации
    pub fn loc_key(self) -> &'static str {
        match self {
            JetpackPopup::NoStation => "jetpack-no-station",
            JetpackPopup::ToGrid => "jetpack-to-grid",
            JetpackPopup::OutOfFuel => "jetpack-out-of-fuel",
        }
    }
}

/// Popup для конкретного игрока (fire-and-forget)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupMessage {
    pub popup: JetpackPopup,
    /// Где показать (entity-якорь)
    pub viewer: Entity,
    /// Кто увидит
    pub recipient: Entity,
}
