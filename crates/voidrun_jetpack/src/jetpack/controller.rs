//! Jetpack controller — state machine Disabled ⇄ Enabled + реакции на события
//!
//! # Flow `set_enabled`
//! 1. Уже в нужном состоянии → no-op
//! 2. Enable + policy.can_enable == false → reject
//! 3. Resolve user (explicit → container owner → relay source при disable)
//! 4. Enable без user → reject
//! 5. Enable, user не на grid/map напрямую → reject
//! 6. User уже летит на другом jetpack → выключаем старый
//! 7. ActiveJetpack add/remove
//! 8. Setup/remove user relay
//! 9. Refresh movement speed
//! 10. Appearance + dirty
//!
//! Все reject'ы происходят ДО любых мутаций.

use bevy::prelude::*;

use crate::components::{BodyStatus, JetpackVisuals};
use crate::config::JetpackConfig;
use crate::jetpack::events::{JetpackEvent, JetpackPopup, Reply};
use crate::jetpack::policy::{FuelPolicy, JetpackPolicy};
use crate::jetpack::world_access::{FlyingUser, JetpackWorld};
use crate::{log, log_info};

/// Почему `set_enabled` отказал
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `JetpackPolicy::can_enable` == false
    PolicyDenied,
    /// Никто не носит jetpack
    NoWearer,
    /// User внутри vehicle/сумки/кровати
    UserParented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetEnabledOutcome {
    Changed,
    AlreadyInState,
    Rejected(Rejection),
}

/// Jetpack controller (resource)
///
/// Держит snapshot конфигурации и policy. Мир передаётся в каждый вызов.
#[derive(Resource)]
pub struct JetpackController {
    config: JetpackConfig,
    policy: Box<dyn JetpackPolicy>,
}

impl Default for JetpackController {
    fn default() -> Self {
        Self::new(JetpackConfig::default())
    }
}

impl JetpackController {
    /// `FuelPolicy` по умолчанию: `consume_jetpack_fuel` всегда в расписании,
    /// пустой бак не должен включаться обратно. Items без `JetpackFuel` не затронуты.
    pub fn new(config: JetpackConfig) -> Self {
        Self::with_policy(config, Box::new(FuelPolicy))
    }

    pub fn with_policy(config: JetpackConfig, policy: Box<dyn JetpackPolicy>) -> Self {
        Self { config, policy }
    }

    pub fn config(&self) -> &JetpackConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: JetpackConfig) {
        self.config = config;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_enabled<W: JetpackWorld + ?Sized>(world: &W, item: Entity) -> bool {
        world.is_active(item)
    }

    pub fn is_user_flying<W: JetpackWorld + ?Sized>(world: &W, user: Entity) -> bool {
        world.jetpack_of(user).is_some()
    }

    /// Можно ли toggle'ить jetpack на grid'е (`None` = открытый космос)
    ///
    /// Grid с включённой (или неизвестной) гравитацией блокирует jetpack,
    /// иначе игроки выключают гравитацию и летают внутри станции.
    pub fn can_enable_on_grid<W: JetpackWorld + ?Sized>(&self, world: &W, grid: Option<Entity>) -> bool {
        let Some(grid) = grid else {
            return true;
        };

        self.config.enable_anywhere
            || (self.config.enable_in_no_gravity && world.grid_gravity(grid) == Some(false))
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    pub fn handle<W: JetpackWorld>(&self, world: &mut W, event: &JetpackEvent) -> Reply {
        match *event {
            JetpackEvent::MapInit { item } => self.on_map_init(world, item),
            JetpackEvent::GetItemActions { item, .. } => self.on_get_item_actions(world, item),
            JetpackEvent::ToggleRequested {
                item,
                performer,
                handled,
            } => self.on_toggle(world, item, performer, handled),
            JetpackEvent::Dropped { item, user } => self.on_dropped(world, item, user),
            JetpackEvent::GravityChanged { grid, has_gravity } => {
                self.on_gravity_changed(world, grid, has_gravity)
            }
            JetpackEvent::ParentChanged { entity } => self.on_parent_changed(world, entity),
            JetpackEvent::CanWeightlessMove { entity } => self.on_can_weightless_move(world, entity),
            JetpackEvent::OutOfFuel { item } => self.on_out_of_fuel(world, item),
        }
    }

    fn on_map_init<W: JetpackWorld>(&self, world: &mut W, item: Entity) -> Reply {
        if world.ensure_toggle_action(item).is_none() {
            return Reply::Ignored;
        }

        world.mark_dirty(item);
        Reply::Handled
    }

    fn on_get_item_actions<W: JetpackWorld>(&self, world: &mut W, item: Entity) -> Reply {
        match world.ensure_toggle_action(item) {
            Some(action) => Reply::Actions(vec![action]),
            None => Reply::Ignored,
        }
    }

    fn on_toggle<W: JetpackWorld>(
        &self,
        world: &mut W,
        item: Entity,
        performer: Entity,
        handled: bool,
    ) -> Reply {
        if handled || !world.is_jetpack(item) {
            return Reply::Ignored;
        }

        if let Some(placement) = world.placement(item) {
            if !self.can_enable_on_grid(world, placement.grid) {
                log(&format!("Jetpack {:?}: toggle rejected on grid {:?}", item, placement.grid));
                world.popup(JetpackPopup::NoStation, item, performer);
                return Reply::Rejected;
            }
        }

        let enabled = Self::is_enabled(world, item);
        match self.set_enabled(world, item, !enabled, None) {
            SetEnabledOutcome::Rejected(reason) => {
                log(&format!("Jetpack {:?}: toggle rejected ({:?})", item, reason));
                Reply::Rejected
            }
            SetEnabledOutcome::Changed | SetEnabledOutcome::AlreadyInState => Reply::Handled,
        }
    }

    fn on_dropped<W: JetpackWorld>(&self, world: &mut W, item: Entity, user: Entity) -> Reply {
        if !world.is_jetpack(item) {
            return Reply::Ignored;
        }

        self.set_enabled(world, item, false, Some(user));
        Reply::Handled
    }

    /// Гравитация включилась → все летящие на этом grid'е теряют jetpack
    ///
    /// NOTE: при `enable_anywhere` выходим сразу, полёты на grid'е сохраняются.
    fn on_gravity_changed<W: JetpackWorld>(&self, world: &mut W, grid: Entity, has_gravity: bool) -> Reply {
        if self.config.enable_anywhere || !has_gravity {
            return Reply::Ignored;
        }

        // Snapshot до мутаций: во время скана ни один "enabled" не меняется
        let flying = world.flying_users();
        let mut reply = Reply::Ignored;

        for FlyingUser { user, jetpack, grid: user_grid } in flying {
            if user_grid != Some(grid) || !world.is_jetpack(jetpack) {
                continue;
            }

            world.popup(JetpackPopup::ToGrid, user, user);
            self.set_enabled(world, jetpack, false, Some(user));
            reply = Reply::Handled;
        }

        reply
    }

    fn on_parent_changed<W: JetpackWorld>(&self, world: &mut W, entity: Entity) -> Reply {
        let Some(jetpack) = world.jetpack_of(entity) else {
            return Reply::Ignored;
        };
        if !world.is_jetpack(jetpack) {
            return Reply::Ignored;
        }

        let grid = world.placement(entity).and_then(|p| p.grid);
        let still_allowed = self.can_enable_on_grid(world, grid)
            && self.policy.can_enable(world, jetpack)
            && self.policy.user_not_parented(world, Some(entity), jetpack);

        if still_allowed {
            return Reply::Ignored;
        }

        self.set_enabled(world, jetpack, false, Some(entity));
        world.popup(JetpackPopup::ToGrid, entity, entity);
        Reply::Handled
    }

    /// Jetpack и его носитель всегда могут двигаться в невесомости
    fn on_can_weightless_move<W: JetpackWorld>(&self, world: &mut W, entity: Entity) -> Reply {
        if world.is_jetpack(entity) || Self::is_user_flying(world, entity) {
            Reply::WeightlessMove(true)
        } else {
            Reply::Ignored
        }
    }

    fn on_out_of_fuel<W: JetpackWorld>(&self, world: &mut W, item: Entity) -> Reply {
        if !Self::is_enabled(world, item) {
            return Reply::Ignored;
        }

        let user = world
            .relay_source(item)
            .or_else(|| world.container_owner(item));

        if let Some(user) = user {
            world.popup(JetpackPopup::OutOfFuel, user, user);
        }

        self.set_enabled(world, item, false, user);
        Reply::Handled
    }

    // ========================================================================
    // State machine
    // ========================================================================

    pub fn set_enabled<W: JetpackWorld>(
        &self,
        world: &mut W,
        item: Entity,
        enabled: bool,
        user: Option<Entity>,
    ) -> SetEnabledOutcome {
        if Self::is_enabled(world, item) == enabled {
            return SetEnabledOutcome::AlreadyInState;
        }

        if enabled && !self.policy.can_enable(world, item) {
            log(&format!("Jetpack {:?}: policy denied enable", item));
            return SetEnabledOutcome::Rejected(Rejection::PolicyDenied);
        }

        let mut user = user.or_else(|| world.container_owner(item));
        if !enabled {
            user = user.or_else(|| world.relay_source(item));
        }

        if enabled {
            // Нельзя включить, если никто не носит
            let Some(wearer) = user else {
                log(&format!("Jetpack {:?}: no wearer, enable rejected", item));
                return SetEnabledOutcome::Rejected(Rejection::NoWearer);
            };

            if !self.policy.user_not_parented(world, Some(wearer), item) {
                log(&format!("Jetpack {:?}: wearer {:?} is not on grid/map directly", item, wearer));
                return SetEnabledOutcome::Rejected(Rejection::UserParented);
            }

            // Не стакаем: старый jetpack выключается
            if let Some(previous) = world.jetpack_of(wearer).filter(|&j| j != item) {
                self.set_enabled(world, previous, false, Some(wearer));
            }
        }

        world.set_active(item, enabled);

        if let Some(user) = user {
            if enabled {
                self.setup_user(world, user, item);
            } else {
                self.remove_user(world, user, item);
            }

            world.refresh_movement_speed(user);
        }

        if !enabled {
            // Relay мог остаться на другом entity (item переложили без drop)
            if let Some(stray) = world.relay_source(item).filter(|&s| Some(s) != user) {
                self.remove_user(world, stray, item);
                world.refresh_movement_speed(stray);
            }
        }

        world.set_visual(item, JetpackVisuals::Enabled, enabled);
        world.mark_dirty(item);

        log_info(&format!(
            "Jetpack {:?} {} (user {:?})",
            item,
            if enabled { "enabled" } else { "disabled" },
            user
        ));

        SetEnabledOutcome::Changed
    }

    fn setup_user<W: JetpackWorld>(&self, world: &mut W, user: Entity, item: Entity) {
        world.attach_user(user, item);
        world.set_relay(user, item);
        world.set_body_status(user, BodyStatus::InAir);
    }

    fn remove_user<W: JetpackWorld>(&self, world: &mut W, user: Entity, item: Entity) {
        // User летит на другом jetpack — не трогаем
        if world.jetpack_of(user).is_some_and(|j| j != item) {
            return;
        }

        if !world.detach_user(user) {
            return;
        }

        world.set_body_status(user, BodyStatus::OnGround);
        world.remove_relay(user);
    }
}
