//! Доступ jetpack controller'а к миру
//!
//! [`JetpackWorld`] — всё, что controller читает/пишет у collaborators
//! (containers, relay, physics, popups, appearance, actions). Trait object-safe,
//! чтобы policy могла получать `&dyn JetpackWorld`.
//!
//! Единственная реализация — Bevy [`World`].

use bevy::prelude::*;

use crate::components::{
    resolve_placement, Action, ActionKind, ActiveJetpack, Appearance, BodyStatus, Contained,
    Gravity, JetpackFuel, JetpackItem, JetpackUser, JetpackVisuals, MovementRelayTarget,
    MovementSpeedModifier, PhysicsBody, Placement, RelayInputMover,
};
use crate::jetpack::events::{JetpackPopup, PopupMessage};

/// Летящий user на момент snapshot'а
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlyingUser {
    pub user: Entity,
    pub jetpack: Entity,
    pub grid: Option<Entity>,
}

pub trait JetpackWorld {
    /// Entity — jetpack item
    fn is_jetpack(&self, entity: Entity) -> bool;
    /// [`ActiveJetpack`] на item
    fn is_active(&self, item: Entity) -> bool;
    fn set_active(&mut self, item: Entity, active: bool);

    /// Jetpack, через который летит user
    fn jetpack_of(&self, user: Entity) -> Option<Entity>;
    fn attach_user(&mut self, user: Entity, item: Entity);
    /// Удалить [`JetpackUser`]. false если его не было.
    fn detach_user(&mut self, user: Entity) -> bool;

    /// Владелец контейнера, в котором лежит item
    fn container_owner(&self, item: Entity) -> Option<Entity>;
    /// Чей ввод сейчас relay'ится через item
    fn relay_source(&self, item: Entity) -> Option<Entity>;

    fn placement(&self, entity: Entity) -> Option<Placement>;
    /// `None` — у grid'а нет генератора гравитации
    fn grid_gravity(&self, grid: Entity) -> Option<bool>;

    fn set_relay(&mut self, user: Entity, relay: Entity);
    fn remove_relay(&mut self, user: Entity);

    /// false если у entity нет физического тела
    fn set_body_status(&mut self, entity: Entity, status: BodyStatus) -> bool;
    fn refresh_movement_speed(&mut self, entity: Entity);

    fn popup(&mut self, popup: JetpackPopup, viewer: Entity, recipient: Entity);
    fn set_visual(&mut self, item: Entity, key: JetpackVisuals, value: bool);
    /// Пометить item для network sync
    fn mark_dirty(&mut self, item: Entity);

    /// Idempotent: вернуть живой кэшированный toggle action или создать новый
    fn ensure_toggle_action(&mut self, item: Entity) -> Option<Entity>;

    /// Snapshot всех летящих users (сортирован по entity)
    fn flying_users(&mut self) -> Vec<FlyingUser>;

    fn fuel_remaining(&self, item: Entity) -> Option<f32>;
}

impl JetpackWorld for World {
    fn is_jetpack(&self, entity: Entity) -> bool {
        self.get::<JetpackItem>(entity).is_some()
    }

    fn is_active(&self, item: Entity) -> bool {
        self.get::<ActiveJetpack>(item).is_some()
    }

    fn set_active(&mut self, item: Entity, active: bool) {
        let Ok(mut entity) = self.get_entity_mut(item) else {
            return;
        };

        if active {
            entity.insert(ActiveJetpack);
        } else {
            entity.remove::<ActiveJetpack>();
        }
    }

    fn jetpack_of(&self, user: Entity) -> Option<Entity> {
        self.get::<JetpackUser>(user).map(|u| u.jetpack)
    }

    fn attach_user(&mut self, user: Entity, item: Entity) {
        if let Ok(mut entity) = self.get_entity_mut(user) {
            entity.insert(JetpackUser { jetpack: item });
        }
    }

    fn detach_user(&mut self, user: Entity) -> bool {
        self.get_entity_mut(user)
            .ok()
            .and_then(|mut entity| entity.take::<JetpackUser>())
            .is_some()
    }

    fn container_owner(&self, item: Entity) -> Option<Entity> {
        self.get::<Contained>(item).map(|c| c.owner)
    }

    fn relay_source(&self, item: Entity) -> Option<Entity> {
        self.get::<MovementRelayTarget>(item).map(|t| t.source)
    }

    fn placement(&self, entity: Entity) -> Option<Placement> {
        resolve_placement(self, entity)
    }

    fn grid_gravity(&self, grid: Entity) -> Option<bool> {
        self.get::<Gravity>(grid).map(|g| g.enabled)
    }

    fn set_relay(&mut self, user: Entity, relay: Entity) {
        // Старый relay (другой entity) отцепляем
        if self
            .get::<RelayInputMover>(user)
            .is_some_and(|r| r.relay != relay)
        {
            self.remove_relay(user);
        }

        let Ok(mut user_entity) = self.get_entity_mut(user) else {
            return;
        };
        user_entity.insert(RelayInputMover { relay });

        if let Ok(mut relay_entity) = self.get_entity_mut(relay) {
            relay_entity.insert(MovementRelayTarget { source: user });
        }
    }

    fn remove_relay(&mut self, user: Entity) {
        let Some(relay) = self
            .get_entity_mut(user)
            .ok()
            .and_then(|mut entity| entity.take::<RelayInputMover>())
        else {
            return;
        };

        if self
            .get::<MovementRelayTarget>(relay.relay)
            .is_some_and(|t| t.source == user)
        {
            if let Ok(mut relay_entity) = self.get_entity_mut(relay.relay) {
                relay_entity.remove::<MovementRelayTarget>();
            }
        }
    }

    fn set_body_status(&mut self, entity: Entity, status: BodyStatus) -> bool {
        let Some(mut body) = self.get_mut::<PhysicsBody>(entity) else {
            return false;
        };

        if body.status != status {
            body.status = status;
        }
        true
    }

    fn refresh_movement_speed(&mut self, entity: Entity) {
        let jetpack = self
            .get::<JetpackUser>(entity)
            .and_then(|user| self.get::<JetpackItem>(user.jetpack))
            .cloned();

        if let Some(mut modifier) = self.get_mut::<MovementSpeedModifier>(entity) {
            modifier.refresh(jetpack.as_ref());
        }
    }

    fn popup(&mut self, popup: JetpackPopup, viewer: Entity, recipient: Entity) {
        self.send_event(PopupMessage {
            popup,
            viewer,
            recipient,
        });
    }

    fn set_visual(&mut self, item: Entity, key: JetpackVisuals, value: bool) {
        let Ok(mut entity) = self.get_entity_mut(item) else {
            return;
        };

        if let Some(mut appearance) = entity.get_mut::<Appearance>() {
            appearance.set(key, value);
            return;
        }

        let mut appearance = Appearance::default();
        appearance.set(key, value);
        entity.insert(appearance);
    }

    fn mark_dirty(&mut self, item: Entity) {
        if let Some(mut jetpack) = self.get_mut::<JetpackItem>(item) {
            jetpack.set_changed();
        }
    }

    fn ensure_toggle_action(&mut self, item: Entity) -> Option<Entity> {
        let (cached, prototype) = {
            let jetpack = self.get::<JetpackItem>(item)?;
            (jetpack.toggle_action, jetpack.toggle_action_prototype.clone())
        };

        if let Some(action) = cached {
            if self
                .get::<Action>(action)
                .is_some_and(|a| a.container == item)
            {
                return Some(action);
            }
        }

        let action = self
            .spawn((
                Action {
                    kind: ActionKind::ToggleJetpack,
                    container: item,
                    prototype,
                },
                ChildOf(item),
            ))
            .id();

        if let Some(mut jetpack) = self.get_mut::<JetpackItem>(item) {
            jetpack.toggle_action = Some(action);
        }

        Some(action)
    }

    fn flying_users(&mut self) -> Vec<FlyingUser> {
        let mut query = self.query::<(Entity, &JetpackUser)>();
        let mut users: Vec<(Entity, Entity)> = query
            .iter(self)
            .map(|(entity, user)| (entity, user.jetpack))
            .collect();
        users.sort_by_key(|(entity, _)| *entity);

        users
            .into_iter()
            .map(|(user, jetpack)| FlyingUser {
                user,
                jetpack,
                grid: resolve_placement(self, user).and_then(|p| p.grid),
            })
            .collect()
    }

    fn fuel_remaining(&self, item: Entity) -> Option<f32> {
        self.get::<JetpackFuel>(item).map(|f| f.remaining)
    }
}
