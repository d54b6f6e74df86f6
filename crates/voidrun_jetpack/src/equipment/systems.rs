//! Equipment system implementations
//!
//! - `process_equip_item` — item → контейнер владельца
//! - `process_drop_item` — item → пол, `ItemDropped`

use bevy::prelude::*;
use crate::{
    components::Contained,
    equipment::events::*,
    log, log_error,
};

/// Process equip intents
pub fn process_equip_item(
    mut commands: Commands,
    mut events: EventReader<EquipItemIntent>,
) {
    for intent in events.read() {
        if intent.item == intent.owner {
            log_error(&format!("Item {:?} cannot contain itself", intent.item));
            continue;
        }

        commands.entity(intent.item).insert((
            Contained {
                owner: intent.owner,
                slot: intent.slot,
            },
            ChildOf(intent.owner),
        ));

        log(&format!("Equipped {:?} → {:?} ({:?})", intent.item, intent.owner, intent.slot));
    }
}

/// Process drop intents
///
/// Item встаёт рядом с владельцем: parent = parent владельца.
pub fn process_drop_item(
    mut commands: Commands,
    mut events: EventReader<DropItemIntent>,
    contained: Query<&Contained>,
    parents: Query<&ChildOf>,
    mut dropped: EventWriter<ItemDropped>,
) {
    for intent in events.read() {
        let Ok(container) = contained.get(intent.item) else {
            log_error(&format!("Item {:?} is not in a container", intent.item));
            continue;
        };
        let owner = container.owner;

        let mut item = commands.entity(intent.item);
        item.remove::<Contained>();

        match parents.get(owner) {
            Ok(owner_parent) => {
                item.insert(ChildOf(owner_parent.parent()));
            }
            Err(_) => {
                item.remove::<ChildOf>();
            }
        }

        dropped.write(ItemDropped {
            item: intent.item,
            user: owner,
        });

        log(&format!("Dropped {:?} (by {:?})", intent.item, owner));
    }
}
