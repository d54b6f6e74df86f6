//! Action routing: HUD action нажат → событие владельца action

use bevy::prelude::*;

use crate::components::{Action, ActionKind};
use crate::jetpack::JetpackEvent;
use crate::log_warning;

/// Игрок активировал action
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: Entity,
    pub performer: Entity,
}

pub fn route_action_requests(
    mut requests: EventReader<ActionRequest>,
    actions: Query<&Action>,
    mut events: EventWriter<JetpackEvent>,
) {
    for request in requests.read() {
        let Ok(action) = actions.get(request.action) else {
            log_warning(&format!("Action {:?} no longer exists", request.action));
            continue;
        };

        match action.kind {
            ActionKind::ToggleJetpack => {
                events.write(JetpackEvent::ToggleRequested {
                    item: action.container,
                    performer: request.performer,
                    handled: false,
                });
            }
        }
    }
}
