//! Combat events (ECS → физика/звук/аналитика)

use bevy::prelude::*;

/// Экшен активирован арбитром в этом тике
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CombatActionStarted {
    pub entity: Entity,
    pub action_id: String,
    pub state_id: String,
}

/// Одноразовый импульс движения экшена (dodge рывок).
///
/// Интеграция в физику: забота потребителя события.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CombatImpulse {
    pub entity: Entity,
    pub action_id: String,
    pub velocity: Vec3,
}
