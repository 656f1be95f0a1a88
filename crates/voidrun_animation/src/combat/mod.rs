//! Combat action module
//!
//! ECS ответственность:
//! - Catalog: декларативные экшены (trigger, cooldown, состояние, движение, экипировка)
//! - Runtime: активный экшен + cooldown'ы per entity
//! - Arbitration: максимум один новый экшен за тик, first-declared-wins
//! - Events: CombatActionStarted, CombatImpulse
//!
//! Снятие активного экшена: в animation playback (завершение one-shot клипа).

use bevy::prelude::*;

pub mod actions;
pub mod components;
pub mod defaults;
pub mod events;
pub mod systems;

pub use actions::*;
pub use components::*;
pub use events::*;
pub use systems::*;

use crate::AnimationPipeline;

/// Combat Plugin
///
/// Регистрирует в FixedUpdate:
/// 1. arbitrate_combat_actions: cooldown'ы + выбор экшена (CombatArbitration)
/// 2. apply_combat_impulses: одноразовый импульс движения (CombatArbitration, после арбитра)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CombatActionStarted>()
            .add_event::<CombatImpulse>();

        app.add_systems(
            FixedUpdate,
            (arbitrate_combat_actions, apply_combat_impulses)
                .chain()
                .in_set(AnimationPipeline::CombatArbitration),
        );
    }
}
