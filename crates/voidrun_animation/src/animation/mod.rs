//! Animation module
//!
//! ECS ответственность:
//! - Resolution: активное состояние + имя клипа (StateResolution)
//! - Playback: переходы, protected one-shots, fade, manual override (Playback)
//! - Completion: конец one-shot снимает combat action и шаг комбо
//!
//! Рендер не знает про состояния: он видит только `PlaybackTarget`.

use bevy::prelude::*;

pub mod clip_player;
pub mod playback;
pub mod resolver;
pub mod systems;


pub use clip_player::*;
pub use playback::*;
pub use resolver::*;
pub use systems::*;

use crate::AnimationPipeline;

/// Результат разрешения за тик: состояние + клип
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAnimation {
    pub state_id: Option<String>,
    /// None = неизвестное состояние, playback ничего не меняет
    pub clip: Option<String>,
}

// ============================================================================
// Events
// ============================================================================

/// One-shot клип доигран (combat/combo state уже снят)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlaybackCompleted {
    pub entity: Entity,
    pub clip: String,
    pub state_id: Option<String>,
}

/// Diagnostic: проиграть клип в обход state machine
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ForcePlayClip {
    pub entity: Entity,
    pub clip: String,
    pub looping: bool,
}

/// Вернуть управление state machine
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseClipOverride {
    pub entity: Entity,
}

/// Animation Plugin
///
/// Регистрирует в FixedUpdate:
/// 1. resolve_animation_states (StateResolution)
/// 2. handle_clip_overrides → apply_playback_transitions → advance_playback (Playback)
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlaybackCompleted>()
            .add_event::<ForcePlayClip>()
            .add_event::<ReleaseClipOverride>();

        app.add_systems(
            FixedUpdate,
            resolve_animation_states.in_set(AnimationPipeline::StateResolution),
        );

        app.add_systems(
            FixedUpdate,
            (handle_clip_overrides, apply_playback_transitions, advance_playback)
                .chain()
                .in_set(AnimationPipeline::Playback),
        );
    }
}
