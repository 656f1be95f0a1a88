//! Character marker.

use bevy::prelude::*;

use crate::animation::{AnimationPlayback, ResolvedAnimation};
use crate::combat::CombatRuntime;
use crate::combo::ComboRuntime;
use crate::components::{Equipment, Facing, InputSnapshot, PhysicsSnapshot};

/// Персонаж с анимационным пайплайном.
///
/// Runtime-записи (combat/combo/playback) добавляются через Required Components.
/// Playback target (`ClipPlayer` или внешний рендер) вешается отдельно.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    InputSnapshot,
    PhysicsSnapshot,
    Equipment,
    Facing,
    CombatRuntime,
    ComboRuntime,
    ResolvedAnimation,
    AnimationPlayback
)]
pub struct Character;
