//! Animation systems: разрешение состояния, переходы, продвижение клипов.

use bevy::prelude::*;

use crate::animation::{
    resolve_clip_name, AnimationPlayback, ClipPlayer, ForcePlayClip, PlaybackCompleted,
    PlaybackTarget, ReleaseClipOverride, ResolvedAnimation, TransitionOutcome,
};
use crate::combat::{CombatActionCatalog, CombatRuntime};
use crate::combo::{ComboCatalog, ComboRuntime, ComboStepStarted};
use crate::components::{ActionTrigger, InputSnapshot, PhysicsSnapshot};
use crate::conditions::ConditionContext;
use crate::config::{AnimationCatalogs, AnimationSettings};
use crate::logger;

// ============================================================================
// State resolution
// ============================================================================

/// System: состояние + имя клипа для каждого персонажа
pub fn resolve_animation_states(
    catalogs: Res<AnimationCatalogs>,
    settings: Res<AnimationSettings>,
    mut query: Query<(
        Entity,
        &InputSnapshot,
        Option<&PhysicsSnapshot>,
        Option<&ComboRuntime>,
        Option<&CombatRuntime>,
        &mut ResolvedAnimation,
    )>,
) {
    for (entity, input, physics, combo, combat, mut resolved) in query.iter_mut() {
        let ctx = ConditionContext {
            input: Some(input),
            physics,
            combo,
            combat,
        };

        let mut state = catalogs.states.determine_active_state(&ctx);

        if settings.enforce_allowed_transitions {
            if let Some(previous) = resolved.state_id.as_deref() {
                if !catalogs.states.is_transition_allowed(previous, &state.id) {
                    if let Some(kept) = catalogs.states.get(previous) {
                        state = kept;
                    }
                }
            }
        }

        let clip = resolve_clip_name(
            &catalogs.states,
            &state.id,
            combo,
            combat,
            Some(&input.held_keys),
            &settings.directional_keys,
        );

        if resolved.state_id.as_deref() != Some(state.id.as_str()) {
            logger::log(&format!(
                "🎭 {:?}: {} → {}",
                entity,
                resolved.state_id.as_deref().unwrap_or("-"),
                state.id
            ));
        }

        resolved.set_if_neq(ResolvedAnimation {
            state_id: Some(state.id.clone()),
            clip,
        });
    }
}

// ============================================================================
// Playback
// ============================================================================

/// System: manual override (ForcePlayClip / ReleaseClipOverride)
pub fn handle_clip_overrides(
    settings: Res<AnimationSettings>,
    mut force_requests: EventReader<ForcePlayClip>,
    mut release_requests: EventReader<ReleaseClipOverride>,
    mut query: Query<(&mut AnimationPlayback, &mut ClipPlayer)>,
) {
    for request in force_requests.read() {
        let Ok((mut playback, mut player)) = query.get_mut(request.entity) else {
            logger::log_warning(&format!("⚠️ ForcePlayClip: {:?} has no playback", request.entity));
            continue;
        };

        match playback.force_play(&mut *player, &request.clip, request.looping, settings.transition_duration) {
            Ok(()) => logger::log_info(&format!(
                "🧪 {:?}: override → '{}'",
                request.entity, request.clip
            )),
            Err(err) => logger::log_warning(&format!("⚠️ ForcePlayClip {:?}: {}", request.entity, err)),
        }
    }

    for request in release_requests.read() {
        if let Ok((mut playback, _)) = query.get_mut(request.entity) {
            playback.release_override();
        }
    }
}

/// System: запрос перехода на разрешённый клип.
///
/// Клипа экшена/комбо нет на target → экшен снимается сразу, как при завершении.
pub fn apply_playback_transitions(
    catalogs: Res<AnimationCatalogs>,
    settings: Res<AnimationSettings>,
    mut query: Query<(
        Entity,
        &ResolvedAnimation,
        &mut AnimationPlayback,
        &mut ClipPlayer,
        &mut CombatRuntime,
        &mut ComboRuntime,
        &mut InputSnapshot,
    )>,
    mut combo_started: EventWriter<ComboStepStarted>,
) {
    for (entity, resolved, mut playback, mut player, mut combat, mut combo, mut input) in
        query.iter_mut()
    {
        let (Some(state_id), Some(clip)) = (resolved.state_id.as_deref(), resolved.clip.as_deref())
        else {
            continue;
        };
        let Some(state) = catalogs.states.get(state_id) else {
            continue;
        };

        let outcome = playback.request_transition(
            &mut *player,
            state,
            clip,
            catalogs.states.is_default(state_id),
            settings.transition_duration,
        );

        match outcome {
            TransitionOutcome::Started => {
                logger::log(&format!("🎬 {:?}: play '{}' ({})", entity, clip, state_id));
            }
            TransitionOutcome::MissingClip if state.is_action_bound() => {
                logger::log_warning(&format!(
                    "⚠️ {:?}: '{}' can't play, ending bound action",
                    entity, clip
                ));
                if let Some(progress) =
                    finish_bound_actions(&mut combat, &mut combo, &mut input, &catalogs.combos)
                {
                    combo_started.write(ComboStepStarted {
                        entity,
                        combo_id: progress.combo_id,
                        step: progress.step,
                        animation: progress.animation,
                    });
                }
            }
            _ => {}
        }
    }
}

/// System: время клипов, i-frames, завершение one-shot.
///
/// Завершение one-shot снимает combat action и шаг комбо.
pub fn advance_playback(
    catalogs: Res<AnimationCatalogs>,
    settings: Res<AnimationSettings>,
    time: Res<Time<Fixed>>,
    mut query: Query<(
        Entity,
        &mut AnimationPlayback,
        &mut ClipPlayer,
        &mut CombatRuntime,
        &mut ComboRuntime,
        &mut InputSnapshot,
    )>,
    mut completed: EventWriter<PlaybackCompleted>,
    mut combo_started: EventWriter<ComboStepStarted>,
) {
    let delta = time.delta_secs();

    for (entity, mut playback, mut player, mut combat, mut combo, mut input) in query.iter_mut() {
        player.advance(delta);

        if playback.override_finished(&*player) {
            playback.release_override();
            logger::log_info(&format!("🧪 {:?}: override finished", entity));
            continue;
        }
        if playback.is_overridden() {
            continue;
        }

        update_invulnerability(&mut combat, &playback, &*player, &catalogs.actions);

        if !playback.one_shot_finished(&*player, settings.completion_threshold) {
            continue;
        }

        let clip = playback.current_clip.clone().unwrap_or_default();
        let state_id = playback.current_state.clone();
        playback.complete_one_shot();

        if let Some(progress) = finish_bound_actions(&mut combat, &mut combo, &mut input, &catalogs.combos) {
            combo_started.write(ComboStepStarted {
                entity,
                combo_id: progress.combo_id,
                step: progress.step,
                animation: progress.animation,
            });
        }

        logger::log(&format!("✅ {:?}: '{}' finished", entity, clip));
        completed.write(PlaybackCompleted {
            entity,
            clip,
            state_id,
        });
    }
}

/// Очистка при завершении one-shot: combat action, шаг комбо, dodge latch.
///
/// Возвращает шаг комбо, если из очереди подхватилось продолжение.
pub fn finish_bound_actions(
    combat: &mut CombatRuntime,
    combo: &mut ComboRuntime,
    input: &mut InputSnapshot,
    combos: &ComboCatalog,
) -> Option<crate::combo::ComboProgress> {
    combat.end_action(input.is_held(ActionTrigger::Parry));
    input.consume(ActionTrigger::Dodge);

    if combo.is_active() {
        combo.finish_step(combos)
    } else {
        None
    }
}

fn update_invulnerability(
    combat: &mut CombatRuntime,
    playback: &AnimationPlayback,
    player: &ClipPlayer,
    actions: &CombatActionCatalog,
) {
    let window = combat
        .active_action
        .as_deref()
        .and_then(|id| actions.get(id))
        .and_then(|action| action.iframes);

    let invulnerable = match (window, combat.combat_animation.as_deref()) {
        (Some(window), Some(clip)) if playback.current_clip.as_deref() == Some(clip) => player
            .progress(clip)
            .is_some_and(|progress| window.contains(progress)),
        _ => false,
    };

    if combat.invulnerable != invulnerable {
        combat.invulnerable = invulnerable;
    }
}
