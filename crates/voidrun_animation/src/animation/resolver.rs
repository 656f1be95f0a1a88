//! Animation name resolver: состояние + combo + combat + клавиши → имя клипа.
//!
//! Приоритет: combo animation > combat animation > клип состояния
//! (с направленным вариантом, если состояние directional).

use std::collections::BTreeSet;

use crate::combat::CombatRuntime;
use crate::combo::ComboRuntime;
use crate::config::DirectionalKeys;
use crate::logger;
use crate::states::{DirectionalVariants, StateCatalog};

/// None = "в этом тике ничего не меняем" (неизвестное состояние)
pub fn resolve_clip_name(
    states: &StateCatalog,
    state_id: &str,
    combo: Option<&ComboRuntime>,
    combat: Option<&CombatRuntime>,
    held_keys: Option<&BTreeSet<String>>,
    keys: &DirectionalKeys,
) -> Option<String> {
    let Some(state) = states.get(state_id) else {
        logger::log_warning(&format!("⚠️ Unknown animation state '{}'", state_id));
        return None;
    };

    if let Some(clip) = combo
        .filter(|combo| combo.is_active())
        .and_then(|combo| combo.combo_animation.clone())
    {
        return Some(clip);
    }

    if let Some(clip) = combat
        .filter(|combat| combat.is_action_active())
        .and_then(|combat| combat.combat_animation.clone())
    {
        return Some(clip);
    }

    let clip = match (&state.directional, held_keys) {
        (Some(variants), Some(held)) => {
            directional_variant(variants, held, keys).unwrap_or(&state.animation)
        }
        _ => &state.animation,
    };

    Some(clip.clone())
}

/// forward > backward > left > right; ни одна клавиша не зажата → None
pub fn directional_variant<'a>(
    variants: &'a DirectionalVariants,
    held: &BTreeSet<String>,
    keys: &DirectionalKeys,
) -> Option<&'a String> {
    let pressed = |codes: &[String]| codes.iter().any(|code| held.contains(code));

    if pressed(&keys.forward) {
        Some(&variants.forward)
    } else if pressed(&keys.backward) {
        Some(&variants.backward)
    } else if pressed(&keys.left) {
        Some(&variants.left)
    } else if pressed(&keys.right) {
        Some(&variants.right)
    } else {
        None
    }
}
