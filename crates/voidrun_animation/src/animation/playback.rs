//! Playback controller: когда переход разрешён и как клип играет.
//!
//! Правила перехода (`request_transition`), по порядку:
//! 1. включён manual override → автоматика не вмешивается
//! 2. тот же клип и то же состояние → ничего
//! 3. играет protected one-shot → отказ до завершения
//! 4. возврат в default из играющего прерываемого one-shot → ждём конца клипа,
//!    кроме состояний `interrupt_on_input_release`
//! 5. клипа нет на target → warning, остаёмся (экшен, если был, снимает
//!    `apply_playback_transitions`)
//! 6. иначе fade out старого, fade in нового (one-shot: LoopOnce + clamp)
//!
//! Завершение one-shot (`one_shot_finished`): штатная точка, где снимаются
//! combat action и шаг комбо (см. `advance_playback`).

use bevy::prelude::*;

use crate::errors::PlaybackError;
use crate::logger;
use crate::states::StateDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Repeat,
    Once { clamp_when_finished: bool },
}

/// Render target (mixer движка, headless `ClipPlayer`, mock в тестах)
pub trait PlaybackTarget {
    fn has_clip(&self, clip: &str) -> bool;

    /// Клип запущен и ещё не закончился
    fn is_playing(&self, clip: &str) -> bool;

    /// Нормализованный прогресс [0, 1]
    fn progress(&self, clip: &str) -> Option<f32>;

    fn fade_out(&mut self, clip: &str, duration: f32);

    /// Запуск с начала
    fn play(&mut self, clip: &str, mode: LoopMode, fade_in: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Unchanged,
    Started,
    RejectedProtected,
    Deferred,
    MissingClip,
    Overridden,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimationPlayback {
    pub current_clip: Option<String>,
    /// None после завершения one-shot: следующее разрешение переиграет клип
    pub current_state: Option<String>,
    pub one_shot: bool,
    pub protected: bool,
    pub interrupt_on_input_release: bool,

    pub override_clip: Option<String>,
    pub override_looping: bool,
}

impl AnimationPlayback {
    pub fn is_overridden(&self) -> bool {
        self.override_clip.is_some()
    }

    pub fn request_transition<T: PlaybackTarget + ?Sized>(
        &mut self,
        target: &mut T,
        state: &StateDescriptor,
        clip: &str,
        is_default_state: bool,
        fade: f32,
    ) -> TransitionOutcome {
        if self.is_overridden() {
            return TransitionOutcome::Overridden;
        }

        let same_clip = self.current_clip.as_deref() == Some(clip);
        let same_state = self.current_state.as_deref() == Some(state.id.as_str());
        if same_clip && same_state {
            return TransitionOutcome::Unchanged;
        }

        if self.protected {
            return TransitionOutcome::RejectedProtected;
        }

        let one_shot_running = self.one_shot
            && self
                .current_clip
                .as_deref()
                .is_some_and(|current| target.is_playing(current));
        if one_shot_running && is_default_state && !self.interrupt_on_input_release {
            return TransitionOutcome::Deferred;
        }

        if !target.has_clip(clip) {
            logger::log_warning(&format!(
                "⚠️ Clip '{}' for state '{}' not found, keeping current animation",
                clip, state.id
            ));
            return TransitionOutcome::MissingClip;
        }

        if let Some(previous) = self.current_clip.as_deref() {
            if previous != clip {
                target.fade_out(previous, fade);
            }
        }

        let mode = if state.one_shot {
            LoopMode::Once {
                clamp_when_finished: true,
            }
        } else {
            LoopMode::Repeat
        };
        target.play(clip, mode, fade);

        self.current_clip = Some(clip.to_string());
        self.current_state = Some(state.id.clone());
        self.one_shot = state.one_shot;
        self.protected = state.is_protected();
        self.interrupt_on_input_release = state.interrupt_on_input_release;

        TransitionOutcome::Started
    }

    /// Играющий one-shot дошёл до threshold или остановился
    pub fn one_shot_finished<T: PlaybackTarget + ?Sized>(&self, target: &T, threshold: f32) -> bool {
        if !self.one_shot || self.is_overridden() {
            return false;
        }
        let Some(clip) = self.current_clip.as_deref() else {
            return false;
        };

        !target.is_playing(clip) || target.progress(clip).is_some_and(|progress| progress >= threshold)
    }

    /// Снимает защиту; клип остаётся на последнем кадре до следующего перехода
    pub fn complete_one_shot(&mut self) {
        self.one_shot = false;
        self.protected = false;
        self.current_state = None;
    }

    /// Diagnostic override: играет клип в обход разрешения состояний
    pub fn force_play<T: PlaybackTarget + ?Sized>(
        &mut self,
        target: &mut T,
        clip: &str,
        looping: bool,
        fade: f32,
    ) -> Result<(), PlaybackError> {
        if !target.has_clip(clip) {
            return Err(PlaybackError::UnknownClip(clip.to_string()));
        }

        if let Some(previous) = self.current_clip.as_deref() {
            if previous != clip {
                target.fade_out(previous, fade);
            }
        }

        let mode = if looping {
            LoopMode::Repeat
        } else {
            LoopMode::Once {
                clamp_when_finished: true,
            }
        };
        target.play(clip, mode, fade);

        self.current_clip = Some(clip.to_string());
        self.current_state = None;
        self.one_shot = false;
        self.protected = false;
        self.interrupt_on_input_release = false;
        self.override_clip = Some(clip.to_string());
        self.override_looping = looping;

        Ok(())
    }

    /// Одноразовый override доигран
    pub fn override_finished<T: PlaybackTarget + ?Sized>(&self, target: &T) -> bool {
        match self.override_clip.as_deref() {
            Some(clip) if !self.override_looping => !target.is_playing(clip),
            _ => false,
        }
    }

    pub fn release_override(&mut self) {
        self.override_clip = None;
        self.override_looping = false;
        self.current_state = None;
    }
}
