//! Headless clip player: PlaybackTarget без рендера.
//!
//! Хранит длительности клипов, время проигрывания, веса crossfade'а.
//! В игре его место занимает mixer движка, в headless/тестах он сам
//! продвигает время (`advance`).

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::animation::{LoopMode, PlaybackTarget};

/// Длительности встроенных клипов (секунды)
const BUILTIN_CLIPS: &[(&str, f32)] = &[
    ("combat_stance", 2.0),
    ("attack", 0.8),
    ("left_slash", 0.6),
    ("double_blade_spin", 0.9),
    ("heavy_hammer_swing", 1.4),
    ("charged_axe_chop", 1.2),
    ("charged_slash", 1.0),
    ("charged_upward_slash", 1.1),
    ("sword_judgment", 1.6),
    ("sword_parry_backward", 0.6),
    ("roll_dodge", 0.7),
    ("regular_jump", 0.9),
    ("walk", 1.0),
    ("walk_forward", 1.0),
    ("walk_backward", 1.0),
    ("walk_left", 1.0),
    ("walk_right", 1.0),
    ("run", 0.8),
    ("crouch_idle", 2.0),
    ("crouch_walk_forward", 1.2),
    ("crouch_walk_backward", 1.2),
    ("crouch_walk_left", 1.2),
    ("crouch_walk_right", 1.2),
    ("swim_forward", 1.3),
    ("swim_idle", 2.0),
];

/// Набор клипов, доступных персонажу (имя → длительность)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ClipLibrary {
    durations: BTreeMap<String, f32>,
}

impl ClipLibrary {
    pub fn builtin() -> Self {
        Self::from_clips(BUILTIN_CLIPS.iter().map(|(name, duration)| (*name, *duration)))
    }

    pub fn from_clips<'a>(clips: impl IntoIterator<Item = (&'a str, f32)>) -> Self {
        Self {
            durations: clips
                .into_iter()
                .map(|(name, duration)| (name.to_string(), duration))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, duration: f32) {
        self.durations.insert(name.into(), duration);
    }

    pub fn duration(&self, name: &str) -> Option<f32> {
        self.durations.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.durations.contains_key(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ClipTrack {
    clip: String,
    time: f32,
    duration: f32,
    mode: LoopMode,
    weight: f32,
    target_weight: f32,
    /// weight units / sec
    fade_speed: f32,
    running: bool,
}

impl ClipTrack {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.time / self.duration).clamp(0.0, 1.0)
        }
    }

    fn fade_towards(&mut self, delta: f32) {
        if self.fade_speed <= 0.0 {
            self.weight = self.target_weight;
            return;
        }
        let step = self.fade_speed * delta;
        if self.weight < self.target_weight {
            self.weight = (self.weight + step).min(self.target_weight);
        } else {
            self.weight = (self.weight - step).max(self.target_weight);
        }
    }

    fn advance_time(&mut self, delta: f32) {
        if !self.running {
            return;
        }

        self.time += delta;
        if self.time < self.duration {
            return;
        }

        match self.mode {
            LoopMode::Repeat if self.duration > 0.0 => self.time %= self.duration,
            LoopMode::Repeat => self.time = 0.0,
            LoopMode::Once { clamp_when_finished } => {
                self.time = self.duration;
                self.running = false;
                if !clamp_when_finished {
                    self.target_weight = 0.0;
                    self.weight = 0.0;
                }
            }
        }
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ClipPlayer {
    clips: ClipLibrary,
    tracks: Vec<ClipTrack>,
}

impl ClipPlayer {
    pub fn new(library: &ClipLibrary) -> Self {
        Self {
            clips: library.clone(),
            tracks: Vec::new(),
        }
    }

    fn track(&self, clip: &str) -> Option<&ClipTrack> {
        self.tracks.iter().find(|track| track.clip == clip)
    }

    fn track_mut(&mut self, clip: &str) -> Option<&mut ClipTrack> {
        self.tracks.iter_mut().find(|track| track.clip == clip)
    }

    /// Продвигает время и веса. Полностью затухшие дорожки удаляются.
    pub fn advance(&mut self, delta: f32) {
        for track in self.tracks.iter_mut() {
            track.fade_towards(delta);
            track.advance_time(delta);
        }
        self.tracks
            .retain(|track| track.target_weight > 0.0 || track.weight > 0.0);
    }

    pub fn weight(&self, clip: &str) -> f32 {
        self.track(clip).map_or(0.0, |track| track.weight)
    }

    /// Дорожки с ненулевым весом (для отладки/снапшотов)
    pub fn active_clips(&self) -> impl Iterator<Item = &str> {
        self.tracks
            .iter()
            .filter(|track| track.weight > 0.0 || track.target_weight > 0.0)
            .map(|track| track.clip.as_str())
    }
}

impl PlaybackTarget for ClipPlayer {
    fn has_clip(&self, clip: &str) -> bool {
        self.clips.contains(clip)
    }

    fn is_playing(&self, clip: &str) -> bool {
        self.track(clip)
            .is_some_and(|track| track.running && track.target_weight > 0.0)
    }

    fn progress(&self, clip: &str) -> Option<f32> {
        self.track(clip).map(ClipTrack::progress)
    }

    fn fade_out(&mut self, clip: &str, duration: f32) {
        if let Some(track) = self.track_mut(clip) {
            track.target_weight = 0.0;
            track.fade_speed = if duration > 0.0 { track.weight.max(f32::EPSILON) / duration } else { 0.0 };
        }
    }

    fn play(&mut self, clip: &str, mode: LoopMode, fade_in: f32) {
        let Some(duration) = self.clips.duration(clip) else {
            return;
        };

        // reset(): перезапуск с начала, даже если дорожка ещё затухала
        self.tracks.retain(|track| track.clip != clip);
        self.tracks.push(ClipTrack {
            clip: clip.to_string(),
            time: 0.0,
            duration,
            mode,
            weight: if fade_in > 0.0 { 0.0 } else { 1.0 },
            target_weight: 1.0,
            fade_speed: if fade_in > 0.0 { 1.0 / fade_in } else { 0.0 },
            running: true,
        });
    }
}
