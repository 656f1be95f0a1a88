//! Конфигурация пайплайна: настройки + каталоги (states/actions/combos).
//!
//! Источники:
//! - `AnimationConfig::builtin()`: hand-authored каталог в коде
//! - `AnimationConfig::from_ron_str` / `from_file`: тот же формат в RON
//!
//! `build()` валидирует всё разом и возвращает готовые resources.
//! Ошибки конфигурации всплывают здесь, а не в per-tick системах.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::defaults::builtin_actions;
use crate::combat::{CombatActionCatalog, CombatActionDescriptor};
use crate::combo::defaults::builtin_combos;
use crate::combo::{ComboCatalog, ComboChain};
use crate::errors::CatalogError;
use crate::states::defaults::{builtin_states, DEFAULT_STATE_ID};
use crate::states::{StateCatalog, StateSpec};


/// Crossfade между клипами (секунды)
pub const DEFAULT_TRANSITION_DURATION: f32 = 0.2;

/// Key codes для направленных вариантов (forward > backward > left > right)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalKeys {
    pub forward: Vec<String>,
    pub backward: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl Default for DirectionalKeys {
    fn default() -> Self {
        let keys = |codes: &[&str]| codes.iter().map(|code| code.to_string()).collect();
        Self {
            forward: keys(&["KeyW", "ArrowUp"]),
            backward: keys(&["KeyS", "ArrowDown"]),
            left: keys(&["KeyA", "ArrowLeft"]),
            right: keys(&["KeyD", "ArrowRight"]),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub transition_duration: f32,
    /// Прогресс one-shot клипа, с которого он считается завершённым
    pub completion_threshold: f32,
    pub default_state: String,
    /// Отклонять переходы вне `allowed_transitions` (по умолчанию список справочный)
    pub enforce_allowed_transitions: bool,
    pub directional_keys: DirectionalKeys,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            transition_duration: DEFAULT_TRANSITION_DURATION,
            completion_threshold: 1.0,
            default_state: DEFAULT_STATE_ID.to_string(),
            enforce_allowed_transitions: false,
            directional_keys: DirectionalKeys::default(),
        }
    }
}

/// Полный конфиг в сериализуемом виде
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default)]
    pub settings: AnimationSettings,
    pub states: Vec<StateSpec>,
    #[serde(default)]
    pub actions: Vec<CombatActionDescriptor>,
    #[serde(default)]
    pub combos: Vec<ComboChain>,
}

impl AnimationConfig {
    pub fn builtin() -> Self {
        Self {
            settings: AnimationSettings::default(),
            states: builtin_states(),
            actions: builtin_actions(),
            combos: builtin_combos(),
        }
    }

    pub fn from_ron_str(source: &str) -> Result<Self, CatalogError> {
        Ok(ron::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Валидация + компиляция в resources
    pub fn build(self) -> Result<(AnimationSettings, AnimationCatalogs), CatalogError> {
        let states = StateCatalog::build(self.states, &self.settings.default_state)?;
        let actions = CombatActionCatalog::build(self.actions, &states)?;
        let combos = ComboCatalog::build(self.combos)?;

        Ok((
            self.settings,
            AnimationCatalogs {
                states,
                actions,
                combos,
            },
        ))
    }
}

/// Скомпилированные каталоги (shared, read-only после старта)
#[derive(Resource, Debug, Clone)]
pub struct AnimationCatalogs {
    pub states: StateCatalog,
    pub actions: CombatActionCatalog,
    pub combos: ComboCatalog,
}

impl AnimationCatalogs {
    pub fn builtin() -> Result<Self, CatalogError> {
        AnimationConfig::builtin().build().map(|(_, catalogs)| catalogs)
    }
}

/// Устанавливает конфиг в App до `CharacterAnimationPlugin`
pub fn install_config(app: &mut App, config: AnimationConfig) -> Result<(), CatalogError> {
    let (settings, catalogs) = config.build()?;
    app.insert_resource(settings).insert_resource(catalogs);
    Ok(())
}
