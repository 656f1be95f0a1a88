//! Combat action catalog: экшены, привязанные к trigger'у, cooldown'у и состоянию.
//!
//! Порядок объявления важен: арбитр сканирует экшены в нём и активирует
//! первый подходящий (first-declared-wins).

use serde::{Deserialize, Serialize};

use crate::combat::{AttackType, DefenseType};
use crate::components::{ActionTrigger, Equipment, InputSnapshot, WeaponCategory};
use crate::errors::CatalogError;
use crate::states::StateCatalog;

/// Как trigger считается "поданным"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerActivation {
    /// Пока кнопка зажата
    #[default]
    Held,
    /// Нажатие запоминается до явного consume арбитром
    Latched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectionMode {
    /// Оси input'а = мировые оси (x → +X, y → -Z)
    InputRelative,
    /// Input поворачивается по yaw камеры/взгляда
    #[default]
    CameraRelative,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementParams {
    pub speed: f32,
    #[serde(default)]
    pub direction_mode: DirectionMode,
    /// false (или нулевой input) → импульс вдоль взгляда
    #[serde(default)]
    pub uses_input_direction: bool,
}

/// I-frame окно в долях прогресса клипа [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IFrameWindow {
    pub start: f32,
    pub end: f32,
}

impl IFrameWindow {
    pub fn contains(&self, progress: f32) -> bool {
        progress >= self.start && progress <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentConstraint {
    AnyWeapon,
    Only(Vec<WeaponCategory>),
}

impl EquipmentConstraint {
    pub fn is_satisfied(&self, equipment: Option<&Equipment>) -> bool {
        let weapon = equipment.and_then(|equipment| equipment.weapon);
        match (self, weapon) {
            (_, None) => false,
            (EquipmentConstraint::AnyWeapon, Some(_)) => true,
            (EquipmentConstraint::Only(categories), Some(category)) => categories.contains(&category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatActionDescriptor {
    pub id: String,
    pub trigger: ActionTrigger,
    #[serde(default)]
    pub activation: TriggerActivation,
    /// id состояния в StateCatalog (оттуда же берётся клип)
    pub state: String,
    #[serde(default)]
    pub cooldown_secs: f32,
    #[serde(default)]
    pub attack_type: Option<AttackType>,
    #[serde(default)]
    pub defense_type: Option<DefenseType>,
    #[serde(default)]
    pub movement: Option<MovementParams>,
    #[serde(default)]
    pub iframes: Option<IFrameWindow>,
    #[serde(default)]
    pub requires: Option<EquipmentConstraint>,
}

impl CombatActionDescriptor {
    pub fn is_triggered(&self, input: &InputSnapshot) -> bool {
        match self.activation {
            TriggerActivation::Held => input.is_held(self.trigger),
            TriggerActivation::Latched => input.is_latched(self.trigger),
        }
    }

    pub fn equipment_allows(&self, equipment: Option<&Equipment>) -> bool {
        self.requires
            .as_ref()
            .map_or(true, |constraint| constraint.is_satisfied(equipment))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CombatActionCatalog {
    actions: Vec<CombatActionDescriptor>,
}

impl CombatActionCatalog {
    /// Валидирует id и ссылки на состояния. Порядок объявления сохраняется.
    pub fn build(
        actions: Vec<CombatActionDescriptor>,
        states: &StateCatalog,
    ) -> Result<Self, CatalogError> {
        for (i, action) in actions.iter().enumerate() {
            if actions[..i].iter().any(|other| other.id == action.id) {
                return Err(CatalogError::DuplicateAction(action.id.clone()));
            }
            if !states.contains(&action.state) {
                return Err(CatalogError::UnknownStateRef {
                    action: action.id.clone(),
                    state: action.state.clone(),
                });
            }
            if action.cooldown_secs < 0.0 {
                return Err(CatalogError::NegativeCooldown {
                    action: action.id.clone(),
                    cooldown: action.cooldown_secs,
                });
            }
        }

        Ok(Self { actions })
    }

    pub fn get(&self, id: &str) -> Option<&CombatActionDescriptor> {
        self.actions.iter().find(|action| action.id == id)
    }

    /// В порядке объявления
    pub fn iter(&self) -> impl Iterator<Item = &CombatActionDescriptor> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
