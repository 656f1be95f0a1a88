//! Ошибки конфигурации и принудительного проигрывания.
//!
//! Per-tick пути ошибок не возвращают: логируют и деградируют.
//! Всё, что здесь, всплывает только при сборке каталогов или из диагностики.

use thiserror::Error;

/// Ошибка компиляции одного условия (до привязки к состоянию)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionError {
    #[error("unknown condition kind `{0}`")]
    UnknownKind(String),

    #[error("unknown operator `{operator}` for `{kind}` condition")]
    UnknownOperator { kind: String, operator: String },

    #[error("unknown property `{property}` for `{kind}` condition")]
    UnknownProperty { kind: String, property: String },

    #[error("`{kind}` condition requires a property")]
    MissingProperty { kind: String },

    #[error("`{kind}` condition on `{property}` requires a value")]
    MissingValue { kind: String, property: String },

    #[error("`{kind}` condition on `{property}` has a value of the wrong type")]
    ValueType { kind: String, property: String },
}

/// Ошибка сборки каталогов (states/actions/combos) или загрузки RON
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate state id `{0}`")]
    DuplicateState(String),

    #[error("default state `{0}` is not in the catalog")]
    MissingDefaultState(String),

    #[error("state `{state}`: {source}")]
    Condition {
        state: String,
        #[source]
        source: ConditionError,
    },

    #[error("duplicate combat action id `{0}`")]
    DuplicateAction(String),

    #[error("combat action `{action}` references unknown state `{state}`")]
    UnknownStateRef { action: String, state: String },

    #[error("combat action `{action}` has negative cooldown {cooldown}")]
    NegativeCooldown { action: String, cooldown: f32 },

    #[error("duplicate combo id `{0}`")]
    DuplicateCombo(String),

    #[error("combo `{0}` has no steps")]
    EmptyCombo(String),

    #[error("failed to parse animation config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to read animation config: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("clip `{0}` is not available on the playback target")]
    UnknownClip(String),
}
