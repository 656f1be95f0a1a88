//! VOIDRUN Character Animation Core
//!
//! ECS-пайплайн на Bevy 0.16: input → combat action → combo → состояние →
//! клип. Рендер подключается снаружи через `PlaybackTarget`; в headless режиме
//! его место занимает `ClipPlayer`.
//!
//! Порядок тика (FixedUpdate, 60Hz), см. `AnimationPipeline`:
//! 1. InputCapture: input (бот / внешний контроллер)
//! 2. CombatArbitration: cooldown'ы, выбор экшена, импульс движения
//! 3. ComboInput: combo-цепочки (могут лечь поверх атаки этого тика)
//! 4. StateResolution: активное состояние + имя клипа
//! 5. Playback: переходы, время клипов, завершение one-shot
//! 6. FrameEnd: сброс pressed-this-frame и несъеденных latch'ей
//!
//! Порядок фиксирован: stale combat state не должен протекать в чужой тик.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod bot;
pub mod combat;
pub mod combo;
pub mod components;
pub mod conditions;
pub mod config;
pub mod errors;
pub mod logger;
pub mod states;

// Re-export для удобства
pub use animation::{
    AnimationPlayback, AnimationPlugin, ClipLibrary, ClipPlayer, ForcePlayClip, PlaybackCompleted,
    PlaybackTarget, ReleaseClipOverride, ResolvedAnimation,
};
pub use bot::BotInput;
pub use combat::{CombatActionStarted, CombatImpulse, CombatPlugin, CombatRuntime};
pub use combo::{ComboPlugin, ComboRuntime, ComboStepStarted};
pub use components::*;
pub use config::{AnimationCatalogs, AnimationConfig, AnimationSettings};
pub use errors::{CatalogError, ConditionError, PlaybackError};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};

/// Фазы одного тика (FixedUpdate), выполняются строго по порядку
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationPipeline {
    InputCapture,
    CombatArbitration,
    ComboInput,
    StateResolution,
    Playback,
    FrameEnd,
}

/// Главный plugin (объединяет все подсистемы)
///
/// Каталоги: если `AnimationCatalogs` уже вставлены (`config::install_config`),
/// используются они, иначе встроенный каталог.
pub struct CharacterAnimationPlugin;

impl Plugin for CharacterAnimationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<AnimationCatalogs>() {
            match AnimationConfig::builtin().build() {
                Ok((settings, catalogs)) => {
                    app.insert_resource(settings).insert_resource(catalogs);
                }
                Err(err) => {
                    logger::log_error(&format!("❌ Built-in animation config is invalid: {}", err));
                }
            }
        }

        app.init_resource::<AnimationSettings>();

        if !app.world().contains_resource::<ClipLibrary>() {
            app.insert_resource(ClipLibrary::builtin());
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                FixedUpdate,
                (
                    AnimationPipeline::InputCapture,
                    AnimationPipeline::CombatArbitration,
                    AnimationPipeline::ComboInput,
                    AnimationPipeline::StateResolution,
                    AnimationPipeline::Playback,
                    AnimationPipeline::FrameEnd,
                )
                    .chain(),
            )
            .add_plugins((ComboPlugin, CombatPlugin, AnimationPlugin))
            .add_systems(
                FixedUpdate,
                (
                    bot::drive_bot_input.in_set(AnimationPipeline::InputCapture),
                    end_input_frame.in_set(AnimationPipeline::FrameEnd),
                ),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(CharacterAnimationPlugin);

    app
}

/// Один FixedUpdate проход с заданным dt (без wall clock)
pub fn run_fixed_tick(world: &mut World, delta_secs: f32) {
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(delta_secs));
    world.run_schedule(FixedUpdate);
}

/// Спавнит персонажа с headless ClipPlayer'ом
pub fn spawn_character(world: &mut World, weapon: Option<WeaponCategory>) -> Entity {
    let player = match world.get_resource::<ClipLibrary>() {
        Some(library) => ClipPlayer::new(library),
        None => ClipPlayer::new(&ClipLibrary::builtin()),
    };

    world
        .spawn((Character, Equipment { weapon }, player))
        .id()
}

/// Snapshot мира для сравнения детерминизма (Debug-представление, sorted by Entity)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
