//! Headless прогон анимационного пайплайна VOIDRUN
//!
//! Несколько персонажей под управлением seeded бота, без рендера.
//! Аргументы: `[config.ron] [seed]`

use std::env;

use bevy::prelude::*;
use voidrun_animation::config::{install_config, AnimationConfig};
use voidrun_animation::logger::set_log_level;
use voidrun_animation::{
    create_headless_app, log_error, run_fixed_tick, spawn_character, AnimationPlayback, BotInput,
    CombatRuntime, LogLevel, WeaponCategory,
};

const TICK_COUNT: usize = 3600;
const TICK: f32 = 1.0 / 60.0;

fn main() {
    let mut args = env::args().skip(1);
    let config_path = args.next();
    let seed = args.next().and_then(|seed| seed.parse().ok()).unwrap_or(42);

    println!("Starting VOIDRUN animation simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    // Переходы состояний логируются на Debug: для 4 ботов это слишком шумно
    set_log_level(LogLevel::Info);

    if let Some(path) = config_path {
        match AnimationConfig::from_file(&path).and_then(|config| install_config(&mut app, config)) {
            Ok(()) => println!("Loaded animation config from {}", path),
            Err(err) => {
                log_error(&format!("❌ Failed to load {}: {}", path, err));
                std::process::exit(1);
            }
        }
    }

    let loadouts = [
        None,
        Some(WeaponCategory::Sword),
        Some(WeaponCategory::Axe),
        Some(WeaponCategory::Generic),
    ];
    for weapon in loadouts {
        let entity = spawn_character(app.world_mut(), weapon);
        app.world_mut().entity_mut(entity).insert(BotInput::default());
    }

    for tick in 0..TICK_COUNT {
        run_fixed_tick(app.world_mut(), TICK);

        if tick % 600 == 0 {
            let world = app.world_mut();
            let mut query = world.query::<(Entity, &AnimationPlayback, &CombatRuntime)>();
            for (entity, playback, combat) in query.iter(world) {
                println!(
                    "Tick {}: {:?} clip={} action={}",
                    tick,
                    entity,
                    playback.current_clip.as_deref().unwrap_or("-"),
                    combat.active_action.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    println!("Simulation complete!");
}
