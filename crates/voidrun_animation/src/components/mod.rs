//! ECS компоненты персонажа (входные снимки пайплайна)
//!
//! Организация по доменам:
//! - input: intent'ы игрока/бота (held, pressed-this-frame, latched), movement vector, held keys
//! - physics: снимок физики (velocity, grounded, submerged) + facing yaw
//! - equipment: категория оружия в руках (gating экшенов и комбо)
//! - character: marker, подтягивающий весь runtime через Required Components

pub mod character;
pub mod equipment;
pub mod input;
pub mod physics;

pub use character::*;
pub use equipment::*;
pub use input::*;
pub use physics::*;
