//! Снимок физики (read-only для пайплайна) и направление камеры/взгляда.
//!
//! Физику сам пайплайн не интегрирует: snapshot пишет внешний слой (Godot/rapier/тесты).

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsSnapshot {
    pub velocity: Vec3,
    pub grounded: bool,
    pub submerged: bool,
}

impl PhysicsSnapshot {
    /// Dotted-path lookup для physics-условий.
    ///
    /// Поддерживаемые пути: `velocity` (длина), `velocity.x|y|z`, `speed`,
    /// `horizontal_speed`. Всё остальное → None.
    pub fn number_at(&self, path: &str) -> Option<f64> {
        let mut segments = path.split('.');
        let value = match (segments.next()?, segments.next()) {
            ("velocity", None) | ("speed", None) => self.velocity.length(),
            ("horizontal_speed", None) => Vec2::new(self.velocity.x, self.velocity.z).length(),
            ("velocity", Some("x")) => self.velocity.x,
            ("velocity", Some("y")) => self.velocity.y,
            ("velocity", Some("z")) => self.velocity.z,
            _ => return None,
        };

        // Лишние сегменты (`velocity.x.foo`) не резолвятся
        if segments.next().is_some() {
            return None;
        }

        Some(value as f64)
    }

    pub fn flag_at(&self, path: &str) -> Option<bool> {
        match path {
            "grounded" => Some(self.grounded),
            "submerged" => Some(self.submerged),
            _ => None,
        }
    }
}

/// Yaw камеры/взгляда (радианы, 0 = смотрим в -Z)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Facing {
    pub yaw: f32,
}

impl Facing {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_path_lookup() {
        let physics = PhysicsSnapshot {
            velocity: Vec3::new(3.0, 0.5, 4.0),
            ..default()
        };

        assert_eq!(physics.number_at("velocity.y"), Some(0.5));
        assert_eq!(physics.number_at("horizontal_speed"), Some(5.0));
        assert_eq!(physics.number_at("velocity.w"), None);
        assert_eq!(physics.number_at("velocity.x.foo"), None);
        assert_eq!(physics.number_at("mass"), None);
    }

    #[test]
    fn test_facing_basis() {
        let facing = Facing::default();
        assert!((facing.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((facing.right() - Vec3::X).length() < 1e-6);
    }
}
