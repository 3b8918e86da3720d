//! Wordwing - A side-scrolling letter hunt with level bosses
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, boss AI)
//! - `renderer`: Backend-agnostic scene building from a read-only state
//! - `frame_loop`: Display-synchronized tick driver
//! - `flavor`: End-of-run flavor text with offline fallbacks
//! - `settings`: Data-driven game configuration

pub mod flavor;
pub mod frame_loop;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use flavor::{FlavorOutcome, FlavorRequest, FlavorStatus, FlavorTextSource};
pub use frame_loop::FrameLoop;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// All motion values are per tick; one tick is one rendered frame at 60 Hz.
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default playfield size
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player physics
    pub const GRAVITY: f32 = 0.4;
    pub const JUMP_IMPULSE: f32 = -7.5;
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const PLAYER_RADIUS: f32 = 18.0;
    /// Velocity to rotation factor (clamped to ±π/4)
    pub const ROTATION_FACTOR: f32 = 0.1;
    pub const START_LIVES: u8 = 3;

    /// Invulnerability windows (ticks)
    pub const SHIELD_INVULN_TICKS: u32 = 60;
    pub const HIT_INVULN_TICKS: u32 = 120;

    /// Obstacle placement
    pub const GAP_SPAWN_MARGIN: f32 = 50.0;
    pub const GAP_CLAMP_MARGIN: f32 = 20.0;
    pub const OBSTACLE_MOVE_AMPLITUDE: f32 = 60.0;
    pub const OBSTACLE_MOVE_SPEED: f32 = 0.05;

    /// Items
    pub const LETTER_RADIUS: f32 = 20.0;
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const ITEM_SPAWN_OFFSET: f32 = 30.0;
    /// Entities are culled once they pass this far beyond the left edge
    pub const CULL_MARGIN: f32 = 50.0;

    /// Projectiles
    pub const PROJECTILE_SPEED_STANDARD: f32 = 12.0;
    pub const PROJECTILE_SPEED_LASER: f32 = 25.0;
    pub const PROJECTILE_SPEED_BOOMERANG: f32 = 8.0;
    pub const PROJECTILE_SPEED_ENEMY: f32 = 6.0;
    pub const LASER_STEER: f32 = 6.0;
    pub const BOOMERANG_RANGE: f32 = 550.0;
    /// Ticks between boomerang hits while it stays inside the boss
    pub const BOOMERANG_HIT_INTERVAL: u32 = 10;
    pub const SPLIT_SPACING: f32 = 20.0;
    /// Extra reach added to circle tests against projectiles
    pub const PROJECTILE_HIT_RADIUS: f32 = 10.0;
    pub const PROJECTILE_MARGIN: f32 = 100.0;

    /// Boss
    pub const BOSS_ENTRY_SPEED: f32 = 4.0;
    /// Boss settles this far from the right edge
    pub const BOSS_LEAD: f32 = 150.0;
    pub const BOSS_MUZZLE_OFFSET: f32 = 40.0;

    /// Warp transition after a boss falls
    pub const WARP_TICKS: u32 = 90;

    /// Background
    pub const STAR_COUNT: usize = 100;

    /// Particles
    pub const BURST_SIZE: usize = 15;
    pub const BURST_SPEED: f32 = 15.0;
}

/// Direction from `from` to `to` scaled to `speed`.
///
/// Returns `None` when the points coincide so callers skip movement instead
/// of writing NaN into positions.
#[inline]
pub fn aim(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > f32::EPSILON {
        Some(delta / dist * speed)
    } else {
        None
    }
}

/// Euclidean circle-circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_normalizes_to_speed() {
        let v = aim(Vec2::ZERO, Vec2::new(3.0, 4.0), 10.0).unwrap();
        assert!((v.length() - 10.0).abs() < 0.001);
        assert!((v.x - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_aim_coincident_points() {
        assert!(aim(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 10.0).is_none());
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(25.0, 0.0), 10.0));
    }
}
