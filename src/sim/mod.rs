//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (insertion order, monotonic entity IDs)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod flow;
pub mod levels;
pub mod physics;
pub mod projectile;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{DamageOutcome, apply_damage};
pub use levels::{BossBehavior, EnemyShot, LevelConfig, LevelSummary, catalog};
pub use state::{
    Boss, GameEvent, GameState, Letter, LetterMask, Obstacle, Particle, Player, PowerUp, PowerUpKind,
    Projectile, ProjectileKind, ReturnState, RunPhase, SimConfig, Stage, Star,
};
pub use tick::{TickInput, tick};
