//! Boss AI: entry slide, archetype movement, phases and attacks

use glam::Vec2;
use rand::Rng;

use super::levels::{BossBehavior, EnemyShot};
use super::state::{GameState, Projectile, ProjectileKind};
use crate::aim;
use crate::consts::*;

/// Fan angle between spread bolts (radians)
const SPREAD_ANGLE: f32 = 0.25;
/// Bolts in a beam volley and their spacing along the aim line
const BEAM_BOLTS: usize = 4;
const BEAM_SPACING: f32 = 24.0;
const BEAM_SPEED_SCALE: f32 = 1.25;

/// Vertical oscillation step and amplitude for a phased boss
fn phased_motion(phase: u8) -> (f32, f32) {
    match phase {
        1 => (0.03, 100.0),
        2 => (0.05, 150.0),
        _ => (0.1, 180.0),
    }
}

/// Ticks between attacks for the current phase
pub fn fire_period(state: &GameState) -> u32 {
    let cfg = &state.level().boss;
    if cfg.behavior.has_phases() && state.boss_phase() >= 3 {
        cfg.enraged_fire_period
    } else {
        cfg.fire_period
    }
}

/// Advance the boss for one tick
pub fn update_boss(state: &mut GameState) {
    let cfg = state.level().boss;
    let player_y = state.player.pos.y;
    let (w, h) = (state.config.width, state.config.height);
    let period = fire_period(state);

    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    boss.phase = boss.compute_phase(cfg.behavior);
    boss.hit_flash = boss.hit_flash.saturating_sub(1);

    if boss.entering {
        boss.pos.x -= BOSS_ENTRY_SPEED;
        let settle_x = w - BOSS_LEAD;
        if boss.pos.x <= settle_x {
            boss.pos.x = settle_x;
            boss.entering = false;
            boss.home_y = boss.pos.y;
            log::debug!("{} in position", cfg.name);
        }
        return;
    }

    match cfg.behavior {
        BossBehavior::Static => {
            boss.osc_phase += 0.02;
            let target = boss.home_y + boss.osc_phase.sin() * 20.0;
            boss.pos.y += (target - boss.pos.y) * 0.1;
        }
        BossBehavior::SineWave => {
            boss.osc_phase += 0.03;
            let target = h / 2.0 + boss.osc_phase.sin() * 150.0;
            boss.pos.y += (target - boss.pos.y) * 0.1;
        }
        BossBehavior::Tracking => {
            boss.pos.y += (player_y - boss.pos.y) * 0.04;
        }
        BossBehavior::Phased => {
            let (speed, amplitude) = phased_motion(boss.phase);
            boss.osc_phase += speed;
            let mut target = h / 2.0 + boss.osc_phase.sin() * amplitude;
            if boss.phase == 3 {
                target += (state.rng.random::<f32>() - 0.5) * 10.0;
            }
            boss.pos.y += (target - boss.pos.y) * 0.1;
        }
    }

    let half = boss.size / 2.0;
    boss.pos.y = boss.pos.y.clamp(half, (h - half).max(half));

    boss.attack_timer += 1;
    if boss.attack_timer > period {
        boss.attack_timer = 0;
        let muzzle = boss.pos - Vec2::new(BOSS_MUZZLE_OFFSET, 0.0);
        fire_volley(state, cfg.shot, muzzle);
    }
}

/// Emit enemy bolts from `origin` aimed at the player
pub fn fire_volley(state: &mut GameState, shot: EnemyShot, origin: Vec2) {
    let Some(dir) = aim(origin, state.player.pos, 1.0) else {
        return;
    };

    let bolts: Vec<(Vec2, Vec2)> = match shot {
        EnemyShot::Straight => vec![(origin, dir * PROJECTILE_SPEED_ENEMY)],
        EnemyShot::Spread => [-SPREAD_ANGLE, 0.0, SPREAD_ANGLE]
            .iter()
            .map(|&a| (origin, Vec2::from_angle(a).rotate(dir) * PROJECTILE_SPEED_ENEMY))
            .collect(),
        EnemyShot::Beam => (0..BEAM_BOLTS)
            .map(|i| {
                let pos = origin - dir * (i as f32 * BEAM_SPACING);
                (pos, dir * PROJECTILE_SPEED_ENEMY * BEAM_SPEED_SCALE)
            })
            .collect(),
    };

    for (pos, vel) in bolts {
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, ProjectileKind::EnemyBolt, pos, vel, 1.0));
    }
}
