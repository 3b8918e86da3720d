//! Per-tick motion for the player and every scrolling store

use rand::Rng;

use super::collision::resolve_bounds;
use super::state::{GameState, Stage};
use crate::consts::*;

/// Letter bob: phase step and amplitude
const LETTER_BOB_STEP: f32 = 0.05;
const LETTER_BOB_AMPLITUDE: f32 = 0.5;
/// Power-up bob: phase step and amplitude
const POWERUP_BOB_STEP: f32 = 0.1;
const POWERUP_BOB_AMPLITUDE: f32 = 1.0;

/// Gravity, movement and the top/bottom boundary
pub fn update_player(state: &mut GameState) {
    state.player.integrate();
    resolve_bounds(state);
}

/// Scroll obstacles and items left, then cull what has left the screen
pub fn scroll_entities(state: &mut GameState) {
    let speed = state.scroll_speed();
    let h = state.config.height;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= speed;
        obstacle.oscillate(h);
    }
    for letter in state.letters.iter_mut() {
        letter.pos.x -= speed;
        letter.bob_phase += LETTER_BOB_STEP;
        letter.pos.y += letter.bob_phase.sin() * LETTER_BOB_AMPLITUDE;
    }
    for p in state.powerups.iter_mut() {
        p.pos.x -= speed;
        p.bob_phase += POWERUP_BOB_STEP;
        p.pos.y += p.bob_phase.sin() * POWERUP_BOB_AMPLITUDE;
    }

    state.obstacles.retain(|o| o.x + o.width > -CULL_MARGIN);
    state.letters.retain(|l| l.pos.x > -CULL_MARGIN && !l.collected);
    state.powerups.retain(|p| p.pos.x > -CULL_MARGIN && !p.collected);
}

pub fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

/// Background scroll multiplier for the current situation
pub fn star_speed_multiplier(state: &GameState) -> f32 {
    if state.warp_ticks > 0 {
        6.0
    } else {
        match state.stage {
            Stage::Collecting => 1.0,
            Stage::BossFight if state.boss_enraged() => 4.0,
            Stage::BossFight => 2.0,
        }
    }
}

/// Parallax stars wrap around instead of despawning
pub fn update_stars(state: &mut GameState) {
    let mult = star_speed_multiplier(state);
    let (w, h) = (state.config.width, state.config.height);
    for star in state.stars.iter_mut() {
        star.pos.x -= star.speed * mult;
        if star.pos.x < 0.0 {
            star.pos.x = w;
            star.pos.y = state.rng.random::<f32>() * h;
        }
    }
}
