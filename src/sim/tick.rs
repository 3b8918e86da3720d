//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically, one tick
//! per rendered frame.

use super::state::{GameState, RunPhase, Stage};
use super::{boss, collision, flow, physics, projectile, spawner};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space/tap); also starts the run from the idle screen
    pub jump: bool,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Terminal screens don't simulate
    if state.phase.is_terminal() {
        return;
    }

    let jump = if input.autopilot {
        autopilot_jump(state)
    } else {
        input.jump
    };

    if jump {
        flow::start_run(state);
        state.player.jump();
    }

    if state.phase != RunPhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.player.invuln_ticks = state.player.invuln_ticks.saturating_sub(1);
    state.warp_ticks = state.warp_ticks.saturating_sub(1);

    physics::update_player(state);
    spawner::run_spawner(state);
    physics::scroll_entities(state);
    collision::resolve_collisions(state);

    if !state.phase.is_terminal() {
        boss::update_boss(state);
        projectile::update_projectiles(state);
    }

    physics::update_particles(state);
    physics::update_stars(state);
}

/// Demo controller: flap whenever the bird sinks below where it wants to be
fn autopilot_jump(state: &GameState) -> bool {
    if state.phase == RunPhase::Idle {
        return true;
    }

    let player = &state.player;
    let ahead_x = player.pos.x - player.radius;

    // Next obstacle still in front of (or around) the bird
    let next_gap = state
        .obstacles
        .iter()
        .filter(|o| o.x + o.width > ahead_x)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|o| o.gap_top + o.gap / 2.0);

    // Otherwise go for the nearest useful item
    let item = match state.stage {
        Stage::Collecting => state
            .letters
            .iter()
            .filter(|l| l.pos.x > ahead_x && state.mask.needs(&state.config.target_word, l.ch))
            .min_by(|a, b| a.pos.x.partial_cmp(&b.pos.x).unwrap_or(std::cmp::Ordering::Equal))
            .map(|l| l.pos.y),
        Stage::BossFight => state
            .powerups
            .iter()
            .filter(|p| p.pos.x > ahead_x)
            .min_by(|a, b| a.pos.x.partial_cmp(&b.pos.x).unwrap_or(std::cmp::Ordering::Equal))
            .map(|p| p.pos.y),
    };

    let target_y = next_gap
        .or(item)
        .unwrap_or(state.config.height / 2.0);

    player.pos.y > target_y + 10.0 && player.velocity >= 0.0
}
