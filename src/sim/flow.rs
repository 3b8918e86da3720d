//! Run and sub-phase transitions
//!
//! Collecting → boss fight → (next level | victory), with game over reachable
//! from anywhere while playing. Each transition fires at most once.

use super::levels;
use super::state::{Boss, GameEvent, GameState, RunPhase, Stage};
use crate::consts::*;

/// First jump from the idle screen
pub fn start_run(state: &mut GameState) {
    if state.phase != RunPhase::Idle {
        return;
    }
    state.phase = RunPhase::Playing;
    state.push_event(GameEvent::RunStarted {
        level: state.level_index,
    });
    log::info!(
        "Run started at level {} ({})",
        state.level_index + 1,
        state.level().theme.name
    );
}

/// Word completed: reset the mask and bring in the level boss
pub fn begin_boss_fight(state: &mut GameState) {
    if state.stage == Stage::BossFight {
        return;
    }
    state.mask.reset();
    state.words_completed += 1;
    state.stage = Stage::BossFight;
    state.letters.clear();
    state.refresh_level();

    let cfg = state.level().boss;
    state.boss = Some(Boss::new(&cfg, state.config.width, state.config.height));
    state.push_event(GameEvent::WordCompleted);
    state.push_event(GameEvent::BossSpawned {
        level: state.level_index,
    });
    log::info!("Word complete, boss {} incoming", cfg.name);
}

/// Boss health hit zero: victory on the last level, otherwise warp onward
pub fn on_boss_defeated(state: &mut GameState) {
    if state.phase.is_terminal() {
        return;
    }
    let Some(boss) = state.boss.take() else {
        return;
    };
    let color = state.level().boss.color;
    state.spawn_burst(boss.pos, color, 50);
    state.push_event(GameEvent::BossDefeated {
        level: state.level_index,
    });

    if levels::is_final(state.level_index) {
        state.phase = RunPhase::Victory;
        state.projectiles.clear();
        state.push_event(GameEvent::Victory);
        log::info!("Final boss down - victory");
        return;
    }

    state.level_index += 1;
    state.refresh_level();
    state.stage = Stage::Collecting;
    state.mask.reset();
    state.clear_transient();
    state.warp_ticks = WARP_TICKS;
    state.spawn_timer = 0;
    state.push_event(GameEvent::LevelAdvanced {
        level: state.level_index,
    });
    log::info!(
        "Warping to level {} ({})",
        state.level_index + 1,
        state.level().theme.name
    );
}

/// Lives exhausted
pub fn game_over(state: &mut GameState) {
    if state.phase.is_terminal() {
        return;
    }
    state.phase = RunPhase::GameOver;
    state.push_event(GameEvent::GameOver {
        level: state.level_index,
    });
    log::info!("Game over at level {}", state.level_index + 1);
}

/// Pick a level from the select screen and reset the run there
pub fn select_level(state: &mut GameState, index: usize) {
    state.level_index = levels::clamp_index(index);
    state.restart();
}
