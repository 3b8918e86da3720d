//! Period-gated procedural spawning of obstacles and items
//!
//! Obstacle placement and item placement are decided independently, so items
//! keep arriving while an enraged boss has stopped the obstacles.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Letter, Obstacle, PowerUp, PowerUpKind, Stage};
use crate::consts::*;

/// Ticks between spawn cycles for the current sub-phase
pub fn spawn_period(state: &GameState) -> u32 {
    let base = state.level().spawn_period;
    let period = match state.stage {
        Stage::Collecting => base,
        Stage::BossFight => (base as f32 / 1.1).floor() as u32,
    };
    period.max(1)
}

/// Count toward the next cycle; frozen while warping
pub fn run_spawner(state: &mut GameState) {
    if state.warp_ticks > 0 {
        return;
    }
    state.spawn_timer += 1;
    if state.spawn_timer < spawn_period(state) {
        return;
    }
    state.spawn_timer = 0;
    spawn_cycle(state);
}

/// One spawn cycle: maybe an obstacle, then exactly one item roll
pub fn spawn_cycle(state: &mut GameState) {
    let level = state.level();
    let (w, h) = (state.config.width, state.config.height);

    let min_top = GAP_SPAWN_MARGIN;
    let max_top = (h - level.gap - GAP_SPAWN_MARGIN).max(min_top);
    let gap_top = state.rng.random_range(min_top..=max_top);

    let place_obstacle = !state.boss_enraged();
    if place_obstacle {
        let moving = level.moving_ratio > 0.0
            && state.rng.random_bool(f64::from(level.moving_ratio).clamp(0.0, 1.0));
        let move_phase = state.rng.random::<f32>() * std::f32::consts::TAU;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x: w,
            gap_top,
            base_gap_top: gap_top,
            gap: level.gap,
            width: level.obstacle_width,
            moving,
            move_phase,
        });
    }

    let item_y = if place_obstacle {
        gap_top + level.gap / 2.0
    } else {
        let lo = GAP_SPAWN_MARGIN;
        let hi = (h - GAP_SPAWN_MARGIN).max(lo);
        state.rng.random_range(lo..=hi)
    };
    let at = Vec2::new(w + ITEM_SPAWN_OFFSET, item_y);

    match state.stage {
        Stage::Collecting => {
            let chance = state.config.powerup_chance.clamp(0.0, 1.0);
            if state.rng.random_bool(chance) {
                push_powerup(state, at, PowerUpKind::Shield);
            } else if let Some(ch) = pick_letter(state) {
                let id = state.next_entity_id();
                let bob_phase = state.rng.random::<f32>() * std::f32::consts::TAU;
                state.letters.push(Letter {
                    id,
                    pos: at,
                    ch,
                    collected: false,
                    bob_phase,
                });
            }
        }
        Stage::BossFight => {
            let kind = roll_weapon(state.rng.random::<f64>());
            push_powerup(state, at, kind);
        }
    }
}

fn push_powerup(state: &mut GameState, at: Vec2, kind: PowerUpKind) {
    let id = state.next_entity_id();
    state.powerups.push(PowerUp {
        id,
        pos: at,
        kind,
        collected: false,
        bob_phase: 0.0,
    });
    log::debug!("Spawned {:?} power-up", kind);
}

/// Boss-fight item table: mostly ammo, rarer heavy weapons and shields
pub fn roll_weapon(roll: f64) -> PowerUpKind {
    if roll > 0.9 {
        PowerUpKind::Laser
    } else if roll > 0.8 {
        PowerUpKind::Split
    } else if roll > 0.7 {
        PowerUpKind::Boomerang
    } else if roll > 0.65 {
        PowerUpKind::Shield
    } else {
        PowerUpKind::Ammo
    }
}

/// Choose a letter, preferring ones the mask still needs
pub fn pick_letter(state: &mut GameState) -> Option<char> {
    let word = &state.config.target_word;
    if word.is_empty() {
        return None;
    }
    let open = state.mask.open_slots();
    let bias = state.config.letter_bias.clamp(0.0, 1.0);
    let idx = if !open.is_empty() && state.rng.random_bool(bias) {
        open[state.rng.random_range(0..open.len())]
    } else {
        state.rng.random_range(0..word.len())
    };
    Some(word[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{flow, levels};
    use crate::sim::state::{RunPhase, SimConfig};

    fn playing(config: SimConfig) -> GameState {
        let mut state = GameState::new(21, config);
        state.phase = RunPhase::Playing;
        state
    }

    #[test]
    fn test_spawns_on_period() {
        let mut state = playing(SimConfig::default());
        let period = spawn_period(&state);
        for _ in 0..period - 1 {
            run_spawner(&mut state);
        }
        assert!(state.obstacles.is_empty());
        run_spawner(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.letters.len() + state.powerups.len(), 1);
    }

    #[test]
    fn test_gap_within_spawn_bounds() {
        let mut state = playing(SimConfig::default());
        for _ in 0..200 {
            spawn_cycle(&mut state);
        }
        let h = state.config.height;
        for o in &state.obstacles {
            assert!(o.gap_top >= GAP_SPAWN_MARGIN);
            assert!(o.gap_bottom() <= h - GAP_SPAWN_MARGIN + 0.001);
        }
    }

    #[test]
    fn test_warp_freezes_spawning() {
        let mut state = playing(SimConfig::default());
        state.warp_ticks = 10;
        for _ in 0..500 {
            run_spawner(&mut state);
        }
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_timer, 0);
    }

    #[test]
    fn test_enraged_boss_stops_obstacles_but_not_items() {
        let mut state = GameState::new_at_level(21, SimConfig::default(), levels::final_index());
        state.phase = RunPhase::Playing;
        flow::begin_boss_fight(&mut state);
        if let Some(boss) = state.boss.as_mut() {
            boss.health = 60.0;
        }
        spawn_cycle(&mut state);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.powerups.len(), 1);
        let y = state.powerups[0].pos.y;
        assert!((GAP_SPAWN_MARGIN..=state.config.height - GAP_SPAWN_MARGIN).contains(&y));
    }

    #[test]
    fn test_full_bias_picks_only_needed_letters() {
        let config = SimConfig {
            letter_bias: 1.0,
            ..Default::default()
        };
        let mut state = playing(config);
        let word = state.config.target_word.clone();
        for &c in &word[..5] {
            state.mask.fill(&word, c);
        }
        for _ in 0..50 {
            assert_eq!(pick_letter(&mut state), Some('I'));
        }
    }

    #[test]
    fn test_collecting_items_are_letters_or_shields() {
        let mut state = playing(SimConfig::default());
        for _ in 0..100 {
            spawn_cycle(&mut state);
        }
        assert!(!state.letters.is_empty());
        assert!(state.powerups.iter().all(|p| p.kind == PowerUpKind::Shield));
    }

    #[test]
    fn test_weapon_table() {
        assert_eq!(roll_weapon(0.95), PowerUpKind::Laser);
        assert_eq!(roll_weapon(0.85), PowerUpKind::Split);
        assert_eq!(roll_weapon(0.75), PowerUpKind::Boomerang);
        assert_eq!(roll_weapon(0.68), PowerUpKind::Shield);
        assert_eq!(roll_weapon(0.1), PowerUpKind::Ammo);
    }

    #[test]
    fn test_boss_fight_period_shorter() {
        let mut state = playing(SimConfig::default());
        let collecting = spawn_period(&state);
        flow::begin_boss_fight(&mut state);
        assert_eq!(spawn_period(&state), (collecting as f32 / 1.1).floor() as u32);
    }
}
