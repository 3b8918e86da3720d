//! Collision detection and response
//!
//! Proximity tests are circle-circle on centers, except obstacles (player
//! extent vs. a horizontal gap) and the boss body (player bounds vs. the
//! boss sprite box). Every hazard funnels into [`apply_damage`].

use glam::Vec2;

use super::flow;
use super::projectile::fire_weapon;
use super::state::{GameEvent, GameState, Obstacle, PowerUpKind, Stage, palette};
use crate::circles_overlap;
use crate::consts::*;

/// What the damage rule did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Player was invulnerable (or the run is over)
    Ignored,
    /// Shield consumed, no life lost
    ShieldAbsorbed,
    /// A life was lost
    LifeLost,
}

/// Whether a circle overlaps an obstacle's columns
///
/// The player is only hurt while inside the obstacle's x-span and not fully
/// contained by the gap.
pub fn circle_hits_obstacle(center: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    let in_span = center.x + radius > obstacle.x && center.x - radius < obstacle.x + obstacle.width;
    in_span && (center.y - radius < obstacle.gap_top || center.y + radius > obstacle.gap_bottom())
}

/// Whether a circle's bounding box overlaps an axis-aligned box
pub fn circle_hits_box(center: Vec2, radius: f32, box_center: Vec2, half_extent: Vec2) -> bool {
    center.x + radius > box_center.x - half_extent.x
        && center.x - radius < box_center.x + half_extent.x
        && center.y + radius > box_center.y - half_extent.y
        && center.y - radius < box_center.y + half_extent.y
}

/// The single damage rule shared by every hazard
///
/// A held shield always soaks the hit. Without one, contact during the
/// invulnerability window does nothing.
pub fn apply_damage(state: &mut GameState) -> DamageOutcome {
    if state.phase.is_terminal() {
        return DamageOutcome::Ignored;
    }

    let pos = state.player.pos;
    if state.player.shield {
        state.player.shield = false;
        state.player.invuln_ticks = SHIELD_INVULN_TICKS;
        state.player.velocity = JUMP_IMPULSE / 2.0;
        state.spawn_burst(pos, palette::SHIELD, BURST_SIZE);
        state.push_event(GameEvent::ShieldAbsorbed);
        log::debug!("Shield absorbed a hit");
        return DamageOutcome::ShieldAbsorbed;
    }

    if state.player.is_invulnerable() {
        return DamageOutcome::Ignored;
    }

    state.lives = state.lives.saturating_sub(1);
    state.player.invuln_ticks = HIT_INVULN_TICKS;
    state.player.velocity = JUMP_IMPULSE;
    state.spawn_burst(pos, palette::DANGER, BURST_SIZE);
    state.push_event(GameEvent::PlayerHit { lives: state.lives });
    log::debug!("Player hit, {} lives left", state.lives);

    if state.lives == 0 {
        flow::game_over(state);
    }
    DamageOutcome::LifeLost
}

/// Top and bottom of the playfield
pub fn resolve_bounds(state: &mut GameState) {
    let r = state.player.radius;
    let h = state.config.height;
    let y = state.player.pos.y;
    if y + r >= h || y - r <= 0.0 {
        apply_damage(state);
        state.player.pos.y = state.player.pos.y.clamp(r, (h - r).max(r));
    }
}

pub fn resolve_obstacles(state: &mut GameState) {
    let (pos, r) = (state.player.pos, state.player.radius);
    let hits = state
        .obstacles
        .iter()
        .filter(|o| circle_hits_obstacle(pos, r, o))
        .count();
    for _ in 0..hits {
        apply_damage(state);
    }
}

/// Letters are only collectible while gathering the word
pub fn resolve_letters(state: &mut GameState) {
    if state.stage != Stage::Collecting {
        return;
    }
    let (pos, r) = (state.player.pos, state.player.radius);
    let mut touched = Vec::new();
    for letter in state.letters.iter_mut() {
        if !letter.collected && circles_overlap(pos, r, letter.pos, LETTER_RADIUS) {
            letter.collected = true;
            touched.push((letter.pos, letter.ch));
        }
    }

    for (at, ch) in touched {
        match state.mask.fill(&state.config.target_word, ch) {
            Some(slot) => {
                state.spawn_burst(at, palette::SUCCESS, BURST_SIZE);
                state.push_event(GameEvent::LetterCollected { ch, slot });
                log::debug!("Letter {} filled slot {}", ch, slot);
                if state.mask.is_complete() {
                    flow::begin_boss_fight(state);
                    break;
                }
            }
            None => {
                state.spawn_burst(at, palette::NEUTRAL, BURST_SIZE);
                state.push_event(GameEvent::LetterWasted { ch });
            }
        }
    }
    state.letters.retain(|l| !l.collected);
}

pub fn resolve_powerups(state: &mut GameState) {
    let (pos, r) = (state.player.pos, state.player.radius);
    let mut touched = Vec::new();
    for p in state.powerups.iter_mut() {
        if !p.collected && circles_overlap(pos, r, p.pos, POWERUP_RADIUS) {
            p.collected = true;
            touched.push((p.pos, p.kind));
        }
    }

    for (at, kind) in touched {
        match kind {
            PowerUpKind::Shield => {
                state.player.shield = true;
                state.spawn_burst(at, palette::SHIELD, BURST_SIZE);
                log::debug!("Shield picked up");
            }
            _ if state.stage == Stage::BossFight && state.boss.is_some() => {
                fire_weapon(state, kind);
                let count = match kind {
                    PowerUpKind::Split => 8,
                    PowerUpKind::Laser => 10,
                    _ => 5,
                };
                state.spawn_burst(at, kind.color(), count);
            }
            _ => {
                // No target yet: the pickup is consumed without firing
                state.spawn_burst(at, palette::NEUTRAL, 5);
            }
        }
    }
    state.powerups.retain(|p| !p.collected);
}

/// Touching the boss hurts on every tick of overlap
pub fn resolve_boss_body(state: &mut GameState) {
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    let half = Vec2::splat(boss.size / 2.0);
    if circle_hits_box(state.player.pos, state.player.radius, boss.pos, half) {
        apply_damage(state);
    }
}

/// Run every player-vs-world test for this tick
pub fn resolve_collisions(state: &mut GameState) {
    resolve_obstacles(state);
    resolve_letters(state);
    resolve_powerups(state);
    resolve_boss_body(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Letter, PowerUp, ProjectileKind, RunPhase, SimConfig};

    fn playing_state() -> GameState {
        let mut state = GameState::new(7, SimConfig::default());
        state.phase = RunPhase::Playing;
        state
    }

    fn letter_at_player(state: &mut GameState, ch: char) {
        let id = state.next_entity_id();
        let pos = state.player.pos;
        state.letters.push(Letter {
            id,
            pos,
            ch,
            collected: false,
            bob_phase: 0.0,
        });
    }

    #[test]
    fn test_obstacle_hit_outside_gap() {
        let obstacle = Obstacle {
            id: 1,
            x: 90.0,
            gap_top: 200.0,
            base_gap_top: 200.0,
            gap: 190.0,
            width: 60.0,
            moving: false,
            move_phase: 0.0,
        };
        assert!(!circle_hits_obstacle(Vec2::new(100.0, 300.0), 18.0, &obstacle));
        assert!(circle_hits_obstacle(Vec2::new(100.0, 205.0), 18.0, &obstacle));
        assert!(circle_hits_obstacle(Vec2::new(100.0, 385.0), 18.0, &obstacle));
        // Outside the x-span nothing counts
        assert!(!circle_hits_obstacle(Vec2::new(300.0, 10.0), 18.0, &obstacle));
    }

    #[test]
    fn test_box_overlap() {
        let half = Vec2::splat(60.0);
        assert!(circle_hits_box(Vec2::new(540.0, 300.0), 18.0, Vec2::new(600.0, 300.0), half));
        assert!(!circle_hits_box(Vec2::new(500.0, 300.0), 18.0, Vec2::new(600.0, 300.0), half));
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let mut state = playing_state();
        state.player.shield = true;
        assert_eq!(apply_damage(&mut state), DamageOutcome::ShieldAbsorbed);
        assert!(!state.player.shield);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.player.velocity, JUMP_IMPULSE / 2.0);
        assert_eq!(state.player.invuln_ticks, SHIELD_INVULN_TICKS);
    }

    #[test]
    fn test_shield_absorbs_hit_while_invulnerable() {
        let mut state = playing_state();
        state.player.invuln_ticks = 50;
        state.player.shield = true;
        assert_eq!(apply_damage(&mut state), DamageOutcome::ShieldAbsorbed);
        assert!(!state.player.shield);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.player.invuln_ticks, SHIELD_INVULN_TICKS);
        assert_eq!(state.player.velocity, JUMP_IMPULSE / 2.0);
        // Shield gone and still invulnerable: nothing happens
        assert_eq!(apply_damage(&mut state), DamageOutcome::Ignored);
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_life_lost_then_invulnerable() {
        let mut state = playing_state();
        assert_eq!(apply_damage(&mut state), DamageOutcome::LifeLost);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.player.invuln_ticks, HIT_INVULN_TICKS);
        assert_eq!(state.player.velocity, JUMP_IMPULSE);
        // Repeated contact inside the window is ignored
        assert_eq!(apply_damage(&mut state), DamageOutcome::Ignored);
        assert_eq!(state.lives, START_LIVES - 1);
    }

    #[test]
    fn test_last_life_ends_run_once() {
        let mut state = playing_state();
        state.lives = 1;
        apply_damage(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, RunPhase::GameOver);
        state.player.invuln_ticks = 0;
        assert_eq!(apply_damage(&mut state), DamageOutcome::Ignored);
        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_duplicate_letter_wasted() {
        let mut state = playing_state();
        letter_at_player(&mut state, 'G');
        resolve_letters(&mut state);
        assert!(state.mask.slots()[0]);
        assert!(state.letters.is_empty());

        letter_at_player(&mut state, 'G');
        let before = state.mask.clone();
        resolve_letters(&mut state);
        assert_eq!(state.mask, before);
        assert!(state.letters.is_empty());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LetterWasted { ch: 'G' })
        );
        assert!(state.particles.iter().any(|p| p.color == palette::NEUTRAL));
    }

    #[test]
    fn test_completing_word_starts_boss_fight() {
        let mut state = playing_state();
        for ch in "GEMIN".chars() {
            letter_at_player(&mut state, ch);
        }
        resolve_letters(&mut state);
        assert_eq!(state.stage, Stage::Collecting);
        assert_eq!(state.mask.filled_count(), 5);

        letter_at_player(&mut state, 'I');
        resolve_letters(&mut state);
        assert_eq!(state.stage, Stage::BossFight);
        assert_eq!(state.mask.filled_count(), 0);
        assert!(state.boss.is_some());
        assert_eq!(state.words_completed, 1);
    }

    #[test]
    fn test_weapon_pickup_inert_while_collecting() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        state.powerups.push(PowerUp {
            id,
            pos: state.player.pos,
            kind: PowerUpKind::Laser,
            collected: false,
            bob_phase: 0.0,
        });
        resolve_powerups(&mut state);
        assert!(state.powerups.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_weapon_pickup_fires_in_boss_fight() {
        let mut state = playing_state();
        flow::begin_boss_fight(&mut state);
        let id = state.next_entity_id();
        state.powerups.push(PowerUp {
            id,
            pos: state.player.pos,
            kind: PowerUpKind::Split,
            collected: false,
            bob_phase: 0.0,
        });
        resolve_powerups(&mut state);
        assert_eq!(state.projectiles.len(), 3);
        assert!(state.projectiles.iter().all(|p| p.kind == ProjectileKind::Split));
    }

    #[test]
    fn test_boss_body_contact_damages() {
        let mut state = playing_state();
        flow::begin_boss_fight(&mut state);
        if let Some(boss) = state.boss.as_mut() {
            boss.pos = state.player.pos;
        }
        resolve_boss_body(&mut state);
        assert_eq!(state.lives, START_LIVES - 1);
    }
}
