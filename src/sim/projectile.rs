//! Weapon firing and per-type projectile flight
//!
//! Player projectiles only move while a boss exists to aim at. Enemy bolts fly
//! straight and hurt the player on contact.

use glam::Vec2;

use super::collision::apply_damage;
use super::flow;
use super::state::{
    GameEvent, GameState, PowerUpKind, Projectile, ProjectileKind, ReturnState, palette,
};
use crate::consts::*;
use crate::{aim, circles_overlap};

/// Launch the projectiles granted by a weapon pickup
pub fn fire_weapon(state: &mut GameState, kind: PowerUpKind) {
    let origin = state.player.pos;
    let shots: Vec<(ProjectileKind, Vec2, Vec2, f32)> = match kind {
        PowerUpKind::Shield => return,
        PowerUpKind::Ammo => vec![(ProjectileKind::Standard, origin, Vec2::ZERO, 1.0)],
        PowerUpKind::Split => (-1..=1)
            .map(|i| {
                let pos = origin + Vec2::new(0.0, i as f32 * SPLIT_SPACING);
                (ProjectileKind::Split, pos, Vec2::ZERO, 1.0)
            })
            .collect(),
        PowerUpKind::Laser => vec![(
            ProjectileKind::Laser,
            origin,
            Vec2::new(PROJECTILE_SPEED_LASER, 0.0),
            5.0,
        )],
        PowerUpKind::Boomerang => vec![(
            ProjectileKind::Boomerang,
            origin,
            Vec2::new(PROJECTILE_SPEED_BOOMERANG, 0.0),
            2.0,
        )],
    };

    for (pk, pos, vel, damage) in shots {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(id, pk, pos, vel, damage));
    }
    state.push_event(GameEvent::WeaponFired { kind });
    log::debug!("Fired {:?}", kind);
}

/// Move a player-owned projectile toward its target for one tick
fn steer(p: &mut Projectile, boss_pos: Vec2, player_pos: Vec2) {
    match p.kind {
        ProjectileKind::Standard | ProjectileKind::Split => {
            if let Some(v) = aim(p.pos, boss_pos, PROJECTILE_SPEED_STANDARD) {
                p.vel = v;
                p.pos += v;
            }
        }
        ProjectileKind::Laser => {
            let dy = (boss_pos.y - p.pos.y).clamp(-LASER_STEER, LASER_STEER);
            p.vel.y = dy;
            p.pos += p.vel;
        }
        ProjectileKind::Boomerang => match p.return_state {
            Some(ReturnState::Return) => {
                if let Some(v) = aim(p.pos, player_pos, PROJECTILE_SPEED_BOOMERANG) {
                    p.vel = v;
                    p.pos += v;
                }
            }
            _ => {
                p.pos += p.vel;
                if p.pos.x - p.launch_x >= BOOMERANG_RANGE {
                    p.return_state = Some(ReturnState::Return);
                }
            }
        },
        ProjectileKind::EnemyBolt => {}
    }
}

/// Damage dealt to the boss this tick by one projectile
struct BossHit {
    at: Vec2,
    damage: f32,
    flash: u32,
    burst: usize,
}

/// Advance every projectile, apply hits, and prune inactive ones
pub fn update_projectiles(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_r = state.player.radius;
    let boss = state.boss.as_ref().map(|b| (b.pos, b.size));
    let (w, h) = (state.config.width, state.config.height);

    let mut player_hits = 0;
    let mut boss_hits = Vec::new();

    for p in state.projectiles.iter_mut().filter(|p| p.active) {
        if p.kind.is_enemy() {
            p.pos += p.vel;
            if circles_overlap(p.pos, PROJECTILE_HIT_RADIUS, player_pos, player_r) {
                player_hits += 1;
                p.active = false;
            }
        } else if let Some((boss_pos, boss_size)) = boss {
            p.hit_cooldown = p.hit_cooldown.saturating_sub(1);
            steer(p, boss_pos, player_pos);

            if circles_overlap(p.pos, PROJECTILE_HIT_RADIUS, boss_pos, boss_size / 2.0) {
                if p.kind == ProjectileKind::Boomerang {
                    // Pierces: one hit per interval while inside the boss
                    if p.hit_cooldown == 0 {
                        p.hit_cooldown = BOOMERANG_HIT_INTERVAL;
                        boss_hits.push(BossHit {
                            at: p.pos,
                            damage: p.damage,
                            flash: 2,
                            burst: 2,
                        });
                    }
                } else {
                    p.active = false;
                    boss_hits.push(BossHit {
                        at: p.pos,
                        damage: p.damage,
                        flash: 10,
                        burst: 10,
                    });
                }
            }

            if p.return_state == Some(ReturnState::Return)
                && circles_overlap(p.pos, PROJECTILE_HIT_RADIUS, player_pos, player_r)
            {
                p.active = false;
            }
        }

        let out_x = p.pos.x < -PROJECTILE_MARGIN || p.pos.x > w + PROJECTILE_MARGIN;
        let out_y = p.pos.y < -PROJECTILE_MARGIN || p.pos.y > h + PROJECTILE_MARGIN;
        if out_x || out_y {
            p.active = false;
        }
    }

    for _ in 0..player_hits {
        apply_damage(state);
    }

    for hit in boss_hits {
        if let Some(boss) = state.boss.as_mut() {
            boss.take_damage(hit.damage, hit.flash);
        }
        state.spawn_burst(hit.at, palette::AMMO, hit.burst);
    }

    state.projectiles.retain(|p| p.active);

    if state.boss.as_ref().is_some_and(|b| b.is_defeated()) {
        flow::on_boss_defeated(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{RunPhase, SimConfig, Stage};

    fn boss_fight() -> GameState {
        let mut state = GameState::new(11, SimConfig::default());
        state.phase = RunPhase::Playing;
        flow::begin_boss_fight(&mut state);
        if let Some(boss) = state.boss.as_mut() {
            boss.pos = Vec2::new(650.0, 300.0);
            boss.entering = false;
        }
        state
    }

    #[test]
    fn test_standard_homes_and_hits_boss() {
        let mut state = boss_fight();
        fire_weapon(&mut state, PowerUpKind::Ammo);
        let start = state.boss.as_ref().unwrap().health;
        for _ in 0..60 {
            update_projectiles(&mut state);
        }
        assert!(state.projectiles.is_empty());
        assert_eq!(state.boss.as_ref().unwrap().health, start - 1.0);
    }

    #[test]
    fn test_player_projectiles_inert_without_boss() {
        let mut state = GameState::new(11, SimConfig::default());
        let id = state.next_entity_id();
        let p = Projectile::new(id, ProjectileKind::Standard, Vec2::new(100.0, 100.0), Vec2::ZERO, 1.0);
        state.projectiles.push(p);
        update_projectiles(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_coincident_homing_does_not_produce_nan() {
        let mut state = boss_fight();
        let boss_pos = state.boss.as_ref().unwrap().pos;
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, ProjectileKind::Standard, boss_pos, Vec2::ZERO, 1.0));
        update_projectiles(&mut state);
        assert!(state.particles.iter().all(|p| p.pos.is_finite()));
        assert!(state.boss.as_ref().unwrap().pos.is_finite());
    }

    #[test]
    fn test_boomerang_flips_once_then_homes_to_player() {
        let mut state = boss_fight();
        // Keep the boss out of the flight path
        if let Some(boss) = state.boss.as_mut() {
            boss.pos = Vec2::new(650.0, 550.0);
        }
        fire_weapon(&mut state, PowerUpKind::Boomerang);
        let mut flips = 0;
        let mut last = Some(ReturnState::Out);
        for _ in 0..80 {
            let was_returning = last == Some(ReturnState::Return);
            update_projectiles(&mut state);
            let Some(p) = state.projectiles.first() else {
                break;
            };
            if p.return_state != last {
                flips += 1;
                last = p.return_state;
            }
            if was_returning {
                let to_player = state.player.pos - p.pos;
                assert!(p.vel.dot(to_player) > 0.0);
            }
        }
        assert_eq!(flips, 1);
        assert_eq!(last, Some(ReturnState::Return));
    }

    #[test]
    fn test_boomerang_hit_throttle() {
        let mut state = boss_fight();
        let boss_pos = state.boss.as_ref().unwrap().pos;
        let id = state.next_entity_id();
        let mut p = Projectile::new(id, ProjectileKind::Boomerang, boss_pos, Vec2::ZERO, 2.0);
        p.launch_x = boss_pos.x;
        state.projectiles.push(p);
        let start = state.boss.as_ref().unwrap().health;
        for _ in 0..20 {
            update_projectiles(&mut state);
        }
        // Hits on ticks 1 and 11 only
        assert_eq!(state.boss.as_ref().unwrap().health, start - 4.0);
    }

    #[test]
    fn test_enemy_bolt_hits_player_once() {
        let mut state = boss_fight();
        let id = state.next_entity_id();
        let pos = state.player.pos + Vec2::new(6.0, 0.0);
        state.projectiles.push(Projectile::new(
            id,
            ProjectileKind::EnemyBolt,
            pos,
            Vec2::new(-PROJECTILE_SPEED_ENEMY, 0.0),
            1.0,
        ));
        update_projectiles(&mut state);
        assert_eq!(state.lives, START_LIVES - 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_offscreen_projectiles_pruned() {
        let mut state = boss_fight();
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(
            id,
            ProjectileKind::EnemyBolt,
            Vec2::new(-95.0, 300.0),
            Vec2::new(-PROJECTILE_SPEED_ENEMY, 0.0),
            1.0,
        ));
        update_projectiles(&mut state);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_lethal_hit_advances_level() {
        let mut state = boss_fight();
        if let Some(boss) = state.boss.as_mut() {
            boss.health = 1.0;
        }
        fire_weapon(&mut state, PowerUpKind::Laser);
        for _ in 0..40 {
            update_projectiles(&mut state);
        }
        assert!(state.boss.is_none());
        assert_eq!(state.level_index, 1);
        assert_eq!(state.stage, Stage::Collecting);
    }
}
