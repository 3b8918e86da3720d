//! Scene assembly: one triangle list per frame, back to front

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, darken, rgba};
use crate::consts::{LETTER_RADIUS, POWERUP_RADIUS};
use crate::sim::state::palette;
use crate::sim::{GameState, Stage};

const CIRCLE_SEGMENTS: u32 = 20;
const SMALL_SEGMENTS: u32 = 8;
const OBSTACLE_EDGE: f32 = 3.0;
/// Particles fade out over their last this-many ticks
const PARTICLE_FADE_TICKS: f32 = 30.0;
const HEALTH_BAR_HEIGHT: f32 = 8.0;

/// Build every vertex for the current frame
///
/// Reads the state only; drawing never feeds back into the simulation.
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);
    let level = state.level();
    let (w, h) = (state.config.width, state.config.height);

    out.extend(shapes::rect(Vec2::ZERO, Vec2::new(w, h), rgba(level.theme.background, 1.0)));

    for star in &state.stars {
        let color = rgba(palette::NEUTRAL, star.brightness);
        out.extend(shapes::rect(star.pos, Vec2::splat(star.size), color));
    }

    let fill = rgba(level.theme.obstacle_fill, 1.0);
    for obstacle in &state.obstacles {
        let edge = if obstacle.moving {
            rgba(palette::MOVING_OBSTACLE, 1.0)
        } else {
            rgba(level.theme.obstacle_edge, 1.0)
        };
        let top = (Vec2::new(obstacle.x, 0.0), Vec2::new(obstacle.width, obstacle.gap_top));
        let bottom_y = obstacle.gap_bottom();
        let bottom = (
            Vec2::new(obstacle.x, bottom_y),
            Vec2::new(obstacle.width, h - bottom_y),
        );
        for (min, size) in [top, bottom] {
            out.extend(shapes::rect(min, size, fill));
            out.extend(shapes::rect_outline(min, size, OBSTACLE_EDGE, edge));
        }
    }

    let word = &state.config.target_word;
    for letter in &state.letters {
        let hex = if state.mask.needs(word, letter.ch) {
            palette::LETTER_NEEDED
        } else {
            palette::LETTER_SPARE
        };
        out.extend(shapes::circle(letter.pos, LETTER_RADIUS, rgba(hex, 0.35), CIRCLE_SEGMENTS));
        out.extend(shapes::ring(
            letter.pos,
            LETTER_RADIUS - 2.0,
            LETTER_RADIUS,
            rgba(hex, 1.0),
            CIRCLE_SEGMENTS,
        ));
    }

    for powerup in &state.powerups {
        let color = rgba(powerup.kind.color(), 1.0);
        out.extend(shapes::circle(powerup.pos, POWERUP_RADIUS * 0.6, color, CIRCLE_SEGMENTS));
        out.extend(shapes::ring(
            powerup.pos,
            POWERUP_RADIUS - 2.0,
            POWERUP_RADIUS,
            color,
            CIRCLE_SEGMENTS,
        ));
    }

    if let Some(boss) = &state.boss {
        let mut color = if boss.hit_flash > 0 {
            rgba(palette::NEUTRAL, 1.0)
        } else {
            rgba(level.boss.color, 1.0)
        };
        if boss.phase >= 3 && boss.hit_flash == 0 {
            color = darken(color, 0.6);
        }
        out.extend(shapes::circle(boss.pos, boss.size / 2.0, color, CIRCLE_SEGMENTS * 2));
        out.extend(shapes::circle(
            boss.pos - Vec2::new(boss.size * 0.2, 0.0),
            boss.size * 0.1,
            rgba(palette::DANGER, 1.0),
            SMALL_SEGMENTS,
        ));

        // Health bar across the top of the screen
        let bar = Vec2::new(w * 0.5, HEALTH_BAR_HEIGHT);
        let at = Vec2::new(w * 0.25, 12.0);
        out.extend(shapes::rect(at, bar, rgba(palette::LETTER_SPARE, 0.8)));
        out.extend(shapes::rect(
            at,
            Vec2::new(bar.x * boss.health_ratio().clamp(0.0, 1.0), bar.y),
            rgba(palette::DANGER, 1.0),
        ));
    }

    for projectile in &state.projectiles {
        let radius = if projectile.kind.is_enemy() { 6.0 } else { 5.0 };
        out.extend(shapes::circle(
            projectile.pos,
            radius,
            rgba(projectile.kind.color(), 1.0),
            SMALL_SEGMENTS,
        ));
    }

    for particle in &state.particles {
        let alpha = (particle.life as f32 / PARTICLE_FADE_TICKS).min(1.0);
        out.extend(shapes::rect(
            particle.pos - Vec2::splat(1.5),
            Vec2::splat(3.0),
            rgba(particle.color, alpha),
        ));
    }

    draw_player(state, &mut out);
    out
}

fn draw_player(state: &GameState, out: &mut Vec<Vertex>) {
    let player = &state.player;

    // Blink while invulnerable
    if player.is_invulnerable() && (state.time_ticks / 4) % 2 == 1 {
        return;
    }

    let hex = match state.stage {
        Stage::Collecting => palette::PLAYER,
        Stage::BossFight => palette::PLAYER_BOSS_FIGHT,
    };
    out.extend(shapes::circle(player.pos, player.radius, rgba(hex, 1.0), CIRCLE_SEGMENTS));

    let facing = Vec2::from_angle(player.rotation);
    let tip = player.pos + facing * (player.radius + 8.0);
    out.extend(shapes::wedge(tip, 10.0, 5.0, player.rotation, rgba(palette::AMMO, 1.0)));

    if player.shield {
        out.extend(shapes::ring(
            player.pos,
            player.radius + 6.0,
            player.radius + 9.0,
            rgba(palette::SHIELD, 0.8),
            CIRCLE_SEGMENTS,
        ));
    }
}
