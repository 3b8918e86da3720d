//! Static level catalog
//!
//! Each level bundles its visual theme, obstacle geometry and the boss that
//! guards it. The catalog is read-only; the simulation caches a reference to
//! the active entry on every level transition.

use serde::Serialize;

/// Boss movement archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BossBehavior {
    /// Small sine hover around the spawn height
    Static,
    /// Large-amplitude sine sweep across the screen
    SineWave,
    /// Proportional pursuit of the player's height
    Tracking,
    /// Gets faster and wider as health drops, jitters when enraged
    Phased,
}

impl BossBehavior {
    /// Only phased bosses escalate through phases 2 and 3
    pub fn has_phases(self) -> bool {
        matches!(self, BossBehavior::Phased)
    }
}

/// Pattern of enemy bolts fired per attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyShot {
    /// One bolt aimed at the player
    Straight,
    /// A row of bolts strung along the aim line
    Beam,
    /// Three bolts fanned around the aim line
    Spread,
}

/// Boss descriptor for a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BossConfig {
    pub name: &'static str,
    pub color: u32,
    pub max_health: f32,
    pub behavior: BossBehavior,
    pub shot: EnemyShot,
    /// Ticks between attacks
    pub fire_period: u32,
    /// Ticks between attacks once a phased boss reaches phase 3
    pub enraged_fire_period: u32,
    /// Square sprite side length
    pub size: f32,
}

/// Colors and name for a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub background: u32,
    pub obstacle_fill: u32,
    pub obstacle_edge: u32,
}

/// Static configuration for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelConfig {
    pub id: u32,
    pub theme: Theme,
    /// Horizontal scroll speed (px/tick)
    pub scroll_speed: f32,
    /// Ticks between spawn cycles
    pub spawn_period: u32,
    pub gap: f32,
    pub obstacle_width: f32,
    /// Fraction of obstacles whose gap oscillates (0 disables motion)
    pub moving_ratio: f32,
    pub boss: BossConfig,
}

/// Entry shown by a level-select screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSummary {
    pub id: u32,
    pub name: &'static str,
    pub boss_name: &'static str,
    pub boss_color: u32,
}

pub static LEVELS: [LevelConfig; 6] = [
    LevelConfig {
        id: 0,
        theme: Theme {
            name: "Nebula Drift",
            background: 0x0F172A,
            obstacle_fill: 0x334155,
            obstacle_edge: 0x94A3B8,
        },
        scroll_speed: 3.5,
        spawn_period: 100,
        gap: 190.0,
        obstacle_width: 60.0,
        moving_ratio: 0.0,
        boss: BossConfig {
            name: "Sentinel",
            color: 0x4F46E5,
            max_health: 30.0,
            behavior: BossBehavior::Static,
            shot: EnemyShot::Straight,
            fire_period: 120,
            enraged_fire_period: 120,
            size: 100.0,
        },
    },
    LevelConfig {
        id: 1,
        theme: Theme {
            name: "Crimson Reach",
            background: 0x1F0A14,
            obstacle_fill: 0x4C0519,
            obstacle_edge: 0xEC4899,
        },
        scroll_speed: 3.8,
        spawn_period: 95,
        gap: 185.0,
        obstacle_width: 60.0,
        moving_ratio: 0.4,
        boss: BossConfig {
            name: "Warden",
            color: 0xEC4899,
            max_health: 40.0,
            behavior: BossBehavior::SineWave,
            shot: EnemyShot::Spread,
            fire_period: 110,
            enraged_fire_period: 110,
            size: 110.0,
        },
    },
    LevelConfig {
        id: 2,
        theme: Theme {
            name: "Ion Veil",
            background: 0x082F49,
            obstacle_fill: 0x164E63,
            obstacle_edge: 0x22D3EE,
        },
        scroll_speed: 4.2,
        spawn_period: 90,
        gap: 180.0,
        obstacle_width: 60.0,
        moving_ratio: 0.45,
        boss: BossConfig {
            name: "Stalker",
            color: 0x22D3EE,
            max_health: 50.0,
            behavior: BossBehavior::Tracking,
            shot: EnemyShot::Beam,
            fire_period: 100,
            enraged_fire_period: 100,
            size: 110.0,
        },
    },
    LevelConfig {
        id: 3,
        theme: Theme {
            name: "Ember Shoals",
            background: 0x1C0F02,
            obstacle_fill: 0x78350F,
            obstacle_edge: 0xF59E0B,
        },
        scroll_speed: 4.4,
        spawn_period: 88,
        gap: 178.0,
        obstacle_width: 62.0,
        moving_ratio: 0.45,
        boss: BossConfig {
            name: "Cinder Wyrm",
            color: 0xF97316,
            max_health: 60.0,
            behavior: BossBehavior::SineWave,
            shot: EnemyShot::Beam,
            fire_period: 95,
            enraged_fire_period: 95,
            size: 115.0,
        },
    },
    LevelConfig {
        id: 4,
        theme: Theme {
            name: "Static Rift",
            background: 0x0B0F1E,
            obstacle_fill: 0x312E81,
            obstacle_edge: 0xA855F7,
        },
        scroll_speed: 4.6,
        spawn_period: 85,
        gap: 175.0,
        obstacle_width: 64.0,
        moving_ratio: 0.5,
        boss: BossConfig {
            name: "Overseer",
            color: 0xA855F7,
            max_health: 70.0,
            behavior: BossBehavior::Tracking,
            shot: EnemyShot::Spread,
            fire_period: 90,
            enraged_fire_period: 90,
            size: 115.0,
        },
    },
    LevelConfig {
        id: 5,
        theme: Theme {
            name: "The Core",
            background: 0x1A0505,
            obstacle_fill: 0x7F1D1D,
            obstacle_edge: 0xEF4444,
        },
        scroll_speed: 3.5,
        spawn_period: 100,
        gap: 190.0,
        obstacle_width: 60.0,
        moving_ratio: 0.5,
        boss: BossConfig {
            name: "Gemini Core",
            color: 0x991B1B,
            max_health: 240.0,
            behavior: BossBehavior::Phased,
            shot: EnemyShot::Straight,
            fire_period: 120,
            enraged_fire_period: 40,
            size: 120.0,
        },
    },
];

/// Number of levels in a run
pub fn level_count() -> usize {
    LEVELS.len()
}

/// Clamp a requested level index into the catalog
pub fn clamp_index(index: usize) -> usize {
    let last = final_index();
    if index > last {
        log::warn!("Level index {} out of range, using {}", index, last);
        last
    } else {
        index
    }
}

/// Look up a level, clamping out-of-range indices to the final level
pub fn level(index: usize) -> &'static LevelConfig {
    &LEVELS[clamp_index(index)]
}

/// Index of the final level
pub fn final_index() -> usize {
    LEVELS.len() - 1
}

/// Whether `index` is the last level (boss defeat ends the run)
pub fn is_final(index: usize) -> bool {
    index + 1 >= LEVELS.len()
}

/// Level list for a selection screen
pub fn catalog() -> Vec<LevelSummary> {
    LEVELS
        .iter()
        .map(|l| LevelSummary {
            id: l.id,
            name: l.theme.name,
            boss_name: l.boss.name,
            boss_color: l.boss.color,
        })
        .collect()
}
