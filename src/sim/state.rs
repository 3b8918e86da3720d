//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; the render consumer
//! only ever sees it by shared reference.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::levels::{self, BossBehavior, BossConfig, LevelConfig};
use crate::consts::*;

/// Gameplay colors (0xRRGGBB), shared by particles and the renderer
pub mod palette {
    pub const SUCCESS: u32 = 0x10B981;
    pub const DANGER: u32 = 0xEF4444;
    pub const NEUTRAL: u32 = 0xFFFFFF;
    pub const SHIELD: u32 = 0x06B6D4;
    pub const AMMO: u32 = 0xF59E0B;
    pub const SPLIT: u32 = 0xA855F7;
    pub const LASER: u32 = 0x22D3EE;
    pub const BOOMERANG: u32 = 0x84CC16;
    pub const ENEMY_BOLT: u32 = 0xDC2626;
    pub const LETTER_NEEDED: u32 = 0x10B981;
    pub const LETTER_SPARE: u32 = 0x475569;
    pub const PLAYER: u32 = 0xFBBF24;
    pub const PLAYER_BOSS_FIGHT: u32 = 0xFCA5A5;
    pub const MOVING_OBSTACLE: u32 = 0xF59E0B;
}

/// Overall run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the first jump
    Idle,
    /// Active gameplay
    Playing,
    /// Lives ran out
    GameOver,
    /// Final boss defeated
    Victory,
}

impl RunPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::GameOver | RunPhase::Victory)
    }
}

/// Sub-phase within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Gathering the target word's letters
    Collecting,
    /// Fighting the level boss
    BossFight,
}

/// The bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// x is fixed, y is free
    pub pos: Vec2,
    /// Vertical velocity (px/tick, positive is down)
    pub velocity: f32,
    pub radius: f32,
    /// Visual tilt derived from velocity
    pub rotation: f32,
    pub shield: bool,
    /// Ticks of invulnerability remaining
    pub invuln_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_START_Y),
            velocity: 0.0,
            radius: PLAYER_RADIUS,
            rotation: 0.0,
            shield: false,
            invuln_ticks: 0,
        }
    }
}

impl Player {
    pub fn jump(&mut self) {
        self.velocity = JUMP_IMPULSE;
    }

    /// Apply gravity and move
    pub fn integrate(&mut self) {
        use std::f32::consts::FRAC_PI_4;
        self.velocity += GRAVITY;
        self.pos.y += self.velocity;
        self.rotation = (self.velocity * ROTATION_FACTOR).clamp(-FRAC_PI_4, FRAC_PI_4);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }
}

/// A scrolling pair of columns with a gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    /// Height of the top column (gap starts here)
    pub gap_top: f32,
    /// Gap height at spawn, center of the oscillation
    pub base_gap_top: f32,
    pub gap: f32,
    pub width: f32,
    pub moving: bool,
    pub move_phase: f32,
}

impl Obstacle {
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }

    /// Advance the gap oscillation, keeping it inside the playfield
    pub fn oscillate(&mut self, screen_height: f32) {
        if !self.moving {
            return;
        }
        self.move_phase += OBSTACLE_MOVE_SPEED;
        let delta = self.move_phase.sin() * OBSTACLE_MOVE_AMPLITUDE;
        let max_top = (screen_height - self.gap - GAP_CLAMP_MARGIN).max(GAP_CLAMP_MARGIN);
        self.gap_top = (self.base_gap_top + delta).clamp(GAP_CLAMP_MARGIN, max_top);
    }
}

/// A floating letter of the target word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Letter {
    pub id: u32,
    pub pos: Vec2,
    pub ch: char,
    pub collected: bool,
    pub bob_phase: f32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Ammo,
    Split,
    Laser,
    Boomerang,
}

impl PowerUpKind {
    pub fn is_weapon(self) -> bool {
        !matches!(self, PowerUpKind::Shield)
    }

    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::Shield => palette::SHIELD,
            PowerUpKind::Ammo => palette::AMMO,
            PowerUpKind::Split => palette::SPLIT,
            PowerUpKind::Laser => palette::LASER,
            PowerUpKind::Boomerang => palette::BOOMERANG,
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
    pub bob_phase: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub color: u32,
}

/// Background parallax star (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub brightness: f32,
}

/// The level boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub size: f32,
    pub health: f32,
    pub max_health: f32,
    pub osc_phase: f32,
    /// Ticks of hit flash remaining
    pub hit_flash: u32,
    pub attack_timer: u32,
    /// 1, 2 or 3
    pub phase: u8,
    /// Still sliding in from the right edge
    pub entering: bool,
    /// Height the static hover is centered on
    pub home_y: f32,
}

impl Boss {
    pub fn new(cfg: &BossConfig, screen_width: f32, screen_height: f32) -> Self {
        Self {
            pos: Vec2::new(screen_width + cfg.size / 2.0, screen_height / 2.0),
            size: cfg.size,
            health: cfg.max_health,
            max_health: cfg.max_health,
            osc_phase: 0.0,
            hit_flash: 0,
            attack_timer: 0,
            phase: 1,
            entering: true,
            home_y: screen_height / 2.0,
        }
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).max(0.0)
        } else {
            0.0
        }
    }

    /// Phase derived from the health ratio; non-phased archetypes stay at 1
    pub fn compute_phase(&self, behavior: BossBehavior) -> u8 {
        if !behavior.has_phases() {
            return 1;
        }
        let ratio = self.health_ratio();
        if ratio <= 0.25 {
            3
        } else if ratio <= 0.5 {
            2
        } else {
            1
        }
    }

    /// Lower health only, never raise it
    pub fn take_damage(&mut self, amount: f32, flash: u32) {
        self.health = (self.health - amount.max(0.0)).max(0.0);
        self.hit_flash = self.hit_flash.max(flash);
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }
}

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Standard,
    Split,
    Laser,
    Boomerang,
    EnemyBolt,
}

impl ProjectileKind {
    pub fn is_enemy(self) -> bool {
        matches!(self, ProjectileKind::EnemyBolt)
    }

    pub fn color(self) -> u32 {
        match self {
            ProjectileKind::Standard => palette::AMMO,
            ProjectileKind::Split => palette::SPLIT,
            ProjectileKind::Laser => palette::LASER,
            ProjectileKind::Boomerang => palette::BOOMERANG,
            ProjectileKind::EnemyBolt => palette::ENEMY_BOLT,
        }
    }
}

/// Boomerang flight state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnState {
    Out,
    Return,
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ProjectileKind,
    pub damage: f32,
    pub active: bool,
    /// Boomerangs only
    pub return_state: Option<ReturnState>,
    /// x the projectile was fired from (boomerang range)
    pub launch_x: f32,
    /// Ticks until a piercing projectile may hit again
    pub hit_cooldown: u32,
}

impl Projectile {
    pub fn new(id: u32, kind: ProjectileKind, pos: Vec2, vel: Vec2, damage: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            kind,
            damage,
            active: true,
            return_state: if kind == ProjectileKind::Boomerang {
                Some(ReturnState::Out)
            } else {
                None
            },
            launch_x: pos.x,
            hit_cooldown: 0,
        }
    }
}

/// Which slots of the target word are filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterMask {
    slots: Vec<bool>,
}

impl LetterMask {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![false; len],
        }
    }

    pub fn slots(&self) -> &[bool] {
        &self.slots
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|&&s| s).count()
    }

    pub fn is_complete(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(|&s| s)
    }

    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = false);
    }

    /// Indices of slots still waiting for a letter
    pub fn open_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| (!s).then_some(i))
            .collect()
    }

    /// Whether `ch` would fill some open slot of `word`
    pub fn needs(&self, word: &[char], ch: char) -> bool {
        self.first_open_for(word, ch).is_some()
    }

    fn first_open_for(&self, word: &[char], ch: char) -> Option<usize> {
        word.iter()
            .zip(&self.slots)
            .position(|(&c, &filled)| c == ch && !filled)
    }

    /// Fill the first open slot matching `ch`, returning its index
    pub fn fill(&mut self, word: &[char], ch: char) -> Option<usize> {
        let idx = self.first_open_for(word, ch)?;
        self.slots[idx] = true;
        Some(idx)
    }
}

/// Tunables the simulation reads every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub target_word: Vec<char>,
    /// Probability a letter spawn picks an unfilled slot
    pub letter_bias: f64,
    /// Probability a collecting-phase item spawn is a shield
    pub powerup_chance: f64,
    pub max_particles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            target_word: "GEMINI".chars().collect(),
            letter_bias: 0.6,
            powerup_chance: 0.3,
            max_particles: 512,
        }
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { level: usize },
    PlayerHit { lives: u8 },
    ShieldAbsorbed,
    LetterCollected { ch: char, slot: usize },
    LetterWasted { ch: char },
    WordCompleted,
    BossSpawned { level: usize },
    WeaponFired { kind: PowerUpKind },
    BossDefeated { level: usize },
    LevelAdvanced { level: usize },
    Victory,
    GameOver { level: usize },
}

/// Complete simulation context, owned by the tick driver
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub config: SimConfig,
    pub phase: RunPhase,
    pub stage: Stage,
    pub level_index: usize,
    /// Cached catalog entry for `level_index`
    #[serde(skip)]
    level: &'static LevelConfig,
    pub lives: u8,
    pub words_completed: u32,
    /// Monotonic while playing
    pub time_ticks: u64,
    /// Spawner-owned counter toward the next spawn cycle
    pub spawn_timer: u32,
    /// Ticks of warp transition remaining
    pub warp_ticks: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub letters: Vec<Letter>,
    pub powerups: Vec<PowerUp>,
    /// Oldest first
    pub particles: VecDeque<Particle>,
    pub stars: Vec<Star>,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    pub mask: LetterMask,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed at level 0
    pub fn new(seed: u64, config: SimConfig) -> Self {
        Self::new_at_level(seed, config, 0)
    }

    /// Create a new game state starting at `level_index` (clamped)
    pub fn new_at_level(seed: u64, config: SimConfig, level_index: usize) -> Self {
        let level_index = levels::clamp_index(level_index);
        let mask = LetterMask::new(config.target_word.len());
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            phase: RunPhase::Idle,
            stage: Stage::Collecting,
            level_index,
            level: levels::level(level_index),
            lives: START_LIVES,
            words_completed: 0,
            time_ticks: 0,
            spawn_timer: 0,
            warp_ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            letters: Vec::new(),
            powerups: Vec::new(),
            particles: VecDeque::new(),
            stars: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            mask,
            events: Vec::new(),
            next_id: 1,
        };
        state.init_stars();
        state
    }

    /// Active level configuration
    pub fn level(&self) -> &'static LevelConfig {
        self.level
    }

    /// Re-derive the cached level entry from `level_index`
    pub fn refresh_level(&mut self) {
        self.level_index = levels::clamp_index(self.level_index);
        self.level = levels::level(self.level_index);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Scatter the fixed background starfield
    pub fn init_stars(&mut self) {
        let (w, h) = (self.config.width, self.config.height);
        self.stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(self.rng.random::<f32>() * w, self.rng.random::<f32>() * h),
                size: self.rng.random::<f32>() * 2.0 + 1.0,
                speed: self.rng.random::<f32>() * 3.0 + 0.5,
                brightness: self.rng.random::<f32>(),
            })
            .collect();
    }

    /// Emit a burst of `count` particles
    pub fn spawn_burst(&mut self, pos: Vec2, color: u32, count: usize) {
        let cap = self.config.max_particles;
        if cap == 0 {
            return;
        }
        for _ in 0..count {
            if self.particles.len() >= cap {
                self.particles.pop_front();
            }
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * BURST_SPEED,
                (self.rng.random::<f32>() - 0.5) * BURST_SPEED,
            );
            let life = self.rng.random_range(30..50);
            self.particles.push_back(Particle {
                pos,
                vel,
                life,
                color,
            });
        }
    }

    /// Drop every scrolling or in-flight entity
    pub fn clear_transient(&mut self) {
        self.obstacles.clear();
        self.letters.clear();
        self.powerups.clear();
        self.projectiles.clear();
    }

    /// Restart the run at the current level
    pub fn restart(&mut self) {
        self.phase = RunPhase::Idle;
        self.stage = Stage::Collecting;
        self.refresh_level();
        self.lives = START_LIVES;
        self.words_completed = 0;
        self.time_ticks = 0;
        self.spawn_timer = 0;
        self.warp_ticks = 0;
        self.player = Player::default();
        self.boss = None;
        self.clear_transient();
        self.particles.clear();
        self.mask.reset();
        self.events.clear();
        self.init_stars();
        log::info!("Run reset at level {}", self.level_index + 1);
    }

    /// Boss phase as of the current health, without waiting for the AI step
    pub fn boss_phase(&self) -> u8 {
        self.boss
            .as_ref()
            .map(|b| b.compute_phase(self.level.boss.behavior))
            .unwrap_or(1)
    }

    /// Whether a phased boss is in its most aggressive phase
    pub fn boss_enraged(&self) -> bool {
        self.level.boss.behavior.has_phases() && self.boss_phase() >= 3
    }

    /// Horizontal scroll speed for obstacles and items
    pub fn scroll_speed(&self) -> f32 {
        let base = self.level.scroll_speed;
        match self.stage {
            Stage::Collecting => base,
            Stage::BossFight => base * 1.2 + if self.boss_enraged() { 2.0 } else { 0.0 },
        }
    }

    /// Boss health in percent for the HUD (100 outside boss fights)
    pub fn boss_health_percent(&self) -> f32 {
        self.boss
            .as_ref()
            .map(|b| b.health_ratio() * 100.0)
            .unwrap_or(100.0)
    }
}
