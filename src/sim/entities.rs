//! Game entities: player, bullets, monsters, coins, particles
//!
//! Movement is frame-scaled: `position += velocity` once per update, with
//! `dt` (ms) only feeding timers and animation phases.

use glam::Vec2;
use rand::Rng;

use crate::assets::SpriteId;
use crate::config::{BulletConfig, CoinConfig, MonsterConfig, PlayerConfig};
use crate::render::Surface;
use crate::sim::input::{InputState, Key};
use crate::vec_from_angle;

/// Blink window while invincible; the player is hidden on even windows
const BLINK_PERIOD_MS: f32 = 100.0;

const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.3)";
const COIN_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.2)";
const BULLET_COLOR: &str = "#ffeb3b";
const BULLET_GLOW_COLOR: &str = "rgba(255, 235, 59, 0.3)";
const BULLET_RIM_COLOR: &str = "#fdd835";

/// The player avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub size: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub aim_angle: f32,
    pub invincible: bool,
    invincibility_timer: f32,
    invincibility_ms: f32,
    blink_timer: f32,
    last_shoot_time: f64,
    shoot_cooldown_ms: f64,
    idle_damping: f32,
    color: &'static str,
    arrow_color: &'static str,
    sprite: Option<SpriteId>,
}

impl Player {
    pub fn new(x: f32, y: f32, config: &PlayerConfig) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius: config.size / 2.0,
            size: config.size,
            speed: config.speed,
            health: config.max_health,
            max_health: config.max_health,
            aim_angle: 0.0,
            invincible: false,
            invincibility_timer: 0.0,
            invincibility_ms: config.invincibility_ms,
            blink_timer: 0.0,
            // One cooldown in the past, so the first trigger pull fires.
            last_shoot_time: -config.shoot_cooldown_ms,
            shoot_cooldown_ms: config.shoot_cooldown_ms,
            idle_damping: config.idle_damping,
            color: config.color,
            arrow_color: "#ff6b6b",
            sprite: None,
        }
    }

    pub fn set_sprite(&mut self, sprite: SpriteId) {
        self.sprite = Some(sprite);
    }

    pub fn update(&mut self, dt: f32, input: &InputState) {
        self.handle_movement(input);

        if let Some(pointer) = input.pointer() {
            self.aim_angle = crate::angle_between(self.position, pointer);
        }

        self.position += self.velocity;

        if self.invincible {
            self.invincibility_timer -= dt;
            self.blink_timer += dt;

            if self.invincibility_timer <= 0.0 {
                self.invincible = false;
                self.blink_timer = 0.0;
            }
        }
    }

    fn handle_movement(&mut self, input: &InputState) {
        let mut direction = Vec2::ZERO;

        if input.is_pressed(Key::Up) {
            direction.y -= 1.0;
        }
        if input.is_pressed(Key::Down) {
            direction.y += 1.0;
        }
        if input.is_pressed(Key::Left) {
            direction.x -= 1.0;
        }
        if input.is_pressed(Key::Right) {
            direction.x += 1.0;
        }

        if direction != Vec2::ZERO {
            self.velocity = direction.normalize_or_zero() * self.speed;
        } else {
            self.velocity *= self.idle_damping;
        }
    }

    pub fn can_shoot(&self, now_ms: f64) -> bool {
        now_ms - self.last_shoot_time >= self.shoot_cooldown_ms
    }

    /// Claim a shot. Returns whether the cooldown allowed it and, if so,
    /// restarts the cooldown.
    pub fn shoot(&mut self, now_ms: f64) -> bool {
        if self.can_shoot(now_ms) {
            self.last_shoot_time = now_ms;
            true
        } else {
            false
        }
    }

    /// The only way health decreases. Refused while invincible or already
    /// at zero; success grants the invincibility window.
    pub fn take_damage(&mut self) -> bool {
        if !self.invincible && self.health > 0 {
            self.health -= 1;
            self.invincible = true;
            self.invincibility_timer = self.invincibility_ms;
            true
        } else {
            false
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        // Invincibility blink: hidden on even 100ms windows.
        if self.invincible && (self.blink_timer / BLINK_PERIOD_MS).floor() as i64 % 2 == 0 {
            return;
        }

        match self.sprite {
            Some(sprite) => surface.draw_sprite(
                sprite,
                self.position.x,
                self.position.y,
                self.size,
                self.size,
                0.0,
            ),
            None => surface.fill_circle(self.position.x, self.position.y, self.radius, self.color),
        }

        surface.draw_arrow(
            self.position.x,
            self.position.y,
            self.aim_angle,
            self.radius + 20.0,
            self.arrow_color,
        );
    }

    pub fn reset(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
        self.velocity = Vec2::ZERO;
        self.health = self.max_health;
        self.invincible = false;
        self.invincibility_timer = 0.0;
        self.blink_timer = 0.0;
        self.last_shoot_time = -self.shoot_cooldown_ms;
    }
}

/// A player bullet, velocity fixed at spawn
#[derive(Debug, Clone)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub active: bool,
    age: f32,
    lifetime_ms: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, angle: f32, config: &BulletConfig) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: vec_from_angle(angle, config.speed),
            radius: config.size / 2.0,
            active: true,
            age: 0.0,
            lifetime_ms: config.lifetime_ms,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity;
        self.age += dt;

        if self.age >= self.lifetime_ms {
            self.active = false;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.active {
            return;
        }

        let (x, y) = (self.position.x, self.position.y);
        surface.fill_circle(x, y, self.radius * 2.0, BULLET_GLOW_COLOR);
        surface.fill_circle(x, y, self.radius, BULLET_COLOR);
        surface.stroke_circle(x, y, self.radius, BULLET_RIM_COLOR, 1.0);
        surface.fill_circle(x, y, self.radius * 0.5, "#ffffff");
    }
}

/// A monster drifting across the field on a constant velocity
#[derive(Debug, Clone)]
pub struct Monster {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub size: f32,
    pub active: bool,
    pub variant: u8,
    rotation_angle: f32,
    rotation_speed: f32,
    wobble_offset: f32,
    wobble_speed: f32,
    color: &'static str,
    sprite: Option<SpriteId>,
}

impl Monster {
    pub fn new<R: Rng>(
        position: Vec2,
        direction: Vec2,
        speed: f32,
        variant: u8,
        config: &MonsterConfig,
        rng: &mut R,
    ) -> Self {
        Self {
            position,
            velocity: direction.normalize_or_zero() * speed,
            radius: config.size / 2.0,
            size: config.size,
            active: true,
            variant,
            rotation_angle: 0.0,
            rotation_speed: rng.random_range(-0.05..0.05),
            wobble_offset: 0.0,
            wobble_speed: rng.random_range(0.05..0.1),
            color: config.color,
            sprite: None,
        }
    }

    pub fn set_sprite(&mut self, sprite: SpriteId) {
        self.sprite = Some(sprite);
    }

    pub fn update(&mut self, _dt: f32) {
        self.position += self.velocity;
        self.rotation_angle += self.rotation_speed;
        self.wobble_offset += self.wobble_speed;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.active {
            return;
        }

        surface.fill_circle(
            self.position.x + 3.0,
            self.position.y + 3.0,
            self.radius,
            SHADOW_COLOR,
        );

        let wobble = self.wobble_offset.sin() * 2.0;
        match self.sprite {
            Some(sprite) => surface.draw_sprite(
                sprite,
                self.position.x,
                self.position.y + wobble,
                self.size,
                self.size,
                self.rotation_angle,
            ),
            None => surface.fill_circle(
                self.position.x,
                self.position.y + wobble,
                self.radius,
                self.color,
            ),
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone)]
pub struct Coin {
    pub position: Vec2,
    pub radius: f32,
    pub size: f32,
    pub active: bool,
    /// Spin phase, advanced by updates; front ends may key sprite frames off it
    pub animation_time: f32,
    points: u32,
    animation_speed: f32,
    color: &'static str,
    sprite: Option<SpriteId>,
}

impl Coin {
    pub fn new(position: Vec2, config: &CoinConfig) -> Self {
        Self {
            position,
            radius: config.size / 2.0,
            size: config.size,
            active: true,
            animation_time: 0.0,
            points: config.points,
            animation_speed: config.animation_speed,
            color: config.color,
            sprite: None,
        }
    }

    pub fn set_sprite(&mut self, sprite: SpriteId) {
        self.sprite = Some(sprite);
    }

    pub fn update(&mut self, dt: f32) {
        self.animation_time += dt * self.animation_speed;
    }

    /// Deactivate and yield the score value
    pub fn collect(&mut self) -> u32 {
        self.active = false;
        self.points
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.active {
            return;
        }

        surface.fill_circle(
            self.position.x,
            self.position.y + 5.0,
            self.radius * 0.8,
            COIN_SHADOW_COLOR,
        );

        match self.sprite {
            Some(sprite) => surface.draw_sprite(
                sprite,
                self.position.x,
                self.position.y,
                self.size,
                self.size,
                0.0,
            ),
            None => {
                surface.fill_circle(self.position.x, self.position.y, self.radius, self.color);
                surface.stroke_circle(self.position.x, self.position.y, self.radius, "#b8860b", 2.0);
            }
        }
    }
}

/// A short-lived explosion fragment
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: &'static str,
    pub alpha: f32,
    pub lifetime_ms: f32,
    pub age: f32,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity;
        self.age += dt;
        self.alpha = 1.0 - self.age / self.lifetime_ms;
        self.size *= 0.98;
    }

    /// Kept until it burns out or shrinks away
    pub fn alive(&self) -> bool {
        self.age < self.lifetime_ms && self.size >= 0.5
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.draw_particle(self.position.x, self.position.y, self.size, self.color, self.alpha);
    }
}
