//! Entity population management
//!
//! The spawn manager is the sole owner of bullets, monsters, coins, and
//! particles. Spawning is timer-driven and capped; all randomness flows
//! through its own seeded RNG so a seed fully determines the population.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::{SpriteCatalog, SpriteId};
use crate::config::{BulletConfig, CoinConfig, Difficulty, DifficultyProfile, GameConfig, MonsterConfig};
use crate::render::Surface;
use crate::sim::entities::{Bullet, Coin, Monster, Particle};
use crate::sim::physics::Physics;
use crate::vec_from_angle;

/// Owns and advances the entity populations
pub struct SpawnManager {
    pub bullets: Vec<Bullet>,
    pub monsters: Vec<Monster>,
    pub coins: Vec<Coin>,
    pub particles: Vec<Particle>,

    monster_spawn_timer: f32,
    coin_spawn_timer: f32,

    difficulty: Difficulty,
    profile: DifficultyProfile,

    monster_config: MonsterConfig,
    coin_config: CoinConfig,
    bullet_config: BulletConfig,

    catalog: SpriteCatalog,
    rng: Pcg32,
}

impl SpawnManager {
    pub fn new(config: &GameConfig, catalog: SpriteCatalog, seed: u64) -> Self {
        let difficulty = Difficulty::default();
        Self {
            bullets: Vec::new(),
            monsters: Vec::new(),
            coins: Vec::new(),
            particles: Vec::new(),
            monster_spawn_timer: 0.0,
            coin_spawn_timer: 0.0,
            difficulty,
            profile: difficulty.profile(),
            monster_config: config.monster,
            coin_config: config.coin,
            bullet_config: config.bullet,
            catalog,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Switch the monster pressure profile. Unknown names are ignored.
    /// Monsters already in flight keep their velocities.
    pub fn set_difficulty(&mut self, name: &str) {
        if let Some(difficulty) = Difficulty::from_name(name) {
            self.difficulty = difficulty;
            self.profile = difficulty.profile();
        }
    }

    pub fn update(&mut self, dt: f32, physics: &Physics) {
        self.monster_spawn_timer += dt;
        if self.monster_spawn_timer >= self.profile.spawn_interval_ms
            && self.monsters.len() < self.profile.max_monsters
        {
            self.spawn_monster(physics);
            self.monster_spawn_timer = 0.0;
        }

        self.coin_spawn_timer += dt;
        if self.coin_spawn_timer >= self.coin_config.spawn_interval_ms
            && self.coins.len() < self.coin_config.max_coins
        {
            self.spawn_coin(physics);
            self.coin_spawn_timer = 0.0;
        }

        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        for monster in &mut self.monsters {
            monster.update(dt);
        }
        for coin in &mut self.coins {
            coin.update(dt);
        }

        self.update_particles(dt);

        self.cleanup(physics);
    }

    pub fn spawn_bullet(&mut self, x: f32, y: f32, angle: f32) {
        self.bullets.push(Bullet::new(x, y, angle, &self.bullet_config));
    }

    pub fn spawn_monster(&mut self, physics: &Physics) {
        let spawn = physics.random_wall_spawn(&mut self.rng, self.monster_config.spawn_offset);
        let base_speed = self
            .rng
            .random_range(self.monster_config.min_speed..self.monster_config.max_speed);
        let speed = base_speed * self.profile.speed_multiplier;
        let variant: u8 = self.rng.random_range(1..=3);

        let mut monster = Monster::new(
            spawn.position,
            spawn.direction,
            speed,
            variant,
            &self.monster_config,
            &mut self.rng,
        );

        let sprite = SpriteId::monster(variant);
        if self.catalog.has(sprite) {
            monster.set_sprite(sprite);
        }

        self.monsters.push(monster);
    }

    pub fn spawn_coin(&mut self, physics: &Physics) {
        let position = physics.random_position(&mut self.rng, self.coin_config.spawn_margin);
        let mut coin = Coin::new(position, &self.coin_config);

        if self.catalog.has(SpriteId::Coin) {
            coin.set_sprite(SpriteId::Coin);
        }

        self.coins.push(coin);
    }

    /// Radial particle burst: `count` fragments fanned uniformly around a
    /// full turn, each with random speed, size, and lifetime.
    pub fn create_explosion(&mut self, x: f32, y: f32, color: &'static str, count: usize) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = self.rng.random_range(1.0..3.0);
            self.particles.push(Particle {
                position: Vec2::new(x, y),
                velocity: vec_from_angle(angle, speed),
                size: self.rng.random_range(2.0..5.0),
                color,
                alpha: 1.0,
                lifetime_ms: self.rng.random_range(300.0..600.0),
                age: 0.0,
            });
        }
    }

    fn update_particles(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(Particle::alive);
    }

    /// Drop spent entities. Monsters more than the despawn margin outside
    /// the field are garbage-collected, not killed: no score, no explosion.
    fn cleanup(&mut self, physics: &Physics) {
        self.bullets.retain(|b| b.active);
        self.monsters.retain(|m| m.active);
        let margin = self.monster_config.despawn_margin;
        self.monsters
            .retain(|m| !physics.is_out_of_bounds(m.position, margin));
        self.coins.retain(|c| c.active);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for particle in &self.particles {
            particle.render(surface);
        }
        for coin in &self.coins {
            coin.render(surface);
        }
        for monster in &self.monsters {
            monster.render(surface);
        }
        for bullet in &self.bullets {
            bullet.render(surface);
        }
    }

    pub fn reset(&mut self) {
        self.bullets.clear();
        self.monsters.clear();
        self.coins.clear();
        self.particles.clear();
        self.monster_spawn_timer = 0.0;
        self.coin_spawn_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> (SpawnManager, Physics) {
        let config = GameConfig::default();
        (
            SpawnManager::new(&config, SpriteCatalog::new(), 42),
            Physics::new(config.field.width, config.field.height),
        )
    }

    #[test]
    fn monsters_spawn_on_interval() {
        let (mut spawn, physics) = manager();

        // Normal difficulty spawns every 600ms.
        spawn.update(599.0, &physics);
        assert!(spawn.monsters.is_empty());

        spawn.update(1.0, &physics);
        assert_eq!(spawn.monsters.len(), 1);

        // Timer resets after a spawn.
        spawn.update(599.0, &physics);
        assert_eq!(spawn.monsters.len(), 1);
    }

    #[test]
    fn monster_population_is_capped() {
        let (mut spawn, physics) = manager();
        spawn.set_difficulty("easy");

        let cap = Difficulty::Easy.profile().max_monsters;
        for _ in 0..cap {
            spawn.spawn_monster(&physics);
        }

        // Timer is far past the interval but the cap blocks the spawn.
        spawn.update(10_000.0, &physics);
        assert_eq!(spawn.monsters.len(), cap);
    }

    #[test]
    fn coin_population_is_capped_at_five() {
        let (mut spawn, physics) = manager();

        for _ in 0..10 {
            // Each 5000ms step can spawn at most one coin.
            spawn.update(5000.0, &physics);
        }
        assert_eq!(spawn.coins.len(), 5);
    }

    #[test]
    fn coins_spawn_inside_the_margin() {
        let (mut spawn, physics) = manager();
        for _ in 0..50 {
            spawn.spawn_coin(&physics);
        }
        for coin in &spawn.coins {
            assert!(coin.position.x >= 50.0 && coin.position.x <= 550.0);
            assert!(coin.position.y >= 50.0 && coin.position.y <= 550.0);
        }
    }

    #[test]
    fn unknown_difficulty_is_ignored() {
        let (mut spawn, _) = manager();
        spawn.set_difficulty("hard");
        assert_eq!(spawn.difficulty(), Difficulty::Hard);

        spawn.set_difficulty("impossible");
        assert_eq!(spawn.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn difficulty_change_does_not_touch_existing_monsters() {
        let (mut spawn, physics) = manager();
        spawn.set_difficulty("easy");
        spawn.spawn_monster(&physics);
        let before = spawn.monsters[0].velocity;

        spawn.set_difficulty("hard");
        assert_eq!(spawn.monsters[0].velocity, before);
    }

    #[test]
    fn difficulty_switch_shapes_new_monsters() {
        let (mut spawn, physics) = manager();
        spawn.set_difficulty("hard");

        // Base speed 1.5..3.0 times the hard multiplier of 4.0.
        spawn.spawn_monster(&physics);
        let speed = spawn.monsters[0].velocity.length();
        assert!(speed >= 6.0 - 1e-4 && speed < 12.0);

        // Hard cadence: a spawn every 400ms.
        spawn.update(399.0, &physics);
        assert_eq!(spawn.monsters.len(), 1);
        spawn.update(1.0, &physics);
        assert_eq!(spawn.monsters.len(), 2);
    }

    #[test]
    fn explosion_fans_particles_around_a_full_turn() {
        let (mut spawn, _) = manager();
        spawn.create_explosion(100.0, 100.0, "#ff6b6b", 12);

        assert_eq!(spawn.particles.len(), 12);
        for (i, particle) in spawn.particles.iter().enumerate() {
            let angle = TAU * i as f32 / 12.0;
            let speed = particle.velocity.length();
            assert!((1.0..3.0).contains(&speed));
            assert!((particle.velocity.x - angle.cos() * speed).abs() < 1e-4);
            assert!((2.0..5.0).contains(&particle.size));
            assert!((300.0..600.0).contains(&particle.lifetime_ms));
        }
    }

    #[test]
    fn particles_are_dropped_when_spent() {
        let (mut spawn, physics) = manager();
        spawn.create_explosion(100.0, 100.0, "#ffd700", 8);

        // Max lifetime is under 600ms.
        for _ in 0..40 {
            spawn.update(16.0, &physics);
        }
        assert!(spawn.particles.is_empty());
    }

    #[test]
    fn escaped_monsters_are_garbage_collected() {
        let (mut spawn, physics) = manager();
        spawn.spawn_monster(&physics);

        // Walk the monster far out of bounds.
        spawn.monsters[0].position = Vec2::new(-51.0, 300.0);
        spawn.update(0.0, &physics);

        assert!(spawn.monsters.is_empty());
    }

    #[test]
    fn inactive_entities_are_unreachable_after_cleanup() {
        let (mut spawn, physics) = manager();
        spawn.spawn_bullet(300.0, 300.0, 0.0);
        spawn.spawn_coin(&physics);

        spawn.bullets[0].deactivate();
        spawn.coins[0].collect();
        spawn.update(0.0, &physics);

        assert!(spawn.bullets.is_empty());
        assert!(spawn.coins.is_empty());
    }

    #[test]
    fn reset_clears_populations_and_timers() {
        let (mut spawn, physics) = manager();
        spawn.update(600.0, &physics);
        spawn.spawn_bullet(10.0, 10.0, 0.0);
        spawn.create_explosion(10.0, 10.0, "#e74c3c", 4);

        spawn.reset();

        assert!(spawn.bullets.is_empty());
        assert!(spawn.monsters.is_empty());
        assert!(spawn.coins.is_empty());
        assert!(spawn.particles.is_empty());

        // Timers start from zero again.
        spawn.update(599.0, &physics);
        assert!(spawn.monsters.is_empty());
    }

    #[test]
    fn same_seed_spawns_identical_monsters() {
        let config = GameConfig::default();
        let physics = Physics::new(600.0, 600.0);
        let mut a = SpawnManager::new(&config, SpriteCatalog::new(), 7);
        let mut b = SpawnManager::new(&config, SpriteCatalog::new(), 7);

        for _ in 0..5 {
            a.spawn_monster(&physics);
            b.spawn_monster(&physics);
        }
        for (ma, mb) in a.monsters.iter().zip(&b.monsters) {
            assert_eq!(ma.position, mb.position);
            assert_eq!(ma.velocity, mb.velocity);
            assert_eq!(ma.variant, mb.variant);
        }
    }
}
