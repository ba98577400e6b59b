//! Game loop state: phases, score, collision resolution, rendering
//!
//! `Game` is headless. Sound and any other platform side effects are emitted
//! as [`GameEvent`]s for the application layer to drain each frame.

use glam::Vec2;

use crate::assets::{SpriteCatalog, SpriteId};
use crate::config::GameConfig;
use crate::render::{Surface, TextAlign};
use crate::sim::entities::Player;
use crate::sim::input::{InputState, Key};
use crate::sim::physics::Physics;
use crate::sim::spawn::SpawnManager;

/// Background music selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Main,
    GameOver,
}

/// Simulation side effects for the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    PlayerHit,
    MonsterKilled,
    CoinCollected { points: u32 },
    GameOver,
    Music(MusicTrack),
}

/// Derived lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// The whole game: player, populations, score, and lifecycle flags
pub struct Game {
    pub config: GameConfig,
    pub player: Player,
    pub spawn: SpawnManager,
    pub input: InputState,
    pub score: u32,

    physics: Physics,
    running: bool,
    paused: bool,
    game_over: bool,

    /// Accumulated game time in ms, drives the shoot cooldown
    time_ms: f64,

    fps_timer: f32,
    frame_count: u32,
    current_fps: u32,

    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig, catalog: SpriteCatalog, seed: u64) -> Self {
        let mut player = Player::new(
            config.field.width / 2.0,
            config.field.height / 2.0,
            &config.player,
        );
        if catalog.has(SpriteId::Player) {
            player.set_sprite(SpriteId::Player);
        }

        Self {
            physics: Physics::new(config.field.width, config.field.height),
            player,
            spawn: SpawnManager::new(&config, catalog, seed),
            input: InputState::new(),
            score: 0,
            running: false,
            paused: false,
            game_over: false,
            time_ms: 0.0,
            fps_timer: 0.0,
            frame_count: 0,
            current_fps: 0,
            events: Vec::new(),
            config,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if !self.running {
            GamePhase::NotStarted
        } else if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_fps(&self) -> u32 {
        self.current_fps
    }

    /// Begin play. Calling again while running does nothing.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.events.push(GameEvent::Music(MusicTrack::Main));
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Toggle pause. Rendering continues while paused.
    pub fn pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_difficulty(&mut self, name: &str) {
        self.spawn.set_difficulty(name);
    }

    /// Back to a fresh round. Main music restarts only when coming out of
    /// game over, so mid-round resets don't stutter the track.
    pub fn reset(&mut self) {
        let was_game_over = self.game_over;
        self.game_over = false;
        self.score = 0;

        self.player
            .reset(self.config.field.width / 2.0, self.config.field.height / 2.0);
        self.spawn.reset();
        self.input.reset();

        if was_game_over {
            self.events.push(GameEvent::Music(MusicTrack::Main));
        }
    }

    /// Per-frame entry point: FPS bookkeeping always, gameplay only while
    /// neither paused nor over. `dt` is wall-clock ms, unclamped.
    pub fn advance(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        self.fps_timer += dt;
        self.frame_count += 1;
        if self.fps_timer >= 1000.0 {
            self.current_fps = self.frame_count;
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }

        if !self.paused && !self.game_over {
            self.update(dt);
        } else if self.game_over && self.input.is_pressed(Key::Restart) {
            self.reset();
        }
    }

    /// One gameplay step
    pub fn update(&mut self, dt: f32) {
        self.time_ms += dt as f64;

        self.player.update(dt, &self.input);

        self.physics.constrain_to_bounds(
            &mut self.player.position,
            &mut self.player.velocity,
            self.player.radius,
            0.0,
        );

        if self.input.shoot_intent() && self.player.shoot(self.time_ms) {
            self.events.push(GameEvent::ShotFired);
            self.spawn.spawn_bullet(
                self.player.position.x,
                self.player.position.y,
                self.player.aim_angle,
            );
        }

        self.spawn.update(dt, &self.physics);

        self.resolve_collisions();

        if !self.player.is_alive() && !self.game_over {
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
            self.events.push(GameEvent::Music(MusicTrack::GameOver));
        }
    }

    fn resolve_collisions(&mut self) {
        let fx = self.config.fx;
        let mut explosions: Vec<(Vec2, &'static str, usize)> = Vec::new();

        // Player vs monsters. take_damage() is the gate: while invincible
        // the monsters pass straight through.
        for monster in &mut self.spawn.monsters {
            if Physics::circle_collision(
                self.player.position,
                self.player.radius,
                monster.position,
                monster.radius,
            ) && self.player.take_damage()
            {
                self.events.push(GameEvent::PlayerHit);
                monster.deactivate();
                explosions.push((monster.position, fx.player_hit_color, fx.player_hit_particles));
            }
        }

        // Bullets vs monsters, first match wins per bullet.
        for bullet in &mut self.spawn.bullets {
            for monster in &mut self.spawn.monsters {
                if Physics::circle_collision(
                    bullet.position,
                    bullet.radius,
                    monster.position,
                    monster.radius,
                ) {
                    bullet.deactivate();
                    monster.deactivate();
                    self.score += GameConfig::KILL_SCORE;
                    self.events.push(GameEvent::MonsterKilled);
                    explosions.push((
                        monster.position,
                        fx.monster_kill_color,
                        fx.monster_kill_particles,
                    ));
                    break;
                }
            }
        }

        // Player vs coins.
        for coin in &mut self.spawn.coins {
            if Physics::circle_collision(
                self.player.position,
                self.player.radius,
                coin.position,
                coin.radius,
            ) {
                let points = coin.collect();
                self.score += points;
                self.events.push(GameEvent::CoinCollected { points });
                explosions.push((coin.position, fx.coin_color, fx.coin_particles));
            }
        }

        for (position, color, count) in explosions {
            self.spawn.create_explosion(position.x, position.y, color, count);
        }
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(self.config.field.background_color);
        surface.draw_grid();

        self.spawn.render(surface);
        self.player.render(surface);

        self.render_hud(surface);

        if self.game_over {
            self.render_game_over(surface);
        }

        if self.paused && !self.game_over {
            surface.stroke_text(
                "PAUSED",
                self.config.field.width / 2.0,
                self.config.field.height / 2.0,
                "bold 48px Arial",
                "#4ecdc4",
                "#000000",
                TextAlign::Center,
            );
        }

        if self.config.ui.show_fps {
            surface.fill_text(
                &format!("FPS: {}", self.current_fps),
                10.0,
                self.config.field.height - 30.0,
                "14px monospace",
                "#4ecdc4",
                TextAlign::Left,
            );
        }
    }

    fn render_hud(&self, surface: &mut dyn Surface) {
        let ui = &self.config.ui;

        for i in 0..self.player.max_health {
            let x = ui.heart_margin + i as f32 * (ui.heart_size + ui.heart_spacing);
            surface.draw_heart(x, ui.heart_margin, ui.heart_size, i < self.player.health);
        }

        surface.stroke_text(
            &format!("Score: {}", self.score),
            self.config.field.width - ui.heart_margin,
            ui.heart_margin,
            ui.score_font,
            ui.score_color,
            "#000000",
            TextAlign::Right,
        );
    }

    fn render_game_over(&self, surface: &mut dyn Surface) {
        let (w, h) = (self.config.field.width, self.config.field.height);

        surface.fill_rect(0.0, 0.0, w, h, "rgba(0, 0, 0, 0.7)");

        surface.stroke_text(
            "DEFEAT",
            w / 2.0,
            h / 2.0 - 50.0,
            "bold 48px Arial",
            "#ff6b6b",
            "#000000",
            TextAlign::Center,
        );
        surface.stroke_text(
            &format!("Final score: {}", self.score),
            w / 2.0,
            h / 2.0 + 10.0,
            "24px Arial",
            "#ffffff",
            "#000000",
            TextAlign::Center,
        );
        surface.stroke_text(
            "Press R to restart",
            w / 2.0,
            h / 2.0 + 50.0,
            "18px Arial",
            "#4ecdc4",
            "#000000",
            TextAlign::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSurface;

    const DT: f32 = 16.0;

    fn game() -> Game {
        let mut game = Game::new(GameConfig::default(), SpriteCatalog::new(), 99);
        game.start();
        game.drain_events();
        game
    }

    /// Drop a motionless monster right on the player
    fn plant_monster(game: &mut Game) {
        game.spawn.spawn_monster(&Physics::new(600.0, 600.0));
        let last = game.spawn.monsters.len() - 1;
        game.spawn.monsters[last].position = game.player.position;
        game.spawn.monsters[last].velocity = Vec2::ZERO;
    }

    /// Advance until the invincibility window closes (or the run ends)
    fn ride_out_invincibility(game: &mut Game) {
        while game.player.invincible && game.phase() != GamePhase::GameOver {
            game.advance(DT);
        }
    }

    #[test]
    fn start_is_idempotent() {
        let mut game = Game::new(GameConfig::default(), SpriteCatalog::new(), 1);
        assert_eq!(game.phase(), GamePhase::NotStarted);

        game.start();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.drain_events(), vec![GameEvent::Music(MusicTrack::Main)]);

        game.start();
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn pause_freezes_gameplay() {
        let mut game = game();
        game.pause();
        assert_eq!(game.phase(), GamePhase::Paused);

        // Timer does not accumulate toward spawns while paused.
        for _ in 0..100 {
            game.advance(DT);
        }
        assert!(game.spawn.monsters.is_empty());

        game.pause();
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn shooting_respects_cooldown_and_spawns_bullets() {
        let mut game = game();
        game.input.press(Key::Fire);

        game.advance(DT);
        assert_eq!(game.spawn.bullets.len(), 1);
        assert!(game.drain_events().contains(&GameEvent::ShotFired));

        // 16ms later the cooldown (200ms) still blocks.
        game.advance(DT);
        assert_eq!(game.spawn.bullets.len(), 1);

        for _ in 0..13 {
            game.advance(DT);
        }
        assert_eq!(game.spawn.bullets.len(), 2);
    }

    #[test]
    fn bullet_kill_scores_and_emits_event() {
        let mut game = game();
        plant_monster(&mut game);
        // Keep the monster away from the player for this test.
        game.spawn.monsters[0].position = Vec2::new(100.0, 100.0);
        game.spawn.spawn_bullet(100.0, 100.0, 0.0);

        game.advance(DT);

        assert_eq!(game.score, 5);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::MonsterKilled));
        assert!(!game.spawn.monsters[0].active);
        assert!(!game.spawn.bullets[0].active);
        // The kill explosion is alive.
        assert_eq!(game.spawn.particles.len(), 12);

        // Deactivated entities disappear at the next frame's cleanup.
        game.advance(DT);
        assert!(game.spawn.monsters.is_empty());
        assert!(game.spawn.bullets.is_empty());
    }

    #[test]
    fn one_bullet_kills_at_most_one_monster() {
        let mut game = game();
        let physics = Physics::new(600.0, 600.0);
        game.spawn.spawn_monster(&physics);
        game.spawn.spawn_monster(&physics);
        game.spawn.monsters[0].position = Vec2::new(100.0, 100.0);
        game.spawn.monsters[0].velocity = Vec2::ZERO;
        game.spawn.monsters[1].position = Vec2::new(100.0, 100.0);
        game.spawn.monsters[1].velocity = Vec2::ZERO;
        game.spawn.spawn_bullet(100.0, 100.0, 0.0);

        game.advance(DT);
        game.advance(DT);

        assert_eq!(game.score, 5);
        assert_eq!(game.spawn.monsters.len(), 1);
    }

    #[test]
    fn monster_contact_damages_once_per_invincibility_window() {
        let mut game = game();
        plant_monster(&mut game);
        plant_monster(&mut game);

        game.advance(DT);

        // Both monsters overlap the player, but only one lands damage; it is
        // destroyed, the other passes through.
        assert_eq!(game.player.health, 2);
        assert!(game.drain_events().contains(&GameEvent::PlayerHit));

        game.advance(DT);
        assert_eq!(game.player.health, 2);
        assert_eq!(game.spawn.monsters.len(), 1);
    }

    #[test]
    fn coin_pickup_scores_and_despawns() {
        let mut game = game();
        let physics = Physics::new(600.0, 600.0);
        game.spawn.spawn_coin(&physics);
        game.spawn.coins[0].position = game.player.position;

        game.advance(DT);

        assert_eq!(game.score, 10);
        assert!(game
            .drain_events()
            .contains(&GameEvent::CoinCollected { points: 10 }));

        // Gone at the next cleanup, and never collectible twice.
        game.advance(DT);
        assert!(game.spawn.coins.is_empty());
        assert_eq!(game.score, 10);
    }

    #[test]
    fn two_coins_collected_in_one_frame() {
        let mut game = game();
        let physics = Physics::new(600.0, 600.0);
        game.spawn.spawn_coin(&physics);
        game.spawn.spawn_coin(&physics);
        game.spawn.coins[0].position = game.player.position;
        game.spawn.coins[1].position = game.player.position;

        game.advance(DT);
        assert_eq!(game.score, 20);

        game.advance(DT);
        assert!(game.spawn.coins.is_empty());
    }

    #[test]
    fn game_over_triggers_exactly_once() {
        let mut game = game();

        // Burn all three hearts.
        for _ in 0..3 {
            ride_out_invincibility(&mut game);
            plant_monster(&mut game);
            game.advance(DT);
        }

        assert_eq!(game.phase(), GamePhase::GameOver);
        let events = game.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::GameOver).count(), 1);
        assert!(events.contains(&GameEvent::Music(MusicTrack::GameOver)));

        // Further frames do not re-emit.
        game.advance(DT);
        assert!(!game.drain_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn restart_key_resets_only_after_game_over() {
        let mut game = game();
        game.score = 50;
        game.input.press(Key::Restart);
        game.advance(DT);
        assert_eq!(game.score, 50);

        // Kill the player, then press R again (reset clears input).
        for _ in 0..3 {
            ride_out_invincibility(&mut game);
            plant_monster(&mut game);
            game.advance(DT);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        game.drain_events();

        game.input.press(Key::Restart);
        game.advance(DT);

        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score, 0);
        assert_eq!(game.player.health, 3);
        assert!(game.spawn.monsters.is_empty());
        assert!(!game.input.is_pressed(Key::Restart));
        // Coming out of game over restarts the main track.
        assert!(game
            .drain_events()
            .contains(&GameEvent::Music(MusicTrack::Main)));
    }

    #[test]
    fn mid_round_reset_keeps_music_playing() {
        let mut game = game();
        game.score = 25;

        game.reset();

        assert_eq!(game.score, 0);
        assert!(!game
            .drain_events()
            .contains(&GameEvent::Music(MusicTrack::Main)));
    }

    #[test]
    fn player_is_clamped_to_the_field() {
        let mut game = game();
        game.input.press(Key::Left);

        for _ in 0..200 {
            game.advance(DT);
        }

        assert_eq!(game.player.position.x, game.player.radius);
        assert_eq!(game.player.velocity.x, 0.0);
    }

    #[test]
    fn fps_counter_rolls_over_each_second() {
        let mut game = game();
        assert_eq!(game.current_fps(), 0);

        // 62 frames of 16ms cross the 1000ms window at frame 63.
        for _ in 0..62 {
            game.advance(16.0);
        }
        assert_eq!(game.current_fps(), 0);
        game.advance(16.0);
        assert_eq!(game.current_fps(), 63);
    }

    #[test]
    fn render_is_total_in_every_phase() {
        let mut surface = NullSurface;
        let mut game = game();
        game.render(&mut surface);

        game.pause();
        game.render(&mut surface);
        game.pause();

        for _ in 0..3 {
            ride_out_invincibility(&mut game);
            plant_monster(&mut game);
            game.advance(DT);
        }
        game.render(&mut surface);
    }
}
