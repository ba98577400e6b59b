//! Data-driven game balance
//!
//! Every tuned value lives here as a configuration default rather than inline
//! at the use site. Velocities are in field units per frame, durations in
//! milliseconds.

/// Playing field dimensions and backdrop
#[derive(Debug, Clone, Copy)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub background_color: &'static str,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            background_color: "#1a1a2e",
        }
    }
}

/// Player avatar tuning
#[derive(Debug, Clone, Copy)]
pub struct PlayerConfig {
    /// Sprite edge length; collision radius is half this
    pub size: f32,
    pub speed: f32,
    pub max_health: u32,
    pub shoot_cooldown_ms: f64,
    pub invincibility_ms: f32,
    /// Velocity multiplier applied each frame with no movement input
    pub idle_damping: f32,
    pub color: &'static str,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            speed: 4.0,
            max_health: 3,
            shoot_cooldown_ms: 200.0,
            invincibility_ms: 1000.0,
            idle_damping: 0.8,
            color: "#4a90e2",
        }
    }
}

/// Bullet tuning
#[derive(Debug, Clone, Copy)]
pub struct BulletConfig {
    pub size: f32,
    pub speed: f32,
    pub lifetime_ms: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            size: 8.0,
            speed: 8.0,
            lifetime_ms: 3000.0,
        }
    }
}

/// Monster tuning
#[derive(Debug, Clone, Copy)]
pub struct MonsterConfig {
    pub size: f32,
    /// Base speed range before the difficulty multiplier
    pub min_speed: f32,
    pub max_speed: f32,
    /// Distance outside the field edge where monsters appear
    pub spawn_offset: f32,
    /// Out-of-bounds distance past which an escaped monster is collected
    pub despawn_margin: f32,
    pub color: &'static str,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            size: 45.0,
            min_speed: 1.5,
            max_speed: 3.0,
            spawn_offset: 20.0,
            despawn_margin: 50.0,
            color: "#9b59b6",
        }
    }
}

/// Coin tuning
#[derive(Debug, Clone, Copy)]
pub struct CoinConfig {
    pub size: f32,
    pub spawn_interval_ms: f32,
    pub max_coins: usize,
    pub points: u32,
    /// Animation phase advance per ms of frame time
    pub animation_speed: f32,
    /// Keep-out distance from field edges for spawn positions
    pub spawn_margin: f32,
    pub color: &'static str,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            spawn_interval_ms: 5000.0,
            max_coins: 5,
            points: 10,
            animation_speed: 0.1,
            spawn_margin: 50.0,
            color: "#ffd700",
        }
    }
}

/// Explosion particle effects
#[derive(Debug, Clone, Copy)]
pub struct FxConfig {
    pub player_hit_color: &'static str,
    pub player_hit_particles: usize,
    pub monster_kill_color: &'static str,
    pub monster_kill_particles: usize,
    pub coin_color: &'static str,
    pub coin_particles: usize,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            player_hit_color: "#e74c3c",
            player_hit_particles: 8,
            monster_kill_color: "#ff6b6b",
            monster_kill_particles: 12,
            coin_color: "#ffd700",
            coin_particles: 8,
        }
    }
}

/// HUD layout and styling
#[derive(Debug, Clone, Copy)]
pub struct UiConfig {
    pub heart_size: f32,
    pub heart_spacing: f32,
    pub heart_margin: f32,
    pub score_font: &'static str,
    pub score_color: &'static str,
    pub show_fps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            heart_size: 25.0,
            heart_spacing: 10.0,
            heart_margin: 30.0,
            score_font: "20px Arial",
            score_color: "#ffffff",
            show_fps: true,
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub monster: MonsterConfig,
    pub coin: CoinConfig,
    pub fx: FxConfig,
    pub ui: UiConfig,
}

impl GameConfig {
    /// Score awarded per monster kill
    pub const KILL_SCORE: u32 = 5;
}

/// Monster pressure tuning for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub spawn_interval_ms: f32,
    pub speed_multiplier: f32,
    pub max_monsters: usize,
}

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                spawn_interval_ms: 800.0,
                speed_multiplier: 2.5,
                max_monsters: 20,
            },
            Difficulty::Normal => DifficultyProfile {
                spawn_interval_ms: 600.0,
                speed_multiplier: 3.5,
                max_monsters: 25,
            },
            Difficulty::Hard => DifficultyProfile {
                spawn_interval_ms: 400.0,
                speed_multiplier: 4.0,
                max_monsters: 30,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_from_name_parses_known_levels() {
        assert_eq!(Difficulty::from_name("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_name("Normal"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_name("HARD"), Some(Difficulty::Hard));
    }

    #[test]
    fn difficulty_from_name_rejects_unknown_names() {
        assert_eq!(Difficulty::from_name("nightmare"), None);
        assert_eq!(Difficulty::from_name(""), None);
    }

    #[test]
    fn harder_profiles_spawn_faster_and_allow_more_monsters() {
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(hard.spawn_interval_ms < easy.spawn_interval_ms);
        assert!(hard.max_monsters > easy.max_monsters);
        assert!(hard.speed_multiplier > easy.speed_multiplier);
    }
}
