//=========================================================================
// Game Configuration
//=========================================================================
//
// Every tunable constant of a round, grouped in one value that scenes
// read through their context.
//
//   GameConfig::default()
//       .with_round_length(60.0)
//       .with_bpm(120.0)
//       .with_generators(catalog)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::economy::{default_catalog, GeneratorSpec, DEFAULT_PRICE_GROWTH};

//=== GameConfig ==========================================================

/// Tunables for both scenes.
///
/// Fields are public for reading. The `with_*` setters validate their
/// input and should be preferred when building a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    //--- Round ------------------------------------------------------------
    /// Length of a round in seconds.
    pub round_length: f32,

    /// Seconds between economy ticks.
    pub tick_interval: f32,

    //--- Beat -------------------------------------------------------------
    /// Tempo of the music the camera pulses to.
    pub bpm: f32,

    /// Round time after which the play scene starts pulsing.
    pub beat_warmup: f32,

    /// Extra zoom added at the peak of a beat.
    pub beat_zoom: f32,

    /// Camera zoom with no beat applied.
    pub default_zoom: f32,

    //--- Animation --------------------------------------------------------
    pub counter_tween: f32,
    pub hover_duration: f32,
    pub camera_return: f32,

    /// Camera height the play scene opens at.
    pub play_camera_y: f32,

    /// Seconds after round end before the camera can be dragged.
    pub drag_unlock: f32,

    //--- Leaderboard ------------------------------------------------------
    /// Real-time pause between score submission and leaderboard fetch.
    pub leaderboard_delay: f32,

    pub play_reveal_delay: f32,
    pub menu_reveal_delay: f32,
    pub leaderboard: String,
    pub total_statistic: String,
    pub attempts_statistic: String,
    pub fetch_count: u32,

    /// Vertical spacing of leaderboard rows in world units.
    pub row_spacing: f32,

    //--- Economy ----------------------------------------------------------
    pub price_growth: f64,
    pub generators: Vec<GeneratorSpec>,

    /// Number of `Website{n}` textures a click can pick from.
    pub website_textures: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_length: 160.0,
            tick_interval: 1.0,
            bpm: 132.0,
            beat_warmup: 14.5,
            beat_zoom: 0.025,
            default_zoom: 1.0,
            counter_tween: 0.3,
            hover_duration: 0.3,
            camera_return: 1.0,
            play_camera_y: -46.0,
            drag_unlock: 1.0,
            leaderboard_delay: 2.0,
            play_reveal_delay: 0.1,
            menu_reveal_delay: 0.02,
            leaderboard: "Highscore".to_string(),
            total_statistic: "TotalScore".to_string(),
            attempts_statistic: "Attempts".to_string(),
            fetch_count: 100,
            row_spacing: 20.0,
            price_growth: DEFAULT_PRICE_GROWTH,
            generators: default_catalog(),
            website_textures: 6,
        }
    }
}

impl GameConfig {
    /// Sets the round length in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `seconds <= 0.0`.
    pub fn with_round_length(mut self, seconds: f32) -> Self {
        assert!(seconds > 0.0, "Round length must be positive, got {}", seconds);
        self.round_length = seconds;
        self
    }

    /// Sets the economy tick interval.
    ///
    /// # Panics
    ///
    /// Panics if `seconds <= 0.0`.
    pub fn with_tick_interval(mut self, seconds: f32) -> Self {
        assert!(seconds > 0.0, "Tick interval must be positive, got {}", seconds);
        self.tick_interval = seconds;
        self
    }

    /// Sets the music tempo.
    ///
    /// # Panics
    ///
    /// Panics if `bpm <= 0.0`.
    pub fn with_bpm(mut self, bpm: f32) -> Self {
        assert!(bpm > 0.0, "BPM must be positive, got {}", bpm);
        self.bpm = bpm;
        self
    }

    /// Sets the base camera zoom (hosts use 2.0 on tall displays).
    pub fn with_default_zoom(mut self, zoom: f32) -> Self {
        assert!(zoom > 0.0, "Default zoom must be positive, got {}", zoom);
        self.default_zoom = zoom;
        self
    }

    /// Sets the delay between score submission and leaderboard fetch.
    pub fn with_leaderboard_delay(mut self, seconds: f32) -> Self {
        assert!(seconds >= 0.0, "Leaderboard delay cannot be negative, got {}", seconds);
        self.leaderboard_delay = seconds;
        self
    }

    /// Sets the leaderboard name used for fetches and the high score.
    pub fn with_leaderboard(mut self, name: impl Into<String>) -> Self {
        self.leaderboard = name.into();
        self
    }

    /// Sets how many leaderboard rows are requested.
    ///
    /// # Panics
    ///
    /// Panics if `count == 0`.
    pub fn with_fetch_count(mut self, count: u32) -> Self {
        assert!(count > 0, "Fetch count must be positive");
        self.fetch_count = count;
        self
    }

    /// Sets the multiplicative price growth per owned unit.
    ///
    /// # Panics
    ///
    /// Panics if `growth < 1.0`.
    pub fn with_price_growth(mut self, growth: f64) -> Self {
        assert!(growth >= 1.0, "Price growth must be at least 1.0, got {}", growth);
        self.price_growth = growth;
        self
    }

    /// Replaces the generator catalog.
    pub fn with_generators(mut self, generators: Vec<GeneratorSpec>) -> Self {
        self.generators = generators;
        self
    }

    /// Sets how many website textures a click picks from.
    ///
    /// # Panics
    ///
    /// Panics if `count == 0`.
    pub fn with_website_textures(mut self, count: u32) -> Self {
        assert!(count > 0, "Website texture count must be positive");
        self.website_textures = count;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_round() {
        let config = GameConfig::default();
        assert_eq!(config.round_length, 160.0);
        assert_eq!(config.bpm, 132.0);
        assert_eq!(config.beat_warmup, 14.5);
        assert_eq!(config.leaderboard, "Highscore");
        assert_eq!(config.fetch_count, 100);
        assert_eq!(config.generators.len(), 5);
        assert_eq!(config.website_textures, 6);
    }

    #[test]
    fn fluent_setters_chain() {
        let config = GameConfig::default()
            .with_round_length(30.0)
            .with_bpm(120.0)
            .with_leaderboard("Weekly")
            .with_leaderboard_delay(0.0);

        assert_eq!(config.round_length, 30.0);
        assert_eq!(config.bpm, 120.0);
        assert_eq!(config.leaderboard, "Weekly");
        assert_eq!(config.leaderboard_delay, 0.0);
    }

    #[test]
    #[should_panic(expected = "Round length must be positive")]
    fn round_length_rejects_zero() {
        GameConfig::default().with_round_length(0.0);
    }

    #[test]
    #[should_panic(expected = "Price growth must be at least 1.0")]
    fn price_growth_rejects_shrinking_prices() {
        GameConfig::default().with_price_growth(0.9);
    }
}
