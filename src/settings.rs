//! Runtime settings and fixed gameplay constants
//!
//! Settings come from an optional JSON file named on the command line.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use consts::MIN_CURVE_PIECES;

/// Gameplay constants that are not worth exposing in the settings file
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum catch-up ticks per rendered frame
    pub const MAX_TICKS_PER_FRAME: u32 = 10;

    /// Player square edge length
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Distance moved per pressed direction per tick
    pub const PLAYER_STEP: f32 = 5.0;
    /// Spin per tick, in degrees
    pub const PLAYER_SPIN: f32 = 1.0;

    /// Base petal speed; every tenth petal gets one more
    pub const PETAL_BASE_SPEED: f32 = 1.0;
    /// Petal scale is drawn from [MIN, MAX) and truncated
    pub const PETAL_SCALE_MIN: f64 = 1.0;
    pub const PETAL_SCALE_MAX: f64 = 10.0;

    /// Upper bounds (exclusive) of the per-petal colour drift draws
    pub const DRIFT_RED: f64 = 5.0;
    pub const DRIFT_GREEN: f64 = 2.0;
    pub const DRIFT_BLUE: f64 = 2.0;

    /// Fewest curve pieces that still enclose an area
    pub const MIN_CURVE_PIECES: usize = 3;

    /// Character size of the win message
    pub const WIN_FONT_SIZE: u16 = 240;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fullscreen: bool,
    pub window_title: String,

    /// Number of pieces the heart curve is cut into
    pub curve_pieces: usize,
    pub petal_count: usize,

    pub font_path: String,
    pub win_message: String,
    pub win_hold_secs: f32,

    /// Fixed rng seed; taken from the clock when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 1080.0,
            fullscreen: true,
            window_title: "heart rain".to_string(),
            curve_pieces: 300,
            petal_count: 50,
            font_path: "/usr/share/fonts/google-noto/NotoSans-Black.ttf".to_string(),
            win_message: "I love U".to_string(),
            win_hold_secs: 3.0,
            seed: None,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let json = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        let settings = Self::parse(&json).map_err(|e| Error::ConfigParse {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        settings.validate().map_err(|reason| Error::ConfigInvalid {
            path: display,
            reason,
        })?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), String> {
        if self.curve_pieces < MIN_CURVE_PIECES {
            return Err(format!(
                "curve_pieces must be at least {MIN_CURVE_PIECES}, got {}",
                self.curve_pieces
            ));
        }
        Ok(())
    }

    fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Settings from the file named by the first argument, or defaults
    pub fn from_args() -> Self {
        let Some(path) = std::env::args().nth(1) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse(r#"{ "petal_count": 5, "seed": 7 }"#).unwrap();

        assert_eq!(settings.petal_count, 5);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.curve_pieces, 300);
        assert_eq!(settings.screen_height, 1080.0);
        assert_eq!(settings.win_message, "I love U");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Settings::load("/nonexistent/heart-rain.json").unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn test_degenerate_curve_is_rejected() {
        for pieces in 0..MIN_CURVE_PIECES {
            let settings = Settings {
                curve_pieces: pieces,
                ..Default::default()
            };
            assert!(settings.validate().is_err(), "{pieces} pieces");
        }
        assert!(Settings::default().validate().is_ok());

        let path = std::env::temp_dir().join(format!("heart-rain-zero-{}.json", std::process::id()));
        fs::write(&path, r#"{ "curve_pieces": 0 }"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let path = std::env::temp_dir().join(format!("heart-rain-{}.json", std::process::id()));
        fs::write(&path, "{ petal_count: ").unwrap();

        let err = Settings::load(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
