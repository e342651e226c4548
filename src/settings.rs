//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blxst/settings.toml (or platform equivalent)

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Entries kept in the high score table
const MAX_HIGH_SCORES: usize = 10;

/// Why settings could not be written
#[derive(Debug)]
pub enum SettingsError {
    /// No platform config directory could be determined
    NoConfigDir,
    Io(io::Error),
    Toml(toml::ser::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoConfigDir => write!(f, "could not determine config directory"),
            SettingsError::Io(e) => write!(f, "failed to write settings: {e}"),
            SettingsError::Toml(e) => write!(f, "failed to serialize settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::NoConfigDir => None,
            SettingsError::Io(e) => Some(e),
            SettingsError::Toml(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        SettingsError::Toml(e)
    }
}

/// Front-end settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gameplay: GameplaySettings,
    pub visual: VisualSettings,
    pub log: LogSettings,
    /// Best finished games, highest first
    pub high_scores: Vec<ScoreEntry>,
}

/// Gameplay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Fixed generator seed; random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Pick up the saved session on startup
    pub resume: bool,
}

/// Visual settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
    /// Color blocks with terminal colors
    pub color: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Directive added to the `RUST_LOG` filter
    pub filter: String,
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u64,
    /// Date as YYYY-MM-DD
    pub date: String,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            seed: None,
            resume: true,
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
            color: true,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "blxst=debug".to_string(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blxst", "blxst").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Parse settings text; malformed input gives defaults
    pub fn parse(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_default()
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Record a finished game. Zero scores are not recorded.
    pub fn add_score(&mut self, score: u64) {
        if score == 0 {
            return;
        }
        self.high_scores.push(ScoreEntry {
            score,
            date: today(),
        });
        self.high_scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.high_scores.truncate(MAX_HIGH_SCORES);
    }

    /// Forget every recorded game
    pub fn clear_scores(&mut self) {
        self.high_scores.clear();
    }

    /// Best recorded score
    pub fn best(&self) -> Option<u64> {
        self.high_scores.first().map(|e| e.score)
    }
}

impl VisualSettings {
    /// Get the (filled, empty) cell strings for the block style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", " ."),
            "round" => ("()", " ."),
            _ => ("██", "░░"),
        }
    }
}

/// Current UTC date as YYYY-MM-DD
fn today() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    civil_date(secs / 86_400)
}

/// Days since 1970-01-01 to a proleptic Gregorian date
fn civil_date(days: u64) -> String {
    let z = days as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse("[gameplay]\nseed = 7\n");
        assert_eq!(settings.gameplay.seed, Some(7));
        assert!(settings.gameplay.resume);
        assert_eq!(settings.visual.block_style, "solid");
        assert_eq!(settings.log.filter, "blxst=debug");
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let settings = Settings::parse("gameplay = [[[");
        assert_eq!(settings.gameplay.seed, None);
        assert!(settings.high_scores.is_empty());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.visual.block_style = "round".to_string();
        settings.add_score(40);
        let text = toml::to_string_pretty(&settings).unwrap();
        let back = Settings::parse(&text);
        assert_eq!(back.visual.block_chars(), ("()", " ."));
        assert_eq!(back.high_scores, settings.high_scores);
        assert_eq!(back.gameplay.seed, None);
    }

    #[test]
    fn test_high_scores_sorted_and_capped() {
        let mut settings = Settings::default();
        for score in [5, 0, 50, 20] {
            settings.add_score(score);
        }
        let scores: Vec<_> = settings.high_scores.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 20, 5]);

        for score in 100..120 {
            settings.add_score(score);
        }
        assert_eq!(settings.high_scores.len(), MAX_HIGH_SCORES);
        assert_eq!(settings.best(), Some(119));
    }

    #[test]
    fn test_clear_scores() {
        let mut settings = Settings::default();
        settings.add_score(30);
        settings.clear_scores();
        assert!(settings.high_scores.is_empty());
        assert_eq!(settings.best(), None);
    }

    #[test]
    fn test_save_to_writes_toml() {
        let path = std::env::temp_dir()
            .join(format!("blxst-settings-test-{}", std::process::id()))
            .join("settings.toml");
        let mut settings = Settings::default();
        settings.gameplay.seed = Some(12);
        settings.save_to(&path).unwrap();
        let back = Settings::parse(&fs::read_to_string(&path).unwrap());
        assert_eq!(back.gameplay.seed, Some(12));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_civil_date() {
        assert_eq!(civil_date(0), "1970-01-01");
        assert_eq!(civil_date(19_723), "2024-01-01");
        assert_eq!(civil_date(11_016), "2000-02-29");
    }
}
