//! Configuration management

use crate::{Result, SpellError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Locale used when none is configured
pub const DEFAULT_LANG: &str = "en-US";

/// Voices tried by exact name before falling back to locale matching
pub const DEFAULT_PREFERRED_VOICES: &[&str] = &["Google US English", "Samantha", "Alex"];

/// Application configuration
///
/// Holds the learner's name, speech settings and the optional
/// recognizer command. Backed by an INI file that is created with
/// defaults on first run.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.spellpal.cfg by default)
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(path)
                .map_err(|e| SpellError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(path)
                .map_err(|e| SpellError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self {
            ini,
            path: path.to_path_buf(),
        })
    }

    /// In-memory defaults, not backed by any file
    pub fn defaults() -> Self {
        Self {
            ini: Self::default_config(),
            path: PathBuf::new(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| SpellError::Config(format!("Failed to save config: {}", e)))
    }

    /// Default config file path (~/.spellpal.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".spellpal.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("learner"))
            .set("name", "Shelly")
            .set("words_file", "");

        ini.with_section(Some("speech"))
            .set("rate", "0.8")
            .set("pitch", "1.0")
            .set("lang", DEFAULT_LANG)
            .set("preferred_voices", DEFAULT_PREFERRED_VOICES.join(","))
            .set("next_delay_ms", "300");

        ini.with_section(Some("listen")).set("command", "");

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Name used in greetings and praise
    pub fn learner_name(&self) -> String {
        self.get_string("learner", "name", "Shelly").trim().to_string()
    }

    /// Word list asset to load instead of the built-in list
    pub fn words_file(&self) -> Option<PathBuf> {
        let file = self.get_string("learner", "words_file", "");
        let file = file.trim();
        if file.is_empty() {
            None
        } else {
            Some(PathBuf::from(file))
        }
    }

    /// Speech rate as a multiple of the backend's normal rate
    pub fn rate(&self) -> f32 {
        let rate = self.get_float("speech", "rate", 0.8);
        if rate > 0.0 {
            rate
        } else {
            0.8
        }
    }

    /// Pitch as a multiple of the backend's normal pitch
    pub fn pitch(&self) -> f32 {
        let pitch = self.get_float("speech", "pitch", 1.0);
        if pitch > 0.0 {
            pitch
        } else {
            1.0
        }
    }

    /// Locale used for speech output and recognition
    pub fn lang(&self) -> String {
        let lang = self.get_string("speech", "lang", DEFAULT_LANG);
        let lang = lang.trim();
        if lang.is_empty() {
            DEFAULT_LANG.to_string()
        } else {
            lang.to_string()
        }
    }

    /// Voice names tried first, in order
    pub fn preferred_voices(&self) -> Vec<String> {
        match self.ini.get_from(Some("speech"), "preferred_voices") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_PREFERRED_VOICES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    /// Pause between showing a new word and speaking it
    pub fn next_delay(&self) -> Duration {
        let ms = self.get_int("speech", "next_delay_ms", 300).max(0) as u64;
        Duration::from_millis(ms)
    }

    /// External capture command for speech input, if any
    pub fn listen_command(&self) -> Option<String> {
        let cmd = self.get_string("listen", "command", "");
        let cmd = cmd.trim();
        if cmd.is_empty() {
            None
        } else {
            Some(cmd.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::defaults();
        assert_eq!(config.learner_name(), "Shelly");
        assert_eq!(config.rate(), 0.8);
        assert_eq!(config.pitch(), 1.0);
        assert_eq!(config.lang(), "en-US");
        assert_eq!(config.next_delay(), Duration::from_millis(300));
        assert_eq!(
            config.preferred_voices(),
            vec!["Google US English", "Samantha", "Alex"]
        );
        assert!(config.listen_command().is_none());
        assert!(config.words_file().is_none());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut config = Config::defaults();
        config.set("speech", "rate", "fast");
        config.set("speech", "pitch", "-2");
        config.set("speech", "next_delay_ms", "-50");
        assert_eq!(config.rate(), 0.8);
        assert_eq!(config.pitch(), 1.0);
        assert_eq!(config.next_delay(), Duration::ZERO);
    }

    #[test]
    fn test_blank_lang_falls_back() {
        let mut config = Config::defaults();
        config.set("speech", "lang", "  ");
        assert_eq!(config.lang(), "en-US");

        config.set("speech", "lang", "en-GB");
        assert_eq!(config.lang(), "en-GB");
    }

    #[test]
    fn test_preferred_voices_list_parsing() {
        let mut config = Config::defaults();
        config.set("speech", "preferred_voices", " Karen , ,Daniel");
        assert_eq!(config.preferred_voices(), vec!["Karen", "Daniel"]);
    }
}
