use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::Result;

use serde::{Deserialize, Serialize};

/// Typed navigation options. The auto-init layer that coerces host attributes
/// into this structure lives outside the engine; everything here is already
/// the right shape.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct Config {
    /// Wrap section navigation at the two ends of the deck.
    pub loop_sections: bool,
    /// Section-axis lock duration in milliseconds.
    pub scroll_timeout: u64,
    /// Slide-axis lock duration in milliseconds.
    pub slide_scroll_timeout: u64,
    /// Minimum swipe distance in pixels before a touch counts as navigation.
    pub touch_threshold: f32,
    /// Minimum |deltaY| before a wheel event counts as navigation.
    pub wheel_delta_threshold: f32,
    /// Gap in milliseconds that ends a continuous wheel gesture.
    pub wheel_gesture_end_delay: u64,
    /// Separator between the section and slide tokens in the URL fragment.
    pub hash_separator: String,
    /// Enable keyboard navigation.
    pub keyboard: bool,
    /// Verbose diagnostics only; no behavior change in the engine.
    pub debug: bool,
    /// Explicit slide anchors per section hash, overriding slide-level hashes.
    pub slide_anchors: HashMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loop_sections: false,
            scroll_timeout: 700,
            slide_scroll_timeout: 700,
            touch_threshold: 5.0,
            wheel_delta_threshold: 5.0,
            wheel_gesture_end_delay: 300,
            hash_separator: "--".to_string(),
            keyboard: true,
            debug: false,
            slide_anchors: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load<T>(source_path: T) -> Result<Config>
    where
        T: AsRef<Path>,
    {
        let mut filename = source_path.as_ref().to_path_buf();
        filename.push("diapo.toml");
        let contents = match std::fs::read_to_string(&filename) {
            Ok(c) => c,
            Err(err) => {
                eprintln!("Could not read config file `{}`", filename.display());
                return Err(Box::new(err));
            }
        };

        let config = match Config::from_str(&contents) {
            Ok(c) => c,
            Err(err) => {
                eprintln!("Unable to load data from `{}`", filename.display());
                return Err(Box::new(err));
            }
        };

        Ok(config)
    }

    /// Malformed values are diagnostics, never errors: the engine keeps
    /// running with whatever it was given.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.hash_separator.is_empty() {
            warnings.push("hash_separator is empty; fragments will not carry a slide token".into());
        }
        if self.scroll_timeout == 0 {
            warnings.push("scroll_timeout is 0; section moves will never be debounced".into());
        }
        if self.slide_scroll_timeout == 0 {
            warnings.push("slide_scroll_timeout is 0; slide moves will never be debounced".into());
        }
        if self.touch_threshold < 0.0 {
            warnings.push("touch_threshold is negative; every touch will navigate".into());
        }
        if self.wheel_delta_threshold < 0.0 {
            warnings.push("wheel_delta_threshold is negative; every wheel tick will navigate".into());
        }

        warnings
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert!(!config.loop_sections);
        assert_eq!(config.scroll_timeout, 700);
        assert_eq!(config.slide_scroll_timeout, 700);
        assert_eq!(config.hash_separator, "--");
        assert!(config.keyboard);
        assert!(!config.debug);
    }

    #[test]
    fn parses_partial_toml() {
        let config = Config::from_str(
            r#"
            loop_sections = true
            scroll_timeout = 1000
            hash_separator = "/"
            "#,
        )
        .unwrap();

        assert!(config.loop_sections);
        assert_eq!(config.scroll_timeout, 1000);
        assert_eq!(config.hash_separator, "/");
        // Unset fields keep their defaults
        assert_eq!(config.wheel_gesture_end_delay, 300);
    }

    #[test]
    fn parses_slide_anchors_table() {
        let config = Config::from_str(
            r#"
            [slide_anchors]
            gallery = ["one", "two"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.slide_anchors.get("gallery"),
            Some(&vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn load_reads_diapo_toml_from_a_directory() {
        let dir = std::env::temp_dir().join("diapo-config-load-ok");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("diapo.toml"), "loop_sections = true\nscroll_timeout = 150")
            .unwrap();

        let config = Config::load(&dir).unwrap();
        assert!(config.loop_sections);
        assert_eq!(config.scroll_timeout, 150);
        assert_eq!(config.hash_separator, "--");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_fails_on_a_missing_file() {
        let dir = std::env::temp_dir().join("diapo-config-load-missing");
        std::fs::remove_dir_all(&dir).ok();

        assert!(Config::load(&dir).is_err());
    }

    #[test]
    fn load_fails_on_malformed_toml() {
        let dir = std::env::temp_dir().join("diapo-config-load-broken");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("diapo.toml"), "loop_sections = maybe").unwrap();

        assert!(Config::load(&dir).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn validate_reports_suspect_values() {
        let mut config = Config::default();
        config.hash_separator.clear();
        config.scroll_timeout = 0;

        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn validate_is_quiet_on_defaults() {
        assert!(Config::default().validate().is_empty());
    }
}
