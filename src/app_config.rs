use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::feed::{FeedOptions, FeedStyle};
use crate::providers::edge::{DEFAULT_AUTH_ENDPOINT, DEFAULT_TRANSLATE_ENDPOINT};
use crate::translation::{TRANSLATION_FAILED, TranslatorOptions};

/// Application configuration module
/// This module handles loading, validating and saving the feed settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation backend settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Feed queue and layout settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Endpoint returning a bearer token
    #[serde(default = "default_auth_endpoint")]
    pub auth_endpoint: String,

    /// Endpoint accepting translation requests
    #[serde(default = "default_translate_endpoint")]
    pub translate_endpoint: String,

    /// API version query parameter
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Source language tag
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language tag
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Text shown in place of a failed translation
    #[serde(default = "default_failure_text")]
    pub failure_text: String,

    /// Keep failed lookups cached instead of retrying them.
    /// Off by default so the feed recovers once the backend is back.
    #[serde(default)]
    pub cache_failures: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            auth_endpoint: default_auth_endpoint(),
            translate_endpoint: default_translate_endpoint(),
            api_version: default_api_version(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            timeout_secs: default_timeout_secs(),
            failure_text: default_failure_text(),
            cache_failures: false,
        }
    }
}

/// Feed configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeedConfig {
    /// Maximum number of entries on screen
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Characters revealed per millisecond
    #[serde(default = "default_reveal_speed")]
    pub reveal_speed: f64,

    /// Label in front of the translated line
    #[serde(default = "default_translated_label")]
    pub translated_label: String,

    #[serde(default = "default_origin_x")]
    pub origin_x: f32,

    #[serde(default = "default_origin_y")]
    pub origin_y: f32,

    /// Vertical distance between entries
    #[serde(default = "default_entry_spacing")]
    pub entry_spacing: f32,

    #[serde(default = "default_primary_font_size")]
    pub primary_font_size: f32,

    #[serde(default = "default_secondary_font_size")]
    pub secondary_font_size: f32,

    #[serde(default = "default_secondary_indent")]
    pub secondary_indent: f32,

    #[serde(default = "default_secondary_offset")]
    pub secondary_offset: f32,

    #[serde(default = "default_line_advance")]
    pub line_advance: f32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            reveal_speed: default_reveal_speed(),
            translated_label: default_translated_label(),
            origin_x: default_origin_x(),
            origin_y: default_origin_y(),
            entry_spacing: default_entry_spacing(),
            primary_font_size: default_primary_font_size(),
            secondary_font_size: default_secondary_font_size(),
            secondary_indent: default_secondary_indent(),
            secondary_offset: default_secondary_offset(),
            line_advance: default_line_advance(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_auth_endpoint() -> String {
    DEFAULT_AUTH_ENDPOINT.to_string()
}

fn default_translate_endpoint() -> String {
    DEFAULT_TRANSLATE_ENDPOINT.to_string()
}

fn default_api_version() -> String {
    "3.0".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "zh-Hans".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_failure_text() -> String {
    TRANSLATION_FAILED.to_string()
}

fn default_capacity() -> usize {
    3
}

fn default_reveal_speed() -> f64 {
    0.08
}

fn default_translated_label() -> String {
    "译".to_string()
}

fn default_origin_x() -> f32 {
    20.0
}

fn default_origin_y() -> f32 {
    30.0
}

fn default_entry_spacing() -> f32 {
    45.0
}

fn default_primary_font_size() -> f32 {
    18.0
}

fn default_secondary_font_size() -> f32 {
    16.0
}

fn default_secondary_indent() -> f32 {
    10.0
}

fn default_secondary_offset() -> f32 {
    5.0
}

fn default_line_advance() -> f32 {
    20.0
}

impl Config {
    /// Load the configuration from `path`, writing a default one if the file is missing
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let translation = &self.translation;

        Url::parse(&translation.auth_endpoint)
            .with_context(|| format!("Invalid auth endpoint: {}", translation.auth_endpoint))?;
        Url::parse(&translation.translate_endpoint)
            .with_context(|| format!("Invalid translate endpoint: {}", translation.translate_endpoint))?;

        crate::language_utils::validate_language_tag(&translation.source_language)?;
        crate::language_utils::validate_language_tag(&translation.target_language)?;

        if crate::language_utils::language_tags_match(&translation.source_language, &translation.target_language) {
            return Err(anyhow!(
                "Source and target language must differ, got {} and {}",
                translation.source_language,
                translation.target_language
            ));
        }

        if translation.timeout_secs == 0 {
            return Err(anyhow!("Translation timeout must be greater than zero"));
        }

        if self.feed.capacity == 0 {
            return Err(anyhow!("Feed capacity must be at least 1"));
        }

        if !self.feed.reveal_speed.is_finite() || self.feed.reveal_speed <= 0.0 {
            return Err(anyhow!("Reveal speed must be a positive number, got {}", self.feed.reveal_speed));
        }

        Ok(())
    }

    pub fn translator_options(&self) -> TranslatorOptions {
        TranslatorOptions {
            failure_text: self.translation.failure_text.clone(),
            cache_failures: self.translation.cache_failures,
        }
    }

    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            capacity: self.feed.capacity,
            reveal_speed: self.feed.reveal_speed,
            translated_label: self.feed.translated_label.clone(),
        }
    }

    pub fn feed_style(&self) -> FeedStyle {
        FeedStyle {
            origin_x: self.feed.origin_x,
            origin_y: self.feed.origin_y,
            entry_spacing: self.feed.entry_spacing,
            primary_font_size: self.feed.primary_font_size,
            secondary_font_size: self.feed.secondary_font_size,
            secondary_indent: self.feed.secondary_indent,
            secondary_offset: self.feed.secondary_offset,
            line_advance: self.feed.line_advance,
        }
    }
}
