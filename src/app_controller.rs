use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::language_utils;
use crate::feed::{Clock, FeedRenderer, RenderStats, StatusFeed, SystemClock, TextSurface};
use crate::providers::TranslationBackend;
use crate::providers::edge::EdgeTranslator;
use crate::providers::mock::MockBackend;
use crate::translation::Translator;

// @module: Application controller wiring translator, feed and renderer

/// A message waiting to be published
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMessage {
    pub text: String,
    pub important: bool,
}

impl FeedMessage {
    pub fn new(text: impl Into<String>, important: bool) -> Self {
        Self { text: text.into(), important }
    }
}

/// Main application controller for the status feed
pub struct Controller {
    // @field: App configuration
    config: Config,
    feed: Arc<StatusFeed>,
    renderer: FeedRenderer,
}

impl Controller {
    /// Create a controller talking to the configured HTTP backend, or to the
    /// in-process mock when `offline` is set
    pub fn with_config(config: Config, offline: bool) -> Result<Self, AppError> {
        let backend: Arc<dyn TranslationBackend> = if offline {
            Arc::new(MockBackend::working())
        } else {
            let translation = &config.translation;
            Arc::new(
                EdgeTranslator::new(
                    translation.auth_endpoint.clone(),
                    translation.translate_endpoint.clone(),
                    translation.source_language.clone(),
                    translation.target_language.clone(),
                    translation.timeout_secs,
                )
                .api_version(translation.api_version.clone()),
            )
        };

        Self::with_backend(config, backend, Arc::new(SystemClock::new()))
    }

    // @method: Create a controller over an explicit backend and clock
    pub fn with_backend(config: Config, backend: Arc<dyn TranslationBackend>, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        config.validate().map_err(|e| AppError::Config(format!("{:#}", e)))?;

        let translator = Arc::new(Translator::new(backend, config.translator_options()));
        info!(
            "Using {} translation backend: {} -> {}",
            translator.backend_name(),
            describe_language(&config.translation.source_language),
            describe_language(&config.translation.target_language),
        );

        let feed = Arc::new(StatusFeed::new(translator, config.feed_options()));
        let renderer = FeedRenderer::new(config.feed_style(), clock);

        Ok(Self { config, feed, renderer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn feed(&self) -> &Arc<StatusFeed> {
        &self.feed
    }

    /// Publish every message concurrently.
    ///
    /// Each entry enters the feed when its own translation resolves.
    pub async fn publish_all(&self, messages: &[FeedMessage]) {
        join_all(messages.iter().map(|message| self.feed.publish(&message.text, message.important))).await;

        let stats = self.feed.translator().cache_stats();
        debug!("Published {} message(s), cache hits {} misses {}", messages.len(), stats.hits, stats.misses);
    }

    /// Draw one frame
    pub fn render_frame(&self, surface: &mut TextSurface) -> RenderStats {
        surface.reset();
        self.renderer.render(&self.feed, surface)
    }

    /// Render frames every `frame_interval` until every entry is revealed or
    /// `max_frames` frames have been drawn. Returns the number of frames drawn.
    pub async fn run_until_revealed<F>(
        &self,
        surface: &mut TextSurface,
        frame_interval: Duration,
        max_frames: usize,
        mut on_frame: F,
    ) -> usize
    where
        F: FnMut(&TextSurface, RenderStats),
    {
        let mut interval = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
        let mut frames = 0;

        while frames < max_frames {
            interval.tick().await;
            let stats = self.render_frame(surface);
            frames += 1;
            on_frame(surface, stats);

            if stats.all_complete {
                debug!("Feed fully revealed after {} frame(s)", frames);
                return frames;
            }
        }

        warn!("Stopped rendering after {} frames with entries still revealing", frames);
        frames
    }
}

/// Tag followed by its English name, e.g. `zh-Hans (Chinese)`
fn describe_language(tag: &str) -> String {
    match language_utils::get_language_name(tag) {
        Ok(name) => format!("{} ({})", tag, name),
        Err(_) => tag.to_string(),
    }
}
