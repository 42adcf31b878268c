/*!
 * Core translation service implementation.
 *
 * `Translator` memoizes backend lookups by source text and absorbs every
 * backend failure: callers always get a string back, either the translation
 * or the configured failure sentinel.
 */

use std::sync::Arc;
use futures::future::FutureExt;
use log::{debug, error, info};

use crate::providers::TranslationBackend;
use super::cache::{CacheStats, LookupOutcome, TranslationCache, truncate_text};

/// Sentinel shown in place of a translation when the backend fails
pub const TRANSLATION_FAILED: &str = "翻译失败";

/// Options for customizing the translator
#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    /// Text returned when a lookup fails
    pub failure_text: String,

    /// Keep failed lookups cached instead of retrying on the next request
    pub cache_failures: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            failure_text: TRANSLATION_FAILED.to_string(),
            cache_failures: false,
        }
    }
}

/// Memoizing translator shared by every feed that needs translations
pub struct Translator {
    /// Backend performing the token + translate round trip
    backend: Arc<dyn TranslationBackend>,

    /// Lookups keyed by source text
    cache: TranslationCache,

    options: TranslatorOptions,
}

impl Translator {
    /// Create a translator over `backend`
    pub fn new(backend: Arc<dyn TranslationBackend>, options: TranslatorOptions) -> Self {
        Self {
            backend,
            cache: TranslationCache::new(),
            options,
        }
    }

    /// Create a translator with default options
    pub fn with_backend(backend: Arc<dyn TranslationBackend>) -> Self {
        Self::new(backend, TranslatorOptions::default())
    }

    /// Translate `source_text`, never failing.
    ///
    /// The first request for a key starts the backend lookup and registers
    /// it in the cache before anything is awaited; every later request for
    /// the same key awaits that lookup.
    pub async fn translate(&self, source_text: &str) -> String {
        let backend = Arc::clone(&self.backend);
        let text = source_text.to_string();

        let (lookup, reused) = self.cache.get_or_start(source_text, move || {
            fetch_translation(backend, text).boxed()
        });

        if reused {
            debug!("Awaiting memoized lookup for '{}'", truncate_text(source_text, 30));
        }

        match lookup.clone().await {
            LookupOutcome::Translated(translation) => translation,
            LookupOutcome::Failed => {
                if !self.options.cache_failures && self.cache.remove_if_same(source_text, &lookup) {
                    debug!("Failed lookup for '{}' will be retried on next request", truncate_text(source_text, 30));
                }
                self.options.failure_text.clone()
            }
        }
    }

    /// Display text for `source_text` if its lookup has already resolved
    pub fn cached(&self, source_text: &str) -> Option<String> {
        match self.cache.peek(source_text) {
            Some(LookupOutcome::Translated(translation)) => Some(translation),
            Some(LookupOutcome::Failed) => Some(self.options.failure_text.clone()),
            None => None,
        }
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Text returned for failed lookups
    pub fn failure_text(&self) -> &str {
        &self.options.failure_text
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

/// One backend round trip: token, then translation
async fn fetch_translation(backend: Arc<dyn TranslationBackend>, text: String) -> LookupOutcome {
    let token = match backend.fetch_token().await {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to obtain token from {}: {}", backend.name(), e);
            return LookupOutcome::Failed;
        }
    };

    match backend.translate(&token, &text).await {
        Ok(translation) => {
            info!("Source: {}", text);
            info!("Translated: {}", translation);
            LookupOutcome::Translated(translation)
        }
        Err(e) => {
            error!("Translation failed for '{}': {}", truncate_text(&text, 30), e);
            LookupOutcome::Failed
        }
    }
}
