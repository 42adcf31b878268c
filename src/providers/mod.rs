/*!
 * Translation backend implementations.
 *
 * This module contains the clients the translator can talk to:
 * - Edge: the two-step token + translate HTTP service
 * - Mock: an in-process backend with scriptable behavior
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// A lookup is always two calls: obtain a short-lived bearer token, then
/// submit the text with that token.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Obtain an opaque bearer token
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The token text or an error
    async fn fetch_token(&self) -> Result<String, ProviderError>;

    /// Translate a single piece of text
    ///
    /// # Arguments
    /// * `token` - Bearer token from `fetch_token`
    /// * `text` - The source text
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, token: &str, text: &str) -> Result<String, ProviderError>;

    /// Short identifier used in log lines
    fn name(&self) -> &str;
}

pub mod edge;
pub mod mock;
