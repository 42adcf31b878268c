/*!
 * # statusfeed - translated on-screen status feed
 *
 * A Rust library for showing short event messages together with an
 * automatic translation, revealed with a typewriter animation.
 *
 * ## Features
 *
 * - Memoized translation: one backend round trip per distinct message,
 *   shared by concurrent requests for the same text
 * - Backend outages never reach the caller; a sentinel text is shown instead
 * - Bounded feed (3 entries by default), oldest evicted first
 * - Per-entry reveal timers that start on first draw
 * - Cascading rendering: newer entries wait for older ones to finish
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Wiring of backend, translator, feed and renderer
 * - `translation`: Memoized translation:
 *   - `translation::core`: The `Translator`
 *   - `translation::cache`: Lookup cache keyed by source text
 * - `feed`: The status feed:
 *   - `feed::queue`: Bounded entry queue
 *   - `feed::reveal`: Reveal timers and clocks
 *   - `feed::render`: Rendering onto a host surface
 * - `providers`: Translation backends:
 *   - `providers::edge`: Token + translate HTTP client
 *   - `providers::mock`: In-process mock backend
 * - `language_utils`: Language tag utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod feed;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FeedMessage};
pub use errors::{AppError, ProviderError};
pub use feed::{FeedEntry, FeedRenderer, RenderSurface, StatusFeed};
pub use providers::TranslationBackend;
pub use translation::{TRANSLATION_FAILED, Translator};
