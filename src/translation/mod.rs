/*!
 * Memoized translation of feed messages.
 *
 * - `core`: the `Translator` that callers share
 * - `cache`: the lookup cache keyed by source text
 */

// Re-export main types for easier usage
pub use self::cache::{CacheStats, LookupOutcome, TranslationCache};
pub use self::core::{TRANSLATION_FAILED, Translator, TranslatorOptions};

// Submodules
pub mod cache;
pub mod core;
