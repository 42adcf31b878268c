/*!
 * Bounded status feed.
 *
 * Entries are appended once their translation has resolved and the oldest
 * entry is dropped whenever the feed grows past its capacity.
 */

use std::collections::VecDeque;
use std::sync::Arc;
use parking_lot::Mutex;
use log::debug;

use crate::translation::Translator;
use crate::translation::cache::truncate_text;
use super::reveal::{DEFAULT_REVEAL_SPEED, RevealState, RevealTimer};

/// Maximum number of entries kept on screen
pub const DEFAULT_CAPACITY: usize = 3;

/// Label in front of the translated line
pub const DEFAULT_TRANSLATED_LABEL: &str = "译";

/// Build the two-line display string for a message
pub fn compose_display_text(original: &str, translated: &str, label: &str) -> String {
    format!("{}\n[{}: {}]", original, label, translated)
}

/// One message in the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    text: String,
    important: bool,
    timer: RevealTimer,
}

impl FeedEntry {
    /// Create an entry whose timer has not started
    pub fn new(text: impl Into<String>, important: bool, reveal_speed: f64) -> Self {
        Self {
            text: text.into(),
            important,
            timer: RevealTimer::new(reveal_speed),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_important(&self) -> bool {
        self.important
    }

    pub fn timer(&self) -> &RevealTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut RevealTimer {
        &mut self.timer
    }

    /// Physical lines of the display string
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Length of the whole display string in characters, newlines included
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn state(&self, now: u64) -> RevealState {
        self.timer.state(self.char_len(), now)
    }

    pub fn is_complete(&self, now: u64) -> bool {
        self.timer.is_complete(self.char_len(), now)
    }
}

/// Options for a status feed
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Maximum number of entries kept
    pub capacity: usize,

    /// Characters revealed per millisecond for new entries
    pub reveal_speed: f64,

    /// Label in front of the translated line
    pub translated_label: String,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            reveal_speed: DEFAULT_REVEAL_SPEED,
            translated_label: DEFAULT_TRANSLATED_LABEL.to_string(),
        }
    }
}

/// Capacity-bounded, insertion-ordered feed of translated messages
pub struct StatusFeed {
    translator: Arc<Translator>,
    entries: Mutex<VecDeque<FeedEntry>>,
    options: FeedOptions,
}

impl StatusFeed {
    pub fn new(translator: Arc<Translator>, options: FeedOptions) -> Self {
        let capacity = options.capacity.max(1);
        Self {
            translator,
            entries: Mutex::new(VecDeque::with_capacity(capacity + 1)),
            options: FeedOptions { capacity, ..options },
        }
    }

    /// Translate `text` and append it to the feed.
    ///
    /// The entry is inserted only after its own translation resolves, so
    /// concurrent publishes land in the order their translations finish.
    pub async fn publish(&self, text: &str, important: bool) {
        let translated = self.translator.translate(text).await;
        let display = compose_display_text(text, &translated, &self.options.translated_label);
        self.push_entry(FeedEntry::new(display, important, self.options.reveal_speed));
    }

    /// Append an already composed entry, evicting the oldest beyond capacity
    pub fn push_entry(&self, entry: FeedEntry) {
        let mut entries = self.entries.lock();
        entries.push_back(entry);

        while entries.len() > self.options.capacity {
            if let Some(evicted) = entries.pop_front() {
                debug!("Evicted feed entry '{}'", truncate_text(evicted.text(), 30));
            }
        }
    }

    /// Remove every entry. In-flight translations are not affected.
    pub fn clear(&self) {
        self.entries.lock().clear();
        debug!("Status feed cleared");
    }

    /// Copy of the entries, oldest first
    pub fn entries(&self) -> Vec<FeedEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Run `f` over the entries, oldest first, with the feed locked
    pub(crate) fn with_entries<R>(&self, f: impl FnOnce(&mut VecDeque<FeedEntry>) -> R) -> R {
        let mut entries = self.entries.lock();
        f(&mut entries)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.options.capacity
    }

    pub fn translator(&self) -> &Arc<Translator> {
        &self.translator
    }
}
