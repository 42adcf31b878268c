/*!
 * Typewriter reveal timing.
 *
 * A `RevealTimer` starts the first time its entry is drawn, not when the
 * entry is created, and turns elapsed milliseconds into a count of visible
 * characters.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Characters revealed per millisecond
pub const DEFAULT_REVEAL_SPEED: f64 = 0.08;

/// Monotonic millisecond time source
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary fixed origin
    fn now_millis(&self) -> u64;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self { now: AtomicU64::new(start_millis) }
    }

    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Where an entry is in its reveal animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Never drawn
    Pending,
    /// Drawn at least once, text partially visible
    Revealing,
    /// Every character visible
    Complete,
}

/// Per-entry reveal animation state
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTimer {
    triggered_at: Option<u64>,
    speed: f64,
}

impl RevealTimer {
    /// Create an untriggered timer revealing `speed` characters per millisecond
    pub fn new(speed: f64) -> Self {
        Self { triggered_at: None, speed }
    }

    /// Start the timer at `now`. Later calls keep the original trigger time.
    pub fn trigger(&mut self, now: u64) {
        if self.triggered_at.is_none() {
            self.triggered_at = Some(now);
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered_at.is_some()
    }

    pub fn triggered_at(&self) -> Option<u64> {
        self.triggered_at
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Milliseconds since the trigger, zero while pending
    pub fn elapsed(&self, now: u64) -> u64 {
        self.triggered_at.map_or(0, |start| now.saturating_sub(start))
    }

    /// Unclamped count of revealed characters
    pub fn revealed_chars(&self, now: u64) -> usize {
        (self.elapsed(now) as f64 * self.speed).floor() as usize
    }

    /// Revealed characters clamped to `total_chars`
    pub fn visible_chars(&self, total_chars: usize, now: u64) -> usize {
        self.revealed_chars(now).min(total_chars)
    }

    pub fn is_complete(&self, total_chars: usize, now: u64) -> bool {
        self.is_triggered() && self.revealed_chars(now) >= total_chars
    }

    pub fn state(&self, total_chars: usize, now: u64) -> RevealState {
        if !self.is_triggered() {
            RevealState::Pending
        } else if self.revealed_chars(now) >= total_chars {
            RevealState::Complete
        } else {
            RevealState::Revealing
        }
    }
}

impl Default for RevealTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_SPEED)
    }
}

/// First `count` characters of `text`
pub fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
