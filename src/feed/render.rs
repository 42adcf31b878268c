/*!
 * Feed rendering.
 *
 * Entries are drawn oldest first. Drawing stops right after the first entry
 * that has not finished revealing, so a newer message never shows up before
 * an older one is fully visible.
 */

use std::sync::Arc;

use super::queue::{FeedEntry, StatusFeed};
use super::reveal::{Clock, take_chars};

/// Font selection offered by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Font of the original-language line
    Primary,
    /// Font of the translated line
    Secondary,
}

/// Color selection offered by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedColor {
    Default,
    Important,
}

/// Drawing primitives the feed needs from its host
pub trait RenderSurface {
    fn draw_text(&mut self, content: &str, x: f32, y: f32, font: FontFace, size: f32, color: FeedColor);
}

/// Layout constants for the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedStyle {
    pub origin_x: f32,
    pub origin_y: f32,
    /// Vertical distance between consecutive entries
    pub entry_spacing: f32,
    pub primary_font_size: f32,
    pub secondary_font_size: f32,
    /// Horizontal indent of every line after the first
    pub secondary_indent: f32,
    /// Extra downward shift of every line after the first
    pub secondary_offset: f32,
    /// Vertical advance after each line
    pub line_advance: f32,
}

impl Default for FeedStyle {
    fn default() -> Self {
        Self {
            origin_x: 20.0,
            origin_y: 30.0,
            entry_spacing: 45.0,
            primary_font_size: 18.0,
            secondary_font_size: 16.0,
            secondary_indent: 10.0,
            secondary_offset: 5.0,
            line_advance: 20.0,
        }
    }
}

/// Outcome of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Entries drawn this frame
    pub drawn_entries: usize,
    /// Whether every entry in the feed is fully revealed
    pub all_complete: bool,
}

/// Draws a `StatusFeed` onto a `RenderSurface`
pub struct FeedRenderer {
    style: FeedStyle,
    clock: Arc<dyn Clock>,
}

impl FeedRenderer {
    pub fn new(style: FeedStyle, clock: Arc<dyn Clock>) -> Self {
        Self { style, clock }
    }

    pub fn style(&self) -> &FeedStyle {
        &self.style
    }

    /// Draw one frame of the feed
    pub fn render(&self, feed: &StatusFeed, surface: &mut dyn RenderSurface) -> RenderStats {
        let now = self.clock.now_millis();

        feed.with_entries(|entries| {
            let mut stats = RenderStats { drawn_entries: 0, all_complete: true };

            for (index, entry) in entries.iter_mut().enumerate() {
                let y = self.style.origin_y + index as f32 * self.style.entry_spacing;
                let complete = self.draw_entry(entry, self.style.origin_x, y, now, surface);
                stats.drawn_entries += 1;

                if !complete {
                    stats.all_complete = false;
                    break;
                }
            }

            stats
        })
    }

    /// Draw a single entry at `(x, y)`, starting its timer if needed.
    ///
    /// Every line is cut against the same revealed-character count.
    /// Returns whether the entry is fully revealed.
    pub fn draw_entry(&self, entry: &mut FeedEntry, x: f32, y: f32, now: u64, surface: &mut dyn RenderSurface) -> bool {
        entry.timer_mut().trigger(now);

        let color = if entry.is_important() { FeedColor::Important } else { FeedColor::Default };
        let revealed = entry.timer().revealed_chars(now);
        let mut current_y = y;

        for (line_index, line) in entry.lines().enumerate() {
            let (line_x, font, size) = if line_index == 0 {
                (x, FontFace::Primary, self.style.primary_font_size)
            } else {
                current_y += self.style.secondary_offset;
                (x + self.style.secondary_indent, FontFace::Secondary, self.style.secondary_font_size)
            };

            surface.draw_text(take_chars(line, revealed), line_x, current_y, font, size, color);
            current_y += self.style.line_advance;
        }

        entry.is_complete(now)
    }
}

/// A draw call recorded by `TextSurface`
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub content: String,
    pub x: f32,
    pub y: f32,
    pub font: FontFace,
    pub size: f32,
    pub color: FeedColor,
}

/// Surface that records draw calls for later inspection or printing
#[derive(Debug, Default)]
pub struct TextSurface {
    calls: Vec<DrawCall>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drop recorded calls before the next frame
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// Recorded text, one draw call per line
    pub fn to_text(&self) -> String {
        self.calls.iter()
            .map(|call| {
                let indent = if call.font == FontFace::Secondary { "  " } else { "" };
                let marker = if call.color == FeedColor::Important { "!" } else { " " };
                format!("{}{}{}", marker, indent, call.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl RenderSurface for TextSurface {
    fn draw_text(&mut self, content: &str, x: f32, y: f32, font: FontFace, size: f32, color: FeedColor) {
        self.calls.push(DrawCall {
            content: content.to_string(),
            x,
            y,
            font,
            size,
            color,
        });
    }
}
