/*!
 * On-screen status feed.
 *
 * - `queue`: the bounded, insertion-ordered `StatusFeed`
 * - `reveal`: typewriter timing and clocks
 * - `render`: cascading rendering onto a host surface
 */

pub use self::queue::{FeedEntry, FeedOptions, StatusFeed, compose_display_text};
pub use self::render::{FeedColor, FeedRenderer, FeedStyle, FontFace, RenderStats, RenderSurface, TextSurface};
pub use self::reveal::{Clock, ManualClock, RevealState, RevealTimer, SystemClock};

pub mod queue;
pub mod render;
pub mod reveal;
