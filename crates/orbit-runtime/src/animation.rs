#![forbid(unsafe_code)]

//! Live region: a header block plus the stack of in-progress log lines.
//!
//! # States
//!
//! - **Hidden**: no timer, cursor visible, nothing reserved on screen.
//! - **Visible**: timer armed, cursor hidden. The region starts at the
//!   cursor row and every frame returns the cursor to column 1 of that row,
//!   so output written "above" lands where the region was.
//!
//! # Redraw policy
//!
//! Each tick samples the screen width; a change erases the region and forces
//! a full repaint. The header is repainted only when a different header node
//! was set (identity, not equality) or after a resize; otherwise the cursor
//! just skips over it. Dynamic lines are repainted every frame, capped at
//! `max_depth` rows; when more levels are open the oldest fold into one
//! breadcrumb row, which counts toward the cap. Rows left over from a taller
//! previous frame are erased.
//!
//! # Locking
//!
//! One screen lock covers show, hide, frame drawing and interleaved output.
//! Log events only touch [`DynamicLines`] and its breadcrumb, never wait
//! for a frame.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use orbit_core::config::{ConsoleConfig, DEFAULT_MAX_DEPTH, DEFAULT_TICK};
use orbit_core::geometry::Padding;
use orbit_core::screen_size::ScreenSize;
use orbit_render::ansi::EraseMode;
use orbit_render::{RenderCaps, RenderTarget};
use orbit_style::{ConsoleColor, Effect, TextStyle};
use orbit_widgets::Renderable;

use crate::dynamic_line::{DynamicLines, LineSnapshot};
use crate::timer::Ticker;

const GROUP_MARKER: &str = "▸";
const LINE_MARKER: &str = "·";
const TIMER_THREAD: &str = "orbit-animation";

fn group_style() -> TextStyle {
    TextStyle::with_effect(Effect::BOLD)
}

fn breadcrumb_style() -> TextStyle {
    TextStyle::fore(ConsoleColor::DarkGray)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Timer period; `None` means frames are drawn only by [`Animation::tick`].
    pub tick: Option<Duration>,
    /// Most dynamic rows in a frame, breadcrumb included.
    pub max_depth: usize,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            tick: Some(DEFAULT_TICK),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AnimationOptions {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            tick: config.animation.then_some(config.tick),
            max_depth: config.max_depth.max(1),
        }
    }

    /// No timer thread.
    pub fn manual(max_depth: usize) -> Self {
        Self {
            tick: None,
            max_depth: max_depth.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

struct Screen<W: Write> {
    target: RenderTarget<W>,
    visibility: Visibility,
    header: Option<Renderable>,
    painted_header: Option<Renderable>,
    header_rows: usize,
    /// Rows the last frame occupied.
    painted_rows: usize,
    width: usize,
    ticker: Option<Ticker>,
}

struct Shared<W: Write> {
    screen: Mutex<Screen<W>>,
    lines: DynamicLines,
    size: Arc<dyn ScreenSize>,
}

/// The live-update engine for one output stream.
///
/// Dropping the animation hides it.
pub struct Animation<W: Write + Send + 'static> {
    shared: Arc<Shared<W>>,
    tick: Option<Duration>,
}

impl<W: Write + Send + 'static> Animation<W> {
    pub fn new(out: W, caps: RenderCaps, size: Arc<dyn ScreenSize>, options: AnimationOptions) -> Self {
        let screen = Screen {
            target: RenderTarget::new(out, caps),
            visibility: Visibility::Hidden,
            header: None,
            painted_header: None,
            header_rows: 0,
            painted_rows: 0,
            width: usize::from(size.columns()),
            ticker: None,
        };
        Self {
            shared: Arc::new(Shared {
                screen: Mutex::new(screen),
                lines: DynamicLines::with_row_cap(options.max_depth),
                size,
            }),
            tick: options.tick,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.shared.lock().visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }

    /// Current screen width in columns.
    pub fn columns(&self) -> usize {
        self.shared.columns()
    }

    pub fn lines(&self) -> &DynamicLines {
        &self.shared.lines
    }

    /// Number of open groups.
    pub fn depth(&self) -> usize {
        self.shared.lines.depth()
    }

    /// Replace the header. Takes effect on the next frame.
    pub fn set_header(&self, header: Option<Renderable>) {
        self.shared.lock().header = header.filter(|h| !h.is_empty());
    }

    /// Hidden to Visible: hide the cursor, arm the timer, draw one frame.
    pub fn show(&self) {
        let mut screen = self.shared.lock();
        if screen.visibility == Visibility::Visible {
            return;
        }
        let width = self.shared.columns();
        orbit_core::info!(width, "animation shown");
        screen.visibility = Visibility::Visible;
        screen.width = width;
        screen.painted_header = None;
        screen.header_rows = 0;
        screen.painted_rows = 0;
        // The region owns whole rows; never paint over a partial line.
        screen.target.ensure_line_start();
        screen.target.set_cursor_visible(false);
        screen.target.set_progress(true);

        if let Some(period) = self.tick {
            let weak: Weak<Shared<W>> = Arc::downgrade(&self.shared);
            let started = Ticker::start(TIMER_THREAD, period, move || {
                if let Some(shared) = weak.upgrade() {
                    shared.tick();
                }
            });
            match started {
                Ok(ticker) => screen.ticker = Some(ticker),
                Err(_err) => {
                    orbit_core::warn!(error = %_err, "animation timer unavailable");
                }
            }
        }

        self.shared.draw(&mut screen);
        screen.target.flush();
    }

    /// Visible to Hidden: stop the timer, leave the header in the
    /// scrollback, erase the dynamic lines and restore the cursor.
    pub fn hide(&self) {
        let ticker = {
            let mut screen = self.shared.lock();
            if screen.visibility == Visibility::Hidden {
                return;
            }
            screen.visibility = Visibility::Hidden;
            let width = paint_width(self.shared.columns());
            if let Some(header) = screen.header.clone() {
                paint_block(&mut screen.target, &header.fit_to_width(width), width);
            }
            screen.target.erase_display(EraseMode::ToEnd);
            screen.target.set_progress(false);
            screen.target.set_cursor_visible(true);
            screen.target.reset_style();
            screen.target.flush();
            screen.painted_header = None;
            screen.header_rows = 0;
            screen.painted_rows = 0;
            screen.ticker.take()
        };
        // The timer may be waiting for the screen lock; join after releasing it.
        if let Some(ticker) = ticker {
            ticker.stop();
        }
        orbit_core::info!("animation hidden");
    }

    /// Record a log event, then make sure the region is shown.
    pub fn on_log(&self, text: Option<&str>, is_open_group: bool) {
        self.shared.lines.apply(text, is_open_group);
        self.show();
    }

    /// Draw one frame now, if visible.
    pub fn tick(&self) {
        self.shared.tick();
    }

    /// Write ordinary output above the live region.
    ///
    /// The region is erased, `write` runs with the target and whether the
    /// region was visible, and the region is redrawn below the new output.
    /// While visible, `write` must end on a fresh line.
    pub fn write_above<F>(&self, write: F)
    where
        F: FnOnce(&mut RenderTarget<W>, bool),
    {
        let mut screen = self.shared.lock();
        let visible = screen.visibility == Visibility::Visible;
        if visible {
            screen.target.erase_display(EraseMode::ToEnd);
        }
        write(&mut screen.target, visible);
        if visible {
            screen.painted_header = None;
            screen.header_rows = 0;
            screen.painted_rows = 0;
            self.shared.draw(&mut screen);
        }
        screen.target.flush();
    }

    /// The next frame as plain text, trailing spaces removed.
    pub fn frame_rows(&self) -> Vec<String> {
        let width = paint_width(self.shared.columns());
        let header = self.shared.lock().header.clone();
        let mut rows = Vec::new();
        if let Some(header) = header {
            rows.extend(header.fit_to_width(width).plain_rows(width));
        }
        for line in self.shared.dynamic_rows(width) {
            rows.extend(line.plain_rows(width));
        }
        for row in &mut rows {
            row.truncate(row.trim_end().len());
        }
        rows
    }

    /// Take the first write error seen on the stream, if any.
    pub fn take_error(&self) -> Option<std::io::Error> {
        self.shared.lock().target.take_error()
    }

    /// Run `f` with the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(self.shared.lock().target.writer())
    }
}

impl<W: Write + Send + 'static> Drop for Animation<W> {
    fn drop(&mut self) {
        self.hide();
    }
}

impl<W: Write> Shared<W> {
    fn lock(&self) -> MutexGuard<'_, Screen<W>> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn columns(&self) -> usize {
        usize::from(self.size.columns())
    }

    fn tick(&self) {
        let mut screen = self.lock();
        if screen.visibility == Visibility::Visible {
            self.draw(&mut screen);
            screen.target.flush();
        }
    }

    fn draw(&self, screen: &mut Screen<W>) {
        let width = self.columns();
        if width != screen.width {
            orbit_core::debug!(from = screen.width, to = width, "screen resized");
            screen.width = width;
            screen.target.erase_display(EraseMode::ToEnd);
            screen.painted_header = None;
            screen.painted_rows = 0;
        }
        let paint = paint_width(width);

        let header_changed = !same_node(screen.header.as_ref(), screen.painted_header.as_ref());
        if header_changed {
            screen.header_rows = match screen.header.clone() {
                Some(header) => paint_block(&mut screen.target, &header.fit_to_width(paint), paint),
                None => 0,
            };
            screen.painted_header = screen.header.clone();
        } else {
            screen.target.cursor_down(to_u16(screen.header_rows));
        }

        let mut rows = screen.header_rows;
        for line in self.dynamic_rows(paint) {
            rows += paint_block(&mut screen.target, &line, paint);
        }
        if rows < screen.painted_rows {
            screen.target.erase_display(EraseMode::ToEnd);
        }
        screen.painted_rows = rows;
        screen.target.cursor_up(to_u16(rows));
        orbit_core::trace!(rows, header_changed, "frame drawn");
    }

    /// Breadcrumb (when levels overflow) followed by the newest levels.
    fn dynamic_rows(&self, width: usize) -> Vec<Renderable> {
        let visible = self.lines.visible();
        let mut rows = Vec::with_capacity(visible.rows());
        if visible.breadcrumb {
            rows.push(Renderable::styled(
                &self.lines.breadcrumb().render(width),
                breadcrumb_style(),
            ));
        }
        rows.extend(visible.lines.iter().map(line_row));
        rows
    }
}

fn line_row(line: &LineSnapshot) -> Renderable {
    let first = line.text.lines().next().unwrap_or_default();
    let row = if line.is_group {
        Renderable::styled(&format!("{GROUP_MARKER} {first}"), group_style())
    } else {
        Renderable::text(&format!("{LINE_MARKER} {first}"))
    };
    let indent = u8::try_from(line.level.saturating_mul(2)).unwrap_or(u8::MAX);
    if indent == 0 {
        row
    } else {
        row.boxed(Padding::new(0, indent, 0, 0))
    }
}

/// Rows stop one column short of the edge so the terminal never auto-wraps.
fn paint_width(columns: usize) -> usize {
    columns.saturating_sub(1).max(1)
}

/// Paint every row of `tree` on its own line; returns the row count.
fn paint_block<W: Write>(target: &mut RenderTarget<W>, tree: &Renderable, width: usize) -> usize {
    for row in 0..tree.height() {
        tree.paint_row(row, width, target);
        target.set_style(&TextStyle::UNSPECIFIED);
        target.erase_line(EraseMode::ToEnd);
        target.new_line();
    }
    tree.height()
}

fn same_node(a: Option<&Renderable>, b: Option<&Renderable>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.ptr_eq(b),
        (None, None) => true,
        _ => false,
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
