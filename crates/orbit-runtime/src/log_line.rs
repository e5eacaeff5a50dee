#![forbid(unsafe_code)]

//! Breadcrumb row for levels that no longer fit.
//!
//! When more groups are open than the animation shows, the outermost ones
//! are summarised on a single row, oldest first, separated by
//! [`SEPARATOR`]. At most [`LOG_LINE_CAPACITY`] segments are kept; beyond
//! that the oldest are dropped.
//!
//! Log writers replace the items from their own threads while the timer
//! lays the row out, so the segment array sits behind its own short lock,
//! separate from the screen lock.
//!
//! Segment positions are recomputed only when the items changed or the
//! width differs from the last layout.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use orbit_text::{display_width, truncate_with_ellipsis};
use smallvec::SmallVec;

pub const LOG_LINE_CAPACITY: usize = 6;

pub const SEPARATOR: &str = " › ";
const SEPARATOR_WIDTH: usize = 3;

/// One segment of the row, in columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSegment {
    pub start: usize,
    pub length: usize,
    pub text: Arc<str>,
}

pub type Segments = SmallVec<[LogSegment; LOG_LINE_CAPACITY]>;

#[derive(Debug, Default)]
struct State {
    segments: Segments,
    dirty: bool,
    width: usize,
}

#[derive(Debug, Default)]
pub struct LogLine {
    state: Mutex<State>,
}

impl LogLine {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the items, keeping the newest [`LOG_LINE_CAPACITY`].
    ///
    /// Marks the row dirty only when the texts actually changed.
    pub fn set_items<I>(&self, items: I)
    where
        I: IntoIterator<Item = Arc<str>>,
    {
        let items: Vec<Arc<str>> = items.into_iter().collect();
        let keep = &items[items.len().saturating_sub(LOG_LINE_CAPACITY)..];
        let mut state = self.lock();
        let same = state.segments.len() == keep.len()
            && state
                .segments
                .iter()
                .zip(keep)
                .all(|(seg, text)| seg.text == *text);
        if same {
            return;
        }
        state.segments = keep
            .iter()
            .map(|text| LogSegment {
                start: 0,
                length: 0,
                text: Arc::clone(text),
            })
            .collect();
        state.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    pub fn len(&self) -> usize {
        self.lock().segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().segments.is_empty()
    }

    /// Segments positioned for `width` columns.
    pub fn layout(&self, width: usize) -> Segments {
        let mut state = self.lock();
        if state.dirty || state.width != width {
            position(&mut state.segments, width);
            state.dirty = false;
            state.width = width;
        }
        state.segments.clone()
    }

    /// The row as text, at most `width` columns wide.
    pub fn render(&self, width: usize) -> String {
        let segments = self.layout(width);
        let mut row = String::with_capacity(width);
        let mut col = 0;
        for (i, seg) in segments.iter().enumerate() {
            if i > 0 {
                row.push_str(SEPARATOR);
                col += SEPARATOR_WIDTH;
            }
            if seg.start > col {
                row.extend(std::iter::repeat_n(' ', seg.start - col));
                col = seg.start;
            }
            let text = truncate_with_ellipsis(&seg.text, seg.length);
            col += display_width(&text);
            row.push_str(&text);
        }
        row
    }
}

/// Share `width` among the segments; narrow segments keep their natural width.
fn position(segments: &mut [LogSegment], width: usize) {
    if segments.is_empty() {
        return;
    }
    let separators = SEPARATOR_WIDTH * (segments.len() - 1);
    let mut available = width.saturating_sub(separators);
    let natural: SmallVec<[usize; LOG_LINE_CAPACITY]> =
        segments.iter().map(|s| display_width(&s.text)).collect();

    let mut lengths: SmallVec<[Option<usize>; LOG_LINE_CAPACITY]> =
        SmallVec::from_elem(None, segments.len());
    // Settle the segments that fit in a fair share, then split what is left.
    loop {
        let open: SmallVec<[usize; LOG_LINE_CAPACITY]> =
            (0..segments.len()).filter(|&i| lengths[i].is_none()).collect();
        if open.is_empty() {
            break;
        }
        let share = available / open.len();
        let mut settled = false;
        for &i in &open {
            if natural[i] <= share {
                lengths[i] = Some(natural[i]);
                available -= natural[i];
                settled = true;
            }
        }
        if !settled {
            let mut extra = available % open.len();
            for &i in &open {
                let bonus = usize::from(extra > 0);
                extra -= bonus;
                lengths[i] = Some(share + bonus);
            }
            break;
        }
    }

    let mut start = 0;
    for (seg, length) in segments.iter_mut().zip(lengths) {
        seg.start = start;
        seg.length = length.unwrap_or(0);
        start += seg.length + SEPARATOR_WIDTH;
    }
}
