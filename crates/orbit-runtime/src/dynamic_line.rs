#![forbid(unsafe_code)]

//! Nested in-progress log lines.
//!
//! Each nesting level is one [`DynamicLine`] node. Nodes form a singly linked
//! chain that only ever grows: a node's `next` link is published once through
//! a [`OnceLock`] and never changes afterwards. Writers on any thread update
//! the text of a node; the animation timer walks the chain and snapshots it.
//!
//! Links and depth are lock-free. The text slot is not: it sits behind a
//! per-node mutex held only long enough to swap or clone one `Arc<str>`, so a
//! reader sees either the old or the new value, never a mix.
//!
//! At most `row_cap` levels are shown. When more are open, the oldest fold
//! into the breadcrumb [`LogLine`], which the writers refresh themselves
//! under that line's own lock; the breadcrumb takes one of the capped rows.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::log_line::LogLine;

/// One nesting level.
#[derive(Debug, Default)]
pub struct DynamicLine {
    text: Mutex<Option<Arc<str>>>,
    is_group: AtomicBool,
    next: OnceLock<Arc<DynamicLine>>,
}

impl DynamicLine {
    /// Current text, if the level is in use.
    pub fn text(&self) -> Option<Arc<str>> {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether this level heads an open group.
    pub fn is_group(&self) -> bool {
        self.is_group.load(Ordering::Acquire)
    }

    /// The next deeper level, if it was ever created.
    pub fn next(&self) -> Option<&Arc<DynamicLine>> {
        self.next.get()
    }

    fn next_or_init(&self) -> &Arc<DynamicLine> {
        self.next.get_or_init(Arc::default)
    }

    fn publish(&self, text: Option<Arc<str>>, is_group: bool) {
        self.is_group.store(is_group, Ordering::Release);
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text;
    }
}

/// Point-in-time copy of one visible level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    pub level: usize,
    pub text: Arc<str>,
    pub is_group: bool,
}

/// Levels that fit under the row cap, newest last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleLines {
    /// Older levels were folded; draw [`DynamicLines::breadcrumb`] first.
    pub breadcrumb: bool,
    pub lines: Vec<LineSnapshot>,
}

impl VisibleLines {
    /// Rows this takes on screen.
    pub fn rows(&self) -> usize {
        self.lines.len() + usize::from(self.breadcrumb)
    }
}

/// The chain of levels plus the current depth.
///
/// Calls from one thread apply in call order. Across threads each update is
/// eventually visible; the chain itself is never corrupted.
#[derive(Debug)]
pub struct DynamicLines {
    head: DynamicLine,
    depth: AtomicUsize,
    row_cap: usize,
    breadcrumb: LogLine,
}

impl Default for DynamicLines {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicLines {
    /// No row cap.
    pub fn new() -> Self {
        Self::with_row_cap(usize::MAX)
    }

    /// Show at most `row_cap` rows (at least one).
    pub fn with_row_cap(row_cap: usize) -> Self {
        Self {
            head: DynamicLine::default(),
            depth: AtomicUsize::new(0),
            row_cap: row_cap.max(1),
            breadcrumb: LogLine::new(),
        }
    }

    pub fn row_cap(&self) -> usize {
        self.row_cap
    }

    /// Summary of the levels folded away by the row cap.
    pub fn breadcrumb(&self) -> &LogLine {
        &self.breadcrumb
    }

    /// Number of open groups.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Acquire)
    }

    fn level(&self, index: usize) -> &DynamicLine {
        let mut node = &self.head;
        for _ in 0..index {
            node = node.next_or_init();
        }
        node
    }

    /// Apply one log event: open a nested group, replace the current line,
    /// or close the innermost group when `text` is `None`.
    pub fn apply(&self, text: Option<&str>, is_open_group: bool) {
        match text {
            Some(text) if is_open_group => self.open_group(text),
            Some(text) => self.set_line(text),
            None => self.close_group(),
        }
    }

    /// Show `text` as a group header and descend one level.
    pub fn open_group(&self, text: &str) {
        let depth = self.depth();
        self.level(depth).publish(Some(Arc::from(text)), true);
        self.level(depth + 1).publish(None, false);
        self.depth.store(depth + 1, Ordering::Release);
        self.refresh_breadcrumb();
    }

    /// Replace the text of the line at the current depth.
    pub fn set_line(&self, text: &str) {
        let line = self.level(self.depth());
        let was_empty = line.text().is_none();
        line.publish(Some(Arc::from(text)), false);
        // The leaf is never folded; only its appearance shifts the window.
        if was_empty {
            self.refresh_breadcrumb();
        }
    }

    /// Clear the current line and close the innermost group.
    ///
    /// At depth zero this only clears the current line.
    pub fn close_group(&self) {
        let depth = self.depth();
        self.level(depth).publish(None, false);
        if depth > 0 {
            self.level(depth - 1).publish(None, false);
            self.depth.store(depth - 1, Ordering::Release);
        }
        self.refresh_breadcrumb();
    }

    /// Visible levels, outermost first.
    pub fn snapshot(&self) -> Vec<LineSnapshot> {
        let depth = self.depth();
        let mut lines = Vec::with_capacity(depth + 1);
        let mut node = Some(&self.head);
        let mut level = 0;
        while let Some(line) = node {
            if level > depth {
                break;
            }
            if let Some(text) = line.text() {
                lines.push(LineSnapshot {
                    level,
                    text,
                    is_group: line.is_group(),
                });
            }
            node = line.next().map(Arc::as_ref);
            level += 1;
        }
        lines
    }

    /// The levels to draw under the row cap.
    pub fn visible(&self) -> VisibleLines {
        let mut lines = self.snapshot();
        let (folded, breadcrumb) = fold(lines.len(), self.row_cap);
        lines.drain(..folded);
        VisibleLines { breadcrumb, lines }
    }

    fn refresh_breadcrumb(&self) {
        let lines = self.snapshot();
        let (folded, breadcrumb) = fold(lines.len(), self.row_cap);
        let hidden: &[LineSnapshot] = if breadcrumb { &lines[..folded] } else { &[] };
        self.breadcrumb
            .set_items(hidden.iter().map(|l| Arc::clone(&l.text)));
    }

    /// Close every group and clear every line.
    pub fn clear(&self) {
        let mut node = Some(&self.head);
        while let Some(line) = node {
            line.publish(None, false);
            node = line.next().map(Arc::as_ref);
        }
        self.depth.store(0, Ordering::Release);
        self.breadcrumb.set_items(std::iter::empty());
    }
}

/// Levels to drop from the front of `len`, and whether a breadcrumb row
/// stands in for them. With a cap of one there is no room for it.
fn fold(len: usize, row_cap: usize) -> (usize, bool) {
    if len <= row_cap {
        (0, false)
    } else if row_cap >= 2 {
        (len - (row_cap - 1), true)
    } else {
        (len - 1, false)
    }
}
