#![forbid(unsafe_code)]

//! Live-update runtime: nested progress lines, the animation timer and the
//! [`Console`] facade that interleaves them with ordinary output.

pub mod animation;
pub mod console;
pub mod dynamic_line;
pub mod log_line;
pub mod sink;
pub mod timer;

pub use animation::{Animation, AnimationOptions, Visibility};
pub use console::Console;
pub use dynamic_line::{DynamicLine, DynamicLines, LineSnapshot, VisibleLines};
pub use log_line::{LOG_LINE_CAPACITY, LogLine, LogSegment};
pub use sink::SharedSink;
pub use timer::{StopSignal, StopTrigger, Ticker};
