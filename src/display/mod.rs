//! Display drivers and the segment encodings they render with

pub mod buffer;
pub mod ht16k33_7seg_display;
pub mod segments;

pub use buffer::{InvalidPosition, Rendered, SegmentBuffer, MAX_DIGITS};
pub use ht16k33_7seg_display::{AsyncI2C7SegDisplay, BlinkRate, DisplayMode, SyncI2C7SegDisplay};
pub use segments::Symbol;
