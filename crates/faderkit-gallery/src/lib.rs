//! faderkit gallery - a desktop host for every faderkit widget.
//!
//! The gallery owns all values, hands them to widgets each frame and writes
//! back what they propose. It also owns the clock that animates the
//! oscilloscope and the sequencer playhead.

pub mod app;
mod pages;
mod values;

pub use app::{GalleryApp, GallerySettings, load_config, write_config};
