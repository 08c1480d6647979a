//! **movescreen**: move windows and the mouse pointer between monitors.
//!
//! Given the monitor rectangles, movescreen works out which monitor lies to
//! the left, right, above or below each other one (and a reading-order
//! cycle for `next`/`prev`), then relocates a window onto the neighbor,
//! optionally rescaling it, or clamps it to fit its current monitor.
//!
//! # Architecture
//!
//! Data flows one way: monitor rectangles → [`topology::AdjacencyMap`] →
//! (with the window geometry) → [`transform::Placement`].  Both steps are
//! pure.  The display server sits behind one trait:
//!
//! * [`traits::WindowManager`] reports monitors, windows and the pointer,
//!   and applies the computed placement, so the core is not coupled to any
//!   specific display server.
//!
//! The concrete implementation lives in [`x11`] (the standard X11
//! command-line tools); [`mover::MonitorMover`] drives the whole pipeline.

pub mod command;
pub mod config;
pub mod geometry;
pub mod mover;
pub mod topology;
pub mod traits;
pub mod transform;
pub mod x11;
