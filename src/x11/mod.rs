//! X11-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`WindowManager`](crate::traits::WindowManager) trait, driving the
//! standard X11 command-line utilities (`xrandr`, `xprop`, `xwininfo`,
//! `xdotool`, `wmctrl`).
//!
//! Nothing outside this module should reference X11 directly.

pub mod parse;
pub mod wm;
