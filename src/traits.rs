//! The seam between movescreen and the display server.
//!
//! Every concrete backend (the X11 command-line tools, a dry-run wrapper, a
//! test harness, …) implements [`WindowManager`].  The
//! [`MonitorMover`](crate::mover::MonitorMover) only depends on this trait.

use crate::geometry::{MonitorInfo, Rect, WindowGeometry, WindowState};
use log::info;

/// Abstraction over a display server / window manager that can report
/// monitors, windows and the pointer, and move them.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return the connected monitors, in enumeration order.
    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error>;

    /// Return the identifier of the currently focused window.
    fn active_window(&self) -> Result<String, Self::Error>;

    /// Return the geometry and state of window `id`.
    ///
    /// Returns `Ok(None)` when `id` refers to the desktop or another
    /// pseudo-window that is not a top-level window.
    fn window(&self, id: &str) -> Result<Option<WindowGeometry>, Self::Error>;

    /// Return the current pointer position.
    fn pointer(&self) -> Result<(i32, i32), Self::Error>;

    /// Warp the pointer to `(x, y)`.
    fn move_pointer(&self, x: i32, y: i32) -> Result<(), Self::Error>;

    /// Move and resize window `id`.  `rect` is the client-relative origin
    /// and size.
    fn set_geometry(&self, id: &str, rect: Rect) -> Result<(), Self::Error>;

    /// Flip `state` on window `id`.
    fn toggle_state(&self, id: &str, state: WindowState) -> Result<(), Self::Error>;
}

/// Wraps another [`WindowManager`], answering every query from it but
/// turning every mutation into a log line.
pub struct DryRun<W>(pub W);

impl<W: WindowManager> WindowManager for DryRun<W> {
    type Error = W::Error;

    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error> {
        self.0.monitors()
    }

    fn active_window(&self) -> Result<String, Self::Error> {
        self.0.active_window()
    }

    fn window(&self, id: &str) -> Result<Option<WindowGeometry>, Self::Error> {
        self.0.window(id)
    }

    fn pointer(&self) -> Result<(i32, i32), Self::Error> {
        self.0.pointer()
    }

    fn move_pointer(&self, x: i32, y: i32) -> Result<(), Self::Error> {
        info!("dry run: move pointer to {},{}", x, y);
        Ok(())
    }

    fn set_geometry(&self, id: &str, rect: Rect) -> Result<(), Self::Error> {
        info!("dry run: set {} to {}", id, rect);
        Ok(())
    }

    fn toggle_state(&self, id: &str, state: WindowState) -> Result<(), Self::Error> {
        info!("dry run: toggle {} on {}", state, id);
        Ok(())
    }
}
