//! Rectangles and window geometry.
//!
//! Everything here is in global pixel coordinates of the virtual desktop.
//! Monitors, windows and the mouse pointer are all reduced to a [`Rect`] so
//! the same arithmetic moves any of them.

use std::fmt;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Rect {
    pub fn new(width: u32, height: u32, x: i32, y: i32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// A copy of this rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: i64, dy: i64) -> Rect {
        Rect {
            x: (self.x as i64 + dx) as i32,
            y: (self.y as i64 + dy) as i32,
            ..*self
        }
    }

    /// Twice the center point, kept integral.
    pub fn double_center(&self) -> (i64, i64) {
        (
            2 * self.x as i64 + self.width as i64,
            2 * self.y as i64 + self.height as i64,
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Area shared by `a` and `b`.
///
/// Zero when the rectangles are disjoint or only share an edge.
pub fn intersection_area(a: &Rect, b: &Rect) -> u64 {
    let overlap_w = (a.right().min(b.right()) - (a.x as i64).max(b.x as i64)).max(0);
    let overlap_h = (a.bottom().min(b.bottom()) - (a.y as i64).max(b.y as i64)).max(0);
    overlap_w as u64 * overlap_h as u64
}

/// A monitor known to the display server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Output name (e.g. `"DP-1"`).  Only used for logging.
    pub name: String,
    /// Whether the display server marks this output as primary.
    pub primary: bool,
    pub rect: Rect,
}

/// Window-manager states that block geometry changes on some window
/// managers and therefore get toggled around a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowState {
    MaximizedVert,
    MaximizedHorz,
    Fullscreen,
}

impl WindowState {
    /// Name of the state as understood by `wmctrl -b`.
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowState::MaximizedVert => "maximized_vert",
            WindowState::MaximizedHorz => "maximized_horz",
            WindowState::Fullscreen => "fullscreen",
        }
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry of a top-level window (or the pointer, see
/// [`WindowGeometry::mouse_proxy`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    /// Absolute upper-left corner of the client area.
    pub abs_x: i32,
    pub abs_y: i32,
    /// Decoration insets added by the window manager.
    pub border_x: i32,
    pub border_y: i32,
    pub states: Vec<WindowState>,
}

impl WindowGeometry {
    /// A 1×1 stand-in for the pointer at `(x, y)`.
    pub fn mouse_proxy(x: i32, y: i32) -> Self {
        Self {
            width: 1,
            height: 1,
            abs_x: x,
            abs_y: y,
            border_x: 0,
            border_y: 0,
            states: Vec::new(),
        }
    }

    /// The on-screen extent used to find the containing monitor.
    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height, self.abs_x, self.abs_y)
    }

    /// Origin with the decoration insets removed; this is the coordinate the
    /// window manager expects back when the window is moved.
    pub fn origin(&self) -> (i64, i64) {
        (
            self.abs_x as i64 - self.border_x as i64,
            self.abs_y as i64 - self.border_y as i64,
        )
    }
}
