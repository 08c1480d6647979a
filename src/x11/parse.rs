//! Parsers for the text printed by the X11 utilities.
//!
//! Kept free of process handling so they can be tested against captured
//! output.

use crate::geometry::{MonitorInfo, Rect, WindowGeometry, WindowState};
use regex::Regex;
use std::sync::LazyLock;

static XRANDR_OUTPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+) connected( primary)? (\d+)x(\d+)\+(-?\d+)\+(-?\d+)")
        .expect("xrandr pattern is valid")
});

static ACTIVE_WINDOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window id # (0x[0-9a-fA-F]+)").expect("xprop pattern is valid")
});

/// Text from a tool that does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected {tool} output: {reason}")]
pub struct ParseError {
    pub tool: &'static str,
    pub reason: String,
}

impl ParseError {
    fn new(tool: &'static str, reason: impl Into<String>) -> Self {
        Self {
            tool,
            reason: reason.into(),
        }
    }
}

/// Connected, active outputs listed by `xrandr`.
///
/// Connected outputs without a mode (switched off) are skipped.
pub fn monitors(xrandr: &str) -> Vec<MonitorInfo> {
    xrandr
        .lines()
        .filter_map(|line| XRANDR_OUTPUT.captures(line))
        .filter_map(|c| {
            Some(MonitorInfo {
                name: c[1].to_string(),
                primary: c.get(2).is_some(),
                rect: Rect::new(
                    c[3].parse().ok()?,
                    c[4].parse().ok()?,
                    c[5].parse().ok()?,
                    c[6].parse().ok()?,
                ),
            })
        })
        .filter(|m| m.rect.width > 0 && m.rect.height > 0)
        .collect()
}

/// Focused window id from `xprop -root _NET_ACTIVE_WINDOW`.
pub fn active_window(xprop: &str) -> Result<String, ParseError> {
    let caps = ACTIVE_WINDOW
        .captures(xprop)
        .ok_or_else(|| ParseError::new("xprop", "no _NET_ACTIVE_WINDOW"))?;
    let id = caps[1].to_string();
    if u64::from_str_radix(&id[2..], 16).ok() == Some(0) {
        return Err(ParseError::new("xprop", "no window has focus"));
    }
    Ok(id)
}

/// Pointer position from `xdotool getmouselocation`
/// (`x:640 y:480 screen:0 window:1234`).
pub fn mouse_location(xdotool: &str) -> Result<(i32, i32), ParseError> {
    let mut x = None;
    let mut y = None;
    for field in xdotool.split_whitespace() {
        match field.split_once(':') {
            Some(("x", v)) => x = v.parse().ok(),
            Some(("y", v)) => y = v.parse().ok(),
            _ => {}
        }
    }
    match (x, y) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(ParseError::new("xdotool", format!("no position in {:?}", xdotool.trim()))),
    }
}

/// Geometry and state from `xwininfo -id <id> -all`.
///
/// Returns `Ok(None)` for a window whose type is `Desktop`.
pub fn window(xwininfo: &str) -> Result<Option<WindowGeometry>, ParseError> {
    let mut width = None;
    let mut height = None;
    let mut abs_x = None;
    let mut abs_y = None;
    let mut border_x = None;
    let mut border_y = None;
    let mut states = Vec::new();

    for line in xwininfo.lines().map(str::trim) {
        if let Some(v) = line.strip_prefix("Width:") {
            width = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix("Height:") {
            height = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix("Absolute upper-left X:") {
            abs_x = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix("Absolute upper-left Y:") {
            abs_y = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix("Relative upper-left X:") {
            border_x = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix("Relative upper-left Y:") {
            border_y = v.trim().parse().ok();
        } else {
            match line {
                "Maximized Vert" => states.push(WindowState::MaximizedVert),
                "Maximized Horz" => states.push(WindowState::MaximizedHorz),
                "Fullscreen" => states.push(WindowState::Fullscreen),
                "Desktop" => return Ok(None),
                _ => {}
            }
        }
    }

    let missing = |field: &str| ParseError::new("xwininfo", format!("missing {}", field));
    Ok(Some(WindowGeometry {
        width: width.ok_or_else(|| missing("width"))?,
        height: height.ok_or_else(|| missing("height"))?,
        abs_x: abs_x.ok_or_else(|| missing("absolute x"))?,
        abs_y: abs_y.ok_or_else(|| missing("absolute y"))?,
        border_x: border_x.ok_or_else(|| missing("relative x"))?,
        border_y: border_y.ok_or_else(|| missing("relative y"))?,
        states,
    }))
}
