//! [`WindowManager`] implementation backed by the X11 command-line tools.
//!
//! Each query or action runs one short-lived child process and waits for
//! it.  There is no timeout: a hung tool hangs the invocation.

use super::parse::{self, ParseError};
use crate::geometry::{MonitorInfo, Rect, WindowGeometry, WindowState};
use crate::traits::WindowManager;
use log::debug;
use std::process::Command;

/// X11 backend driving `xrandr`, `xprop`, `xwininfo`, `xdotool` and
/// `wmctrl`.
pub struct XTools;

/// Errors that can occur when talking to the X11 tools.
#[derive(Debug, thiserror::Error)]
pub enum XToolsError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Default for XTools {
    fn default() -> Self {
        Self
    }
}

impl XTools {
    /// Create a new handle.  Nothing is spawned until a method is called.
    pub fn new() -> Self {
        Self
    }
}

//  Process helpers

/// Run `program` with `args` and return its stdout.
fn run(program: &'static str, args: &[&str]) -> Result<String, XToolsError> {
    debug!("{} {}", program, args.join(" "));
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| XToolsError::Spawn { program, source })?;
    if !output.status.success() {
        return Err(XToolsError::Failed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a `wmctrl` action on window `id`.
fn wmctrl(id: &str, action: &[&str]) -> Result<(), XToolsError> {
    let mut args = vec!["-i", "-r", id];
    args.extend_from_slice(action);
    run("wmctrl", &args).map(|_| ())
}

//  Argument builders

/// `xdotool` arguments warping the pointer to `(x, y)`.
fn mousemove_args(x: i32, y: i32) -> [String; 4] {
    // `--` so negative coordinates are not taken for options.
    ["mousemove".into(), "--".into(), x.to_string(), y.to_string()]
}

/// `wmctrl -e` value: gravity 0, then origin and size.
fn move_resize_arg(rect: Rect) -> String {
    format!("0,{},{},{},{}", rect.x, rect.y, rect.width, rect.height)
}

/// `wmctrl -b` value.  wmctrl handles `add`/`remove` poorly; toggle is
/// reliable.
fn toggle_arg(state: WindowState) -> String {
    format!("toggle,{}", state.as_str())
}

//  WindowManager implementation

impl WindowManager for XTools {
    type Error = XToolsError;

    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error> {
        Ok(parse::monitors(&run("xrandr", &[])?))
    }

    fn active_window(&self) -> Result<String, Self::Error> {
        let out = run("xprop", &["-root", "_NET_ACTIVE_WINDOW"])?;
        Ok(parse::active_window(&out)?)
    }

    fn window(&self, id: &str) -> Result<Option<WindowGeometry>, Self::Error> {
        let out = run("xwininfo", &["-id", id, "-all"])?;
        Ok(parse::window(&out)?)
    }

    fn pointer(&self) -> Result<(i32, i32), Self::Error> {
        let out = run("xdotool", &["getmouselocation"])?;
        Ok(parse::mouse_location(&out)?)
    }

    fn move_pointer(&self, x: i32, y: i32) -> Result<(), Self::Error> {
        let args = mousemove_args(x, y);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run("xdotool", &args).map(|_| ())
    }

    fn set_geometry(&self, id: &str, rect: Rect) -> Result<(), Self::Error> {
        wmctrl(id, &["-e", &move_resize_arg(rect)])
    }

    fn toggle_state(&self, id: &str, state: WindowState) -> Result<(), Self::Error> {
        wmctrl(id, &["-b", &toggle_arg(state)])
    }
}
