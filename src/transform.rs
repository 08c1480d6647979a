//! Geometry transformer.
//!
//! Given the monitor layout, its [`AdjacencyMap`] and a window, compute
//! where the window ends up.  Nothing here talks to the display server;
//! [`transform`] is a pure function of its inputs.

use crate::command::{Direction, Mode, Request};
use crate::geometry::{intersection_area, Rect, WindowGeometry};
use crate::topology::AdjacencyMap;
use log::{debug, warn};

/// The outcome of a transform: new client-relative origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index of the monitor the window was on.
    pub source: usize,
    /// Index of the monitor the window goes to.
    pub destination: usize,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height, self.x, self.y)
    }
}

/// Why a window could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("no monitor contains the target")]
    NoMonitor,
    #[error("no monitor {direction} of monitor {monitor}")]
    NoNeighbor { direction: Direction, monitor: usize },
}

/// Index of the monitor sharing the most area with `window`.
///
/// Ties go to the first monitor.  `None` if the window overlaps no monitor.
pub fn locate(monitors: &[Rect], window: &Rect) -> Option<usize> {
    let mut best = None;
    let mut best_area = 0;
    for (idx, monitor) in monitors.iter().enumerate() {
        let area = intersection_area(window, monitor);
        if area > best_area {
            best = Some(idx);
            best_area = area;
        }
    }
    best
}

/// Compute the placement of `window` after applying `request`.
pub fn transform(
    map: &AdjacencyMap,
    monitors: &[Rect],
    window: &WindowGeometry,
    request: Request,
) -> Result<Placement, TransformError> {
    let source = locate(monitors, &window.rect()).ok_or(TransformError::NoMonitor)?;
    let destination = map
        .get(request.direction, source)
        .ok_or(TransformError::NoNeighbor {
            direction: request.direction,
            monitor: source,
        })?;
    let src = &monitors[source];
    let dst = &monitors[destination];
    debug!(
        "{} from monitor {} ({}) to monitor {} ({})",
        request.direction, source, src, destination, dst
    );

    let (x, y, width, height) = match (request.direction, request.mode) {
        (Direction::Fit, mode) => {
            if mode == Mode::Ratio {
                warn!("ratio mode has no effect with fit, ignoring");
            }
            fit(dst, window)
        }
        (dir, Mode::Translate) => translate(src, dst, window, dir),
        (_, Mode::Ratio) => scale(src, dst, window),
    };

    Ok(Placement {
        source,
        destination,
        x: to_i32(x),
        y: to_i32(y),
        width: to_u32(width),
        height: to_u32(height),
    })
}

/// Shrink and shift the window until it lies inside `dst`, decorations
/// included.
fn fit(dst: &Rect, window: &WindowGeometry) -> (i64, i64, i64, i64) {
    let (ox, oy) = window.origin();
    let bx = window.border_x as i64;
    let by = window.border_y as i64;
    let (dx, dy) = (dst.x as i64, dst.y as i64);
    let (dw, dh) = (dst.width as i64, dst.height as i64);

    let w = (window.width as i64).min(dw - 2 * bx).max(1);
    let h = (window.height as i64).min(dh - bx - by).max(1);
    // Lower bound last: with oversized borders the upper bound can fall
    // below the monitor origin.
    let x = ox.min(dx + dw - w - 2 * bx).max(dx);
    let y = oy.min(dy + dh - h - by - bx).max(dy);
    (x, y, w, h)
}

/// Shift by the offset between monitor origins along the direction's axes.
fn translate(
    src: &Rect,
    dst: &Rect,
    window: &WindowGeometry,
    dir: Direction,
) -> (i64, i64, i64, i64) {
    let (ox, oy) = window.origin();
    let (along_x, along_y) = dir.axes();
    let x = if along_x { ox + dst.x as i64 - src.x as i64 } else { ox };
    let y = if along_y { oy + dst.y as i64 - src.y as i64 } else { oy };
    (x, y, window.width as i64, window.height as i64)
}

/// Rescale position (relative to the monitor origin) and size by the
/// ratio of monitor dimensions, each axis on its own.
fn scale(src: &Rect, dst: &Rect, window: &WindowGeometry) -> (i64, i64, i64, i64) {
    let (ox, oy) = window.origin();
    let (sw, sh) = (src.width as i64, src.height as i64);
    let (dw, dh) = (dst.width as i64, dst.height as i64);

    let x = ratio_round(ox - src.x as i64, dw, sw) + dst.x as i64;
    let y = ratio_round(oy - src.y as i64, dh, sh) + dst.y as i64;
    let w = ratio_round(window.width as i64, dw, sw).max(1);
    let h = ratio_round(window.height as i64, dh, sh).max(1);
    (x, y, w, h)
}

/// `value * num / den` rounded half up.  `den` must be positive.
pub fn ratio_round(value: i64, num: i64, den: i64) -> i64 {
    (2 * value * num + den).div_euclid(2 * den)
}

fn to_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn to_u32(v: i64) -> u32 {
    v.clamp(1, u32::MAX as i64) as u32
}
