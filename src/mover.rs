//! The orchestrator that ties topology, transformer and window manager
//! together.
//!
//! [`MonitorMover`] queries the monitor layout once, builds the
//! [`AdjacencyMap`], and then moves each requested [`Target`] on its own:
//! one target failing never stops the others.

use crate::command::{Request, Target};
use crate::config::Config;
use crate::geometry::{MonitorInfo, Rect, WindowGeometry, WindowState};
use crate::topology::AdjacencyMap;
use crate::traits::WindowManager;
use crate::transform::{transform, Placement, TransformError};
use log::{debug, error, info, warn};

/// Possible errors when moving one target.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// The target is the desktop or another non-top-level window.
    #[error("{0} is not a top-level window")]
    NotTopLevel(String),
    /// No monitor contains the target, or none lies in the requested
    /// direction.
    #[error(transparent)]
    Transform(#[from] TransformError),
    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),
}

impl MoveError {
    /// Process exit status for this error.
    ///
    /// | code | meaning                           |
    /// |------|-----------------------------------|
    /// | 2    | not a top-level window            |
    /// | 3    | no monitor contains the target    |
    /// | 4    | no monitor in that direction      |
    /// | 5    | window manager failure            |
    pub fn exit_code(&self) -> i32 {
        match self {
            MoveError::NotTopLevel(_) => 2,
            MoveError::Transform(TransformError::NoMonitor) => 3,
            MoveError::Transform(TransformError::NoNeighbor { .. }) => 4,
            MoveError::WindowManager(_) => 5,
        }
    }
}

fn wm_error(e: impl std::error::Error) -> MoveError {
    MoveError::WindowManager(e.to_string())
}

/// Result of moving every target of one invocation.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<(Target, Result<Placement, MoveError>)>,
}

impl BatchReport {
    /// Number of targets that could not be moved.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_err()).count()
    }

    /// Exit status of the first failed target, `0` if all succeeded.
    pub fn exit_code(&self) -> i32 {
        self.outcomes
            .iter()
            .find_map(|(_, r)| r.as_ref().err())
            .map(MoveError::exit_code)
            .unwrap_or(0)
    }
}

/// Toggles window states off on creation and back on when dropped, so the
/// states are restored even if applying the geometry fails.
struct StateToggle<'a, W: WindowManager> {
    wm: &'a W,
    id: &'a str,
    toggled: Vec<WindowState>,
}

impl<'a, W: WindowManager> StateToggle<'a, W> {
    fn new(wm: &'a W, id: &'a str, states: &[WindowState]) -> Self {
        let toggled = states
            .iter()
            .copied()
            .filter(|state| match wm.toggle_state(id, *state) {
                Ok(()) => {
                    debug!("  {} off", state);
                    true
                }
                Err(e) => {
                    warn!("could not toggle {} on {}: {}", state, id, e);
                    false
                }
            })
            .collect();
        Self { wm, id, toggled }
    }
}

impl<W: WindowManager> Drop for StateToggle<'_, W> {
    fn drop(&mut self) {
        for state in &self.toggled {
            match self.wm.toggle_state(self.id, *state) {
                Ok(()) => debug!("  {} on", state),
                Err(e) => warn!("could not restore {} on {}: {}", state, self.id, e),
            }
        }
    }
}

/// Moves windows and the pointer between monitors.
///
/// Generic over any [`WindowManager`], so it runs unchanged against X11, a
/// dry-run wrapper, or a test double.
pub struct MonitorMover<W: WindowManager> {
    wm: W,
    monitors: Vec<MonitorInfo>,
    rects: Vec<Rect>,
    map: AdjacencyMap,
    toggle_states: bool,
}

impl<W: WindowManager> MonitorMover<W> {
    /// Query the monitor layout from `wm` and build its topology.
    pub fn new(wm: W, config: &Config) -> Result<Self, MoveError> {
        let monitors = wm.monitors().map_err(wm_error)?;
        info!("found {} monitor(s)", monitors.len());
        Ok(Self::with_monitors(wm, monitors, config))
    }

    /// Build a mover for an already known monitor layout.
    pub fn with_monitors(wm: W, monitors: Vec<MonitorInfo>, config: &Config) -> Self {
        let rects: Vec<Rect> = monitors.iter().map(|m| m.rect).collect();
        let map = AdjacencyMap::build(&rects, &config.topology);
        for (idx, m) in monitors.iter().enumerate() {
            debug!(
                "monitor {} {}{} {}",
                idx,
                m.name,
                if m.primary { " (primary)" } else { "" },
                m.rect
            );
        }
        Self {
            wm,
            monitors,
            rects,
            map,
            toggle_states: config.toggle_states,
        }
    }

    pub fn monitors(&self) -> &[MonitorInfo] {
        &self.monitors
    }

    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.map
    }

    /// Move every target in turn and collect the outcomes.
    pub fn run(&self, targets: &[Target], request: Request) -> BatchReport {
        let outcomes = targets
            .iter()
            .map(|target| {
                let result = self.move_target(target, request);
                match &result {
                    Ok(p) => info!(
                        "{}: monitor {} -> {}, now {}",
                        target,
                        p.source,
                        p.destination,
                        p.rect()
                    ),
                    Err(e) => error!("{}: {}", target, e),
                }
                (target.clone(), result)
            })
            .collect();
        BatchReport { outcomes }
    }

    /// Move a single target.
    pub fn move_target(&self, target: &Target, request: Request) -> Result<Placement, MoveError> {
        match target {
            Target::Mouse => self.move_pointer(request),
            Target::Active => {
                let id = self.wm.active_window().map_err(wm_error)?;
                debug!("active window is {}", id);
                self.move_window(&id, request)
            }
            Target::Window(id) => self.move_window(id, request),
        }
    }

    fn move_pointer(&self, request: Request) -> Result<Placement, MoveError> {
        let (x, y) = self.wm.pointer().map_err(wm_error)?;
        let proxy = WindowGeometry::mouse_proxy(x, y);
        let placement = transform(&self.map, &self.rects, &proxy, request)?;
        self.wm
            .move_pointer(placement.x, placement.y)
            .map_err(wm_error)?;
        Ok(placement)
    }

    fn move_window(&self, id: &str, request: Request) -> Result<Placement, MoveError> {
        let window = self
            .wm
            .window(id)
            .map_err(wm_error)?
            .ok_or_else(|| MoveError::NotTopLevel(id.to_string()))?;
        let placement = transform(&self.map, &self.rects, &window, request)?;

        let states: &[WindowState] = if self.toggle_states {
            &window.states
        } else {
            &[]
        };
        let _toggle = StateToggle::new(&self.wm, id, states);
        self.wm
            .set_geometry(id, placement.rect())
            .map_err(wm_error)?;
        Ok(placement)
    }
}

//  Tests
