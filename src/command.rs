//! Command-line vocabulary used throughout movescreen.
//!
//! [`Direction`] names where a target should go, [`Mode`] how it gets
//! there, and [`Target`] what is being moved.  [`Invocation::parse`] turns
//! the raw argument list into these types.

use std::fmt;
use std::str::FromStr;

/// Where to send a window, relative to the monitor it is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    /// Next monitor in reading order, wrapping around.
    Next,
    /// Previous monitor in reading order, wrapping around.
    Prev,
    /// Stay on the current monitor and shrink/move to fit inside it.
    Fit,
}

impl Direction {
    pub const ALL: [Direction; 7] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::Next,
        Direction::Prev,
        Direction::Fit,
    ];

    /// Whether moving in this direction shifts the x / y coordinate in
    /// translate mode.
    pub fn axes(&self) -> (bool, bool) {
        match self {
            Direction::Left | Direction::Right => (true, false),
            Direction::Up | Direction::Down => (false, true),
            Direction::Next | Direction::Prev => (true, true),
            Direction::Fit => (false, false),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Next => write!(f, "next"),
            Direction::Prev => write!(f, "prev"),
            Direction::Fit => write!(f, "fit"),
        }
    }
}

impl FromStr for Direction {
    type Err = UsageError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "next" => Ok(Direction::Next),
            "prev" => Ok(Direction::Prev),
            "fit" => Ok(Direction::Fit),
            _ => Err(UsageError::BadDirection(s.to_string())),
        }
    }
}

/// How position and size are carried over to the destination monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Shift by the offset between monitor origins; size unchanged.
    #[default]
    Translate,
    /// Scale position and size by the ratio of the monitor dimensions.
    Ratio,
}

/// A single transform request: direction plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub direction: Direction,
    pub mode: Mode,
}

/// What a request applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The mouse pointer.
    Mouse,
    /// The currently focused window.
    Active,
    /// A window identifier as the display server spells it (e.g. `0x3a00007`).
    Window(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Mouse => write!(f, "mouse"),
            Target::Active => write!(f, "active window"),
            Target::Window(id) => write!(f, "window {}", id),
        }
    }
}

impl FromStr for Target {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mouse" | "m" => Ok(Target::Mouse),
            "active" | "a" => Ok(Target::Active),
            id if is_window_id(id) => Ok(Target::Window(id.to_string())),
            _ => Err(UsageError::BadTarget(s.to_string())),
        }
    }
}

/// Accept `0x`-prefixed hexadecimal or plain decimal identifiers.
fn is_window_id(s: &str) -> bool {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub request: Request,
    /// Never empty; defaults to `[Target::Active]`.
    pub targets: Vec<Target>,
    /// Compute and log placements without touching any window.
    pub dry_run: bool,
}

impl Invocation {
    /// Parse the arguments following the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ratio = false;
        let mut dry_run = false;
        let mut direction = None;
        let mut targets = Vec::new();

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => return Err(UsageError::Help),
                "-r" | "--ratio" if direction.is_none() => ratio = true,
                "-n" | "--dry-run" if direction.is_none() => dry_run = true,
                flag if flag.starts_with('-') && direction.is_none() => {
                    return Err(UsageError::UnknownFlag(flag.to_string()))
                }
                _ if direction.is_none() => direction = Some(arg.parse::<Direction>()?),
                _ => targets.push(arg.parse::<Target>()?),
            }
        }

        let direction = direction.ok_or(UsageError::MissingDirection)?;
        if targets.is_empty() {
            targets.push(Target::Active);
        }
        let mode = if ratio { Mode::Ratio } else { Mode::Translate };

        Ok(Self {
            request: Request { direction, mode },
            targets,
            dry_run,
        })
    }
}

/// One-line usage text for `--help` and argument errors.
pub fn usage(program: &str) -> String {
    let dirs: Vec<String> = Direction::ALL.iter().map(|d| d.to_string()).collect();
    format!(
        "usage: {} [-r] [-n] <{}> [mouse|m|active|a|<window id>]...",
        program,
        dirs.join("|")
    )
}

/// A malformed command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("help requested")]
    Help,
    #[error("missing direction")]
    MissingDirection,
    #[error("invalid direction: {0:?}")]
    BadDirection(String),
    #[error("invalid target: {0:?} (expected mouse, active or a window id)")]
    BadTarget(String),
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display_roundtrips() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn direction_parse_is_case_insensitive() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" NEXT ".parse::<Direction>(), Ok(Direction::Next));
    }

    #[test]
    fn bad_direction_rejected() {
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(UsageError::BadDirection("sideways".into()))
        );
    }

    #[test]
    fn direction_axes() {
        assert_eq!(Direction::Left.axes(), (true, false));
        assert_eq!(Direction::Down.axes(), (false, true));
        assert_eq!(Direction::Prev.axes(), (true, true));
        assert_eq!(Direction::Fit.axes(), (false, false));
    }

    #[test]
    fn target_aliases() {
        assert_eq!("m".parse::<Target>(), Ok(Target::Mouse));
        assert_eq!("mouse".parse::<Target>(), Ok(Target::Mouse));
        assert_eq!("a".parse::<Target>(), Ok(Target::Active));
        assert_eq!("active".parse::<Target>(), Ok(Target::Active));
    }

    #[test]
    fn target_window_ids() {
        assert_eq!(
            "0x3a00007".parse::<Target>(),
            Ok(Target::Window("0x3a00007".into()))
        );
        assert_eq!(
            "12345".parse::<Target>(),
            Ok(Target::Window("12345".into()))
        );
        assert!("0x".parse::<Target>().is_err());
        assert!("0xzz".parse::<Target>().is_err());
        assert!("firefox".parse::<Target>().is_err());
    }

    #[test]
    fn parse_defaults_to_active_translate() {
        let inv = Invocation::parse(["right"]).unwrap();
        assert_eq!(
            inv.request,
            Request {
                direction: Direction::Right,
                mode: Mode::Translate
            }
        );
        assert_eq!(inv.targets, vec![Target::Active]);
        assert!(!inv.dry_run);
    }

    #[test]
    fn parse_flags_and_targets() {
        let args = ["-r", "-n", "next", "m", "0x10", "a"];
        let inv = Invocation::parse(args).unwrap();
        assert_eq!(inv.request.direction, Direction::Next);
        assert_eq!(inv.request.mode, Mode::Ratio);
        assert!(inv.dry_run);
        assert_eq!(
            inv.targets,
            vec![Target::Mouse, Target::Window("0x10".into()), Target::Active]
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Invocation::parse(Vec::<String>::new()),
            Err(UsageError::MissingDirection)
        );
        assert_eq!(Invocation::parse(["-r"]), Err(UsageError::MissingDirection));
        assert_eq!(
            Invocation::parse(["-x", "left"]),
            Err(UsageError::UnknownFlag("-x".into()))
        );
        assert_eq!(Invocation::parse(["--help"]), Err(UsageError::Help));
        assert!(matches!(
            Invocation::parse(["left", "nope"]),
            Err(UsageError::BadTarget(_))
        ));
    }

    #[test]
    fn usage_lists_directions() {
        let text = usage("movescreen");
        assert!(text.contains("left|right|up|down|next|prev|fit"));
    }
}
