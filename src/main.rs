//! Entry point for the **movescreen** command.
//!
//! Parses the command line, reads the monitor layout once and moves every
//! requested target, exiting with the status of the first failure.

use log::{error, info, warn};
use movescreen::command::{usage, Invocation, UsageError};
use movescreen::config::Config;
use movescreen::mover::{BatchReport, MonitorMover};
use movescreen::traits::{DryRun, WindowManager};
use movescreen::x11::wm::XTools;

/// Resolve the config directory (`$XDG_CONFIG_HOME/movescreen`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("movescreen")
}

/// Try to load the config from `$XDG_CONFIG_HOME/movescreen/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) if e.is_missing() => {
            info!("no config file at {}, using defaults", path.display());
            Config::default()
        }
        Err(e) => {
            warn!("ignoring config: {}", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "movescreen".into());

    let invocation = match Invocation::parse(args) {
        Ok(inv) => inv,
        Err(UsageError::Help) => {
            println!("{}", usage(&program));
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", usage(&program));
            std::process::exit(1);
        }
    };

    let config = load_config();
    let code = if invocation.dry_run {
        run(DryRun(XTools::new()), &invocation, &config)
    } else {
        run(XTools::new(), &invocation, &config)
    };
    std::process::exit(code);
}

/// Move all targets and return the process exit status.
fn run<W: WindowManager>(wm: W, invocation: &Invocation, config: &Config) -> i32 {
    let mover = match MonitorMover::new(wm, config) {
        Ok(m) => m,
        Err(e) => {
            error!("failed to query monitors: {}", e);
            return e.exit_code();
        }
    };

    let report: BatchReport = mover.run(&invocation.targets, invocation.request);
    if report.failures() > 0 {
        error!(
            "{} of {} target(s) failed",
            report.failures(),
            report.outcomes.len()
        );
    }
    report.exit_code()
}
