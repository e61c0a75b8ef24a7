//! lifts-demo — run a simulation against a file-pair interface.
//!
//! ```text
//! lifts-demo <sim-file.toml> [<interface-dir>]
//! ```
//!
//! The controller writes commands to `<interface-dir>/lifts.in` (one per
//! line) and reads messages from `<interface-dir>/lifts.out`.  Both files
//! are created fresh on startup.  Turn pacing (a wall-clock sleep per turn,
//! so a human or a slow script can keep up) lives here, not in the engine.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifts_core::{Turn, WorldDescription};
use lifts_sim::{Sim, SimObserver};
use lifts_world::World;

/// Wall-clock pause after each turn.
const TURN_PACE: Duration = Duration::from_millis(50);

/// Paces the turn loop to roughly real time for an interactive controller.
struct Pacer;

impl SimObserver for Pacer {
    fn on_turn_end(&mut self, _turn: Turn, _world: &World) {
        thread::sleep(TURN_PACE);
    }
}

fn run(sim_file: &Path, interface_dir: &Path) -> Result<()> {
    let text = fs::read_to_string(sim_file)
        .with_context(|| format!("reading sim file {}", sim_file.display()))?;
    let description: WorldDescription =
        toml::from_str(&text).context("parsing sim file")?;

    fs::create_dir_all(interface_dir)
        .with_context(|| format!("creating {}", interface_dir.display()))?;
    let in_path = interface_dir.join("lifts.in");
    let out_path = interface_dir.join("lifts.out");
    File::create(&in_path).context("creating command file")?;
    let inbound = File::open(&in_path).context("opening command file")?;
    let outbound = File::create(&out_path).context("creating message file")?;
    info!(
        commands = %in_path.display(),
        messages = %out_path.display(),
        "interface ready"
    );

    let mut sim = Sim::new(&description, inbound, outbound)?;
    let report = sim.run(&mut Pacer)?;
    let stats = report.stats;
    println!(
        "ended ({}): {} turns, {}/{} arrived, {} stranded",
        report.end, stats.turns, stats.arrived, stats.spawned, stats.stranded
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let result = match args.as_slice() {
        [sim_file] => run(sim_file, Path::new("/tmp/lifts")),
        [sim_file, interface_dir] => run(sim_file, interface_dir),
        _ => Err(anyhow!("usage: lifts-demo <sim-file.toml> [<interface-dir>]")),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
