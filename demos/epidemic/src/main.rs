//! epidemic: drives an epidemic session and a Schelling session side by
//! side through the session controller.
//!
//! Usage: `epidemic [session-config.json]`
//!
//! The optional file holds a `SessionConfig` (`tick_interval_ms`,
//! `clock_granularity_ms`, `seed`); missing fields keep their defaults.
//! Set `RUST_LOG=debug` to see per-tick logs.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gs_agent::Parameters;
use gs_core::SessionConfig;
use gs_epidemic::EpidemicModel;
use gs_model::{Model, SchellingModel};
use gs_sim::{SessionController, SimulationSnapshot};

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_SIDE:       i64 = 30;
const SUSCEPTIBLE:     i64 = 300;
const INFECTED:        i64 = 10;
const INFECTION_RATE:  i64 = 40;
const RECOVERY_RATE:   i64 = 8;
const MAX_STEPS:       u64 = 2_000;
const ROOT_SEED:       u64 = 42;

// ── Parameters ────────────────────────────────────────────────────────────────

fn epidemic_params() -> Result<Parameters> {
    use gs_epidemic::model::params;

    let mut p = EpidemicModel.parameter_schema();
    p.set(params::SIZE, GRID_SIDE)?;
    p.set(params::SUSCEPTIBLE, SUSCEPTIBLE)?;
    p.set(params::INFECTED, INFECTED)?;
    p.set(params::STEP_SIZE_INFECTED, 2)?;
    p.set(params::INFECTION_RATE, INFECTION_RATE)?;
    p.set(params::RECOVERY_RATE, RECOVERY_RATE)?;
    Ok(p)
}

fn schelling_params() -> Result<Parameters> {
    use gs_model::schelling::params;

    let mut p = SchellingModel.parameter_schema();
    p.set(params::SIZE, GRID_SIDE)?;
    p.set(params::AGENTS_A, 350)?;
    p.set(params::AGENTS_B, 350)?;
    p.set(params::THRESHOLD, 60)?;
    Ok(p)
}

fn load_config() -> Result<SessionConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SessionConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn print_row(label: &str, snap: &SimulationSnapshot) {
    let stats: Vec<String> = snap.statistics.iter().map(|(k, v)| format!("{k}={v:.1}")).collect();
    println!(
        "{:<10} {:>6} {:<6} {}",
        label,
        snap.tick.0,
        if snap.terminated { "over" } else { "" },
        stats.join(" "),
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config()?;
    println!("=== epidemic - gridsim sessions ===");
    println!(
        "Grid: {GRID_SIDE}x{GRID_SIDE}  |  interval {} ms, clock {} ms  |  root seed {ROOT_SEED}",
        config.tick_interval_ms, config.clock_granularity_ms,
    );
    println!();

    // 1. Register both sessions.
    let controller = SessionController::with_root_seed(ROOT_SEED);
    let epidemic = controller.create(Arc::new(EpidemicModel), &epidemic_params()?, config.clone())?;
    let schelling = controller.create(Arc::new(SchellingModel), &schelling_params()?, config)?;
    controller.start(epidemic)?;
    controller.start(schelling)?;
    info!(running = ?controller.list_running()?, "sessions started");

    // 2. Drive every running session until both are over.
    let t0 = Instant::now();
    let mut steps = 0;
    let mut last_tick = 0;
    while steps < MAX_STEPS {
        steps += 1;
        for (id, result) in controller.step_running()? {
            let snap = result.with_context(|| format!("stepping {id}"))?;
            if id == epidemic && snap.tick.0 != last_tick {
                last_tick = snap.tick.0;
                if last_tick % 10 == 0 {
                    print_row("epidemic", &snap);
                }
            }
            if snap.terminated {
                controller.pause(id)?;
            }
        }
        if controller.list_running()?.is_empty() {
            break;
        }
    }
    println!();
    println!("{steps} steps in {:.3} s", t0.elapsed().as_secs_f64());

    // 3. One more tick off the calling thread, if the epidemic is still going.
    if controller.list_running()?.contains(&epidemic) {
        controller.set_tick_interval_ms(epidemic, 0)?;
        let snap = controller.step_async(epidemic)?.wait()?;
        print_row("epidemic", &snap);
    }

    // 4. Summary.
    println!();
    println!("{:<10} {:>6} {:<6} statistics", "Session", "Tick", "State");
    println!("{}", "-".repeat(48));
    print_row("epidemic", &controller.snapshot(epidemic)?);
    print_row("schelling", &controller.snapshot(schelling)?);

    let final_epidemic = controller.snapshot(epidemic)?;
    let json = serde_json::to_string(&final_epidemic.statistics)?;
    println!();
    println!("epidemic statistics (json): {json}");

    controller.remove(epidemic)?;
    controller.remove(schelling)?;
    Ok(())
}
