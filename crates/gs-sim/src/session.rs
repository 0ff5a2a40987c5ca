//! One simulation session: a model, its state, and the stepping protocol.

use std::borrow::Borrow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::channel::oneshot;
use gs_agent::{Parameters, SpatialState};
use gs_core::{SessionConfig, SessionId, SimRng, Throttle, Tick};
use gs_model::{Model, Occupancy};
use tracing::{debug, info, warn};

use crate::{SimError, SimResult, SimulationSnapshot, TickHandle};

/// Everything a tick reads or writes.  Guarded by the session mutex.
struct Core {
    state:    SpatialState,
    rng:      SimRng,
    throttle: Throttle,
    tick:     Tick,
    is_over:  bool,
    last:     SimulationSnapshot,
}

/// A running or paused simulation.
///
/// # Stepping protocol
///
/// A step fails immediately with [`SimError::NotRunning`] while the session
/// is paused and with [`SimError::AlreadyCalculating`] while another step is
/// in flight.  Otherwise it feeds one clock increment to the throttle; only
/// when the tick interval has elapsed (and the model's exit predicate has not
/// yet held) does a model tick run.  Every successful step returns a
/// snapshot, the previous one when no tick ran.
///
/// The in-flight flag is taken with one compare-and-swap and released by a
/// guard on every exit path, including errors and panics inside the model.
pub struct Simulation {
    id:          SessionId,
    model:       Arc<dyn Model>,
    running:     AtomicBool,
    calculating: AtomicBool,
    core:        Mutex<Core>,
}

impl Simulation {
    /// Initialize `model` from `params` and wrap the result in a paused
    /// session.
    pub fn new(
        id:     SessionId,
        model:  Arc<dyn Model>,
        params: &Parameters,
        config: &SessionConfig,
        mut rng: SimRng,
    ) -> SimResult<Self> {
        config.validate()?;
        let state = model.initialize(params, &mut rng)?;
        let last = SimulationSnapshot::capture(
            id,
            Tick::ZERO,
            &state,
            Occupancy::capture(&state),
            false,
            model.statistics(&state),
        );
        info!(session = %id, model = model.id(), agents = state.len(), "session created");

        Ok(Self {
            id,
            model,
            running: AtomicBool::new(false),
            calculating: AtomicBool::new(false),
            core: Mutex::new(Core {
                state,
                rng,
                throttle: config.make_throttle(),
                tick: Tick::ZERO,
                is_over: false,
                last,
            }),
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn model_id(&self) -> &str {
        self.model.id()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn is_calculating(&self) -> bool {
        self.calculating.load(Ordering::Acquire)
    }

    pub fn start(&self) {
        if !self.running.swap(true, Ordering::AcqRel) {
            info!(session = %self.id, "session started");
        }
    }

    /// Stop ticking.  A step already in flight still completes.
    pub fn pause(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            info!(session = %self.id, "session paused");
        }
    }

    /// `true` once the model's exit predicate has held.
    pub fn is_over(&self) -> SimResult<bool> {
        Ok(self.lock()?.is_over)
    }

    pub fn tick_interval_ms(&self) -> SimResult<u64> {
        Ok(self.lock()?.throttle.interval_ms())
    }

    pub fn set_tick_interval_ms(&self, interval_ms: u64) -> SimResult<()> {
        self.lock()?.throttle.set_interval_ms(interval_ms);
        debug!(session = %self.id, interval_ms, "tick interval changed");
        Ok(())
    }

    /// The most recent snapshot, without stepping.
    pub fn snapshot(&self) -> SimResult<SimulationSnapshot> {
        Ok(self.lock()?.last.clone())
    }

    /// Step on the calling thread.
    pub fn step(&self) -> SimResult<SimulationSnapshot> {
        let _flight = Flight::begin(self)?;
        self.advance()
    }

    /// Step on the rayon pool.
    ///
    /// The not-running and already-calculating checks happen here, so a
    /// rejected step fails synchronously and no handle is returned.
    pub fn step_async(self: &Arc<Self>) -> SimResult<TickHandle> {
        let flight = Flight::begin(Arc::clone(self))?;
        let (tx, rx) = oneshot::channel();
        let id = self.id;

        rayon::spawn(move || {
            let sim: &Simulation = flight.0.borrow();
            let result = panic::catch_unwind(AssertUnwindSafe(|| sim.advance()))
                .unwrap_or_else(|_| {
                    warn!(session = %id, "tick panicked");
                    Err(SimError::WorkerLost(id))
                });
            // Release before reporting so a caller woken by the result can
            // step again immediately.
            drop(flight);
            // The receiver may be gone; the tick has still happened.
            let _ = tx.send(result);
        });

        Ok(TickHandle::new(id, rx))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn lock(&self) -> SimResult<MutexGuard<'_, Core>> {
        self.core.lock().map_err(|_| SimError::Lock)
    }

    /// Throttle, tick, and snapshot.  Caller holds the in-flight flag.
    fn advance(&self) -> SimResult<SimulationSnapshot> {
        let mut guard = self.lock()?;
        let core = &mut *guard;
        if core.is_over || !core.throttle.poll() {
            return Ok(core.last.clone());
        }

        let before = Occupancy::capture(&core.state);
        let acted = match self.model.tick(&mut core.state, &mut core.rng) {
            Ok(acted) => acted,
            Err(err) => {
                warn!(session = %self.id, tick = %core.tick, error = %err, "tick failed");
                return Err(err.into());
            }
        };
        let after = Occupancy::capture(&core.state);

        core.is_over = self.model.is_over(&before, &after);
        core.tick = core.tick.next();
        core.last = SimulationSnapshot::capture(
            self.id,
            core.tick,
            &core.state,
            after,
            core.is_over,
            self.model.statistics(&core.state),
        );

        debug!(session = %self.id, tick = %core.tick, acted, terminated = core.is_over, "tick complete");
        if core.is_over {
            info!(session = %self.id, tick = %core.tick, "simulation over");
        }
        Ok(core.last.clone())
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("id", &self.id)
            .field("model", &self.model.id())
            .field("running", &self.is_running())
            .field("calculating", &self.is_calculating())
            .finish()
    }
}

// ── Single-flight guard ───────────────────────────────────────────────────────

/// Holds a session's in-flight flag; clears it on drop.
///
/// Generic over how the session is held so the same guard works for a
/// borrowed session on the calling thread and an `Arc` moved to a worker.
struct Flight<S: Borrow<Simulation>>(S);

impl<S: Borrow<Simulation>> Flight<S> {
    fn begin(holder: S) -> SimResult<Self> {
        let sim: &Simulation = holder.borrow();
        if !sim.is_running() {
            return Err(SimError::NotRunning(sim.id));
        }
        sim.calculating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SimError::AlreadyCalculating(sim.id))?;
        Ok(Flight(holder))
    }
}

impl<S: Borrow<Simulation>> Drop for Flight<S> {
    fn drop(&mut self) {
        let sim: &Simulation = self.0.borrow();
        sim.calculating.store(false, Ordering::Release);
    }
}
