//! `SessionController`: registry of independent sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use gs_agent::Parameters;
use gs_core::{SessionConfig, SessionId, SimRng};
use gs_model::Model;
use rayon::prelude::*;
use tracing::info;

use crate::{SimError, SimResult, Simulation, SimulationSnapshot, TickHandle};

/// Creates, drives and removes simulation sessions.
///
/// `Send + Sync`; share it behind an `Arc`.  The registry lock is held only
/// to look a session up, so a slow tick in one session never blocks calls on
/// another.
///
/// ```rust,ignore
/// let controller = SessionController::new();
/// let id = controller.create(Arc::new(EpidemicModel), &params, SessionConfig::default())?;
/// controller.start(id)?;
/// let snapshot = controller.step(id)?;
/// ```
#[derive(Debug, Default)]
pub struct SessionController {
    sessions: RwLock<HashMap<SessionId, Arc<Simulation>>>,
    next_id:  AtomicU64,
    /// Root RNG for sessions whose config has no seed.  `None` seeds such
    /// sessions from entropy.
    root_rng: Option<Mutex<SimRng>>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unseeded sessions derive their RNG from `seed`, so a whole batch of
    /// sessions is reproducible from one number.
    pub fn with_root_seed(seed: u64) -> Self {
        Self { root_rng: Some(Mutex::new(SimRng::new(seed))), ..Self::default() }
    }

    /// Initialize `model` and register it as a new, paused session.
    pub fn create(
        &self,
        model:  Arc<dyn Model>,
        params: &Parameters,
        config: SessionConfig,
    ) -> SimResult<SessionId> {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let rng = match (config.seed, &self.root_rng) {
            (Some(seed), _) => SimRng::new(seed),
            (None, Some(root)) => root.lock().map_err(|_| SimError::Lock)?.child(id.0),
            (None, None) => SimRng::from_entropy(),
        };
        let sim = Simulation::new(id, model, params, &config, rng)?;
        self.sessions
            .write()
            .map_err(|_| SimError::Lock)?
            .insert(id, Arc::new(sim));
        Ok(id)
    }

    /// The session registered under `id`.
    pub fn get(&self, id: SessionId) -> SimResult<Arc<Simulation>> {
        self.sessions
            .read()
            .map_err(|_| SimError::Lock)?
            .get(&id)
            .cloned()
            .ok_or(SimError::UnknownSession(id))
    }

    pub fn start(&self, id: SessionId) -> SimResult<()> {
        self.get(id)?.start();
        Ok(())
    }

    pub fn pause(&self, id: SessionId) -> SimResult<()> {
        self.get(id)?.pause();
        Ok(())
    }

    /// Unregister a session.  A tick already in flight on it still completes
    /// and its handle still resolves.
    pub fn remove(&self, id: SessionId) -> SimResult<()> {
        let removed = self
            .sessions
            .write()
            .map_err(|_| SimError::Lock)?
            .remove(&id)
            .ok_or(SimError::UnknownSession(id))?;
        removed.pause();
        info!(session = %id, "session removed");
        Ok(())
    }

    /// Ids of all running sessions, ascending.
    pub fn list_running(&self) -> SimResult<Vec<SessionId>> {
        let mut ids: Vec<SessionId> = self
            .sessions
            .read()
            .map_err(|_| SimError::Lock)?
            .values()
            .filter(|s| s.is_running())
            .map(|s| s.id())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn step(&self, id: SessionId) -> SimResult<SimulationSnapshot> {
        self.get(id)?.step()
    }

    pub fn step_async(&self, id: SessionId) -> SimResult<TickHandle> {
        self.get(id)?.step_async()
    }

    /// Step every running session once, in parallel.
    ///
    /// Each session reports its own result; one session failing does not
    /// affect the others.  Results are ordered by session id.
    pub fn step_running(&self) -> SimResult<Vec<(SessionId, SimResult<SimulationSnapshot>)>> {
        let mut running: Vec<Arc<Simulation>> = self
            .sessions
            .read()
            .map_err(|_| SimError::Lock)?
            .values()
            .filter(|s| s.is_running())
            .cloned()
            .collect();
        running.sort_unstable_by_key(|s| s.id());

        Ok(running.par_iter().map(|s| (s.id(), s.step())).collect())
    }

    pub fn tick_interval_ms(&self, id: SessionId) -> SimResult<u64> {
        self.get(id)?.tick_interval_ms()
    }

    pub fn set_tick_interval_ms(&self, id: SessionId, interval_ms: u64) -> SimResult<()> {
        self.get(id)?.set_tick_interval_ms(interval_ms)
    }

    /// The last snapshot of a session, without stepping it.
    pub fn snapshot(&self, id: SessionId) -> SimResult<SimulationSnapshot> {
        self.get(id)?.snapshot()
    }
}
