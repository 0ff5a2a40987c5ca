//! `TickHandle`: completion of a tick computed in the background.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use gs_core::SessionId;

use crate::{SimError, SimResult, SimulationSnapshot};

/// Resolves to the snapshot produced by a background tick.
///
/// Await it from async code or call [`wait`](Self::wait) to block.  Dropping
/// the handle does not cancel the tick.
#[must_use = "the tick runs regardless; the handle is the only way to see its result"]
#[derive(Debug)]
pub struct TickHandle {
    session: SessionId,
    rx:      oneshot::Receiver<SimResult<SimulationSnapshot>>,
}

impl TickHandle {
    pub(crate) fn new(session: SessionId, rx: oneshot::Receiver<SimResult<SimulationSnapshot>>) -> Self {
        Self { session, rx }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Block the current thread until the tick completes.
    pub fn wait(self) -> SimResult<SimulationSnapshot> {
        futures::executor::block_on(self)
    }
}

impl Future for TickHandle {
    type Output = SimResult<SimulationSnapshot>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let session = this.session;
        Pin::new(&mut this.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SimError::WorkerLost(session))))
    }
}
