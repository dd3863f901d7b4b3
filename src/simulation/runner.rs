//! Long-running background simulation
//!
//! A worker thread owns the simulator for the duration of the run. After
//! each generation it posts a snapshot on a channel, so a renderer never
//! sees a half-finished generation, then waits out the inter-generation
//! delay. Cancellation is checked only between generations.

use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crate::simulation::simulator::Simulator;
use crate::simulation::snapshot::FieldSnapshot;

/// Why a long run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Completed,
    Cancelled,
    /// The snapshot receiver was dropped
    Disconnected,
}

pub struct LongRun;

impl LongRun {
    /// Start `generations` steps on a worker thread
    ///
    /// Returns the control handle and the snapshot stream.
    pub fn spawn<R>(
        mut simulator: Simulator<R>,
        generations: u64,
        delay: Duration,
    ) -> (LongRunHandle<R>, mpsc::Receiver<FieldSnapshot>)
    where
        R: Rng + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<FieldSnapshot>();
        let cancelled = Arc::new(AtomicBool::new(false));
        let worker_flag = Arc::clone(&cancelled);

        let worker = thread::spawn(move || {
            let start = simulator.generation();
            tracing::info!("Long run started: {} generations from {}", generations, start);

            let mut end = RunEnd::Completed;
            for step in 1..=generations {
                if worker_flag.load(Ordering::Acquire) {
                    end = RunEnd::Cancelled;
                    break;
                }
                simulator.sim_one_generation();
                if tx.send(simulator.snapshot()).is_err() {
                    end = RunEnd::Disconnected;
                    break;
                }
                if step < generations {
                    pause(delay, &worker_flag);
                }
            }

            match end {
                RunEnd::Cancelled => tracing::info!(
                    "Long run cancelled at generation {}",
                    simulator.generation()
                ),
                _ => tracing::info!(
                    "Long run finished at generation {} ({:?})",
                    simulator.generation(),
                    end
                ),
            }
            (simulator, end)
        });

        (LongRunHandle { cancelled, worker }, rx)
    }
}

/// Sleep for `delay` unless cancelled first
///
/// Unparking is an early wake; the caller re-checks the flag either way.
fn pause(delay: Duration, cancelled: &AtomicBool) {
    let deadline = Instant::now() + delay;
    loop {
        if cancelled.load(Ordering::Acquire) {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        thread::park_timeout(deadline - now);
    }
}

/// Control side of a long run
pub struct LongRunHandle<R: Rng> {
    cancelled: Arc<AtomicBool>,
    worker: thread::JoinHandle<(Simulator<R>, RunEnd)>,
}

impl<R: Rng> LongRunHandle<R> {
    /// Ask the worker to stop at the next generation boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.worker.thread().unpark();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and take back the simulator
    pub fn join(self) -> thread::Result<(Simulator<R>, RunEnd)> {
        self.worker.join()
    }
}
