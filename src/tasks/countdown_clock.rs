//! Launch countdown background task

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use chrono::{DateTime, Utc};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::CountdownState;

/// Tick cadence of the countdown
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Source of the current instant
pub trait TimeSource: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A running timer task and the flag that keeps it publishing
struct RunningTimer {
    handle: JoinHandle<()>,
    active: Arc<Mutex<bool>>,
}

/// Countdown to the launch target with an owned periodic timer.
///
/// At most one timer task runs at a time. [`CountdownClock::stop`] cancels it
/// and is also called on drop; once `stop` returns no further tick publishes.
pub struct CountdownClock {
    time: Arc<dyn TimeSource>,
    state_tx: Arc<watch::Sender<CountdownState>>,
    ticks: Arc<AtomicU64>,
    running: Mutex<Option<RunningTimer>>,
}

impl CountdownClock {
    /// Create a stopped clock counting towards the launch offset from now
    pub fn new(time: Arc<dyn TimeSource>) -> Self {
        let initial = CountdownState::starting_at(time.now());
        Self::with_state(time, initial)
    }

    /// Create a stopped clock from an explicit starting state
    pub fn with_state(time: Arc<dyn TimeSource>, initial: CountdownState) -> Self {
        let (state_tx, _) = watch::channel(initial);
        Self {
            time,
            state_tx: Arc::new(state_tx),
            ticks: Arc::new(AtomicU64::new(0)),
            running: Mutex::new(None),
        }
    }

    /// Spawn the timer task. Does nothing if it is already running or the
    /// countdown has launched. Must be called inside a tokio runtime.
    pub fn start(&self) -> Result<(), String> {
        let mut running = self.running.lock()
            .map_err(|e| format!("Failed to lock countdown timer: {}", e))?;

        if running.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            warn!("Countdown timer already running");
            return Ok(());
        }
        if self.snapshot().launched {
            debug!("Countdown already launched, timer not started");
            return Ok(());
        }

        let active = Arc::new(Mutex::new(true));
        let handle = tokio::spawn(countdown_task(
            Arc::clone(&self.time),
            Arc::clone(&self.state_tx),
            Arc::clone(&self.ticks),
            Arc::clone(&active),
        ));

        info!("Countdown timer started, target {}", self.snapshot().target);
        *running = Some(RunningTimer { handle, active });
        Ok(())
    }

    /// Cancel the timer task. Idempotent.
    pub fn stop(&self) {
        let timer = match self.running.lock() {
            Ok(mut running) => running.take(),
            Err(e) => {
                error!("Failed to lock countdown timer: {}", e);
                return;
            }
        };

        if let Some(timer) = timer {
            // Waits out a tick in progress; the task sees the cleared flag next time
            match timer.active.lock() {
                Ok(mut active) => *active = false,
                Err(e) => error!("Failed to clear countdown flag: {}", e),
            }
            timer.handle.abort();
            info!("Countdown timer stopped");
        }
    }

    /// Whether a timer task is live
    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .map(|r| r.as_ref().is_some_and(|r| !r.handle.is_finished()))
            .unwrap_or(false)
    }

    /// Current countdown value
    pub fn snapshot(&self) -> CountdownState {
        *self.state_tx.borrow()
    }

    /// Watch every published tick
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state_tx.subscribe()
    }

    /// Number of ticks published since creation
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Drop for CountdownClock {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CountdownClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownClock")
            .field("state", &self.snapshot())
            .field("ticks", &self.tick_count())
            .field("running", &self.is_running())
            .finish()
    }
}

/// Recompute the remainder once per period until launch or cancellation
async fn countdown_task(
    time: Arc<dyn TimeSource>,
    state_tx: Arc<watch::Sender<CountdownState>>,
    ticks: Arc<AtomicU64>,
    active: Arc<Mutex<bool>>,
) {
    debug!("Starting countdown task");

    // First update lands one period after start, like the page's interval
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let guard = match active.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Failed to lock countdown flag: {}", e);
                break;
            }
        };
        if !*guard {
            break;
        }

        let now = time.now();
        let mut launched = false;
        state_tx.send_modify(|state| {
            state.tick(now);
            launched = state.launched;
        });
        ticks.fetch_add(1, Ordering::SeqCst);
        drop(guard);

        if launched {
            info!("Launch target reached, countdown finished");
            break;
        }
    }

    debug!("Countdown task exited");
}
