use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_MINUTES: u64 = 30;

/// Pure countdown state machine. Ticking is driven externally, once per
/// elapsed second while running; `expired` is the one-shot signal the
/// presentation layer consumes to play the bell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining_seconds: u64,
    pub running: bool,
    pub expired: bool,
}

impl Default for CountdownState {
    fn default() -> Self {
        Self {
            remaining_seconds: DEFAULT_MINUTES * 60,
            running: false,
            expired: false,
        }
    }
}

impl CountdownState {
    /// Stops the countdown and rearms it; does not auto-start. Absurd
    /// durations saturate rather than overflow, since the minutes value
    /// arrives from the network unchecked.
    pub fn set_duration(&mut self, minutes: u64) {
        self.running = false;
        self.remaining_seconds = minutes.saturating_mul(60);
        self.expired = false;
    }

    pub fn start(&mut self) {
        self.running = true;
        self.expired = false;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Advance by one second. Returns true exactly once per run-to-zero
    /// transition, including a start at zero remaining.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.remaining_seconds > 1 {
            self.remaining_seconds -= 1;
            false
        } else {
            self.remaining_seconds = 0;
            self.running = false;
            self.expired = true;
            true
        }
    }

    /// MM:SS with the minutes field deliberately unclamped ("90:00").
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

struct TimerInner {
    countdown: CountdownState,
    /// The single armed tick task. At most one exists; arming a new one
    /// aborts the old handle first, and every `running -> false`
    /// transition tears it down.
    ticker: Option<JoinHandle<()>>,
}

/// Countdown timer with an explicitly owned tick schedule. Cloning shares
/// the underlying state, so the router state can hold it directly.
#[derive(Clone)]
pub struct Timer {
    inner: Arc<Mutex<TimerInner>>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerInner {
                countdown: CountdownState::default(),
                ticker: None,
            })),
        }
    }

    pub async fn snapshot(&self) -> CountdownState {
        self.inner.lock().await.countdown.clone()
    }

    pub async fn set_duration(&self, minutes: u64) -> CountdownState {
        let mut inner = self.inner.lock().await;
        disarm(&mut inner);
        inner.countdown.set_duration(minutes);
        inner.countdown.clone()
    }

    pub async fn pause(&self) -> CountdownState {
        let mut inner = self.inner.lock().await;
        disarm(&mut inner);
        inner.countdown.pause();
        inner.countdown.clone()
    }

    /// Acknowledge a consumed expiry signal.
    pub async fn acknowledge(&self) -> CountdownState {
        let mut inner = self.inner.lock().await;
        inner.countdown.expired = false;
        inner.countdown.clone()
    }

    pub async fn start(&self) -> CountdownState {
        let mut inner = self.inner.lock().await;
        disarm(&mut inner);
        inner.countdown.start();

        let shared = Arc::clone(&self.inner);
        inner.ticker = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let mut inner = shared.lock().await;
                let fired = inner.countdown.tick();
                if fired {
                    debug!("countdown expired");
                }
                if !inner.countdown.running {
                    // Reached zero (or was stopped between ticks); this
                    // task is done, so drop its own handle and exit.
                    inner.ticker = None;
                    return;
                }
            }
        }));
        inner.countdown.clone()
    }

    /// Tears down any armed tick task. Called on drop paths by the
    /// binary's shutdown; individual transitions disarm on their own.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        disarm(&mut inner);
        inner.countdown.pause();
    }
}

fn disarm(inner: &mut TimerInner) {
    if let Some(handle) = inner.ticker.take() {
        handle.abort();
    }
}
