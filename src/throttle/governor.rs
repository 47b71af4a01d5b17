// ABOUTME: Minimum-spacing rate governor for API call throttling.
// ABOUTME: Enforces a gap between one call's completion and the next call's start.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::GovernorError;

/// Rate governor that keeps at most `max_per_minute` calls per minute.
///
/// Unlike a token bucket this never allows a burst: every call must start
/// at least `60 / max_per_minute` seconds after the previous call through
/// the same governor *finished*. A slow call therefore pushes the next one
/// back by its own duration.
///
/// The recorded timestamp sits behind a fair (FIFO) mutex that is held
/// from the wait through the end of the call, so concurrent callers are
/// serialized and none of them can compute its wait from a stale value.
pub struct RateGovernor {
    last_mark: Mutex<Option<Instant>>,
    min_interval: Duration,
    max_per_minute: f64,
    spacing: Spacing,
}

/// Which instant of the previous call the interval is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Spacing {
    /// From the moment the previous call finished (the default).
    #[default]
    CompletionToStart,
    /// From the moment the previous call started, so a slow call uses up
    /// part of the interval.
    StartToStart,
}

impl RateGovernor {
    /// Create a governor allowing `max_per_minute` calls per minute.
    ///
    /// Returns `GovernorError::Configuration` if the rate is zero, negative
    /// or NaN. An infinite rate yields a pass-through governor.
    pub fn new(max_per_minute: f64) -> Result<Self, GovernorError> {
        Self::with_spacing(max_per_minute, Spacing::default())
    }

    /// Create a governor measuring the interval as `spacing` says.
    pub fn with_spacing(max_per_minute: f64, spacing: Spacing) -> Result<Self, GovernorError> {
        if max_per_minute.is_nan() || max_per_minute <= 0.0 {
            return Err(GovernorError::Configuration(format!(
                "max_per_minute must be positive, got {max_per_minute}"
            )));
        }

        let min_interval = Duration::try_from_secs_f64(60.0 / max_per_minute).map_err(|_| {
            GovernorError::Configuration(format!(
                "max_per_minute {max_per_minute} gives an interval too long to represent"
            ))
        })?;

        Ok(Self {
            last_mark: Mutex::new(None),
            min_interval,
            max_per_minute,
            spacing,
        })
    }

    /// A governor that never makes a caller wait.
    pub fn unlimited() -> Self {
        Self {
            last_mark: Mutex::new(None),
            min_interval: Duration::ZERO,
            max_per_minute: f64::INFINITY,
            spacing: Spacing::default(),
        }
    }

    /// Smallest allowed gap between a completion and the next start.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// The configured ceiling.
    pub fn max_per_minute(&self) -> f64 {
        self.max_per_minute
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Run `op` once its turn comes, returning its output unchanged.
    ///
    /// The completion time is recorded whether `op` succeeds or fails.
    pub async fn run<F, Fut, T>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut last = self.last_mark.lock().await;

        if let Some(wait) = self.remaining(*last) {
            log_wait(wait);
            tokio::time::sleep(wait).await;
        }

        let started = Instant::now();
        let output = op().await;
        *last = Some(self.mark(started));
        output
    }

    /// Like [`run`](Self::run), but gives up if `cancel` completes first.
    ///
    /// Cancellation is only observed while queued behind other callers or
    /// sleeping out the interval. A cancelled call never runs `op` and
    /// leaves the recorded completion time untouched. Once `op` has
    /// started it runs to completion.
    pub async fn run_until<F, Fut, T, C>(&self, op: F, cancel: C) -> Result<T, GovernorError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
        C: Future<Output = ()>,
    {
        tokio::pin!(cancel);

        let mut last = tokio::select! {
            biased;
            () = &mut cancel => return Err(GovernorError::Cancelled),
            guard = self.last_mark.lock() => guard,
        };

        if let Some(wait) = self.remaining(*last) {
            log_wait(wait);
            tokio::select! {
                biased;
                () = &mut cancel => return Err(GovernorError::Cancelled),
                () = tokio::time::sleep(wait) => {}
            }
        }

        let started = Instant::now();
        let output = op().await;
        *last = Some(self.mark(started));
        Ok(output)
    }

    /// Blocking variant for plain threads.
    ///
    /// Sleeps only the calling thread.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    pub fn run_blocking<F, T>(&self, op: F) -> T
    where
        F: FnOnce() -> T,
    {
        let mut last = self.last_mark.blocking_lock();

        if let Some(wait) = self.remaining(*last) {
            log_wait(wait);
            std::thread::sleep(wait);
        }

        let started = Instant::now();
        let output = op();
        *last = Some(self.mark(started));
        output
    }

    /// Wrap `op` so that every call through the returned handle is governed.
    pub fn guard<F, Fut, T>(self: &Arc<Self>, op: F) -> Guarded<F>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = T>,
    {
        Guarded {
            governor: Arc::clone(self),
            op,
        }
    }

    /// The instant the next interval counts from, given when this call started.
    fn mark(&self, started: Instant) -> Instant {
        match self.spacing {
            Spacing::CompletionToStart => Instant::now(),
            Spacing::StartToStart => started,
        }
    }

    /// How long a caller must still wait, or `None` if it may go now.
    fn remaining(&self, last: Option<Instant>) -> Option<Duration> {
        let elapsed = Instant::now().saturating_duration_since(last?);
        self.min_interval
            .checked_sub(elapsed)
            .filter(|wait| !wait.is_zero())
    }
}

fn log_wait(wait: Duration) {
    tracing::info!(wait_secs = wait.as_secs_f64(), "rate limit: waiting before next call");
}

/// A callable wrapped by a [`RateGovernor`].
///
/// Created by [`RateGovernor::guard`]. Each `call` behaves exactly like the
/// wrapped closure, except that it may first wait for its turn.
pub struct Guarded<F> {
    governor: Arc<RateGovernor>,
    op: F,
}

impl<F, Fut, T> Guarded<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = T>,
{
    /// Invoke the wrapped operation through the governor.
    pub async fn call(&self) -> T {
        self.governor.run(|| (self.op)()).await
    }

    /// Invoke the wrapped operation, abandoning the wait if `cancel` fires.
    pub async fn call_until<C>(&self, cancel: C) -> Result<T, GovernorError>
    where
        C: Future<Output = ()>,
    {
        self.governor.run_until(|| (self.op)(), cancel).await
    }

    /// The governor shared by this handle.
    pub fn governor(&self) -> &Arc<RateGovernor> {
        &self.governor
    }
}
