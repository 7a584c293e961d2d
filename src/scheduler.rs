/// Re-entrancy guard for full rebuilds
///
/// Storage changes arrive in bursts (a tab switch touches several keys),
/// and every burst asks for a rebuild. The scheduler lets one rebuild run,
/// defers the rest of the burst to a single retry after the lock window,
/// and stays advisory: once the window has elapsed a new rebuild is
/// admitted even if the previous one never finished.
use crate::router::AfterRebuild;

/// How long a started rebuild holds the lock
pub const LOCK_WINDOW_MS: f64 = 3000.0;
pub const JITTER_STEP_MS: u32 = 50;
pub const JITTER_STEPS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Run the rebuild now; call `finish` when it is done
    Run,
    /// Schedule a retry after `delay_ms`, then call `take_retry`
    Defer { delay_ms: u32 },
    /// A retry is already scheduled and will cover this request
    Coalesced,
}

#[derive(Debug, Default)]
pub struct RebuildScheduler {
    in_flight: u32,
    started_at: f64,
    retry: Option<AfterRebuild>,
}

impl RebuildScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self, now: f64) -> bool {
        self.in_flight > 0 && now - self.started_at < LOCK_WINDOW_MS
    }

    /// Decide what to do with a rebuild request made at `now`
    pub fn admit(&mut self, now: f64, after: AfterRebuild, jitter_ms: u32) -> Admission {
        if self.is_locked(now) {
            if let Some(pending) = self.retry {
                self.retry = Some(pending.merge(after));
                return Admission::Coalesced;
            }
            self.retry = Some(after);
            let remaining = (LOCK_WINDOW_MS - (now - self.started_at)).clamp(0.0, LOCK_WINDOW_MS);
            return Admission::Defer {
                delay_ms: remaining.ceil() as u32 + jitter_ms,
            };
        }

        self.in_flight += 1;
        self.started_at = now;
        Admission::Run
    }

    /// Mark a running rebuild as done
    pub fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Claim the pending retry when its timer fires
    pub fn take_retry(&mut self) -> AfterRebuild {
        self.retry.take().unwrap_or_default()
    }
}

/// Random extra delay for deferred rebuilds: 0..=450 ms in 50 ms steps
pub fn jitter_ms() -> u32 {
    let mut byte = [0u8; 1];
    match getrandom::getrandom(&mut byte) {
        Ok(()) => (byte[0] % JITTER_STEPS) as u32 * JITTER_STEP_MS,
        Err(e) => {
            log::warn!("No randomness for rebuild jitter: {}", e);
            0
        }
    }
}
