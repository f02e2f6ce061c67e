//! Bounded status polling.
//!
//! The sleeper is injected so the same loop runs on `gloo-timers` in the
//! browser and completes instantly in tests.

use std::future::Future;
use std::time::Duration;

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    /// Document processing status: 10 attempts, 2 s apart.
    pub const DOCUMENT_PROCESSING: Self = Self { max_attempts: 10, interval: Duration::from_secs(2) };
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::DOCUMENT_PROCESSING
    }
}

/// Verdict of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Ready(T),
    Continue,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Ready { value: T, attempts: u32 },
    /// The probe asked to stop early (e.g. the resource is gone).
    Stopped { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl<T> PollOutcome<T> {
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Ready { attempts, .. } | Self::Stopped { attempts } | Self::Exhausted { attempts } => *attempts,
        }
    }
}

/// Sleep `policy.interval`, then probe; repeat up to `policy.max_attempts`
/// times. The attempt number passed to `probe` starts at 1.
pub async fn poll_bounded<T, S, SF, P, PF>(policy: PollPolicy, mut sleep: S, mut probe: P) -> PollOutcome<T>
where
    S: FnMut(Duration) -> SF,
    SF: Future<Output = ()>,
    P: FnMut(u32) -> PF,
    PF: Future<Output = Probe<T>>,
{
    for attempt in 1..=policy.max_attempts {
        sleep(policy.interval).await;
        match probe(attempt).await {
            Probe::Ready(value) => return PollOutcome::Ready { value, attempts: attempt },
            Probe::Stop => return PollOutcome::Stopped { attempts: attempt },
            Probe::Continue => {}
        }
    }
    PollOutcome::Exhausted { attempts: policy.max_attempts }
}
