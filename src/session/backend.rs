//! Simulated authentication backend.
//!
//! Requests never leave the process. Each one completes after a fixed latency
//! and fails with probability `failure_rate`, mimicking a flaky API. The
//! caller drives completion from its clock: [`SimulatedBackend::begin`] stamps
//! a due time and [`SimulatedBackend::resolve`] rolls the outcome.

use rand::rngs::StdRng;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Login {
        email: String,
        password: String,
        remember: bool,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    ForgotPassword {
        email: String,
    },
}

impl Request {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::ForgotPassword { .. } => "forgot_password",
        }
    }
}

/// Per-request simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub login_ms: u64,
    pub register_ms: u64,
    pub forgot_ms: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            login_ms: 1500,
            register_ms: 2000,
            forgot_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub request: Request,
    pub due_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    SyntheticFailure,
}

#[derive(Debug)]
pub struct SimulatedBackend {
    rng: StdRng,
    failure_rate: f64,
    latency: Latency,
}

impl SimulatedBackend {
    /// Creates a backend. `failure_rate` is clamped to `0.0..=1.0`; a
    /// non-finite rate counts as zero.
    #[must_use]
    pub fn new(rng: StdRng, failure_rate: f64, latency: Latency) -> Self {
        let failure_rate = if failure_rate.is_finite() {
            failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            rng,
            failure_rate,
            latency,
        }
    }

    #[must_use]
    pub const fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Starts `request` at `now_ms`.
    #[must_use]
    pub fn begin(&self, request: Request, now_ms: u64) -> PendingRequest {
        let delay = match request {
            Request::Login { .. } => self.latency.login_ms,
            Request::Register { .. } => self.latency.register_ms,
            Request::ForgotPassword { .. } => self.latency.forgot_ms,
        };

        tracing::debug!(kind = request.kind(), delay, "simulated request started");
        PendingRequest {
            request,
            due_ms: now_ms.saturating_add(delay),
        }
    }

    /// Rolls the outcome of a due request.
    pub fn resolve(&mut self, pending: &PendingRequest) -> Outcome {
        let outcome = if self.rng.gen_bool(self.failure_rate) {
            Outcome::SyntheticFailure
        } else {
            Outcome::Success
        };

        tracing::debug!(kind = pending.request.kind(), ?outcome, "simulated request resolved");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn forgot() -> Request {
        Request::ForgotPassword {
            email: "ana@example.com".into(),
        }
    }

    #[test]
    fn due_time_follows_latency_table() {
        let backend = SimulatedBackend::new(StdRng::seed_from_u64(1), 0.0, Latency::default());
        let pending = backend.begin(
            Request::Register {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password: "secret123".into(),
            },
            500,
        );
        assert_eq!(pending.due_ms, 2500);
    }

    #[test]
    fn extreme_rates_are_deterministic() {
        let mut never = SimulatedBackend::new(StdRng::seed_from_u64(1), 0.0, Latency::default());
        let mut always = SimulatedBackend::new(StdRng::seed_from_u64(1), 1.0, Latency::default());
        let pending = never.begin(forgot(), 0);

        for _ in 0..100 {
            assert_eq!(never.resolve(&pending), Outcome::Success);
            assert_eq!(always.resolve(&pending), Outcome::SyntheticFailure);
        }
    }

    #[test]
    fn failure_rate_is_roughly_honoured() {
        let mut backend = SimulatedBackend::new(StdRng::seed_from_u64(42), 0.1, Latency::default());
        let pending = backend.begin(forgot(), 0);
        let failures = (0..10_000)
            .filter(|_| backend.resolve(&pending) == Outcome::SyntheticFailure)
            .count();
        assert!((700..1300).contains(&failures), "{failures}");
    }

    #[test]
    fn invalid_rates_are_sanitised() {
        let rng = || StdRng::seed_from_u64(0);
        assert!((SimulatedBackend::new(rng(), 7.0, Latency::default()).failure_rate() - 1.0).abs() < f64::EPSILON);
        assert!(SimulatedBackend::new(rng(), f64::NAN, Latency::default()).failure_rate().abs() < f64::EPSILON);
    }
}
