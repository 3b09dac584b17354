//! Readiness and liveness endpoints.
//!
//! The server moves through three phases: `starting` until both collections
//! are loaded, `serving` afterwards, and `draining` once shutdown begins.
//! Readiness holds only while serving; liveness fails only while draining.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

/// Lifecycle phase reported by the health endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Starting,
    Serving,
    Draining,
}

impl Phase {
    const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Serving,
            2 => Self::Draining,
            _ => Self::Starting,
        }
    }

    const fn raw(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Serving => 1,
            Self::Draining => 2,
        }
    }
}

/// Shared lifecycle phase read by the health handlers.
#[derive(Debug, Default)]
pub struct HealthState(AtomicU8);

impl HealthState {
    /// State in the `starting` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        Phase::from_raw(self.0.load(Ordering::Acquire))
    }

    /// Enter the `serving` phase.
    pub fn mark_ready(&self) {
        self.0.store(Phase::Serving.raw(), Ordering::Release);
    }

    /// Enter the `draining` phase.
    pub fn mark_draining(&self) {
        self.0.store(Phase::Draining.raw(), Ordering::Release);
    }
}

#[derive(Serialize)]
struct PhaseBody {
    phase: Phase,
}

fn phase_response(phase: Phase, healthy: bool) -> HttpResponse {
    let mut builder = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(PhaseBody { phase })
}

/// 200 while serving, 503 otherwise.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let phase = state.phase();
    phase_response(phase, phase == Phase::Serving)
}

/// 200 until draining starts.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let phase = state.phase();
    phase_response(phase, phase != Phase::Draining)
}
