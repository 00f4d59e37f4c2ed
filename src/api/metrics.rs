use actix_web::HttpResponse;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Contadores do processo, alimentados pelo middleware `RequestMetrics`.
/// Zeram a cada restart.
struct HttpCounters {
    requests: AtomicU64,
    client_errors: AtomicU64,
    server_errors: AtomicU64,
}

static COUNTERS: HttpCounters = HttpCounters {
    requests: AtomicU64::new(0),
    client_errors: AtomicU64::new(0),
    server_errors: AtomicU64::new(0),
};

/// Classe do status da resposta, como contabilizada em /metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ClientError,
    ServerError,
}

impl Outcome {
    pub fn from_status(status: u16) -> Self {
        match status {
            400..=499 => Outcome::ClientError,
            500..=599 => Outcome::ServerError,
            _ => Outcome::Success,
        }
    }
}

pub fn record(outcome: Outcome) {
    COUNTERS.requests.fetch_add(1, Ordering::Relaxed);
    match outcome {
        Outcome::ClientError => {
            COUNTERS.client_errors.fetch_add(1, Ordering::Relaxed);
        }
        Outcome::ServerError => {
            COUNTERS.server_errors.fetch_add(1, Ordering::Relaxed);
        }
        Outcome::Success => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub client_errors: u64,
    pub server_errors: u64,
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        requests: COUNTERS.requests.load(Ordering::Relaxed),
        client_errors: COUNTERS.client_errors.load(Ordering::Relaxed),
        server_errors: COUNTERS.server_errors.load(Ordering::Relaxed),
    }
}

/// Exposição em texto do Prometheus (formato 0.0.4)
pub fn render_prometheus(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# HELP tourist_places_requests_total HTTP requests served");
    let _ = writeln!(out, "# TYPE tourist_places_requests_total counter");
    let _ = writeln!(out, "tourist_places_requests_total {}", snapshot.requests);
    let _ = writeln!(out, "# HELP tourist_places_errors_total HTTP responses with 4xx/5xx status");
    let _ = writeln!(out, "# TYPE tourist_places_errors_total counter");
    for (class, value) in [("4xx", snapshot.client_errors), ("5xx", snapshot.server_errors)] {
        let _ = writeln!(out, "tourist_places_errors_total{{class=\"{}\"}} {}", class, value);
    }
    out
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Request and error counters, Prometheus text format", body = String)
    )
)]
pub async fn get_metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render_prometheus(&snapshot()))
}
