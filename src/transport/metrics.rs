//! Per-call instrumentation behind the `metrics` feature.

use crate::ErrorKind;
use http::{Method, StatusCode};
use metrics::{Gauge, SharedString};
use std::time::Instant;

/// Tracks one call from dispatch to outcome; the in-flight gauge drops on `Drop`.
pub(crate) struct RequestMetrics {
    method: SharedString,
    started: Instant,
    inflight: Gauge,
}

impl RequestMetrics {
    pub(crate) fn start(method: &Method) -> Self {
        let inflight = metrics::gauge!("skyscanner_sdk_inflight");
        inflight.increment(1.0);
        Self {
            method: SharedString::from(method.as_str().to_owned()),
            started: Instant::now(),
            inflight,
        }
    }

    /// `status` is `None` when no response arrived.
    pub(crate) fn finish(&self, status: Option<StatusCode>, error: Option<ErrorKind>) {
        let class = status.map_or("transport", status_class);
        let method = self.method.clone();

        metrics::counter!(
            "skyscanner_sdk_requests_total",
            "method" => method.clone(),
            "status_class" => class
        )
        .increment(1);
        metrics::histogram!(
            "skyscanner_sdk_request_duration_seconds",
            "method" => method.clone(),
            "status_class" => class
        )
        .record(self.started.elapsed());

        if status == Some(StatusCode::TOO_MANY_REQUESTS) {
            metrics::counter!("skyscanner_sdk_rate_limited_total", "method" => method.clone())
                .increment(1);
        }
        if let Some(kind) = error {
            metrics::counter!(
                "skyscanner_sdk_errors_total",
                "method" => method,
                "kind" => kind.as_str()
            )
            .increment(1);
        }
    }
}

impl Drop for RequestMetrics {
    fn drop(&mut self) {
        self.inflight.decrement(1.0);
    }
}

fn status_class(status: StatusCode) -> &'static str {
    const CLASSES: [&str; 5] = ["1xx", "2xx", "3xx", "4xx", "5xx"];
    let hundreds = usize::from(status.as_u16() / 100);
    hundreds
        .checked_sub(1)
        .and_then(|i| CLASSES.get(i))
        .copied()
        .unwrap_or("other")
}
