use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static REGISTRATION_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn record_request() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn record_error() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn record_registration() {
    REGISTRATION_COUNT.fetch_add(1, Ordering::Relaxed);
}

fn render() -> String {
    format!(
        "# HELP http_requests_total Total number of API requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\
         \n\
         # HELP http_errors_total Total number of API requests answered with an error\n\
         # TYPE http_errors_total counter\n\
         http_errors_total {}\n\
         \n\
         # HELP users_registered_total Users created since start\n\
         # TYPE users_registered_total counter\n\
         users_registered_total {}\n",
        REQUEST_COUNT.load(Ordering::Relaxed),
        ERROR_COUNT.load(Ordering::Relaxed),
        REGISTRATION_COUNT.load(Ordering::Relaxed),
    )
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text exposition", content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_reports_counters() {
        record_request();
        record_error();

        let text = render();

        assert!(text.contains("# TYPE http_requests_total counter"));
        assert!(text.contains("http_errors_total "));
        assert!(text.contains("users_registered_total "));
    }
}
