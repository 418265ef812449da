use std::time::Instant;
use warp::filters::path::FullPath;
use warp::http::{Method, StatusCode};
use warp::reject::Rejection;
use warp::reply::Response;
use warp::Filter;

#[derive(Debug, Clone)]
struct RequestStart {
    path: String,
    method: Method,
    started: Instant,
}

/// Logs each request on arrival and its status and latency once answered.
pub fn with_request_logging<F>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (Response,), Error = Rejection> + Clone + Send + Sync + 'static,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: FullPath, method: Method| {
            tracing::debug!(path = %path.as_str(), method = %method, "incoming request");
            RequestStart {
                path: path.as_str().to_owned(),
                method,
                started: Instant::now(),
            }
        })
        .and(filter)
        .map(|start: RequestStart, response: Response| {
            log_response(
                response.status(),
                &start.path,
                start.method.as_str(),
                start.started.elapsed().as_millis(),
            );
            response
        })
}

/// Client errors log at warn, server errors at error, everything else at info.
pub fn log_response(status: StatusCode, path: &str, method: &str, duration_ms: u128) {
    let code = status.as_u16();
    if status.is_server_error() {
        tracing::error!(status = code, path, method, duration_ms, "server error");
    } else if status.is_client_error() {
        tracing::warn!(status = code, path, method, duration_ms, "client error");
    } else {
        tracing::info!(status = code, path, method, duration_ms, "response sent");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TestLogSubscriber;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;
    use warp::Reply;

    fn capture() -> (TestLogSubscriber, impl tracing::Subscriber + Send + Sync) {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());
        (subscriber, registry)
    }

    #[tokio::test]
    async fn logs_arrival_and_completion() {
        let (subscriber, registry) = capture();
        let _guard = tracing::subscriber::set_default(registry);

        let route = warp::path!("table")
            .and(warp::get())
            .map(|| warp::reply::json(&"ok").into_response());
        let logged = with_request_logging(route);

        let response = warp::test::request()
            .method("GET")
            .path("/table")
            .reply(&logged)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let entries = subscriber.entries();
        assert!(entries
            .iter()
            .any(|e| e.level == Level::DEBUG && e.message.contains("incoming request")));
        let sent = entries
            .iter()
            .find(|e| e.message.contains("response sent"))
            .expect("completion logged");
        assert!(sent.fields.iter().any(|(k, v)| k == "path" && v.contains("/table")));
        assert!(sent.fields.iter().any(|(k, v)| k == "status" && v == "200"));
    }

    #[tokio::test]
    async fn rejected_status_is_logged_as_client_error() {
        let (subscriber, registry) = capture();
        let _guard = tracing::subscriber::set_default(registry);

        let route = warp::path!("table" / "action").and(warp::post()).map(|| {
            warp::reply::with_status(warp::reply(), StatusCode::BAD_REQUEST).into_response()
        });
        let response = warp::test::request()
            .method("POST")
            .path("/table/action")
            .reply(&with_request_logging(route))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let entries = subscriber.entries();
        let entry = entries
            .iter()
            .find(|e| e.message.contains("client error"))
            .expect("client error logged");
        assert_eq!(entry.level, Level::WARN);
        assert!(entry.fields.iter().any(|(k, v)| k == "method" && v.contains("POST")));
    }

    #[test]
    fn server_errors_log_at_error() {
        let (subscriber, registry) = capture();
        tracing::subscriber::with_default(registry, || {
            log_response(StatusCode::INTERNAL_SERVER_ERROR, "/table/action", "POST", 3);
        });

        let entries = subscriber.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::ERROR);
        assert!(entries[0]
            .fields
            .iter()
            .any(|(k, v)| k == "duration_ms" && v == "3"));
    }
}
