use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::header,
    response::IntoResponse,
    Router,
};
use hyper::body::Incoming;
use hyper_util::rt::TokioIo;
use log::{debug, info, warn};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};
use tower::Service;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::ListenerMessage;

/// Upper bound on a single request/response exchange.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Router answering every method and path with the port greeting.
pub fn router(port: u16) -> Router {
    Router::new().fallback(greet).with_state(port).layer((
        TraceLayer::new_for_http(),
        TimeoutLayer::new(REQUEST_TIMEOUT),
    ))
}

async fn greet(State(port): State<u16>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        format!("Hello from {port}!"),
    )
}

/// Accept loop for one bound listener.
///
/// Serves connections until a [`ListenerMessage::Stop`] arrives (or the
/// channel closes because the service handle was dropped), then drains
/// in-flight connections before returning and releasing the socket.
pub async fn serve(
    listener: TcpListener,
    port: u16,
    mut shutdown: broadcast::Receiver<ListenerMessage>,
) {
    let app = router(port);

    // Connection tasks hold a receiver clone. Sending on the channel tells
    // them to drain; `closed()` resolves once the last task has dropped its
    // receiver.
    let (close_tx, close_rx) = watch::channel(());

    loop {
        let (socket, remote_addr) = tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        warn!("accept failed on port {port}: {err}");
                        continue;
                    }
                }
            }
            _ = shutdown.recv() => {
                info!("stop requested, port {port} no longer accepting connections");
                break;
            }
        };

        debug!("connection {remote_addr} accepted on port {port}");

        let tower_service = app.clone();
        let mut close_rx = close_rx.clone();

        tokio::spawn(async move {
            let socket = TokioIo::new(socket);

            let hyper_service = hyper::service::service_fn(move |request: Request<Incoming>| {
                tower_service.clone().call(request)
            });

            let conn =
                hyper::server::conn::http1::Builder::new().serve_connection(socket, hyper_service);

            let mut conn = std::pin::pin!(conn);

            let mut draining = false;

            loop {
                tokio::select! {
                    result = conn.as_mut() => {
                        if let Err(err) = result {
                            debug!("failed to serve connection from {remote_addr}: {err:#}");
                        }
                        break;
                    }

                    _ = close_rx.changed(), if !draining => {
                        draining = true;
                        conn.as_mut().graceful_shutdown();
                    }
                }
            }

            debug!("connection {remote_addr} closed");
            drop(close_rx);
        });
    }

    drop(listener);
    let _ = close_tx.send(());
    drop(close_rx);

    close_tx.closed().await;
    info!("port {port} closed");
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::router;

    #[tokio::test]
    async fn greets_on_root() {
        let response = router(3000)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Hello from 3000!");
    }

    #[tokio::test]
    async fn greets_on_any_method_and_path() {
        for (method, uri) in [("POST", "/anything"), ("PUT", "/a/b/c"), ("DELETE", "/?q=1")] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from("ignored"))
                .unwrap();

            let response = router(4000).oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);

            let body = response.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&body[..], b"Hello from 4000!");
        }
    }
}
