//! Local upstream used by the fetch and server tests.

use axum::{
    Router,
    http::{StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use std::net::SocketAddr;
use std::time::Duration;

/// Start an upstream on an ephemeral port and return its address.
pub async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route(
            "/data.json",
            get(|| async {
                (
                    [(CONTENT_TYPE, "application/json; charset=utf-8")],
                    r#"{"zeta":"a & b","alpha":[1,null,{"ok":true}],"":"blank"}"#,
                )
            }),
        )
        .route(
            "/scalar.json",
            get(|| async { ([(CONTENT_TYPE, "application/json")], "42") }),
        )
        .route(
            "/page.html",
            get(|| async { ([(CONTENT_TYPE, "text/html")], "<html></html>") }),
        )
        .route(
            "/broken.json",
            get(|| async { ([(CONTENT_TYPE, "application/json")], r#"{"a": "#) }),
        )
        .route(
            "/big.json",
            get(|| async { ([(CONTENT_TYPE, "application/json")], format!("[{}]", "1,".repeat(4096) + "1")) }),
        )
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
        .route(
            "/slow.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                ([(CONTENT_TYPE, "application/json")], "{}")
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
