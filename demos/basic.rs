//! Minimal statuslog example — a few JSON endpoints behind the request logger.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users/42            # 200 → INFO
//!   curl http://localhost:3000/users/7             # 404 → WARNING
//!   curl -X POST http://localhost:3000/users       # 400 → WARNING
//!   curl -X POST http://localhost:3000/users -d '{"name":"alice"}'   # 201 → INFO
//!   curl -X DELETE http://localhost:3000/users/42  # 204 → DEBUG
//!   curl http://localhost:3000/orders              # handler error → 500 from the server, no access line

use statuslog::record::AccessFormatter;
use statuslog::sink::TracingSink;
use statuslog::{Error, Method, Request, RequestLogger, Response, Router, Server, StatusCode};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let app = Router::new()
        .on(Method::GET,    "/users/{id}", get_user)
        .on(Method::POST,   "/users",      create_user)
        .on(Method::DELETE, "/users/{id}", delete_user)
        .on(Method::GET,    "/orders",     list_orders)
        .layer(RequestLogger::new(AccessFormatter, TracingSink));

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /users/{id}
async fn get_user(req: Request) -> Response {
    match req.param("id") {
        Some("42") => Response::json(r#"{"id":"42","name":"alice"}"#),
        _ => Response::status(StatusCode::NOT_FOUND),
    }
}

// POST /users
async fn create_user(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }

    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/99")
        .json(r#"{"id":"99","name":"new_user"}"#)
}

// DELETE /users/{id} → 204 No Content
async fn delete_user(_req: Request) -> StatusCode {
    StatusCode::NO_CONTENT
}

// GET /orders — the backing store is never reachable in this demo
async fn list_orders(_req: Request) -> Result<Response, Error> {
    Err(Error::handler("order store unavailable"))
}
