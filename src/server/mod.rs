// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! HTTP endpoint.
//!
//! Thin serving layer over the executor: `POST /execute` accepts
//! `{"command": "<SQL>"}` and answers `{"result": ...}` on success or
//! HTTP 400 with `{"error": "<message>"}` on failure. The `Database`
//! sits behind a process-wide mutex and every request takes it for the
//! whole statement - the engine itself stays single-writer and
//! single-threaded, exactly as the executor requires.

use crate::database::Database;
use crate::error::{ReedError, ReedResult};
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use std::sync::Mutex;

/// Request body of `POST /execute`.
#[derive(Debug, Deserialize)]
pub struct SqlCommand {
    pub command: String,
}

/// Run the HTTP endpoint until interrupted.
///
/// ## Input
/// - `db`: open database (takes ownership; the server serialises access)
/// - `host`, `port`: bind address
///
/// ## Output
/// - `Err(ReedError::Io)`: bind failure or server error
pub async fn run_server(db: Database, host: &str, port: u16) -> ReedResult<()> {
    let data = web::Data::new(Mutex::new(db));

    println!("Starting ReedSQL server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/execute", web::post().to(execute_command))
    })
    .workers(1)
    .bind((host, port))
    .map_err(|e| ReedError::Io {
        operation: "bind".to_string(),
        reason: e.to_string(),
    })?
    .run()
    .await
    .map_err(|e| ReedError::Io {
        operation: "serve".to_string(),
        reason: e.to_string(),
    })
}

/// Handle one `POST /execute` request.
async fn execute_command(
    db: web::Data<Mutex<Database>>,
    body: web::Json<SqlCommand>,
) -> HttpResponse {
    let mut db = match db.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "database lock poisoned" }));
        }
    };

    match db.execute(body.command.trim()) {
        Ok(output) => HttpResponse::Ok().json(serde_json::json!({ "result": output.to_json() })),
        Err(err) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use tempfile::TempDir;

    fn test_app_data(dir: &TempDir) -> web::Data<Mutex<Database>> {
        let db = Database::open(dir.path().join("data")).expect("open database");
        web::Data::new(Mutex::new(db))
    }

    #[actix_web::test]
    async fn test_execute_roundtrip() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_app_data(&dir))
                .route("/execute", web::post().to(execute_command)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/execute")
            .set_json(serde_json::json!({ "command": "CREATE TABLE users (id, name)" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"], "Table users created.");

        let req = test::TestRequest::post()
            .uri("/execute")
            .set_json(serde_json::json!({ "command": "INSERT INTO users VALUES (1, 'Alice')" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"], "1 row inserted into users.");

        let req = test::TestRequest::post()
            .uri("/execute")
            .set_json(serde_json::json!({ "command": "SELECT * FROM users" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"][0]["id"], 1);
        assert_eq!(body["result"][0]["name"], "Alice");
    }

    #[actix_web::test]
    async fn test_unknown_table_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_app_data(&dir))
                .route("/execute", web::post().to(execute_command)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/execute")
            .set_json(serde_json::json!({ "command": "SELECT * FROM missing" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_syntax_error_is_a_result() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_app_data(&dir))
                .route("/execute", web::post().to(execute_command)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/execute")
            .set_json(serde_json::json!({ "command": "SELEKT * FROM users" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let message = body["result"].as_str().expect("string result");
        assert!(message.starts_with("Syntax error"));
    }
}
