//! HTTP API tests.
//!
//! Drive the full router against the in-memory store, so every request goes
//! through extraction, validation, the service rules and error rendering.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Months;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use domain::{today_utc, UsuarioResponse};
use usuario_service_lib::api::{create_router, AppState};
use usuario_service_lib::infra::{MemoryStore, UnitOfWork};
use usuario_service_lib::service::UsuarioManager;

fn app() -> Router {
    let storage: Arc<dyn UnitOfWork> = Arc::new(MemoryStore::new());
    let usuarios = Arc::new(UsuarioManager::new(storage.clone()));
    create_router(AppState::new(usuarios, storage), Duration::from_secs(5))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn ana() -> Value {
    json!({
        "nome": "Ana Silva",
        "email": " Ana@Mail.COM ",
        "senha": "123456",
        "dataNascimento": "2000-01-01"
    })
}

async fn create(app: &Router, body: Value) -> UsuarioResponse {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/usuarios", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_returns_201_with_location() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/usuarios", ana()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/usuarios/1");

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "ana@mail.com");
    assert_eq!(body["ativo"], true);
    assert_eq!(body["dataNascimento"], "2000-01-01");
    assert!(body.get("senha").is_none());
    assert!(body.get("dataAtualizacao").is_none());
}

#[tokio::test]
async fn test_create_duplicate_email_returns_409() {
    let app = app();
    create(&app, ana()).await;

    let mut other = ana();
    other["email"] = json!("ANA@mail.com");
    let response = app
        .oneshot(json_request("POST", "/usuarios", other))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"]["code"], "DUPLICATE_EMAIL");
    assert_eq!(body["error"]["message"], "Email já cadastrado.");
}

#[tokio::test]
async fn test_create_underage_returns_400() {
    let app = app();
    let nascimento = today_utc().checked_sub_months(Months::new(17 * 12)).unwrap();

    let mut body = ana();
    body["dataNascimento"] = json!(nascimento.to_string());
    let response = app
        .clone()
        .oneshot(json_request("POST", "/usuarios", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"]["fields"][0]["field"], "dataNascimento");

    // Nothing was stored
    let response = app.oneshot(empty_request("GET", "/usuarios")).await.unwrap();
    let list: Vec<UsuarioResponse> = json_body(response.into_body()).await;
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_create_eighteenth_birthday_today_is_accepted() {
    let app = app();
    let nascimento = today_utc().checked_sub_months(Months::new(18 * 12)).unwrap();

    let mut body = ana();
    body["dataNascimento"] = json!(nascimento.to_string());
    let created = create(&app, body).await;

    assert_eq!(created.data_nascimento, nascimento);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/usuarios",
            json!({
                "nome": "Al",
                "email": "sem-arroba",
                "senha": "123",
                "dataNascimento": "2000-01-01",
                "telefone": "11987654321"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let fields: Vec<&str> = body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "nome", "senha", "telefone"]);
}

#[tokio::test]
async fn test_formatted_telefone_is_accepted() {
    let app = app();

    let mut body = ana();
    body["telefone"] = json!("(11) 98765-4321");
    let created = create(&app, body).await;

    assert_eq!(created.telefone.as_deref(), Some("(11) 98765-4321"));
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/usuarios")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"nome\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_returns_404() {
    let response = app()
        .oneshot(empty_request("GET", "/usuarios/99"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"]["message"], "Usuário não encontrado.");
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let response = app()
        .oneshot(empty_request("GET", "/usuarios/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_non_numeric_id_on_put_and_delete_uses_error_envelope() {
    let app = app();

    let put = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/usuarios/um",
            json!({
                "nome": "Ana Souza",
                "email": "ana@mail.com",
                "dataNascimento": "1999-05-05",
                "ativo": true
            }),
        ))
        .await
        .unwrap();
    assert_eq!(put.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(put.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let delete = app
        .oneshot(empty_request("DELETE", "/usuarios/1.5"))
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(delete.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = app();
    let created = create(&app, ana()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/usuarios/{}", created.id),
            json!({
                "nome": "  Ana Souza  ",
                "email": "ANA@mail.com",
                "dataNascimento": "1999-05-05",
                "telefone": "(11) 3456-7890",
                "ativo": true
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: UsuarioResponse = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.nome, "Ana Souza");
    assert_eq!(updated.email, "ana@mail.com");
    assert_eq!(updated.data_criacao, created.data_criacao);
    assert_eq!(updated.telefone.as_deref(), Some("(11) 3456-7890"));
}

#[tokio::test]
async fn test_update_unknown_returns_404() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/usuarios/42",
            json!({
                "nome": "Ana Souza",
                "email": "ana@mail.com",
                "dataNascimento": "1999-05-05",
                "ativo": true
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_taken_email_returns_409() {
    let app = app();
    create(&app, ana()).await;
    let mut bia = ana();
    bia["email"] = json!("bia@mail.com");
    let bia = create(&app, bia).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/usuarios/{}", bia.id),
            json!({
                "nome": "Bia Lima",
                "email": " Ana@Mail.com",
                "dataNascimento": "2000-01-01",
                "ativo": true
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_is_soft_and_repeatable() {
    let app = app();
    let created = create(&app, ana()).await;
    let uri = format!("/usuarios/{}", created.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Still readable, now inactive
    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let usuario: UsuarioResponse = json_body(response.into_body()).await;
    assert!(!usuario.ativo);

    // Deleting again still succeeds
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // And it keeps showing up in the listing
    let response = app.oneshot(empty_request("GET", "/usuarios")).await.unwrap();
    let list: Vec<UsuarioResponse> = json_body(response.into_body()).await;
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_returns_404() {
    let response = app()
        .oneshot(empty_request("DELETE", "/usuarios/7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let app = app();
    for email in ["c@mail.com", "a@mail.com", "b@mail.com"] {
        let mut body = ana();
        body["email"] = json!(email);
        create(&app, body).await;
    }

    let response = app.oneshot(empty_request("GET", "/usuarios")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let list: Vec<UsuarioResponse> = json_body(response.into_body()).await;
    let ids: Vec<i32> = list.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_health_reports_healthy() {
    let response = app().oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let response = app()
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc: Value = json_body(response.into_body()).await;
    assert!(doc["paths"].get("/usuarios").is_some());
    assert!(doc["paths"].get("/usuarios/{id}").is_some());

    let create = &doc["components"]["schemas"]["CreateUsuario"]["properties"];
    assert_eq!(create["email"]["example"], "ana@mail.com");
    assert_eq!(create["dataNascimento"]["example"], "2000-01-01");
}
