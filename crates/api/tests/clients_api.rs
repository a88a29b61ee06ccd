//! HTTP-level integration tests for the `/clients` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_client, create_program, delete, enroll, get, post_json,
    put_json,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_client_returns_201_with_generated_id(pool: PgPool) {
    let client = create_client(&pool, "Alice Mwangi").await;

    assert_eq!(client["full_name"], "Alice Mwangi");
    assert_eq!(client["date_of_birth"], "1990-05-21");
    assert!(uuid::Uuid::parse_str(client["id"].as_str().unwrap()).is_ok());
    assert!(client["address"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_client_by_id(pool: PgPool) {
    let created = create_client(&pool, "Get Me").await;
    let id = created["id"].as_str().unwrap();

    let response = get(build_test_app(pool), &format!("/api/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["full_name"], "Get Me");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_client_returns_404(pool: PgPool) {
    let id = uuid::Uuid::new_v4();
    let response = get(build_test_app(pool), &format!("/api/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_client_is_partial_and_ignores_unknown_fields(pool: PgPool) {
    let created = create_client(&pool, "Original").await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        build_test_app(pool),
        &format!("/api/clients/{id}"),
        json!({ "address": "Nakuru, Kenya", "favourite_colour": "blue" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["address"], "Nakuru, Kenya");
    assert_eq!(json["full_name"], "Original");
    assert_eq!(json["gender"], "Female");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_client_accepts_present_null_fields(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/clients",
        json!({ "full_name": "Baraka", "gender": null, "date_of_birth": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["full_name"], "Baraka");
    assert!(json["gender"].is_null());
    assert!(json["date_of_birth"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_client_null_clears_field(pool: PgPool) {
    let created = create_client(&pool, "Wanjiru").await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["phone_number"], "0712345678");

    let response = put_json(
        build_test_app(pool),
        &format!("/api/clients/{id}"),
        json!({ "phone_number": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["phone_number"].is_null());
    assert_eq!(json["gender"], "Female");
    assert_eq!(json["date_of_birth"], "1990-05-21");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_clients_paginates_and_filters(pool: PgPool) {
    for name in ["Alice", "Bob", "Carol", "Alina"] {
        create_client(&pool, name).await;
    }

    let response = get(build_test_app(pool.clone()), "/api/clients?page=2&limit=3").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 4);
    assert_eq!(json["pages"], 2);
    assert_eq!(json["current_page"], 2);
    assert_eq!(json["clients"].as_array().unwrap().len(), 1);

    let response = get(build_test_app(pool.clone()), "/api/clients?q=ali").await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);

    // Beyond the last page: empty list, not an error.
    let response = get(build_test_app(pool), "/api/clients/?page=9&limit=abc").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["current_page"], 9);
    assert!(json["clients"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_clients_treats_wildcards_literally(pool: PgPool) {
    create_client(&pool, "Alice").await;
    create_client(&pool, "100% Bob").await;

    let response = get(build_test_app(pool.clone()), "/api/clients/search?q=%25").await;
    let json = body_json(response).await;
    let names: Vec<_> = json.as_array().unwrap().iter().map(|c| c["full_name"].clone()).collect();
    assert_eq!(names, vec![json!("100% Bob")]);

    let response = get(build_test_app(pool), "/api/clients/search?q=ALI").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_client(pool: PgPool) {
    let created = create_client(&pool, "Short Lived").await;
    let id = created["id"].as_str().unwrap();

    let response = delete(build_test_app(pool.clone()), &format!("/api/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_enrolled_client_is_refused(pool: PgPool) {
    let client = create_client(&pool, "Enrolled").await;
    let program = create_program(&pool, "Maternal Health").await;
    let id = client["id"].as_str().unwrap();
    enroll(&pool, id, program["id"].as_i64().unwrap()).await;

    let response = delete(build_test_app(pool.clone()), &format!("/api/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(build_test_app(pool), &format!("/api/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
