use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::tour_packages::handlers;
use crate::features::tour_packages::services::TourPackageService;

/// Routes for tour packages. Reads are public, writes need an admin or staff principal.
pub fn routes(service: Arc<TourPackageService>) -> Router {
    Router::new()
        .route(
            "/api/tour-packages",
            get(handlers::list_tour_packages).post(handlers::create_tour_package),
        )
        .route(
            "/api/tour-packages/{id}",
            get(handlers::get_tour_package)
                .put(handlers::update_tour_package)
                .patch(handlers::update_tour_package)
                .delete(handlers::delete_tour_package),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::shared::test_helpers::{admin_token, customer_token, TestCatalog};

    #[tokio::test]
    async fn test_create_then_read() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let server = TestServer::new(catalog.router()).unwrap();

        let created = server
            .post("/api/tour-packages")
            .authorization_bearer(admin_token())
            .json(&refs.bali_adventure())
            .await;
        created.assert_status(StatusCode::CREATED);
        let created: Value = created.json();
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["status"], "available");

        let fetched: Value = server.get(&format!("/api/tour-packages/{}", id)).await.json();
        assert_eq!(fetched["data"]["nama"], "Bali Adventure");
        assert_eq!(fetched["data"]["destination"]["id"], json!(refs.destination));
        assert_eq!(fetched["data"]["hotel"]["nama"], "Hotel Santika");

        let bare: Value = server
            .get(&format!("/api/tour-packages/{}", id))
            .add_query_param("populate", false)
            .await
            .json();
        assert_eq!(bare["data"]["destination"], json!(refs.destination));
    }

    #[tokio::test]
    async fn test_writes_require_admin() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let server = TestServer::new(catalog.router()).unwrap();

        server
            .post("/api/tour-packages")
            .json(&refs.bali_adventure())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .post("/api/tour-packages")
            .authorization_bearer(customer_token())
            .json(&refs.bali_adventure())
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .post("/api/tour-packages")
            .authorization_bearer("garbage")
            .json(&refs.bali_adventure())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reversed_schedule_reports_field() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let server = TestServer::new(catalog.router()).unwrap();

        let mut payload = serde_json::to_value(refs.bali_adventure()).unwrap();
        payload["jadwal"] = json!([
            { "startDate": "2023-08-05", "endDate": "2023-08-01", "status": "available" }
        ]);

        let response = server
            .post("/api/tour-packages")
            .authorization_bearer(admin_token())
            .json(&payload)
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["fieldErrors"]["jadwal[0]"].is_array());
    }

    #[tokio::test]
    async fn test_patch_and_put_share_semantics() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let id = catalog.seed_package(&refs, "Bali Adventure").await;
        let server = TestServer::new(catalog.router()).unwrap();
        let path = format!("/api/tour-packages/{}", id);

        let patched: Value = server
            .patch(&path)
            .authorization_bearer(admin_token())
            .json(&json!({ "harga": 2000000 }))
            .await
            .json();
        assert_eq!(patched["data"]["harga"], 2000000);
        assert_eq!(patched["data"]["nama"], "Bali Adventure");

        let put: Value = server
            .put(&path)
            .authorization_bearer(admin_token())
            .json(&json!({ "harga": 2000000 }))
            .await
            .json();
        assert_eq!(put["data"]["harga"], 2000000);
        assert_eq!(put["data"]["id"], patched["data"]["id"]);
        assert_eq!(put["data"]["jadwal"], patched["data"]["jadwal"]);
    }

    #[tokio::test]
    async fn test_delete_and_missing() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let id = catalog.seed_package(&refs, "Bali Adventure").await;
        let server = TestServer::new(catalog.router()).unwrap();

        let deleted: Value = server
            .delete(&format!("/api/tour-packages/{}", id))
            .authorization_bearer(admin_token())
            .await
            .json();
        assert_eq!(deleted["data"]["deleted"], true);

        server
            .delete(&format!("/api/tour-packages/{}", id))
            .authorization_bearer(admin_token())
            .await
            .assert_status_not_found();

        server
            .get(&format!("/api/tour-packages/{}", Uuid::now_v7()))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_list_meta_and_filter() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        catalog.seed_package(&refs, "Bali Adventure").await;
        catalog.seed_package(&refs, "Lombok Escape").await;
        let server = TestServer::new(catalog.router()).unwrap();

        let all: Value = server.get("/api/tour-packages").await.json();
        assert_eq!(all["meta"]["total"], 2);
        assert_eq!(all["data"][0]["nama"], "Lombok Escape");

        let cancelled: Value = server
            .get("/api/tour-packages")
            .add_query_param("status", "cancelled")
            .await
            .json();
        assert_eq!(cancelled["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_unknown_status_filter_uses_envelope() {
        let catalog = TestCatalog::new();
        let server = TestServer::new(catalog.router()).unwrap();

        let response = server
            .get("/api/tour-packages")
            .add_query_param("status", "sold_out")
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query parameter"));

        server
            .get(&format!("/api/tour-packages/{}", Uuid::now_v7()))
            .add_query_param("populate", "maybe")
            .await
            .assert_status_bad_request();
    }
}
