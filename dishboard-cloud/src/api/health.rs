//! Health check endpoint

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "dishboard-cloud",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.store.is_some(),
        "uploads": state.images.is_some(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::create_router;
    use crate::api::testing::{FakeHost, app_state, json_body};
    use crate::store::memory::MemoryStore;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn reports_configured_backends() {
        let state = app_state(Some(Arc::new(MemoryStore::default())), None::<Arc<FakeHost>>);
        let response = create_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "dishboard-cloud");
        assert_eq!(body["store"], true);
        assert_eq!(body["uploads"], false);
    }
}
