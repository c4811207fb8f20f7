use super::{
    auth::build_auth_routers, event::build_event_routers, health::build_health_check_routers,
    user::build_user_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_routers())
        .merge(build_event_routers());
    Router::new().nest("/api/v1", router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter::{database::connect_database_with, redis::RedisClient};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use kernel::model::id::EventId;
    use shared::config::AppConfig;
    use std::sync::Arc;
    use tower::ServiceExt;

    // DB と Redis には接続しない（どちらも遅延接続）
    fn app() -> anyhow::Result<Router> {
        let config = AppConfig::from_lookup(|key| {
            let value = match key {
                "DATABASE_HOST" | "REDIS_HOST" => "localhost",
                "DATABASE_PORT" => "5432",
                "DATABASE_USERNAME" | "DATABASE_NAME" => "app",
                "DATABASE_PASSWORD" => "passwd",
                "REDIS_PORT" => "6379",
                "AUTH_TOKEN_TTL" => "3600",
                _ => return None,
            };
            Some(value.to_string())
        })?;
        let pool = connect_database_with(&config.database);
        let kv = Arc::new(RedisClient::new(&config.redis)?);
        let registry = AppRegistry::new(pool, kv, config);
        Ok(routes().with_state(registry))
    }

    async fn send(request: Request<Body>) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let res = app()?.oneshot(request).await?;
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, json))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_check_is_ok() -> anyhow::Result<()> {
        let (status, _) = send(get("/api/v1/health")).await?;
        assert_eq!(status, StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn event_list_is_public_and_lenient() -> anyhow::Result<()> {
        let (status, json) = send(get("/api/v1/events?category=Karaoke&date=sometime")).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "items": [] }));

        let (status, json) = send(get("/api/v1/events/discover")).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "items": [] }));
        Ok(())
    }

    #[tokio::test]
    async fn discover_with_unusable_token_is_anonymous() -> anyhow::Result<()> {
        let req = Request::get("/api/v1/events/discover")
            .header(header::AUTHORIZATION, "Bearer not-a-session")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(req).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "items": [] }));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() -> anyhow::Result<()> {
        let uri = format!("/api/v1/events/{}", EventId::new());
        let (status, json) = send(get(&uri)).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["message"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn mutations_require_a_bearer_token() -> anyhow::Result<()> {
        let create = Request::post("/api/v1/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, _) = send(create).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let book = Request::post(format!("/api/v1/events/{}/bookings", EventId::new()))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(book).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(get("/api/v1/users/me")).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        Ok(())
    }
}
