//! Authentication and ownership middleware
//!
//! `auth_middleware` runs first on every protected route and stores the
//! token's identity in the request extensions. `require_owner` runs after it
//! on update/delete routes and lets the request through only when the
//! authenticated user owns the addressed resource.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use common::error::DatabaseResult;
use tracing::warn;

use crate::{
    error::ApiError,
    extract::ResourceId,
    models::{Comment, Owned, Photo, SocialMedia},
    repositories::{CommentRepository, PhotoRepository, SocialMediaRepository},
    state::AppState,
};

/// Authenticated user information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header");
            ApiError::Unauthorized
        })?;

    // Check if it's a Bearer token
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format");
        ApiError::Unauthorized
    })?;

    let claims = state.jwt_service.validate_token(token.trim()).map_err(|e| {
        warn!("Failed to validate token: {}", e);
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Extract the authenticated user from the request extensions
pub fn current_user(req: &Request) -> Option<&AuthUser> {
    req.extensions().get::<AuthUser>()
}

/// Loads a resource whose owner the guard checks
#[async_trait]
pub trait ResourceLoader: Send + Sync + 'static {
    type Resource: Owned + Send;

    /// Name used in "not found" responses
    const NAME: &'static str;

    async fn load(&self, id: i64) -> DatabaseResult<Option<Self::Resource>>;
}

#[async_trait]
impl ResourceLoader for Arc<dyn PhotoRepository> {
    type Resource = Photo;
    const NAME: &'static str = "Photo";

    async fn load(&self, id: i64) -> DatabaseResult<Option<Photo>> {
        Ok(self.get_by_id(id).await?.map(|details| details.photo))
    }
}

#[async_trait]
impl ResourceLoader for Arc<dyn CommentRepository> {
    type Resource = Comment;
    const NAME: &'static str = "Comment";

    async fn load(&self, id: i64) -> DatabaseResult<Option<Comment>> {
        Ok(self.get_by_id(id).await?.map(|details| details.comment))
    }
}

#[async_trait]
impl ResourceLoader for Arc<dyn SocialMediaRepository> {
    type Resource = SocialMedia;
    const NAME: &'static str = "Social media";

    async fn load(&self, id: i64) -> DatabaseResult<Option<SocialMedia>> {
        Ok(self.get_by_id(id).await?.map(|details| details.social_media))
    }
}

/// Ownership check for one resource type, used as middleware state
#[derive(Clone)]
pub struct OwnershipGuard<L> {
    loader: L,
}

impl<L: ResourceLoader> OwnershipGuard<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Allow the request only if `user` owns the resource `id`.
    ///
    /// A missing resource is reported before ownership, so non-owners learn
    /// whether an id exists.
    pub async fn check(&self, id: i64, user: &AuthUser) -> Result<(), ApiError> {
        let resource = self
            .loader
            .load(id)
            .await?
            .ok_or(ApiError::NotFound(L::NAME))?;

        if resource.owner_id() != user.id {
            warn!(
                "User {} denied access to {} {} owned by {}",
                user.id,
                L::NAME,
                id,
                resource.owner_id()
            );
            return Err(ApiError::Forbidden);
        }

        Ok(())
    }
}

/// Ownership middleware. Must be layered inside `auth_middleware`.
pub async fn require_owner<L>(
    State(guard): State<OwnershipGuard<L>>,
    ResourceId(id): ResourceId,
    req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    L: ResourceLoader + Clone,
{
    let user = current_user(&req).cloned().ok_or(ApiError::Unauthorized)?;

    guard.check(id, &user).await?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::{get, put},
    };
    use tower::ServiceExt;

    use crate::jwt::test_service;

    #[derive(Debug)]
    struct Item {
        owner: i64,
    }

    impl Owned for Item {
        fn owner_id(&self) -> i64 {
            self.owner
        }
    }

    #[derive(Clone)]
    struct FixedLoader(Arc<HashMap<i64, i64>>);

    #[async_trait]
    impl ResourceLoader for FixedLoader {
        type Resource = Item;
        const NAME: &'static str = "Item";

        async fn load(&self, id: i64) -> DatabaseResult<Option<Item>> {
            Ok(self.0.get(&id).map(|owner| Item { owner: *owner }))
        }
    }

    fn loader() -> FixedLoader {
        // item 1 belongs to user 10, item 2 to user 20
        FixedLoader(Arc::new(HashMap::from([(1, 10), (2, 20)])))
    }

    fn user(id: i64) -> AuthUser {
        AuthUser {
            id,
            email: format!("user{}@x.com", id),
        }
    }

    #[tokio::test]
    async fn test_owner_is_allowed() {
        let guard = OwnershipGuard::new(loader());
        assert!(guard.check(1, &user(10)).await.is_ok());
        assert!(guard.check(2, &user(20)).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden() {
        let guard = OwnershipGuard::new(loader());
        assert!(matches!(
            guard.check(1, &user(20)).await,
            Err(ApiError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_unknown_resource_is_not_found() {
        let guard = OwnershipGuard::new(loader());
        assert!(matches!(
            guard.check(99, &user(10)).await,
            Err(ApiError::NotFound("Item"))
        ));
    }

    /// Router with both stages in front of a handler that counts its calls
    fn guarded_router(hits: Arc<AtomicUsize>) -> Router {
        let state = AppState::in_memory();
        let handler_hits = hits.clone();

        Router::new()
            .route(
                "/items/:id",
                put(move || {
                    let hits = handler_hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        "updated"
                    }
                })
                .route_layer(from_fn_with_state(
                    OwnershipGuard::new(loader()),
                    require_owner::<FixedLoader>,
                )),
            )
            .route("/me", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(state, auth_middleware))
    }

    fn put_item(id: i64, authorization: Option<String>) -> HttpRequest<Body> {
        put_item_at(&format!("/items/{}", id), authorization)
    }

    fn put_item_at(uri: &str, authorization: Option<String>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().method("PUT").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn bearer(user_id: i64) -> Option<String> {
        let token = test_service()
            .generate_token(user_id, &format!("user{}@x.com", user_id))
            .unwrap();
        Some(format!("Bearer {}", token))
    }

    #[tokio::test]
    async fn test_pipeline_allows_owner() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = guarded_router(hits.clone())
            .oneshot(put_item(1, bearer(10)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"updated");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pipeline_rejects_non_owner_before_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = guarded_router(hits.clone())
            .oneshot(put_item(1, bearer(20)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pipeline_reports_missing_resource() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = guarded_router(hits.clone())
            .oneshot(put_item(99, bearer(20)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gate_rejects_missing_or_malformed_tokens() {
        let token = test_service().generate_token(10, "user10@x.com").unwrap();
        let cases = [
            None,
            Some("".to_string()),
            Some(token.clone()),
            Some(format!("Basic {}", token)),
            Some("Bearer not-a-token".to_string()),
            Some(format!("Bearer {}x", token)),
        ];

        for authorization in cases {
            let hits = Arc::new(AtomicUsize::new(0));
            let response = guarded_router(hits.clone())
                .oneshot(put_item(1, authorization.clone()))
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "authorization {:?} was accepted",
                authorization
            );
            assert_eq!(hits.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_gate_rejects_expired_token() {
        let issued_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            - 7200;
        let token = test_service()
            .generate_token_at(10, "user10@x.com", issued_at)
            .unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let response = guarded_router(hits.clone())
            .oneshot(put_item(1, Some(format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_id_gets_error_envelope() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = guarded_router(hits.clone())
            .oneshot(put_item_at("/items/abc", bearer(10)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], 400);
        assert!(body["errors"].is_string());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_guard_without_gate_is_unauthorized() {
        let router = Router::new().route(
            "/items/:id",
            put(|| async { "updated" }).route_layer(from_fn_with_state(
                OwnershipGuard::new(loader()),
                require_owner::<FixedLoader>,
            )),
        );

        let response = router.oneshot(put_item(1, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
