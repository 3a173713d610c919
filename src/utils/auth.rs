use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::user::User;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;
use tracing::warn;

/// The logged-in user. Extracting it rejects the request with 401 while
/// nobody is logged in, which gates every dashboard screen behind login.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match state.store.current_user() {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                warn!(path = %parts.uri.path(), "Request without an active session");
                Err(ApiError::NotAuthenticated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts() -> Parts {
        Request::builder().uri("/leads").body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_rejects_without_session() {
        let state = AppState::for_tests();
        let result = CurrentUser::from_request_parts(&mut parts(), &state).await;
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_resolves_logged_in_user() {
        let state = AppState::for_tests();
        state.store.login("Marcus Rodriguez").unwrap();

        let CurrentUser(user) = CurrentUser::from_request_parts(&mut parts(), &state)
            .await
            .unwrap();
        assert_eq!(user.id, "u2");
    }
}
