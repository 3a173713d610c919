use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::{LoginRequest, SessionResponse, SuccessResponse};
use crate::models::user::User;
use crate::utils::auth::CurrentUser;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

fn session_response(state: &AppState, current_user: User) -> SessionResponse {
    let (org_name, credits) = state.store.read(|org| (org.org_name.clone(), org.credits));
    SessionResponse {
        current_user,
        org_name,
        credits,
    }
}

/// Log in by display name
///
/// POST /session/login {"username": "..."}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = state.store.login(request.username.trim())?;

    Ok((StatusCode::OK, Json(session_response(&state, user))).into_response())
}

/// POST /session/logout
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> Response {
    state.store.logout();

    (
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
        .into_response()
}

/// Current user plus the organization header
///
/// GET /session
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, ApiError> {
    Ok((StatusCode::OK, Json(session_response(&state, user))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = Body::new(response.into_body()).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let state = AppState::for_tests();
        let request = LoginRequest {
            username: "Priya Patel".to_string(),
        };

        let response = login_handler(State(state.clone()), Json(request)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let session: SessionResponse = body_json(response).await;
        assert_eq!(session.current_user.id, "u3");
        assert_eq!(session.org_name, "Default Corp");
        assert_eq!(session.credits, 100);
        assert_eq!(state.store.current_user().unwrap().id, "u3");
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let state = AppState::for_tests();
        let request = LoginRequest {
            username: "Nobody".to_string(),
        };

        let result = login_handler(State(state.clone()), Json(request)).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(state.store.current_user().is_none());
    }

    #[tokio::test]
    async fn test_logout() {
        let state = AppState::for_tests();
        state.store.login("Sarah Chen").unwrap();

        let response = logout_handler(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.store.is_authenticated());
    }

    #[tokio::test]
    async fn test_session_reflects_credits() {
        let state = AppState::for_tests();
        let user = state.store.login("Sarah Chen").unwrap();
        state.store.unlock_lead(1).unwrap();

        let response = session_handler(State(state), CurrentUser(user)).await.unwrap();
        let session: SessionResponse = body_json(response).await;
        assert_eq!(session.credits, 98);
    }
}
