use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::{RoleRequest, UserListQuery};
use crate::utils::auth::CurrentUser;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

/// Team roster; `active=true` drops removed users
///
/// GET /users?active=<bool>
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<UserListQuery>,
) -> Response {
    let users = if params.active {
        state.store.active_users()
    } else {
        state.store.users()
    };

    (StatusCode::OK, Json(users)).into_response()
}

/// Change another member's role
///
/// PUT /users/{id}/role {"role": "Admin" | "Member" | "Removed"}
pub async fn update_role_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(user_id): Path<String>,
    Json(request): Json<RoleRequest>,
) -> Result<Response, ApiError> {
    let user = state.store.update_user_role(&user_id, request.role)?;

    Ok((StatusCode::OK, Json(user)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{User, UserRole};
    use axum::body::Body;
    use http_body_util::BodyExt;

    fn logged_in() -> (Arc<AppState>, CurrentUser) {
        let state = AppState::for_tests();
        let user = state.store.login("Sarah Chen").unwrap();
        (state, CurrentUser(user))
    }

    async fn users_of(response: Response) -> Vec<User> {
        let bytes = Body::new(response.into_body()).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_users() {
        let (state, user) = logged_in();

        let all = list_users_handler(State(state.clone()), user.clone(), Query(UserListQuery::default())).await;
        assert_eq!(users_of(all).await.len(), 4);

        let active = list_users_handler(State(state), user, Query(UserListQuery { active: true })).await;
        let active = users_of(active).await;
        assert_eq!(active.len(), 3);
        assert!(active.iter().all(|u| u.role != UserRole::Removed));
    }

    #[tokio::test]
    async fn test_remove_member_clears_assignment() {
        let (state, user) = logged_in();
        let request = RoleRequest {
            role: UserRole::Removed,
        };

        let response = update_role_handler(State(state.clone()), user, Path("u2".to_string()), Json(request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.store.lead(3).unwrap().assigned_to, None);
    }

    #[tokio::test]
    async fn test_cannot_change_own_role() {
        let (state, user) = logged_in();
        let request = RoleRequest {
            role: UserRole::Member,
        };

        let result = update_role_handler(State(state.clone()), user, Path("u1".to_string()), Json(request)).await;
        assert_eq!(result.unwrap_err().into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(state.store.user("u1").unwrap().role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_unknown_user_role() {
        let (state, user) = logged_in();
        let request = RoleRequest {
            role: UserRole::Admin,
        };

        let result = update_role_handler(State(state), user, Path("nobody".to_string()), Json(request)).await;
        assert_eq!(result.unwrap_err().into_response().status(), StatusCode::NOT_FOUND);
    }
}
