use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::filters::lead_filter::{filter_options, option_by_id, FilterGroup, LeadFilter};
use crate::models::api::{
    AssignRequest, FilterOptionResponse, LeadListQuery, LeadListResponse, UnlockResponse,
};
use crate::models::lead::Lead;
use crate::utils::auth::CurrentUser;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// List leads, optionally filtered by location and score range
///
/// GET /leads?location=<id,id>&score=<ge70|lt70>
pub async fn list_leads_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<LeadListQuery>,
) -> Result<Response, ApiError> {
    let filter = LeadFilter::parse(params.location.as_deref(), params.score.as_deref())
        .map_err(|e| {
            warn!(error = %e, "Rejected lead filter");
            ApiError::InvalidParameter(e.to_string())
        })?;

    let leads: Vec<Lead> = state
        .store
        .read(|org| filter.apply(&org.leads).into_iter().cloned().collect());

    Ok((
        StatusCode::OK,
        Json(LeadListResponse {
            leads,
            applied_filters: filter.applied_count(),
        }),
    )
        .into_response())
}

/// Available filter choices
///
/// GET /leads/filters
pub async fn filter_options_handler(_user: CurrentUser) -> Response {
    (StatusCode::OK, Json(filter_options())).into_response()
}

/// One filter option by id, with its group
///
/// GET /leads/filters/{id}
pub async fn filter_option_handler(
    _user: CurrentUser,
    Path(option_id): Path<String>,
) -> Result<Response, ApiError> {
    let not_found = || ApiError::NotFound(format!("Filter option {}", option_id));

    let group = FilterGroup::of(&option_id).ok_or_else(not_found)?;
    let option = option_by_id(&option_id).ok_or_else(not_found)?;

    Ok((StatusCode::OK, Json(FilterOptionResponse { option, group })).into_response())
}

/// GET /leads/{id}
pub async fn get_lead_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(lead_id): Path<u32>,
) -> Result<Response, ApiError> {
    let lead = state
        .store
        .lead(lead_id)
        .ok_or_else(|| ApiError::NotFound(format!("Lead {}", lead_id)))?;

    Ok((StatusCode::OK, Json(lead)).into_response())
}

/// Replace a lead record; the id in the path wins over the body
///
/// PUT /leads/{id}
pub async fn update_lead_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(lead_id): Path<u32>,
    Json(mut lead): Json<Lead>,
) -> Result<Response, ApiError> {
    lead.id = lead_id;
    let lead = state.store.update_lead(lead)?;

    Ok((StatusCode::OK, Json(lead)).into_response())
}

/// Spend credits to reveal a lead
///
/// POST /leads/{id}/unlock
pub async fn unlock_lead_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(lead_id): Path<u32>,
) -> Result<Response, ApiError> {
    let lead = state.store.unlock_lead(lead_id)?;
    let credits = state.store.credits();

    info!(lead_id, by = %user.id, credits, "Unlock confirmed");

    Ok((StatusCode::OK, Json(UnlockResponse { lead, credits })).into_response())
}

/// POST /leads/{id}/assign {"userId": "..."}
pub async fn assign_lead_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(lead_id): Path<u32>,
    Json(request): Json<AssignRequest>,
) -> Result<Response, ApiError> {
    let lead = state.store.assign_lead(lead_id, &request.user_id)?;

    Ok((StatusCode::OK, Json(lead)).into_response())
}

/// POST /leads/{id}/like
pub async fn like_lead_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(lead_id): Path<u32>,
) -> Result<Response, ApiError> {
    let lead = state.store.like_lead(lead_id)?;

    Ok((StatusCode::OK, Json(lead)).into_response())
}

/// POST /leads/{id}/dislike
pub async fn dislike_lead_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(lead_id): Path<u32>,
) -> Result<Response, ApiError> {
    let lead = state.store.dislike_lead(lead_id)?;

    Ok((StatusCode::OK, Json(lead)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::LikeStatus;
    use axum::body::Body;
    use http_body_util::BodyExt;

    fn logged_in() -> (Arc<AppState>, CurrentUser) {
        let state = AppState::for_tests();
        let user = state.store.login("Sarah Chen").unwrap();
        (state, CurrentUser(user))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = Body::new(response.into_body()).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_all_leads() {
        let (state, user) = logged_in();

        let response = list_leads_handler(State(state), user, Query(LeadListQuery::default()))
            .await
            .unwrap();
        let list: LeadListResponse = body_json(response).await;
        assert_eq!(list.leads.len(), 5);
        assert_eq!(list.applied_filters, 0);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let (state, user) = logged_in();
        let query = LeadListQuery {
            location: Some("berlin_germany,london_uk".to_string()),
            score: Some("lt70".to_string()),
        };

        let response = list_leads_handler(State(state), user, Query(query)).await.unwrap();
        let list: LeadListResponse = body_json(response).await;
        assert_eq!(list.leads.iter().map(|l| l.id).collect::<Vec<_>>(), vec![4]);
        assert_eq!(list.applied_filters, 2);
    }

    #[tokio::test]
    async fn test_list_with_unknown_filter() {
        let (state, user) = logged_in();
        let query = LeadListQuery {
            location: Some("mars".to_string()),
            score: None,
        };

        let result = list_leads_handler(State(state), user, Query(query)).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_filter_option_lookup() {
        let (_state, user) = logged_in();

        let response = filter_option_handler(user.clone(), Path("lt70".to_string()))
            .await
            .unwrap();
        let option: serde_json::Value = body_json(response).await;
        assert_eq!(option["id"], "lt70");
        assert_eq!(option["name"], "< 70");
        assert_eq!(option["group"], "scoreRange");

        let result = filter_option_handler(user, Path("mars".to_string())).await;
        assert_eq!(result.unwrap_err().into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_cannot_unlock_for_free() {
        let (state, user) = logged_in();
        let mut lead = state.store.lead(2).unwrap();
        lead.is_unlocked = true;

        let response = update_lead_handler(State(state.clone()), user, Path(2), Json(lead))
            .await
            .unwrap();
        let lead: Lead = body_json(response).await;
        assert!(!lead.is_unlocked);
        assert_eq!(state.store.credits(), 100);
    }

    #[tokio::test]
    async fn test_get_lead_not_found() {
        let (state, user) = logged_in();
        let result = get_lead_handler(State(state), user, Path(404)).await;
        assert_eq!(result.unwrap_err().into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unlock_twice() {
        let (state, user) = logged_in();

        let response = unlock_lead_handler(State(state.clone()), user.clone(), Path(1))
            .await
            .unwrap();
        let unlocked: UnlockResponse = body_json(response).await;
        assert!(unlocked.lead.is_unlocked);
        assert_eq!(unlocked.credits, 98);

        let result = unlock_lead_handler(State(state.clone()), user, Path(1)).await;
        assert_eq!(result.unwrap_err().into_response().status(), StatusCode::CONFLICT);
        assert_eq!(state.store.credits(), 98);
    }

    #[tokio::test]
    async fn test_assign_to_removed_user() {
        let (state, user) = logged_in();
        let request = AssignRequest {
            user_id: "u4".to_string(),
        };

        let result = assign_lead_handler(State(state), user, Path(1), Json(request)).await;
        assert_eq!(
            result.unwrap_err().into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_assign_and_rate() {
        let (state, user) = logged_in();
        let request = AssignRequest {
            user_id: "u3".to_string(),
        };

        let response = assign_lead_handler(State(state.clone()), user.clone(), Path(2), Json(request))
            .await
            .unwrap();
        let lead: Lead = body_json(response).await;
        assert_eq!(lead.assigned_to.as_deref(), Some("u3"));

        dislike_lead_handler(State(state.clone()), user.clone(), Path(2)).await.unwrap();
        assert_eq!(state.store.lead(2).unwrap().like_status, Some(LikeStatus::Disliked));

        like_lead_handler(State(state.clone()), user, Path(2)).await.unwrap();
        assert_eq!(state.store.lead(2).unwrap().like_status, Some(LikeStatus::Liked));
    }

    #[tokio::test]
    async fn test_update_uses_path_id() {
        let (state, user) = logged_in();
        let mut lead = state.store.lead(5).unwrap();
        lead.id = 999;
        lead.group_name = Some("Renamed".to_string());

        update_lead_handler(State(state.clone()), user, Path(5), Json(lead))
            .await
            .unwrap();
        assert_eq!(state.store.lead(5).unwrap().group_name.as_deref(), Some("Renamed"));
        assert!(state.store.lead(999).is_none());
    }
}
