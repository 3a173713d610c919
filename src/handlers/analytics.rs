// Analytics endpoint

use crate::core::state::AppState;
use crate::models::api::{AnalyticsQuery, AnalyticsResponse};
use crate::utils::auth::CurrentUser;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

/// Returns per-channel lead statistics and one page of the active team:
/// - total, unlocked, liked and assigned leads per channel
/// - yet to unlock (ReceptoNet), contacted / yet to contact (OrgNetwork)
/// - active members, five per page
///
/// GET /analytics?page=<n>
pub async fn analytics_handler(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<AnalyticsQuery>,
) -> Response {
    let snapshot = state.stats.get_or_compute(&state.store);
    let team = snapshot.team_page(params.page.unwrap_or(1));

    (
        StatusCode::OK,
        Json(AnalyticsResponse {
            recepto_net: snapshot.recepto_net,
            org_network: snapshot.org_network,
            team,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn analytics_of(state: Arc<AppState>, page: Option<usize>) -> AnalyticsResponse {
        let user = CurrentUser(state.store.current_user().unwrap());
        let response = analytics_handler(State(state), user, Query(AnalyticsQuery { page })).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = Body::new(response.into_body()).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analytics_on_seed() {
        let state = AppState::for_tests();
        state.store.login("Sarah Chen").unwrap();

        let analytics = analytics_of(state, None).await;
        assert_eq!(analytics.recepto_net.total, 2);
        assert_eq!(analytics.recepto_net.yet_to_unlock, 2);
        assert_eq!(analytics.org_network.contacted, 1);
        assert_eq!(analytics.org_network.yet_to_contact, 2);
        assert_eq!(analytics.team.page, 1);
        assert_eq!(analytics.team.total_pages, 1);
        assert_eq!(analytics.team.members.len(), 3);
    }

    #[tokio::test]
    async fn test_analytics_follows_mutations() {
        let state = AppState::for_tests();
        state.store.login("Sarah Chen").unwrap();
        let _ = analytics_of(state.clone(), Some(1)).await;

        state.store.unlock_lead(4).unwrap();
        state.store.like_lead(4).unwrap();

        let analytics = analytics_of(state, Some(7)).await;
        assert_eq!(analytics.org_network.contacted, 2);
        assert_eq!(analytics.org_network.liked, 2);
        assert_eq!(analytics.team.page, 1);
    }
}
