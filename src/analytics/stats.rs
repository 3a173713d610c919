use crate::models::lead::{Lead, LeadType, LikeStatus};
use crate::models::org::OrganizationState;
use crate::models::user::User;
use crate::stores::org_store::OrgStore;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Team members shown per analytics page
pub const TEAM_PAGE_SIZE: usize = 5;

/// Lead counters for one sourcing channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total: usize,
    pub unlocked: usize,
    pub liked: usize,
    pub assigned: usize,
    /// Locked ReceptoNet leads
    pub yet_to_unlock: usize,
    /// Unlocked OrgNetwork leads
    pub contacted: usize,
    /// Locked OrgNetwork leads
    pub yet_to_contact: usize,
}

impl ChannelStats {
    pub fn from_leads<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Self {
        let mut stats = Self::default();
        for lead in leads {
            stats.total += 1;
            if lead.is_unlocked {
                stats.unlocked += 1;
            }
            if lead.like_status == Some(LikeStatus::Liked) {
                stats.liked += 1;
            }
            if lead.is_assigned() {
                stats.assigned += 1;
            }
            match (lead.lead_type, lead.is_unlocked) {
                (LeadType::ReceptoNet, false) => stats.yet_to_unlock += 1,
                (LeadType::OrgNetwork, true) => stats.contacted += 1,
                (LeadType::OrgNetwork, false) => stats.yet_to_contact += 1,
                (LeadType::ReceptoNet, true) => {}
            }
        }
        stats
    }

    pub fn for_channel(leads: &[Lead], lead_type: LeadType) -> Self {
        Self::from_leads(leads.iter().filter(|l| l.lead_type == lead_type))
    }
}

/// Derived analytics for one revision of the aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub revision: u64,
    pub recepto_net: ChannelStats,
    pub org_network: ChannelStats,
    pub active_users: Vec<User>,
}

impl AnalyticsSnapshot {
    pub fn compute(state: &OrganizationState, revision: u64) -> Self {
        Self {
            revision,
            recepto_net: ChannelStats::for_channel(&state.leads, LeadType::ReceptoNet),
            org_network: ChannelStats::for_channel(&state.leads, LeadType::OrgNetwork),
            active_users: state.active_users().cloned().collect(),
        }
    }

    pub fn team_page(&self, page: usize) -> TeamPage {
        TeamPage::slice(&self.active_users, page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPage {
    pub page: usize,
    pub total_pages: usize,
    pub members: Vec<User>,
}

impl TeamPage {
    /// Slice `users` into pages of `TEAM_PAGE_SIZE`, clamping `page` into
    /// `1..=total_pages`
    pub fn slice(users: &[User], page: usize) -> Self {
        let total_pages = users.len().div_ceil(TEAM_PAGE_SIZE);
        let page = page.clamp(1, total_pages.max(1));
        let start = (page - 1) * TEAM_PAGE_SIZE;

        Self {
            page,
            total_pages,
            members: users.iter().skip(start).take(TEAM_PAGE_SIZE).cloned().collect(),
        }
    }
}

/// Holds the last computed snapshot until the store revision moves on
#[derive(Default)]
pub struct StatsCache {
    cached: Mutex<Option<AnalyticsSnapshot>>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&self, store: &OrgStore) -> AnalyticsSnapshot {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);

        let revision = store.revision();
        if let Some(snapshot) = cached.as_ref().filter(|s| s.revision == revision) {
            return snapshot.clone();
        }

        let snapshot = store.read_versioned(AnalyticsSnapshot::compute);
        debug!(revision = snapshot.revision, "Analytics recomputed");
        *cached = Some(snapshot.clone());
        snapshot
    }
}
