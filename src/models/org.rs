use crate::models::lead::{Lead, LeadType, LikeStatus, Location};
use crate::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};

const DEFAULT_AVATAR: &str = "https://img.freepik.com/free-vector/woman-floral-traditional-costume_1308-176159.jpg";

/// The persisted aggregate: organization name, roster, leads and credit balance
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationState {
    pub org_name: String,
    pub users: Vec<User>,
    pub leads: Vec<Lead>,
    pub credits: u32,
}

impl OrganizationState {
    pub fn new(org_name: &str, credits: u32) -> Self {
        Self {
            org_name: org_name.to_string(),
            users: Vec::new(),
            leads: Vec::new(),
            credits,
        }
    }

    /// Fixed mock roster used on first run
    pub fn seed() -> Self {
        Self {
            org_name: "Default Corp".to_string(),
            users: seed_users(),
            leads: seed_leads(),
            credits: 100,
        }
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn lead(&self, lead_id: u32) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == lead_id)
    }

    pub fn active_users(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.is_active())
    }
}

fn seed_user(
    id: &str,
    name: &str,
    role: UserRole,
    last_active: &str,
    generated: u32,
    unlocked: u32,
    assigned: u32,
) -> User {
    User {
        avatar: DEFAULT_AVATAR.to_string(),
        last_active: last_active.to_string(),
        generated: Some(generated),
        unlocked: Some(unlocked),
        assigned_leads_count: Some(assigned),
        ..User::new(id, name, role)
    }
}

fn seed_users() -> Vec<User> {
    vec![
        seed_user("u1", "Sarah Chen", UserRole::Admin, "Now", 12, 10, 5),
        seed_user("u2", "Marcus Rodriguez", UserRole::Member, "2 min ago", 123, 123, 40),
        seed_user("u3", "Priya Patel", UserRole::Member, "1 hr ago", 56, 56, 15),
        seed_user("u4", "James Wilson", UserRole::Removed, "Yesterday", 23, 23, 25),
    ]
}

fn seed_leads() -> Vec<Lead> {
    vec![
        Lead {
            description: "Seeking seed funding for innovative AI platform.".to_string(),
            time: "Found 1 hour ago".to_string(),
            score: Some(92),
            ..Lead::new(1, "Nexus AI Solutions", Location::SanFranciscoUsa, LeadType::ReceptoNet, 2)
        },
        Lead {
            description: "Looking for marketing agency to scale operations.".to_string(),
            time: "Found 3 hours ago".to_string(),
            score: Some(78),
            ..Lead::new(2, "Global Retail Hub", Location::LondonUk, LeadType::ReceptoNet, 1)
        },
        Lead {
            description: "A team from Acme Corp is seeking a highly motivated Business Development Executive."
                .to_string(),
            source: Some("Orgs Network".to_string()),
            time: "Today".to_string(),
            group_name: Some("Sales Q2".to_string()),
            people: Some(vec!["u2".to_string(), "u3".to_string()]),
            score: Some(74),
            is_unlocked: true,
            assigned_to: Some("u2".to_string()),
            like_status: Some(LikeStatus::Liked),
            ..Lead::new(3, "Jennifer Markus", Location::MumbaiIndia, LeadType::OrgNetwork, 0)
        },
        Lead {
            description: "Exploring partnership opportunities in the renewable energy sector.".to_string(),
            source: Some("Partner Web".to_string()),
            time: "Yesterday".to_string(),
            group_name: Some("BizDev".to_string()),
            people: Some(vec!["u3".to_string()]),
            score: Some(65),
            ..Lead::new(4, "Innovate Solutions", Location::BerlinGermany, LeadType::OrgNetwork, 1)
        },
        Lead {
            description: "Individual looking for SaaS solutions for project management.".to_string(),
            source: Some("LinkedIn".to_string()),
            time: "Today".to_string(),
            group_name: Some("Productivity Tools".to_string()),
            people: Some(vec!["u2".to_string()]),
            score: Some(88),
            ..Lead::new(5, "Michael Chen", Location::Singapore, LeadType::OrgNetwork, 1)
        },
    ]
}
