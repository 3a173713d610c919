use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission tier of a team member
///
/// `Removed` is a tombstone: removed users stay in the roster forever and are
/// filtered out wherever "active users" are meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Member,
    Removed,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Member => "Member",
            UserRole::Removed => "Removed",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, UserRole::Removed)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier, e.g. "u1"
    pub id: String,
    /// Display name, also used as the login handle
    pub name: String,
    /// Avatar image reference
    pub avatar: String,
    pub role: UserRole,
    /// Human readable activity label ("Now", "2 min ago")
    pub last_active: String,
    /// Leads generated by this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<u32>,
    /// Leads unlocked by this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked: Option<u32>,
    /// Leads currently assigned to this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_leads_count: Option<u32>,
}

impl User {
    pub fn new(id: &str, name: &str, role: UserRole) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            avatar: String::new(),
            role,
            last_active: String::new(),
            generated: None,
            unlocked: None,
            assigned_leads_count: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.role.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_is_not_active() {
        assert!(UserRole::Admin.is_active());
        assert!(UserRole::Member.is_active());
        assert!(!UserRole::Removed.is_active());
    }

    #[test]
    fn test_user_json_field_names() {
        let mut user = User::new("u9", "Ada", UserRole::Member);
        user.assigned_leads_count = Some(3);

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "Member");
        assert_eq!(json["assignedLeadsCount"], 3);
        assert_eq!(json["lastActive"], "");
        assert!(json.get("generated").is_none());
    }
}
