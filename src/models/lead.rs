use serde::{Deserialize, Serialize};

/// Sourcing channel of a lead
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadType {
    ReceptoNet,
    OrgNetwork,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeStatus {
    Liked,
    Disliked,
}

/// Known lead locations, serialized by their filter id. Older snapshots
/// stored the display name instead, so both are accepted on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    #[serde(alias = "India")]
    India,
    #[serde(alias = "United Kingdom")]
    Uk,
    #[serde(alias = "United States of America")]
    Usa,
    #[serde(alias = "Saudi Arabia")]
    Saudi,
    #[serde(alias = "Singapore")]
    Singapore,
    #[serde(alias = "Taiwan")]
    Taiwan,
    #[serde(alias = "France")]
    France,
    #[serde(alias = "Germany")]
    Germany,
    #[serde(alias = "China")]
    China,
    #[serde(alias = "San Francisco, USA")]
    SanFranciscoUsa,
    #[serde(alias = "London, UK")]
    LondonUk,
    #[serde(alias = "Mumbai, India")]
    MumbaiIndia,
    #[serde(alias = "Berlin, Germany")]
    BerlinGermany,
}

impl Location {
    pub const ALL: [Location; 13] = [
        Location::India,
        Location::Uk,
        Location::Usa,
        Location::Saudi,
        Location::Singapore,
        Location::Taiwan,
        Location::France,
        Location::Germany,
        Location::China,
        Location::SanFranciscoUsa,
        Location::LondonUk,
        Location::MumbaiIndia,
        Location::BerlinGermany,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Location::India => "india",
            Location::Uk => "uk",
            Location::Usa => "usa",
            Location::Saudi => "saudi",
            Location::Singapore => "singapore",
            Location::Taiwan => "taiwan",
            Location::France => "france",
            Location::Germany => "germany",
            Location::China => "china",
            Location::SanFranciscoUsa => "san_francisco_usa",
            Location::LondonUk => "london_uk",
            Location::MumbaiIndia => "mumbai_india",
            Location::BerlinGermany => "berlin_germany",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Location::India => "India",
            Location::Uk => "United Kingdom",
            Location::Usa => "United States of America",
            Location::Saudi => "Saudi Arabia",
            Location::Singapore => "Singapore",
            Location::Taiwan => "Taiwan",
            Location::France => "France",
            Location::Germany => "Germany",
            Location::China => "China",
            Location::SanFranciscoUsa => "San Francisco, USA",
            Location::LondonUk => "London, UK",
            Location::MumbaiIndia => "Mumbai, India",
            Location::BerlinGermany => "Berlin, Germany",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|loc| loc.id() == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: u32,
    pub name: String,
    pub location: Location,
    pub description: String,
    #[serde(rename = "type")]
    pub lead_type: LeadType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Human readable discovery label ("Found 1 hour ago", "Today")
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Ids of the users connected to this lead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<Vec<String>>,
    /// Match score in 0..=100
    #[serde(default)]
    pub score: Option<u8>,
    pub credit_cost: u32,
    pub is_unlocked: bool,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub like_status: Option<LikeStatus>,
}

impl Lead {
    pub fn new(id: u32, name: &str, location: Location, lead_type: LeadType, credit_cost: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            location,
            description: String::new(),
            lead_type,
            source: None,
            time: String::new(),
            group_name: None,
            people: None,
            score: None,
            credit_cost,
            is_unlocked: false,
            assigned_to: None,
            like_status: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_ids_are_unique_and_resolvable() {
        for loc in Location::ALL {
            assert_eq!(Location::from_id(loc.id()), Some(loc));
        }
        assert_eq!(Location::from_id("atlantis"), None);
    }

    #[test]
    fn test_location_serializes_as_id() {
        let json = serde_json::to_string(&Location::SanFranciscoUsa).unwrap();
        assert_eq!(json, "\"san_francisco_usa\"");
    }

    #[test]
    fn test_location_accepts_display_names() {
        for loc in Location::ALL {
            let json = format!("{:?}", loc.display_name());
            assert_eq!(serde_json::from_str::<Location>(&json).unwrap(), loc);
        }
    }

    #[test]
    fn test_lead_json_layout() {
        let mut lead = Lead::new(7, "Acme", Location::Uk, LeadType::OrgNetwork, 1);
        lead.like_status = Some(LikeStatus::Disliked);

        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["type"], "OrgNetwork");
        assert_eq!(json["creditCost"], 1);
        assert_eq!(json["isUnlocked"], false);
        assert_eq!(json["likeStatus"], "disliked");
        assert!(json["assignedTo"].is_null());
        assert!(json["score"].is_null());
    }

    #[test]
    fn test_lead_accepts_missing_optional_fields() {
        let json = r#"{
            "id": 1,
            "name": "Nexus",
            "location": "london_uk",
            "description": "",
            "type": "ReceptoNet",
            "time": "Today",
            "creditCost": 2,
            "isUnlocked": false
        }"#;

        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.location, Location::LondonUk);
        assert_eq!(lead.assigned_to, None);
        assert_eq!(lead.like_status, None);
        assert_eq!(lead.score, None);
    }
}
