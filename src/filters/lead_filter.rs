use crate::models::lead::{Lead, Location};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreRange {
    /// Score of 70 or more
    Ge70,
    /// Score below 70
    Lt70,
}

impl ScoreRange {
    pub const ALL: [ScoreRange; 2] = [ScoreRange::Ge70, ScoreRange::Lt70];

    pub fn id(&self) -> &'static str {
        match self {
            ScoreRange::Ge70 => "ge70",
            ScoreRange::Lt70 => "lt70",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ScoreRange::Ge70 => "70+",
            ScoreRange::Lt70 => "< 70",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.id() == id)
    }

    pub fn contains(&self, score: u8) -> bool {
        match self {
            ScoreRange::Ge70 => score >= 70,
            ScoreRange::Lt70 => score < 70,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown location filter: {0}")]
    UnknownLocation(String),

    #[error("Unknown score range filter: {0}")]
    UnknownScoreRange(String),
}

/// Selection on the leads screen. An empty selection matches every lead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFilter {
    pub locations: Vec<Location>,
    pub score_range: Option<ScoreRange>,
}

impl LeadFilter {
    /// Build a filter from comma separated location ids and an optional
    /// score range id
    pub fn parse(locations: Option<&str>, score_range: Option<&str>) -> Result<Self, FilterError> {
        let locations = match locations {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| Location::from_id(id).ok_or_else(|| FilterError::UnknownLocation(id.to_string())))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let score_range = match score_range.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Some(ScoreRange::from_id(id).ok_or_else(|| FilterError::UnknownScoreRange(id.to_string()))?),
            None => None,
        };

        Ok(Self {
            locations,
            score_range,
        })
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        let location_match = self.locations.is_empty() || self.locations.contains(&lead.location);

        // Unscored leads never satisfy a score range
        let score_match = match (self.score_range, lead.score) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(range), Some(score)) => range.contains(score),
        };

        location_match && score_match
    }

    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|lead| self.matches(lead)).collect()
    }

    /// Number of filter groups in use, shown on the filter button
    pub fn applied_count(&self) -> usize {
        usize::from(!self.locations.is_empty()) + usize::from(self.score_range.is_some())
    }
}

/// Which filter group an option id belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterGroup {
    Location,
    ScoreRange,
}

impl FilterGroup {
    pub fn of(id: &str) -> Option<Self> {
        if is_location(id) {
            Some(FilterGroup::Location)
        } else if is_score_range(id) {
            Some(FilterGroup::ScoreRange)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub location: Vec<FilterOption>,
    pub score_range: Vec<FilterOption>,
}

pub fn filter_options() -> FilterOptions {
    FilterOptions {
        location: Location::ALL
            .iter()
            .map(|loc| FilterOption {
                id: loc.id(),
                name: loc.display_name(),
            })
            .collect(),
        score_range: ScoreRange::ALL
            .iter()
            .map(|range| FilterOption {
                id: range.id(),
                name: range.display_name(),
            })
            .collect(),
    }
}

/// Look up a location or score range option by id
pub fn option_by_id(id: &str) -> Option<FilterOption> {
    if let Some(loc) = Location::from_id(id) {
        return Some(FilterOption {
            id: loc.id(),
            name: loc.display_name(),
        });
    }
    ScoreRange::from_id(id).map(|range| FilterOption {
        id: range.id(),
        name: range.display_name(),
    })
}

pub fn is_location(id: &str) -> bool {
    Location::from_id(id).is_some()
}

pub fn is_score_range(id: &str) -> bool {
    ScoreRange::from_id(id).is_some()
}
