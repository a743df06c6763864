use serde::{Deserialize, Serialize};

/// Review rating columns that can be used as a minimum-score filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingCategory {
    HeadCoach,
    AssistantCoaches,
    TeamCulture,
    CampusLife,
    AthleticFacilities,
    AthleticDepartment,
    PlayerDevelopment,
    NilOpportunity,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 8] = [
        RatingCategory::HeadCoach,
        RatingCategory::AssistantCoaches,
        RatingCategory::TeamCulture,
        RatingCategory::CampusLife,
        RatingCategory::AthleticFacilities,
        RatingCategory::AthleticDepartment,
        RatingCategory::PlayerDevelopment,
        RatingCategory::NilOpportunity,
    ];

    /// Query parameter name, also the `reviews` column name
    pub fn column(&self) -> &'static str {
        match self {
            RatingCategory::HeadCoach => "head_coach",
            RatingCategory::AssistantCoaches => "assistant_coaches",
            RatingCategory::TeamCulture => "team_culture",
            RatingCategory::CampusLife => "campus_life",
            RatingCategory::AthleticFacilities => "athletic_facilities",
            RatingCategory::AthleticDepartment => "athletic_department",
            RatingCategory::PlayerDevelopment => "player_development",
            RatingCategory::NilOpportunity => "nil_opportunity",
        }
    }

    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.column() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Case-insensitive substring match
    ILike,
    /// Greater than or equal
    Gte,
}

/// Which table alias a filtered column lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTable {
    School,
    Review,
}

impl FilterTable {
    pub fn alias(&self) -> &'static str {
        match self {
            FilterTable::School => "s",
            FilterTable::Review => "r",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterWhereInfo {
    pub table: FilterTable,
    pub column: &'static str,
    pub operator: FilterOp,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}
