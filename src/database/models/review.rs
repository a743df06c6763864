use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::filter::RatingCategory;

/// Highest score a single rating category accepts
pub const MAX_RATING: i32 = 10;

/// Unscored categories deserialize as 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Ratings {
    pub head_coach: i32,
    pub assistant_coaches: i32,
    pub team_culture: i32,
    pub campus_life: i32,
    pub athletic_facilities: i32,
    pub athletic_department: i32,
    pub player_development: i32,
    pub nil_opportunity: i32,
}

impl Ratings {
    pub fn get(&self, category: RatingCategory) -> i32 {
        match category {
            RatingCategory::HeadCoach => self.head_coach,
            RatingCategory::AssistantCoaches => self.assistant_coaches,
            RatingCategory::TeamCulture => self.team_culture,
            RatingCategory::CampusLife => self.campus_life,
            RatingCategory::AthleticFacilities => self.athletic_facilities,
            RatingCategory::AthleticDepartment => self.athletic_department,
            RatingCategory::PlayerDevelopment => self.player_development,
            RatingCategory::NilOpportunity => self.nil_opportunity,
        }
    }

    /// First category whose score falls outside `0..=MAX_RATING`
    pub fn out_of_range(&self) -> Option<RatingCategory> {
        RatingCategory::ALL
            .into_iter()
            .find(|c| !(0..=MAX_RATING).contains(&self.get(*c)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub school_id: Uuid,
    pub user_id: Uuid,
    pub sport: String,
    pub head_coach_name: String,
    pub review_message: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub ratings: Ratings,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub school_id: Uuid,
    pub sport: String,
    pub head_coach_name: String,
    #[serde(default)]
    pub review_message: String,
    #[serde(flatten)]
    pub ratings: Ratings,
}

impl NewReview {
    pub fn into_review(self, id: Uuid, user_id: Uuid) -> Review {
        Review {
            id,
            school_id: self.school_id,
            user_id,
            sport: self.sport,
            head_coach_name: self.head_coach_name,
            review_message: self.review_message,
            ratings: self.ratings,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_lookup_by_category() {
        let ratings = Ratings { team_culture: 9, nil_opportunity: 2, ..Default::default() };
        assert_eq!(ratings.get(RatingCategory::TeamCulture), 9);
        assert_eq!(ratings.get(RatingCategory::NilOpportunity), 2);
        assert_eq!(ratings.get(RatingCategory::HeadCoach), 0);
    }

    #[test]
    fn out_of_range_reports_first_bad_category() {
        let ok = Ratings { head_coach: 10, ..Default::default() };
        assert_eq!(ok.out_of_range(), None);

        let bad = Ratings { campus_life: 11, player_development: -1, ..Default::default() };
        assert_eq!(bad.out_of_range(), Some(RatingCategory::CampusLife));
    }

    #[test]
    fn new_review_reads_flat_ratings() {
        let body = serde_json::json!({
            "school_id": Uuid::nil(),
            "sport": "Football",
            "head_coach_name": "Coach A",
            "head_coach": 8,
            "assistant_coaches": 7,
            "team_culture": 6,
            "campus_life": 5,
            "athletic_facilities": 4,
            "athletic_department": 3,
            "player_development": 2,
            "nil_opportunity": 1
        });
        let review: NewReview = serde_json::from_value(body).unwrap();
        assert_eq!(review.ratings.head_coach, 8);
        assert_eq!(review.ratings.nil_opportunity, 1);
        assert!(review.review_message.is_empty());
    }
}
