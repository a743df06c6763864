use std::collections::BTreeMap;
use std::num::IntErrorKind;

use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{RatingCategory, SqlResult};
use crate::database::models::{Review, School};

/// Columns returned for each school, in `School` field order
pub const SCHOOL_COLUMNS: &str =
    "s.\"id\", s.\"school_name\", s.\"conference\", s.\"location\", s.\"mbb\", s.\"wbb\", s.\"fb\"";

/// Review-derived predicates for the filter-schools query.
///
/// Every supplied criterion must hold for the *same* review row. A school
/// matches when at least one of its reviews satisfies all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolFilter {
    coach: Option<String>,
    school_name: Option<String>,
    ratings: BTreeMap<RatingCategory, i64>,
}

impl SchoolFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw query parameters.
    ///
    /// Unknown keys are ignored and blank text values count as absent.
    /// Rating values that are not integers raise
    /// [`FilterError::InvalidFilterValue`], which is logged and discarded
    /// so a bad client value never fails the request.
    pub fn from_query<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::new();
        for (key, value) in params {
            if let Err(err) = filter.apply_param(key.as_ref(), value.as_ref()) {
                if crate::config::CONFIG.filter.debug_logging {
                    tracing::debug!("Ignoring filter parameter: {}", err);
                }
            }
        }
        filter
    }

    /// Apply one query parameter. Later values for the same key win.
    pub fn apply_param(&mut self, key: &str, value: &str) -> Result<&mut Self, FilterError> {
        match key {
            "coach" => {
                self.coach = non_blank(value);
            }
            "school_name" => {
                self.school_name = non_blank(value);
            }
            other => {
                if let Some(category) = RatingCategory::from_param(other) {
                    // Drop any earlier threshold so a bad repeat does not leave a stale one
                    self.ratings.remove(&category);
                    let threshold = Self::parse_threshold(category, value)?;
                    self.ratings.insert(category, threshold);
                }
            }
        }
        Ok(self)
    }

    pub fn coach(mut self, coach: impl Into<String>) -> Self {
        self.coach = non_blank(&coach.into());
        self
    }

    pub fn school_name(mut self, name: impl Into<String>) -> Self {
        self.school_name = non_blank(&name.into());
        self
    }

    pub fn min_rating(mut self, category: RatingCategory, threshold: i64) -> Self {
        self.ratings.insert(category, threshold);
        self
    }

    pub fn coach_term(&self) -> Option<&str> {
        self.coach.as_deref()
    }

    pub fn school_name_term(&self) -> Option<&str> {
        self.school_name.as_deref()
    }

    pub fn thresholds(&self) -> impl Iterator<Item = (RatingCategory, i64)> + '_ {
        self.ratings.iter().map(|(c, t)| (*c, *t))
    }

    /// True when no criterion survived parsing; every school is returned
    pub fn is_empty(&self) -> bool {
        self.coach.is_none() && self.school_name.is_none() && self.ratings.is_empty()
    }

    /// Evaluate all criteria against a single review of `school`
    pub fn matches(&self, school: &School, review: &Review) -> bool {
        if review.school_id != school.id {
            return false;
        }
        if let Some(term) = &self.school_name {
            if !contains_ignore_case(&school.school_name, term) {
                return false;
            }
        }
        if let Some(term) = &self.coach {
            if !contains_ignore_case(&review.head_coach_name, term) {
                return false;
            }
        }
        self.ratings
            .iter()
            .all(|(category, threshold)| i64::from(review.ratings.get(*category)) >= *threshold)
    }

    /// Apply the filter to in-memory rows, keeping `schools` order.
    pub fn select<'a>(&self, schools: &'a [School], reviews: &[Review]) -> Vec<&'a School> {
        schools
            .iter()
            .filter(|school| self.is_empty() || reviews.iter().any(|review| self.matches(school, review)))
            .collect()
    }

    /// Render the Postgres query for this filter
    pub fn to_sql(&self) -> SqlResult {
        let order = "ORDER BY s.\"school_name\" COLLATE \"C\", s.\"id\"";

        if self.is_empty() {
            return SqlResult {
                query: format!("SELECT {} FROM \"schools\" s {}", SCHOOL_COLUMNS, order),
                params: vec![],
            };
        }

        let (conditions, params) = FilterWhere::generate(self);
        let query = format!(
            "SELECT {} FROM \"schools\" s WHERE EXISTS (SELECT 1 FROM \"reviews\" r WHERE r.\"school_id\" = s.\"id\" AND {}) {}",
            SCHOOL_COLUMNS, conditions, order
        );
        SqlResult { query, params }
    }

    /// Integers beyond `i64` saturate; only non-numeric text is rejected
    fn parse_threshold(category: RatingCategory, raw: &str) -> Result<i64, FilterError> {
        match raw.trim().parse::<i64>() {
            Ok(threshold) => Ok(threshold),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(i64::MAX),
                IntErrorKind::NegOverflow => Ok(i64::MIN),
                _ => Err(FilterError::InvalidFilterValue {
                    field: category.column().to_string(),
                    value: raw.to_string(),
                }),
            },
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Ratings;
    use chrono::Utc;
    use uuid::Uuid;

    fn school(name: &str) -> School {
        School {
            id: Uuid::new_v4(),
            school_name: name.to_string(),
            conference: "Test Conference".to_string(),
            location: "Test Location".to_string(),
            mbb: false,
            wbb: false,
            fb: true,
        }
    }

    fn review(school: &School, coach: &str, head_coach: i32) -> Review {
        Review {
            id: Uuid::new_v4(),
            school_id: school.id,
            user_id: Uuid::new_v4(),
            sport: "Football".to_string(),
            head_coach_name: coach.to_string(),
            review_message: "Test review".to_string(),
            ratings: Ratings {
                head_coach,
                assistant_coaches: 5,
                team_culture: 5,
                campus_life: 5,
                athletic_facilities: 5,
                athletic_department: 5,
                player_development: 5,
                nil_opportunity: 5,
            },
            created_at: Utc::now(),
        }
    }

    fn names(selected: Vec<&School>) -> Vec<String> {
        selected.into_iter().map(|s| s.school_name.clone()).collect()
    }

    #[test]
    fn parses_known_parameters() {
        let filter = SchoolFilter::from_query([
            ("coach", "Coach A"),
            ("school_name", " alpha "),
            ("head_coach", "8"),
            ("team_culture", " 6 "),
            ("page", "2"),
        ]);
        assert_eq!(filter.coach_term(), Some("Coach A"));
        assert_eq!(filter.school_name_term(), Some("alpha"));
        let thresholds: Vec<_> = filter.thresholds().collect();
        assert_eq!(
            thresholds,
            vec![(RatingCategory::HeadCoach, 8), (RatingCategory::TeamCulture, 6)]
        );
    }

    #[test]
    fn non_numeric_threshold_is_reported_then_dropped() {
        let mut filter = SchoolFilter::new();
        let err = filter.apply_param("head_coach", "abc").unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidFilterValue { field: "head_coach".to_string(), value: "abc".to_string() }
        );
        assert!(filter.is_empty());

        let filter = SchoolFilter::from_query([("head_coach", "abc"), ("school_name", "alpha")]);
        assert_eq!(filter.thresholds().count(), 0);
        assert_eq!(filter.school_name_term(), Some("alpha"));
    }

    #[test]
    fn out_of_range_threshold_is_kept_and_matches_nothing() {
        let one = school("School One");
        let reviews = vec![review(&one, "Coach A", 9)];
        let schools = vec![one];

        let filter = SchoolFilter::from_query([("head_coach", "99999999999")]);
        assert_eq!(
            filter.thresholds().collect::<Vec<_>>(),
            vec![(RatingCategory::HeadCoach, 99_999_999_999)]
        );
        assert!(filter.select(&schools, &reviews).is_empty());

        let huge = SchoolFilter::from_query([("head_coach", "1".repeat(40))]);
        assert_eq!(huge.thresholds().collect::<Vec<_>>(), vec![(RatingCategory::HeadCoach, i64::MAX)]);
        assert!(huge.select(&schools, &reviews).is_empty());

        let negative = SchoolFilter::from_query([("head_coach", "-99999999999")]);
        assert_eq!(negative.select(&schools, &reviews).len(), 1);
    }

    #[test]
    fn repeated_bad_threshold_clears_earlier_value() {
        let filter = SchoolFilter::from_query([("head_coach", "8"), ("head_coach", "x")]);
        assert!(filter.is_empty());
    }

    #[test]
    fn blank_text_values_are_absent() {
        let filter = SchoolFilter::from_query([("coach", ""), ("school_name", "   ")]);
        assert!(filter.is_empty());
    }

    #[test]
    fn no_filter_returns_every_school() {
        let one = school("School One");
        let lonely = school("No Reviews");
        let reviews = vec![review(&one, "Coach A", 7)];
        let schools = vec![one, lonely];

        let selected = SchoolFilter::new().select(&schools, &reviews);
        assert_eq!(names(selected), vec!["School One", "No Reviews"]);
    }

    #[test]
    fn schools_without_reviews_drop_out_once_filtered() {
        let alpha = school("Alpha School");
        let reviews = vec![];
        let schools = vec![alpha];

        let selected = SchoolFilter::new().school_name("alpha").select(&schools, &reviews);
        assert!(selected.is_empty());
    }

    #[test]
    fn coach_match_is_partial_and_case_insensitive() {
        let one = school("School One");
        let two = school("School Two");
        let reviews = vec![review(&one, "Coach A", 7), review(&two, "Coach B", 8)];
        let schools = vec![one, two];

        let selected = SchoolFilter::new().coach("coach a").select(&schools, &reviews);
        assert_eq!(names(selected), vec!["School One"]);
    }

    #[test]
    fn rating_threshold_is_inclusive() {
        let one = school("School One");
        let two = school("School Two");
        let reviews = vec![review(&one, "Coach A", 7), review(&two, "Coach B", 8)];
        let schools = vec![one, two];

        let selected = SchoolFilter::new()
            .min_rating(RatingCategory::HeadCoach, 8)
            .select(&schools, &reviews);
        assert_eq!(names(selected), vec!["School Two"]);
    }

    #[test]
    fn criteria_must_hold_on_the_same_review() {
        let one = school("School One");
        // One review has the coach, another has the score; neither has both
        let reviews = vec![review(&one, "Coach A", 3), review(&one, "Coach Z", 9)];
        let schools = vec![one];

        let selected = SchoolFilter::new()
            .coach("Coach A")
            .min_rating(RatingCategory::HeadCoach, 8)
            .select(&schools, &reviews);
        assert!(selected.is_empty());
    }

    #[test]
    fn school_matches_once_despite_many_reviews() {
        let one = school("School One");
        let reviews = vec![review(&one, "Coach A", 9), review(&one, "Coach A", 10)];
        let schools = vec![one];

        let selected = SchoolFilter::new().coach("Coach A").select(&schools, &reviews);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn empty_filter_sql_has_no_exists_clause() {
        let sql = SchoolFilter::new().to_sql();
        assert!(!sql.query.contains("EXISTS"));
        assert!(sql.params.is_empty());
        assert!(sql.query.ends_with("ORDER BY s.\"school_name\" COLLATE \"C\", s.\"id\""));
    }

    #[test]
    fn sql_binds_every_value() {
        let sql = SchoolFilter::new()
            .coach("Coach A")
            .school_name("alpha")
            .min_rating(RatingCategory::HeadCoach, 8)
            .to_sql();

        assert!(sql.query.contains("EXISTS (SELECT 1 FROM \"reviews\" r WHERE r.\"school_id\" = s.\"id\""));
        assert!(sql.query.contains("s.\"school_name\" ILIKE $1"));
        assert!(sql.query.contains("r.\"head_coach_name\" ILIKE $2"));
        assert!(sql.query.contains("r.\"head_coach\" >= $3"));
        assert_eq!(
            sql.params,
            vec![serde_json::json!("%alpha%"), serde_json::json!("%Coach A%"), serde_json::json!(8)]
        );
    }
}
