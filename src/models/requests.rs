use crate::models::domain::PreferenceWeights;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to match listings against a caller's preferences
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchListingsRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub budget: f64,
    #[serde(default)]
    #[serde(alias = "preferred_bedrooms", rename = "preferredBedrooms")]
    pub preferred_bedrooms: Option<i32>,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default)]
    #[serde(alias = "postal_area", rename = "postalArea")]
    pub postal_area: Option<String>,
    #[serde(alias = "school_weight", rename = "schoolWeight")]
    pub school_weight: f64,
    #[serde(alias = "hospital_weight", rename = "hospitalWeight")]
    pub hospital_weight: f64,
    #[serde(alias = "restaurant_weight", rename = "restaurantWeight")]
    pub restaurant_weight: f64,
}

impl MatchListingsRequest {
    pub fn weights(&self) -> PreferenceWeights {
        PreferenceWeights {
            schools: self.school_weight,
            hospitals: self.hospital_weight,
            restaurants: self.restaurant_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> MatchListingsRequest {
        MatchListingsRequest {
            budget: 3_000_000.0,
            preferred_bedrooms: None,
            location: "Kolkata".to_string(),
            postal_area: None,
            school_weight: 5.0,
            hospital_weight: 5.0,
            restaurant_weight: 5.0,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut req = base_request();
        req.budget = 0.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_location_rejected() {
        let mut req = base_request();
        req.location = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_weight_fails_deserialization() {
        let json = r#"{"budget": 3000000, "location": "Kolkata", "schoolWeight": 5, "hospitalWeight": 5}"#;
        assert!(serde_json::from_str::<MatchListingsRequest>(json).is_err());
    }

    #[test]
    fn test_out_of_range_weights_accepted() {
        // Weights are expected in [0, 10] but never hard-clamped.
        let json = r#"{"budget": 3000000, "location": "Kolkata", "schoolWeight": -3, "hospitalWeight": 42, "restaurantWeight": 0}"#;
        let req: MatchListingsRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.weights().hospitals, 42.0);
    }

    #[test]
    fn test_snake_case_aliases() {
        let json = r#"{"budget": 3000000, "location": "Kolkata", "postal_area": "700001", "school_weight": 5, "hospital_weight": 5, "restaurant_weight": 5}"#;
        let req: MatchListingsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.postal_area.as_deref(), Some("700001"));
    }
}
