use serde::{Deserialize, Serialize};

/// What the user typed into the recommendation form.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub interests: String,
    #[serde(default)]
    pub goals: String,
}

impl RecommendationRequest {
    /// Interests must carry real text; goals are optional.
    pub fn validate(&self) -> Result<(), String> {
        if self.interests.trim().is_empty() {
            return Err("Please tell us about your interests".to_string());
        }
        Ok(())
    }
}

/// Outcome handed back to the UI. Never carries raw provider errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationResult {
    Success { text: String },
    Failure { message: String },
}

#[cfg(test)]
impl RecommendationRequest {
    pub fn new(interests: impl Into<String>, goals: impl Into<String>) -> Self {
        Self {
            interests: interests.into(),
            goals: goals.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_rejects_empty_interests() {
        assert!(RecommendationRequest::new("", "anything").validate().is_err());
        assert!(RecommendationRequest::new(" \n\t", "").validate().is_err());
    }

    #[test]
    fn test_validate_allows_empty_goals() {
        assert!(RecommendationRequest::new("cloud security", "").validate().is_ok());
    }

    #[test]
    fn test_goals_default_when_omitted() {
        let req: RecommendationRequest =
            serde_json::from_value(json!({ "interests": "robotics" })).unwrap();
        assert_eq!(req.goals, "");
    }

    #[test]
    fn test_result_is_tagged() {
        let ok = serde_json::to_value(RecommendationResult::Success {
            text: "X".to_string(),
        })
        .unwrap();
        assert_eq!(ok, json!({ "status": "success", "text": "X" }));

        let failed = serde_json::to_value(RecommendationResult::Failure {
            message: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(failed, json!({ "status": "failure", "message": "nope" }));
    }
}
