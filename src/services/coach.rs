use serde::{Deserialize, Serialize};

use crate::config::CoachConfig;
use crate::leveling::types::{Subject, UserProfile};

/// Gateway to the AI coaching backend. Only the mock path is wired; real API
/// calls are rejected at startup until the integration lands.
#[derive(Debug, Clone)]
pub struct CoachProvider {
    config: CoachConfig,
    #[allow(dead_code)]
    client: reqwest::Client,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub goals: String,
    pub subjects: String,
    pub estimated_time_minutes: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("coach is disabled")]
    Disabled,
    #[error("coach request timed out")]
    Timeout,
    #[error("coach network error: {0}")]
    Network(String),
    #[error("coach api error: status={status}, message={message}")]
    Api { status: u16, message: String },
}

impl CoachProvider {
    pub fn new(config: &CoachConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            config: config.clone(),
            client,
        }
    }

    /// Validate coach configuration at startup.
    /// Panics if `enabled=true` and `mock=false` since the real coaching API
    /// integration is not yet implemented.
    pub fn validate_config(config: &CoachConfig) {
        if config.enabled && !config.mock {
            panic!(
                "Invalid coach configuration: enabled=true and mock=false, \
                 but the real coaching API integration is not yet implemented. \
                 Set COACH_MOCK=true or COACH_ENABLED=false."
            );
        }
    }

    pub async fn daily_plan(&self, profile: &UserProfile) -> Result<DailyPlan, CoachError> {
        if !self.config.enabled {
            return Err(CoachError::Disabled);
        }

        let prompt = build_plan_prompt(profile);
        tracing::debug!(user_id = %profile.user_id, prompt_len = prompt.len(), "Daily plan requested");

        if self.config.mock {
            return Ok(DailyPlan {
                goals: "• Review 10 vocabulary words\n• Complete 5 math problems\n• Practice pronunciation"
                    .to_string(),
                subjects: "• English (15 mins)\n• Math (10 mins)\n• Programming (5 mins)"
                    .to_string(),
                estimated_time_minutes: 30,
            });
        }

        Err(CoachError::Api {
            status: 501,
            message: "Real coaching API integration is not implemented yet".to_string(),
        })
    }

    pub async fn answer_question(&self, question: &str) -> Result<String, CoachError> {
        if !self.config.enabled {
            return Err(CoachError::Disabled);
        }

        tracing::debug!(question_len = question.len(), "Tutor question received");

        if self.config.mock {
            return Ok(
                "Great question! Let's break it down step by step, then try a practice \
                 problem to check your understanding."
                    .to_string(),
            );
        }

        Err(CoachError::Api {
            status: 501,
            message: "Real coaching API integration is not implemented yet".to_string(),
        })
    }
}

fn build_plan_prompt(profile: &UserProfile) -> String {
    let weak_topics: Vec<&str> = profile.weak_topics.iter().map(|s| s.as_str()).collect();
    format!(
        "Create a balanced 30-minute study plan for a student with English level {}, \
         math level {}, programming level {}. Weak topics: {}.",
        profile.subject(Subject::English).level,
        profile.subject(Subject::Math).level,
        profile.subject(Subject::Programming).level,
        if weak_topics.is_empty() {
            "none".to_string()
        } else {
            weak_topics.join(", ")
        },
    )
}
