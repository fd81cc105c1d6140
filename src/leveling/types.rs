use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    English,
    Math,
    Programming,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::English, Subject::Math, Subject::Programming];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::English => "english",
            Subject::Math => "math",
            Subject::Programming => "programming",
        }
    }

    /// Starting unit for a fresh profile
    pub fn default_unit(&self) -> &'static str {
        match self {
            Subject::English => "basics",
            Subject::Math => "arithmetic",
            Subject::Programming => "python",
        }
    }
}

impl std::str::FromStr for Subject {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(Subject::English),
            "math" => Ok(Subject::Math),
            "programming" => Ok(Subject::Programming),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Easy,
    Medium,
    Hard,
    PerfectLesson,
    StreakBonus,
    PhotoSolve,
    SpeakingPractice,
    CodingChallenge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: String,
    pub total_xp: u64,
    pub global_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_learning_time_minutes: u64,
    pub last_active_at: DateTime<Utc>,
    pub lessons_today: u32,
    pub lessons_today_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProgress {
    pub level: u32,
    pub xp: u64,
    pub mastery_percentage: f64,
    pub current_unit: String,
    pub vocabulary_size: u32,
    pub completed_items: Vec<String>,
}

impl SubjectProgress {
    pub fn new(subject: Subject) -> Self {
        Self {
            level: 1,
            xp: 0,
            mastery_percentage: 0.0,
            current_unit: subject.default_unit().to_string(),
            vocabulary_size: 0,
            completed_items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub stats: UserStats,
    pub subjects: BTreeMap<Subject, SubjectProgress>,
    pub weak_topics: BTreeSet<String>,
    pub strengths: BTreeSet<String>,
    pub achievements: Vec<String>,
}

impl UserProfile {
    pub fn new(user_id: &str, now: DateTime<Utc>) -> Self {
        let subjects = Subject::ALL
            .iter()
            .map(|s| (*s, SubjectProgress::new(*s)))
            .collect();

        Self {
            user_id: user_id.to_string(),
            stats: UserStats {
                user_id: user_id.to_string(),
                total_xp: 0,
                global_level: 1,
                current_streak: 0,
                longest_streak: 0,
                total_learning_time_minutes: 0,
                last_active_at: now,
                lessons_today: 0,
                lessons_today_date: now.date_naive(),
            },
            subjects,
            weak_topics: BTreeSet::new(),
            strengths: BTreeSet::new(),
            achievements: Vec::new(),
        }
    }

    /// All three subjects exist from construction; a profile deserialized from an
    /// older record self-heals a missing entry instead of failing.
    pub fn subject_mut(&mut self, subject: Subject) -> &mut SubjectProgress {
        self.subjects
            .entry(subject)
            .or_insert_with(|| SubjectProgress::new(subject))
    }

    pub fn subject(&self, subject: Subject) -> SubjectProgress {
        self.subjects
            .get(&subject)
            .cloned()
            .unwrap_or_else(|| SubjectProgress::new(subject))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardResult {
    pub total_awarded: u64,
    pub previous_level: u32,
    pub new_level: u32,
    pub leveled_up: bool,
    pub subject: Option<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub user_id: String,
    pub username: String,
    pub global_level: u32,
    pub english_level: u32,
    pub math_level: u32,
    pub programming_level: u32,
    pub total_xp: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub learning_time_minutes: u64,
    pub vocabulary_size: u32,
    pub mastery_percentage: f64,
    pub completed_units: usize,
}

/// Enumerated stats mutation. Fields not present leave the stats untouched,
/// so an unknown field in a request fails deserialization instead of being
/// silently applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatsUpdate {
    pub add_learning_minutes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProgressUpdate {
    pub mastery_percentage: Option<f64>,
    pub completed_item: Option<String>,
    pub vocabulary_delta: Option<u32>,
    pub current_unit: Option<String>,
}

#[derive(Debug, Error)]
pub enum LevelingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
