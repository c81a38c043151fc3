//! User report model and lookup helpers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Difficulty tier of a problem, `All` aggregating every tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    All,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tiers that get a progress indicator
    pub const TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Get the difficulty name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::All => "All",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Number of questions available for a difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCount {
    pub difficulty: Difficulty,
    pub count: u64,
}

/// Solved count and submission count for a difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStat {
    pub difficulty: Difficulty,
    pub count: u64,
    pub submissions: u64,
}

/// Recently accepted problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    pub title: String,
    pub title_slug: String,
    /// Epoch seconds
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: i64,
}

impl RecentSubmission {
    /// Acceptance time, if the timestamp is in range
    pub fn accepted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Everything the presenter needs for one user
///
/// Built once per successful fetch and dropped on the next search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserReport {
    pub question_counts: Vec<QuestionCount>,
    pub accepted: Vec<SubmissionStat>,
    pub totals: Vec<SubmissionStat>,
    /// Most recent first
    pub recent: Vec<RecentSubmission>,
}

impl UserReport {
    /// Questions available for a difficulty, 0 when absent
    pub fn available(&self, difficulty: Difficulty) -> u64 {
        self.question_counts
            .iter()
            .find(|item| item.difficulty == difficulty)
            .map_or(0, |item| item.count)
    }

    /// Problems solved for a difficulty, 0 when absent
    pub fn solved(&self, difficulty: Difficulty) -> u64 {
        find_stat(&self.accepted, difficulty).map_or(0, |stat| stat.count)
    }

    /// Total submissions made for a difficulty, 0 when absent
    pub fn submissions(&self, difficulty: Difficulty) -> u64 {
        find_stat(&self.totals, difficulty).map_or(0, |stat| stat.submissions)
    }
}

fn find_stat(stats: &[SubmissionStat], difficulty: Difficulty) -> Option<&SubmissionStat> {
    stats.iter().find(|stat| stat.difficulty == difficulty)
}

/// Accept the timestamp either as a JSON number or as a numeric string
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Number(i64),
        Text(String),
    }

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Number(value) => Ok(value),
        RawTimestamp::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", text, e))),
    }
}
