//! GraphQL request and response shapes

use serde::{Deserialize, Serialize};

use crate::models::report::{QuestionCount, RecentSubmission, SubmissionStat, UserReport};

/// Combined query for question counts, submit stats and recent accepted submissions
pub const USER_DATA_QUERY: &str = r#"
query userData($username: String!, $limit: Int!) {
    allQuestionsCount {
        difficulty
        count
    }
    matchedUser(username: $username) {
        submitStats {
            acSubmissionNum {
                difficulty
                count
                submissions
            }
            totalSubmissionNum {
                difficulty
                count
                submissions
            }
        }
    }
    recentAcSubmissionList(username: $username, limit: $limit) {
        title
        titleSlug
        timestamp
    }
}
"#;

/// GraphQL request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: UserDataVariables,
}

impl GraphQlRequest {
    /// Build the user data query for a username
    pub fn user_data(username: &str, limit: u32) -> Self {
        Self {
            query: USER_DATA_QUERY,
            variables: UserDataVariables {
                username: username.to_string(),
                limit,
            },
        }
    }
}

/// Variables of the user data query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDataVariables {
    pub username: String,
    pub limit: u32,
}

/// GraphQL response envelope
///
/// Unknown users come back with `errors` populated and `matchedUser: null`,
/// so only `data` is inspected.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<UserDataPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataPayload {
    #[serde(default)]
    pub all_questions_count: Option<Vec<QuestionCount>>,
    #[serde(default)]
    pub matched_user: Option<MatchedUser>,
    #[serde(default)]
    pub recent_ac_submission_list: Option<Vec<RecentSubmission>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUser {
    pub submit_stats: SubmitStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
    #[serde(default)]
    pub ac_submission_num: Vec<SubmissionStat>,
    #[serde(default)]
    pub total_submission_num: Vec<SubmissionStat>,
}

impl GraphQlResponse {
    /// Convert into a report, `None` when no user was matched
    pub fn into_report(self) -> Option<UserReport> {
        let payload = self.data?;
        let stats = payload.matched_user?.submit_stats;

        Some(UserReport {
            question_counts: payload.all_questions_count.unwrap_or_default(),
            accepted: stats.ac_submission_num,
            totals: stats.total_submission_num,
            recent: payload.recent_ac_submission_list.unwrap_or_default(),
        })
    }
}
