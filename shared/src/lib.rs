use serde::{Deserialize, Serialize};

/// A child whose sleep is being tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: i64,
    pub name: String,
    pub birth_date: String, // ISO 8601 date format (YYYY-MM-DD)
    pub gender: String,
}

/// Request for creating a new child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildRequest {
    pub name: String,
    pub birth_date: String, // ISO 8601 date format (YYYY-MM-DD)
    pub gender: String,
}

/// Request for updating an existing child. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChildRequest {
    pub name: Option<String>,
    pub birth_date: Option<String>, // ISO 8601 date format (YYYY-MM-DD)
    pub gender: Option<String>,
}

/// How well a finished sleep session went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepQuality {
    #[serde(rename = "slept well")]
    SleptWell,
    #[serde(rename = "average")]
    Average,
    #[serde(rename = "poor sleep")]
    PoorSleep,
    #[serde(rename = "very poor")]
    VeryPoor,
}

/// A single sleep session for a child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepRecord {
    pub id: i64,
    pub child_id: i64,
    /// RFC 3339 timestamp
    pub start_time: String,
    /// RFC 3339 timestamp, null while the session is still running
    pub end_time: Option<String>,
    pub is_active: bool,
    pub quality: Option<SleepQuality>,
}

/// Request for recording a sleep session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSleepRecordRequest {
    pub child_id: i64,
    pub start_time: String,
    pub end_time: Option<String>,
    /// Defaults to `true` when no end time is given
    pub is_active: Option<bool>,
    pub quality: Option<SleepQuality>,
}

/// Partial update of a sleep record (ending a session, rating it)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSleepRecordRequest {
    pub end_time: Option<String>,
    pub is_active: Option<bool>,
    pub quality: Option<SleepQuality>,
}

/// Predicted next sleep window for a child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepPrediction {
    pub id: i64,
    pub child_id: i64,
    /// RFC 3339 timestamp of the expected sleep start
    pub predicted_time: String,
    /// Expected duration in minutes
    pub predicted_duration: i64,
    /// 0..1
    pub confidence: f64,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Body returned for every 4xx/5xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
}

/// Log line forwarded from the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogResponse {
    pub success: bool,
}
