use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One progression document per user. `level` is derived from `coins` and
/// recomputed after every coin mutation; `challenges` holds today's set only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub coins: u64,
    pub level: u32,
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_last_checked: Option<NaiveDate>,
    #[serde(default)]
    pub challenges: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl UserProgress {
    pub fn new() -> Self {
        Self {
            coins: 0,
            level: 1,
            streak: 0,
            streak_last_checked: None,
            challenges: BTreeMap::new(),
            last_updated: None,
        }
    }
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub username: String,
    pub coins: u64,
    pub level: u32,
    pub streak: u32,
    pub streak_last_checked: Option<NaiveDate>,
    pub challenges: BTreeMap<String, bool>,
    pub last_updated: Option<NaiveDate>,
}

impl ProgressResponse {
    pub fn from_progress(username: String, progress: UserProgress) -> Self {
        Self {
            username,
            coins: progress.coins,
            level: progress.level,
            streak: progress.streak,
            streak_last_checked: progress.streak_last_checked,
            challenges: progress.challenges,
            last_updated: progress.last_updated,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengesResponse {
    pub date: NaiveDate,
    pub challenges: BTreeMap<String, bool>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub challenge: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteResponse {
    pub challenge: String,
    pub coins: u64,
    pub level: u32,
    pub leveled_up: bool,
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub coins: u64,
    pub level: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub podium: Vec<LeaderboardEntry>,
    pub rest: Vec<LeaderboardEntry>,
    pub your_rank: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UsageSession {
    pub app: String,
    pub foreground_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct EmissionsRequest {
    pub sessions: Vec<UsageSession>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryEmission {
    pub category: String,
    pub foreground_ms: u64,
    pub kg_co2: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmissionsResponse {
    pub categories: Vec<CategoryEmission>,
    pub total_kg_co2: f64,
}
