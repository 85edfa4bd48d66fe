use crate::models::{CategoryEmission, EmissionsResponse, UsageSession};
use std::collections::BTreeMap;

const MS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UsageCategory {
    SocialMedia,
    Productivity,
    Entertainment,
    Messaging,
    Other,
}

const SOCIAL_MEDIA_APPS: &[&str] = &[
    "facebook",
    "instagram",
    "twitter",
    "tiktok",
    "linkedin",
    "pinterest",
    "snapchat",
    "reddit",
    "messenger",
];

const PRODUCTIVITY_APPS: &[&str] = &[
    "docs", "sheets", "drive", "outlook", "calendar", "notion", "evernote", "slack", "teams",
    "ecotrack",
];

const ENTERTAINMENT_APPS: &[&str] = &[
    "youtube", "netflix", "spotify", "prime", "hulu", "disney", "twitch", "vimeo",
];

const MESSAGING_APPS: &[&str] = &[
    "whatsapp", "telegram", "signal", "viber", "line", "wechat", "skype",
];

impl UsageCategory {
    pub fn for_app(app: &str) -> Self {
        let name = app.to_lowercase();
        let name = name.as_str();
        if SOCIAL_MEDIA_APPS.contains(&name) {
            Self::SocialMedia
        } else if PRODUCTIVITY_APPS.contains(&name) {
            Self::Productivity
        } else if ENTERTAINMENT_APPS.contains(&name) {
            Self::Entertainment
        } else if MESSAGING_APPS.contains(&name) {
            Self::Messaging
        } else {
            Self::Other
        }
    }

    /// Estimated kg of CO₂ emitted per hour of foreground use.
    pub fn rate_kg_per_hour(self) -> f64 {
        match self {
            Self::SocialMedia => 0.10,
            Self::Productivity => 0.08,
            Self::Entertainment => 0.15,
            Self::Messaging => 0.05,
            Self::Other => 0.07,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SocialMedia => "Social Media",
            Self::Productivity => "Productivity",
            Self::Entertainment => "Entertainment",
            Self::Messaging => "Messaging",
            Self::Other => "Other",
        }
    }
}

pub fn estimate_kg(foreground_ms: u64, category: UsageCategory) -> f64 {
    let hours = foreground_ms as f64 / MS_PER_HOUR;
    hours * category.rate_kg_per_hour()
}

/// Buckets usage sessions by category and totals the emission estimates.
pub fn summarize(sessions: &[UsageSession]) -> EmissionsResponse {
    let mut by_category: BTreeMap<UsageCategory, u64> = BTreeMap::new();
    for session in sessions {
        let category = UsageCategory::for_app(&session.app);
        *by_category.entry(category).or_default() += session.foreground_ms;
    }

    let categories: Vec<CategoryEmission> = by_category
        .into_iter()
        .map(|(category, foreground_ms)| CategoryEmission {
            category: category.label().to_string(),
            foreground_ms,
            kg_co2: estimate_kg(foreground_ms, category),
        })
        .collect();
    let total_kg_co2 = categories.iter().map(|entry| entry.kg_co2).sum();

    EmissionsResponse {
        categories,
        total_kg_co2,
    }
}
