use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Proficiency level of a skill
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }

    /// Parse a level name, case-insensitively
    pub fn parse(raw: &str) -> crate::Result<Self> {
        raw.trim()
            .parse()
            .map_err(|_| crate::CoreError::InvalidSkillLevel(raw.to_string()))
    }
}

impl TryFrom<String> for SkillLevel {
    type Error = crate::CoreError;

    fn try_from(raw: String) -> crate::Result<Self> {
        Self::parse(&raw)
    }
}

/// A (language, level) pair attached to a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub language: String,
    pub level: SkillLevel,
}

impl Skill {
    pub fn new(language: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            language: language.into(),
            level,
        }
    }
}

/// Candidate profile as served by the candidates API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display and contact identifier
    pub username: String,
    /// ISO-8601 join timestamp, kept verbatim
    pub joined_at: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    pub score: f64,
}

impl Candidate {
    /// Create a candidate with no skills
    pub fn new(username: impl Into<String>, joined_at: impl Into<String>, score: f64) -> Self {
        Self {
            username: username.into(),
            joined_at: joined_at.into(),
            skills: Vec::new(),
            score,
        }
    }

    /// Add a skill (builder style)
    pub fn with_skill(mut self, language: impl Into<String>, level: SkillLevel) -> Self {
        self.skills.push(Skill::new(language, level));
        self
    }

    /// Parsed join timestamp, `None` when `joined_at` is not a recognised date.
    pub fn joined_at_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.joined_at)
    }

    /// Whether any skill has the given level (case-insensitive)
    pub fn has_level(&self, level: &str) -> bool {
        self.skills
            .iter()
            .any(|skill| skill.level.as_str().eq_ignore_ascii_case(level))
    }

    /// Whether any skill has the given language (case-insensitive)
    pub fn has_language(&self, language: &str) -> bool {
        let language = language.to_lowercase();
        self.skills
            .iter()
            .any(|skill| skill.language.to_lowercase() == language)
    }
}

/// Parse the timestamp formats the candidates API is known to emit.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and
/// bare `YYYY-MM-DD` dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
