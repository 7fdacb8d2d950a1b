//! Person domain models

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::trimmed;

/// Date format accepted for birth dates
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder shown when gender is unknown
pub const UNKNOWN_GENDER_LABEL: &str = "-";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Person {
    pub id: i64,
    pub account_id: Option<i64>,
    pub fullname: String,
    /// Stored as "m" / "f"
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::from_code)
    }

    pub fn gender_label(&self) -> &'static str {
        self.gender().map_or(UNKNOWN_GENDER_LABEL, Gender::label)
    }

    /// Whole years since birth as of `today`; None when birth date is unknown
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date.map(|birth| age_in_years(birth, today))
    }
}

/// Gender code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(Gender::Male),
            "f" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Calendar years between `birth` and `today`, floored; 0 for future dates
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> u32 {
    if today <= birth {
        return 0;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT).ok()
}

fn validate_gender_code(code: &str) -> Result<(), ValidationError> {
    match Gender::from_code(code) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("gender").with_message("must be one of: m, f".into())),
    }
}

/// 当前账户的个人资料
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub fullname: String,
    pub gender: String,
    pub age: Option<u32>,
}

impl ProfileResponse {
    pub fn from_person(person: &Person, today: NaiveDate) -> Self {
        Self {
            fullname: person.fullname.clone(),
            gender: person.gender_label().to_string(),
            age: person.age_on(today),
        }
    }
}

/// 人员详情
#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: i64,
    pub fullname: String,
    pub gender: String,
    pub birth_date: Option<String>,
    pub age: Option<u32>,
}

impl PersonResponse {
    pub fn from_person(person: &Person, today: NaiveDate) -> Self {
        Self {
            id: person.id,
            fullname: person.fullname.clone(),
            gender: person.gender_label().to_string(),
            birth_date: person
                .birth_date
                .map(|d| d.format(BIRTH_DATE_FORMAT).to_string()),
            age: person.age_on(today),
        }
    }
}

/// Create person request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePersonRequest {
    pub account_id: Option<i64>,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 4, max = 56, message = "must be between 4 and 56 characters"))]
    pub fullname: String,
    #[validate(custom(function = "validate_gender_code"))]
    pub gender: Option<String>,
    pub birth_date: Option<String>,
}

/// Update person request
///
/// `birth_date` format is checked by the service so that a malformed date
/// surfaces as a date parsing error rather than a field error.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePersonRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 4, max = 56, message = "must be between 4 and 56 characters"))]
    pub fullname: String,
    #[validate(custom(function = "validate_gender_code"))]
    pub gender: String,
    #[validate(length(min = 1, message = "is required"))]
    pub birth_date: String,
}

/// Person listing filter: `q` keyword, `s` offset, `l` limit
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PersonFilter {
    pub q: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub s: i64,
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub l: Option<i64>,
}

impl PersonFilter {
    pub const DEFAULT_LIMIT: i64 = 20;

    pub fn limit(&self) -> i64 {
        self.l.unwrap_or(Self::DEFAULT_LIMIT)
    }

    /// LIKE pattern for the keyword; None matches everything
    pub fn keyword_pattern(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| {
                let escaped = q
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("%{}%", escaped)
            })
    }
}
