use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
            JobType::Internship => "internship",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    EntryLevel,
    #[default]
    MidLevel,
    Senior,
    Lead,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::EntryLevel => "entry-level",
            ExperienceLevel::MidLevel => "mid-level",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
            ExperienceLevel::Executive => "executive",
        }
    }
}

/// Salary bounds exactly as typed into the form. Coerced to numbers on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRange {
    pub min: String,
    pub max: String,
}

impl SalaryRange {
    pub fn min_amount(&self) -> Option<f64> {
        parse_amount(&self.min)
    }

    pub fn max_amount(&self) -> Option<f64> {
        parse_amount(&self.max)
    }
}

/// `None` for blank or non-numeric input.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// In-memory job posting form state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPostingDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub salary: SalaryRange,
    pub description: String,
    pub requirements: String,
    pub benefits: Option<String>,
    pub skills: Vec<String>,
    pub remote: bool,
    pub featured: bool,
    pub urgent: bool,
}
