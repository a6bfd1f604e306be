use serde::Serialize;

use crate::jobs::models::JobPostingDraft;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
impl ValidationReport {
    pub fn error_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }
}

/// One declarative constraint on the job posting form.
pub struct FieldRule {
    pub field: &'static str,
    pub check: fn(&JobPostingDraft) -> bool,
    pub message: &'static str,
}

/// Constraints checked before a job posting may be submitted.
/// Lengths count characters of the untrimmed input.
pub const JOB_POSTING_RULES: &[FieldRule] = &[
    FieldRule {
        field: "title",
        check: |d| min_chars(&d.title, 5),
        message: "Job title must be at least 5 characters",
    },
    FieldRule {
        field: "company",
        check: |d| min_chars(&d.company, 2),
        message: "Company name is required",
    },
    FieldRule {
        field: "location",
        check: |d| min_chars(&d.location, 2),
        message: "Location is required",
    },
    FieldRule {
        field: "salary.min",
        check: |d| is_blank(&d.salary.min) || d.salary.min_amount().is_some(),
        message: "Minimum salary must be a number",
    },
    FieldRule {
        field: "salary.max",
        check: |d| is_blank(&d.salary.max) || d.salary.max_amount().is_some(),
        message: "Maximum salary must be a number",
    },
    FieldRule {
        field: "description",
        check: |d| min_chars(&d.description, 50),
        message: "Description must be at least 50 characters",
    },
    FieldRule {
        field: "requirements",
        check: |d| min_chars(&d.requirements, 50),
        message: "Requirements must be at least 50 characters",
    },
    FieldRule {
        field: "skills",
        check: |d| d.skills.len() >= 3,
        message: "At least 3 skills are required",
    },
];

fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Evaluates every rule independently and collects all failures.
pub fn validate_job_posting(draft: &JobPostingDraft) -> ValidationReport {
    let errors: Vec<FieldError> = JOB_POSTING_RULES
        .iter()
        .filter(|rule| !(rule.check)(draft))
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
        .collect();

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
