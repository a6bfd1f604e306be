//! Candidate-facing preview of a job posting draft.

use serde::Serialize;

use crate::jobs::models::{JobPostingDraft, SalaryRange};

#[derive(Debug, Clone, Serialize)]
pub struct JobPreview {
    pub title: String,
    pub company: String,
    pub location: String,
    pub badges: Vec<String>,
    pub salary: String,
    pub description: String,
    pub requirements: String,
    pub benefits: Option<String>,
    pub skills: Vec<String>,
}

pub fn build_preview(draft: &JobPostingDraft) -> JobPreview {
    let mut badges = Vec::new();
    if draft.featured {
        badges.push("Featured".to_string());
    }
    if draft.urgent {
        badges.push("Urgent".to_string());
    }
    if draft.remote {
        badges.push("Remote".to_string());
    }
    badges.push(title_case_slug(draft.job_type.as_str()));
    badges.push(title_case_slug(draft.experience_level.as_str()));

    JobPreview {
        title: draft.title.clone(),
        company: draft.company.clone(),
        location: draft.location.clone(),
        badges,
        salary: format_salary(&draft.salary),
        description: draft.description.clone(),
        requirements: draft.requirements.clone(),
        benefits: draft.benefits.clone().filter(|b| !b.trim().is_empty()),
        skills: draft.skills.clone(),
    }
}

pub fn format_salary(salary: &SalaryRange) -> String {
    let min = salary.min.trim();
    let max = salary.max.trim();
    let min_text = || format_amount(min, salary.min_amount());
    let max_text = || format_amount(max, salary.max_amount());
    match (min.is_empty(), max.is_empty()) {
        (true, true) => "Not specified".to_string(),
        (false, true) => format!("${}+", min_text()),
        (true, false) => format!("Up to ${}", max_text()),
        (false, false) => format!("${} - ${}", min_text(), max_text()),
    }
}

/// Groups thousands with commas; keeps up to three decimals. Non-numeric
/// input is echoed back untouched.
fn format_amount(raw: &str, amount: Option<f64>) -> String {
    let Some(value) = amount else {
        return raw.to_string();
    };
    let negative = value < 0.0;
    let rounded = format!("{:.3}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// `full-time` -> `Full Time`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
