//! Job posting form state with immediate validation.
//!
//! Every `apply` revalidates the whole draft, so the report always reflects
//! the current field values. A failed rule never clears other fields.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::jobs::models::{ExperienceLevel, JobPostingDraft, JobType};
use crate::jobs::validation::{validate_job_posting, ValidationReport};

const COMMON_SKILLS: &[&str] = &[
    "JavaScript",
    "React",
    "TypeScript",
    "Node.js",
    "HTML",
    "CSS",
    "Python",
    "Java",
    "SQL",
    "AWS",
    "Docker",
    "Git",
];

const MAX_SUGGESTIONS: usize = 5;

pub const JOBS_LIST_PATH: &str = "/recruiter/jobs";

/// A single user edit to the form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Title(String),
    Company(String),
    Location(String),
    JobType(JobType),
    ExperienceLevel(ExperienceLevel),
    SalaryMin(String),
    SalaryMax(String),
    Description(String),
    Requirements(String),
    Benefits(String),
    AddSkill(String),
    RemoveSkill(String),
    Remote(bool),
    Featured(bool),
    Urgent(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub posting_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub notification: Notification,
    pub redirect_to: &'static str,
}

/// Job postings still inside their submit delay. Shared across requests so
/// every view of the form reports the pending state.
#[derive(Debug, Default)]
pub struct PendingPostings {
    in_flight: AtomicUsize,
}

impl PendingPostings {
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn begin(&self) -> PendingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        PendingGuard(self)
    }
}

/// Released when the submission finishes or its request is dropped.
struct PendingGuard<'a>(&'a PendingPostings);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        "Posting..."
    } else {
        "Post Job"
    }
}

pub struct JobPostingForm {
    draft: JobPostingDraft,
    report: ValidationReport,
    submitting: bool,
}

impl Default for JobPostingForm {
    fn default() -> Self {
        Self::from_draft(JobPostingDraft::default())
    }
}

impl JobPostingForm {
    pub fn from_draft(draft: JobPostingDraft) -> Self {
        let report = validate_job_posting(&draft);
        Self {
            draft,
            report,
            submitting: false,
        }
    }

    /// Marks the form as submitting while another posting is pending.
    pub fn with_pending(mut self, pending: &PendingPostings) -> Self {
        self.submitting = pending.is_pending();
        self
    }

    pub fn draft(&self) -> &JobPostingDraft {
        &self.draft
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        self.report.is_valid && !self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        submit_label(self.submitting)
    }

    /// Applies one edit and revalidates.
    pub fn apply(&mut self, update: FieldUpdate) -> &ValidationReport {
        let d = &mut self.draft;
        match update {
            FieldUpdate::Title(v) => d.title = v,
            FieldUpdate::Company(v) => d.company = v,
            FieldUpdate::Location(v) => d.location = v,
            FieldUpdate::JobType(v) => d.job_type = v,
            FieldUpdate::ExperienceLevel(v) => d.experience_level = v,
            FieldUpdate::SalaryMin(v) => d.salary.min = v,
            FieldUpdate::SalaryMax(v) => d.salary.max = v,
            FieldUpdate::Description(v) => d.description = v,
            FieldUpdate::Requirements(v) => d.requirements = v,
            FieldUpdate::Benefits(v) => d.benefits = Some(v),
            FieldUpdate::AddSkill(v) => {
                add_skill(&mut d.skills, &v);
            }
            FieldUpdate::RemoveSkill(v) => d.skills.retain(|s| *s != v),
            FieldUpdate::Remote(v) => d.remote = v,
            FieldUpdate::Featured(v) => d.featured = v,
            FieldUpdate::Urgent(v) => d.urgent = v,
        }
        self.report = validate_job_posting(&self.draft);
        &self.report
    }

    /// Submits the posting. Nothing is sent anywhere: the draft is logged, an
    /// artificial delay elapses, and a receipt with a notification comes back.
    pub async fn submit(
        &mut self,
        clock: &dyn Clock,
        delay: Duration,
        pending: &PendingPostings,
    ) -> Result<SubmissionReceipt, ValidationReport> {
        self.report = validate_job_posting(&self.draft);
        if !self.report.is_valid {
            return Err(self.report.clone());
        }

        let _pending = pending.begin();
        self.submitting = true;
        let posting_id = Uuid::new_v4();
        let payload = serde_json::to_string(&self.draft).unwrap_or_default();
        info!(%posting_id, job = %payload, "Job posting submitted");

        clock.sleep(delay).await;
        self.submitting = false;

        Ok(SubmissionReceipt {
            posting_id,
            submitted_at: Utc::now(),
            notification: Notification {
                title: "Job posted successfully",
                description: "Your job has been posted and is now live.",
            },
            redirect_to: JOBS_LIST_PATH,
        })
    }
}

/// Adds a trimmed skill unless it is blank or already present.
pub fn add_skill(skills: &mut Vec<String>, raw: &str) -> bool {
    let skill = raw.trim();
    if skill.is_empty() || skills.iter().any(|s| s == skill) {
        return false;
    }
    skills.push(skill.to_string());
    true
}

/// The first few common skills not already selected.
pub fn skill_suggestions(selected: &[String]) -> Vec<&'static str> {
    COMMON_SKILLS
        .iter()
        .copied()
        .filter(|s| !selected.iter().any(|sel| sel == s))
        .take(MAX_SUGGESTIONS)
        .collect()
}
