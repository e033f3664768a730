pub mod decision_queue;
pub mod gesture;
pub mod ledger;

pub use decision_queue::DecisionQueue;
pub use gesture::{classify, ExitMotion, GestureConfig, GestureState};
pub use ledger::{SwipeLedger, SwipeRecord};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// An item reviewed one at a time by a [`DecisionQueue`].
///
/// The queue only needs a stable identifier to report decisions.
pub trait Candidate {
    type Id: Clone + PartialEq + fmt::Debug;

    fn candidate_id(&self) -> Self::Id;
}

/// Outcome recorded for a candidate.
///
/// Serialized as the swipe direction: `right` applies, `left` passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "right")]
    Accept,
    #[serde(rename = "left")]
    Reject,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Accept => "APPLY",
            Decision::Reject => "PASS",
        }
    }
}

/// A committed decision, as handed to a [`DecisionSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEvent<Id> {
    pub candidate_id: Id,
    pub decision: Decision,
    /// Cursor position at the time of the commit
    pub position: usize,
}

/// Receives decisions committed by a [`DecisionQueue`].
///
/// Sinks cannot fail a commit. A sink that persists decisions handles and
/// reports its own failures.
pub trait DecisionSink<Id> {
    fn on_decision(&mut self, event: &DecisionEvent<Id>);
}

impl<Id, F> DecisionSink<Id> for F
where
    F: FnMut(&DecisionEvent<Id>),
{
    fn on_decision(&mut self, event: &DecisionEvent<Id>) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Remote,
    Onsite,
    Hybrid,
}

impl JobType {
    pub fn label(&self) -> &'static str {
        match self {
            JobType::Remote => "Remote",
            JobType::Onsite => "Onsite",
            JobType::Hybrid => "Hybrid",
        }
    }
}

/// Where an application stands with the hiring company
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    InReview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::InReview => "In Review",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub company_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub experience_required: u32,
    #[serde(default)]
    pub location: Option<String>,
    pub job_type: JobType,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "companies")]
    pub company: Option<Company>,
}

fn default_active() -> bool {
    true
}

impl Job {
    pub fn company_name(&self) -> &str {
        self.company
            .as_ref()
            .map(|c| c.company_name.as_str())
            .unwrap_or("Company Name")
    }

    pub fn location_or_remote(&self) -> &str {
        self.location.as_deref().unwrap_or("Remote")
    }

    pub fn company_website(&self) -> Option<&str> {
        self.company.as_ref().and_then(|c| c.website.as_deref())
    }
}

impl Candidate for Job {
    type Id = String;

    fn candidate_id(&self) -> String {
        self.id.clone()
    }
}

/// Criteria for selecting which jobs enter the swipe deck
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Job type filters (None = all types)
    pub job_types: Option<Vec<JobType>>,
    /// Maximum years of experience a job may require
    pub max_experience: Option<u32>,
    /// Case-insensitive location substring
    pub location: Option<String>,
    /// Lowercased search skills; a job matches if any required skill contains any of them
    pub skills: Vec<String>,
    /// Job ids to leave out, typically those already swiped
    pub exclude_ids: HashSet<String>,
    /// Keep jobs that are no longer active
    pub include_inactive: bool,
}

impl JobFilter {
    /// Steps the job type filter: all, remote, onsite, hybrid, then back to all.
    ///
    /// A filter holding several types goes back to all.
    pub fn cycle_job_type(&mut self) {
        self.job_types = match self.job_types.as_deref() {
            None => Some(vec![JobType::Remote]),
            Some([JobType::Remote]) => Some(vec![JobType::Onsite]),
            Some([JobType::Onsite]) => Some(vec![JobType::Hybrid]),
            Some(_) => None,
        };
    }

    pub fn job_type_label(&self) -> String {
        match self.job_types.as_deref() {
            None | Some([]) => "All types".to_string(),
            Some(types) => types
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Splits a comma separated skill list into trimmed, lowercased terms.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Applies `filter` to `jobs`, newest first.
pub fn filter_jobs(jobs: &[Job], filter: &JobFilter) -> Vec<Job> {
    let location = filter.location.as_ref().map(|l| l.to_lowercase());

    let mut selected: Vec<Job> = jobs
        .iter()
        .filter(|job| filter.include_inactive || job.is_active)
        .filter(|job| match filter.job_types {
            Some(ref types) => types.contains(&job.job_type),
            None => true,
        })
        .filter(|job| match filter.max_experience {
            Some(max) => job.experience_required <= max,
            None => true,
        })
        .filter(|job| match location {
            Some(ref needle) => job
                .location
                .as_ref()
                .is_some_and(|loc| loc.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .filter(|job| !filter.exclude_ids.contains(&job.id))
        .filter(|job| {
            filter.skills.is_empty()
                || job.skills_required.iter().any(|skill| {
                    let skill = skill.trim().to_lowercase();
                    filter.skills.iter().any(|term| skill.contains(term.as_str()))
                })
        })
        .cloned()
        .collect();

    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    selected
}

/// Statistics about decisions made during the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionStatistics {
    pub total_candidates: usize,
    pub applied: usize,
    pub passed: usize,
}

impl DecisionStatistics {
    pub fn decided(&self) -> usize {
        self.applied + self.passed
    }

    pub fn remaining(&self) -> usize {
        self.total_candidates.saturating_sub(self.decided())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    pub fn job(id: &str, title: &str) -> Job {
        Job {
            id: id.to_string(),
            company_id: "company-1".to_string(),
            title: title.to_string(),
            description: format!("{} description", title),
            skills_required: vec!["Rust".to_string()],
            experience_required: 2,
            location: Some("Berlin".to_string()),
            job_type: JobType::Remote,
            salary_range: None,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            company: None,
        }
    }
}
