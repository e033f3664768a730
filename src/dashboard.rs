//! Plain-text views for each role: a talent's applications, a company's
//! applicants, and the admin overview.

use crate::domain::{ApplicationStatus, Decision, Job, SwipeLedger, SwipeRecord};
use crate::error::{JswpError, Result};
use crate::session::{SessionContext, UserRole};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Lists the jobs the ledger's talent applied to, with their status
pub fn applied_report(ledger: &SwipeLedger, catalog: &[Job]) -> String {
    let applied = ledger.applied_jobs(catalog);

    if applied.is_empty() {
        return format!("No applications yet for {}\n", ledger.talent_id());
    }

    let mut out = format!("Applied jobs for {}:\n", ledger.talent_id());
    for job in applied {
        let status = ledger.application_status(&job.id).unwrap_or_default();
        out.push_str(&format!(
            "   [{}] {} at {} ({}, {})\n",
            status.label(),
            job.title,
            job.company_name(),
            job.location_or_remote(),
            job.job_type.label()
        ));
    }
    out
}

/// Lists the applicants to each job the signed-in company posted
pub fn applicants_report(
    session: &SessionContext,
    ledger: &SwipeLedger,
    catalog: &[Job],
) -> Result<String> {
    session.require_role(UserRole::Company)?;

    let jobs: Vec<&Job> = catalog
        .iter()
        .filter(|job| job.company_id == session.user_id)
        .collect();
    if jobs.is_empty() {
        return Ok(format!("No jobs posted by {}\n", session.user_id));
    }

    let applications = ledger.applications();
    let mut out = String::new();
    for job in jobs {
        let applicants: Vec<&&SwipeRecord> = applications
            .iter()
            .filter(|r| r.job_id == job.id)
            .collect();

        out.push_str(&format!(
            "{} ({}) - {} applicant(s)\n",
            job.title,
            job.id,
            applicants.len()
        ));
        for record in applicants {
            let marker = if record.application_status == ApplicationStatus::Pending {
                " (new)"
            } else {
                ""
            };
            out.push_str(&format!(
                "   {:<20} {:<10} applied {}{}\n",
                record.talent_id,
                record.application_status.label(),
                record.recorded_at.format("%Y-%m-%d"),
                marker
            ));
        }
    }
    Ok(out)
}

/// Changes the status of an application to one of the company's own jobs
pub fn update_application_status(
    session: &SessionContext,
    ledger: &mut SwipeLedger,
    catalog: &[Job],
    talent_id: &str,
    job_id: &str,
    status: ApplicationStatus,
) -> Result<SwipeRecord> {
    session.require_role(UserRole::Company)?;

    let job = catalog
        .iter()
        .find(|job| job.id == job_id)
        .ok_or_else(|| JswpError::CatalogError(format!("Unknown job: {}", job_id)))?;
    if job.company_id != session.user_id {
        return Err(JswpError::AccessDenied(format!(
            "job {} is not posted by {}",
            job_id, session.user_id
        )));
    }

    ledger.set_application_status(talent_id, job_id, status)
}

/// Platform-wide counts for admins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformOverview {
    pub talents: usize,
    pub companies: usize,
    pub jobs: usize,
    pub active_jobs: usize,
    pub applications: usize,
    pub passes: usize,
    pub by_status: BTreeMap<ApplicationStatus, usize>,
}

pub fn platform_overview(
    session: &SessionContext,
    ledger: &SwipeLedger,
    catalog: &[Job],
) -> Result<PlatformOverview> {
    session.require_role(UserRole::Admin)?;

    let latest = ledger.latest_swipes();
    let talents: HashSet<&str> = latest.iter().map(|r| r.talent_id.as_str()).collect();
    let companies: HashSet<&str> = catalog.iter().map(|j| j.company_id.as_str()).collect();

    let mut by_status = BTreeMap::new();
    let mut applications = 0;
    let mut passes = 0;
    for record in &latest {
        match record.direction {
            Decision::Accept => {
                applications += 1;
                *by_status.entry(record.application_status).or_insert(0) += 1;
            }
            Decision::Reject => passes += 1,
        }
    }

    Ok(PlatformOverview {
        talents: talents.len(),
        companies: companies.len(),
        jobs: catalog.len(),
        active_jobs: catalog.iter().filter(|j| j.is_active).count(),
        applications,
        passes,
        by_status,
    })
}

impl fmt::Display for PlatformOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Platform overview")?;
        writeln!(f, "   Talents:      {}", self.talents)?;
        writeln!(f, "   Companies:    {}", self.companies)?;
        writeln!(f, "   Jobs:         {} ({} active)", self.jobs, self.active_jobs)?;
        writeln!(f, "   Applications: {}", self.applications)?;
        for (status, count) in &self.by_status {
            writeln!(f, "      {:<10} {}", status.label(), count)?;
        }
        writeln!(f, "   Passes:       {}", self.passes)
    }
}
