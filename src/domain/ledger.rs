use super::{ApplicationStatus, Decision, DecisionEvent, DecisionSink, DecisionStatistics, Job};
use crate::error::{JswpError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// One persisted swipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeRecord {
    pub talent_id: String,
    pub job_id: String,
    pub direction: Decision,
    /// Set by the hiring company; only meaningful for applications
    #[serde(default)]
    pub application_status: ApplicationStatus,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only record of swipes, and the decision sink used by the app.
///
/// Records are stored as JSON Lines. Repeated decisions for the same job are
/// all kept; the latest one supersedes earlier ones when reading. Status
/// changes made by a company are appended the same way, as a copy of the
/// application carrying the new status.
#[derive(Debug)]
pub struct SwipeLedger {
    talent_id: String,
    path: Option<PathBuf>,
    records: Vec<SwipeRecord>,
    session_start: usize,
    last_error: Option<String>,
}

impl SwipeLedger {
    /// Opens the ledger at `path`, loading whatever it already holds.
    pub fn open(path: impl Into<PathBuf>, talent_id: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let records = if path.exists() {
            load_records(&path)?
        } else {
            Vec::new()
        };

        Ok(Self {
            talent_id: talent_id.into(),
            path: Some(path),
            session_start: records.len(),
            records,
            last_error: None,
        })
    }

    /// A ledger that never touches the filesystem (dry run)
    pub fn in_memory(talent_id: impl Into<String>) -> Self {
        Self {
            talent_id: talent_id.into(),
            path: None,
            records: Vec::new(),
            session_start: 0,
            last_error: None,
        }
    }

    /// Keeps the loaded records but stops writing new ones
    pub fn into_dry_run(mut self) -> Self {
        self.path = None;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.path.is_none()
    }

    pub fn talent_id(&self) -> &str {
        &self.talent_id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Records a decision for `job_id`, persisting it unless dry-running.
    pub fn record(&mut self, job_id: &str, direction: Decision) -> Result<()> {
        let record = SwipeRecord {
            talent_id: self.talent_id.clone(),
            job_id: job_id.to_string(),
            direction,
            application_status: ApplicationStatus::Pending,
            recorded_at: Utc::now(),
        };
        self.append(record)
    }

    fn append(&mut self, record: SwipeRecord) -> Result<()> {
        if let Some(path) = &self.path {
            append_record(path, &record)?;
        }

        self.records.push(record);
        Ok(())
    }

    pub fn records(&self) -> &[SwipeRecord] {
        &self.records
    }

    /// Records made since the ledger was opened
    pub fn session_records(&self) -> &[SwipeRecord] {
        &self.records[self.session_start..]
    }

    /// Ids of every job this talent has swiped on, in any session
    pub fn swiped_job_ids(&self) -> HashSet<String> {
        self.own_records().map(|r| r.job_id.clone()).collect()
    }

    /// The most recent decision this talent made about `job_id`
    pub fn latest_decision(&self, job_id: &str) -> Option<Decision> {
        self.own_records()
            .filter(|r| r.job_id == job_id)
            .last()
            .map(|r| r.direction)
    }

    /// Job ids whose latest decision is Accept, in order of first application
    pub fn applied_job_ids(&self) -> Vec<String> {
        let latest = latest_by_job(self.own_records());
        let mut seen = HashSet::new();

        self.own_records()
            .filter(|r| latest.get(r.job_id.as_str()) == Some(&Decision::Accept))
            .filter(|r| seen.insert(r.job_id.clone()))
            .map(|r| r.job_id.clone())
            .collect()
    }

    /// Catalog entries this talent has applied to
    pub fn applied_jobs<'a>(&self, catalog: &'a [Job]) -> Vec<&'a Job> {
        self.applied_job_ids()
            .iter()
            .filter_map(|id| catalog.iter().find(|job| &job.id == id))
            .collect()
    }

    /// Status of this talent's application to `job_id`, if they applied
    pub fn application_status(&self, job_id: &str) -> Option<ApplicationStatus> {
        self.own_records()
            .filter(|r| r.job_id == job_id)
            .last()
            .filter(|r| r.direction == Decision::Accept)
            .map(|r| r.application_status)
    }

    /// Latest record for every (talent, job) pair across all talents, in order
    /// of the pair's first swipe
    pub fn latest_swipes(&self) -> Vec<&SwipeRecord> {
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();
        let mut latest: Vec<&SwipeRecord> = Vec::new();

        for record in &self.records {
            let key = (record.talent_id.as_str(), record.job_id.as_str());
            match index.get(&key) {
                Some(&i) => latest[i] = record,
                None => {
                    index.insert(key, latest.len());
                    latest.push(record);
                }
            }
        }
        latest
    }

    /// Current applications from every talent, newest first
    pub fn applications(&self) -> Vec<&SwipeRecord> {
        let mut applications: Vec<&SwipeRecord> = self
            .latest_swipes()
            .into_iter()
            .filter(|r| r.direction == Decision::Accept)
            .collect();
        applications.reverse();
        applications
    }

    /// Moves `talent_id`'s application to `job_id` to `status`.
    ///
    /// Fails when the talent's latest decision on the job is not an application.
    pub fn set_application_status(
        &mut self,
        talent_id: &str,
        job_id: &str,
        status: ApplicationStatus,
    ) -> Result<SwipeRecord> {
        let current = self
            .records
            .iter()
            .filter(|r| r.talent_id == talent_id && r.job_id == job_id)
            .last()
            .filter(|r| r.direction == Decision::Accept)
            .ok_or_else(|| {
                JswpError::ApplicationNotFound(format!(
                    "{} has not applied to job {}",
                    talent_id, job_id
                ))
            })?;

        let record = SwipeRecord {
            application_status: status,
            recorded_at: Utc::now(),
            ..current.clone()
        };
        self.append(record.clone())?;

        tracing::info!(talent = talent_id, job = job_id, ?status, "application status updated");
        Ok(record)
    }

    /// Applied/passed counts over this session, latest decision per job
    pub fn statistics(&self, total_candidates: usize) -> DecisionStatistics {
        let own = self.session_records().iter();
        let latest = latest_by_job(own.filter(|r| r.talent_id == self.talent_id));

        let mut applied = 0;
        let mut passed = 0;
        for decision in latest.values() {
            match decision {
                Decision::Accept => applied += 1,
                Decision::Reject => passed += 1,
            }
        }

        DecisionStatistics {
            total_candidates,
            applied,
            passed,
        }
    }

    /// The last write failure, if any, for surfacing to the user
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn own_records(&self) -> impl Iterator<Item = &SwipeRecord> {
        self.records
            .iter()
            .filter(move |r| r.talent_id == self.talent_id)
    }
}

impl DecisionSink<String> for SwipeLedger {
    fn on_decision(&mut self, event: &DecisionEvent<String>) {
        match self.record(&event.candidate_id, event.decision) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                tracing::warn!(job = %event.candidate_id, error = %e, "failed to save swipe");
                self.last_error = Some(format!("Failed to save swipe: {}", e));
            }
        }
    }
}

fn latest_by_job<'a>(
    records: impl Iterator<Item = &'a SwipeRecord>,
) -> HashMap<&'a str, Decision> {
    let mut latest = HashMap::new();
    for record in records {
        latest.insert(record.job_id.as_str(), record.direction);
    }
    latest
}

fn load_records(path: &Path) -> Result<Vec<SwipeRecord>> {
    let file = fs::File::open(path)?;
    let mut records = Vec::new();

    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<SwipeRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = number + 1,
                    error = %e,
                    "skipping malformed ledger line"
                );
            }
        }
    }

    Ok(records)
}

fn append_record(path: &Path, record: &SwipeRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(talent_id: &str, job_id: &str, direction: Decision) -> SwipeRecord {
        SwipeRecord {
            talent_id: talent_id.to_string(),
            job_id: job_id.to_string(),
            direction,
            application_status: ApplicationStatus::Pending,
            recorded_at: Utc::now(),
        }
    }

    fn event(job_id: &str, decision: Decision) -> DecisionEvent<String> {
        DecisionEvent {
            candidate_id: job_id.to_string(),
            decision,
            position: 0,
        }
    }

    #[test]
    fn test_ledger_in_memory() {
        let mut ledger = SwipeLedger::in_memory("talent-1");
        assert!(ledger.is_dry_run());

        ledger.on_decision(&event("j1", Decision::Accept));

        assert_eq!(ledger.records().len(), 1);
        assert_eq!(ledger.records()[0].talent_id, "talent-1");
        assert!(ledger.last_error().is_none());
    }

    #[test]
    fn test_ledger_persists_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("swipes.jsonl");

        {
            let mut ledger = SwipeLedger::open(&path, "talent-1").unwrap();
            ledger.on_decision(&event("j1", Decision::Accept));
            ledger.on_decision(&event("j2", Decision::Reject));
        }

        let reopened = SwipeLedger::open(&path, "talent-1").unwrap();

        assert_eq!(reopened.records().len(), 2);
        assert!(reopened.session_records().is_empty());
        assert_eq!(reopened.latest_decision("j2"), Some(Decision::Reject));

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("\"direction\":\"right\""));
    }

    #[test]
    fn test_ledger_skips_malformed_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("swipes.jsonl");
        fs::write(
            &path,
            "not json\n\n{\"talent_id\":\"t\",\"job_id\":\"j1\",\"direction\":\"left\",\"recorded_at\":\"2024-01-01T00:00:00Z\"}\n",
        )
        .unwrap();

        let ledger = SwipeLedger::open(&path, "t").unwrap();

        assert_eq!(ledger.records().len(), 1);
        assert_eq!(ledger.latest_decision("j1"), Some(Decision::Reject));
    }

    #[test]
    fn test_swiped_ids_are_per_talent() {
        let mut ledger = SwipeLedger::in_memory("talent-1");
        ledger.record("j1", Decision::Reject).unwrap();
        ledger.records.push(record("someone-else", "j2", Decision::Accept));

        let swiped = ledger.swiped_job_ids();

        assert!(swiped.contains("j1"));
        assert!(!swiped.contains("j2"));
    }

    #[test]
    fn test_latest_decision_wins() {
        let mut ledger = SwipeLedger::in_memory("t");
        ledger.on_decision(&event("j1", Decision::Accept));
        ledger.on_decision(&event("j1", Decision::Reject));

        assert_eq!(ledger.records().len(), 2);
        assert_eq!(ledger.latest_decision("j1"), Some(Decision::Reject));
        assert!(ledger.applied_job_ids().is_empty());

        let stats = ledger.statistics(3);
        assert_eq!(stats.applied, 0);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.remaining(), 2);
    }

    #[test]
    fn test_applied_job_ids_in_order() {
        let mut ledger = SwipeLedger::in_memory("t");
        ledger.on_decision(&event("j2", Decision::Accept));
        ledger.on_decision(&event("j1", Decision::Reject));
        ledger.on_decision(&event("j3", Decision::Accept));
        ledger.on_decision(&event("j2", Decision::Accept));

        assert_eq!(ledger.applied_job_ids(), vec!["j2", "j3"]);
    }

    #[test]
    fn test_applied_jobs_joins_catalog() {
        use crate::domain::test_support::job;

        let catalog = vec![job("j1", "One"), job("j2", "Two")];
        let mut ledger = SwipeLedger::in_memory("t");
        ledger.on_decision(&event("j2", Decision::Accept));
        ledger.on_decision(&event("gone", Decision::Accept));

        let applied = ledger.applied_jobs(&catalog);

        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].title, "Two");
    }

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the ledger file should be makes the append fail
        let path = temp_dir.path().join("swipes.jsonl");
        fs::create_dir(&path).unwrap();

        let mut ledger = SwipeLedger {
            talent_id: "t".to_string(),
            path: Some(path),
            records: Vec::new(),
            session_start: 0,
            last_error: None,
        };

        ledger.on_decision(&event("j1", Decision::Accept));

        assert!(ledger.last_error().is_some());
        assert!(ledger.records().is_empty());

        ledger.clear_error();
        assert!(ledger.last_error().is_none());
    }

    mod application_tests {
        use super::*;

        #[test]
        fn test_old_lines_default_to_pending() {
            let line = r#"{"talent_id":"t","job_id":"j1","direction":"right","recorded_at":"2024-01-01T00:00:00Z"}"#;

            let record: SwipeRecord = serde_json::from_str(line).unwrap();

            assert_eq!(record.application_status, ApplicationStatus::Pending);
        }

        #[test]
        fn test_status_update_persists() {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("swipes.jsonl");

            {
                let mut talent = SwipeLedger::open(&path, "t1").unwrap();
                talent.on_decision(&event("j1", Decision::Accept));
            }
            {
                let mut company = SwipeLedger::open(&path, "c1").unwrap();
                let updated = company
                    .set_application_status("t1", "j1", ApplicationStatus::InReview)
                    .unwrap();
                assert_eq!(updated.direction, Decision::Accept);
            }

            let talent = SwipeLedger::open(&path, "t1").unwrap();

            assert_eq!(
                talent.application_status("j1"),
                Some(ApplicationStatus::InReview)
            );
            assert_eq!(talent.applied_job_ids(), vec!["j1"]);
            assert_eq!(talent.latest_decision("j1"), Some(Decision::Accept));
        }

        #[test]
        fn test_status_requires_an_application() {
            let mut ledger = SwipeLedger::in_memory("c1");
            ledger.records.push(record("t1", "j1", Decision::Reject));

            let err = ledger
                .set_application_status("t1", "j1", ApplicationStatus::Accepted)
                .unwrap_err();
            assert!(matches!(err, JswpError::ApplicationNotFound(_)));

            let err = ledger
                .set_application_status("t2", "j1", ApplicationStatus::Accepted)
                .unwrap_err();
            assert!(matches!(err, JswpError::ApplicationNotFound(_)));
            assert_eq!(ledger.records().len(), 1);
        }

        #[test]
        fn test_pass_after_apply_withdraws_application() {
            let mut ledger = SwipeLedger::in_memory("t1");
            ledger.on_decision(&event("j1", Decision::Accept));
            ledger.on_decision(&event("j1", Decision::Reject));

            assert!(ledger.application_status("j1").is_none());
            assert!(ledger.applications().is_empty());
        }

        #[test]
        fn test_applications_across_talents_newest_first() {
            let mut ledger = SwipeLedger::in_memory("admin");
            ledger.records.push(record("t1", "j1", Decision::Accept));
            ledger.records.push(record("t2", "j1", Decision::Accept));
            ledger.records.push(record("t2", "j2", Decision::Reject));
            ledger
                .set_application_status("t1", "j1", ApplicationStatus::Rejected)
                .unwrap();

            let applications = ledger.applications();

            assert_eq!(applications.len(), 2);
            assert_eq!(applications[0].talent_id, "t2");
            assert_eq!(applications[1].talent_id, "t1");
            assert_eq!(
                applications[1].application_status,
                ApplicationStatus::Rejected
            );
            assert_eq!(ledger.latest_swipes().len(), 3);
        }

        #[test]
        fn test_into_dry_run_keeps_history() {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("swipes.jsonl");
            {
                let mut ledger = SwipeLedger::open(&path, "t1").unwrap();
                ledger.on_decision(&event("j1", Decision::Reject));
            }

            let mut ledger = SwipeLedger::open(&path, "t1").unwrap().into_dry_run();
            ledger.on_decision(&event("j2", Decision::Accept));

            assert!(ledger.is_dry_run());
            assert!(ledger.swiped_job_ids().contains("j1"));
            assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
        }
    }
}
