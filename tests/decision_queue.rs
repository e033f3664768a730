use jswp::catalog::load_catalog;
use jswp::domain::{Decision, DecisionQueue, GestureConfig, Job, JobFilter, SwipeLedger};
use jswp::{filter_jobs, JswpError};
use std::fs;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"id": "a", "company_id": "c1", "title": "Backend Engineer", "job_type": "remote",
     "created_at": "2024-03-01T00:00:00Z",
     "companies": {"id": "c1", "company_name": "Acme", "website": "https://acme.test"}},
    {"id": "b", "company_id": "c2", "title": "Designer", "job_type": "onsite",
     "location": "Berlin", "created_at": "2024-02-01T00:00:00Z"},
    {"id": "c", "company_id": "c1", "title": "Data Analyst", "job_type": "hybrid",
     "experience_required": 5, "created_at": "2024-01-01T00:00:00Z"}
]"#;

fn catalog(dir: &TempDir) -> Vec<Job> {
    let path = dir.path().join("jobs.json");
    fs::write(&path, CATALOG).unwrap();
    load_catalog(&path).unwrap()
}

fn current_id(queue: &DecisionQueue<Job, SwipeLedger>) -> Option<&str> {
    queue.current().map(|job| job.id.as_str())
}

#[test]
fn commit_undo_and_recommit_keep_both_decisions() {
    let dir = TempDir::new().unwrap();
    let jobs = filter_jobs(&catalog(&dir), &JobFilter::default());
    let mut queue = DecisionQueue::with_default_threshold(jobs, SwipeLedger::in_memory("t1"));

    let event = queue.commit(Decision::Accept).unwrap();
    assert_eq!(event.candidate_id, "a");
    assert_eq!(queue.cursor(), 1);
    assert_eq!(current_id(&queue), Some("b"));

    assert!(queue.undo());
    assert_eq!(queue.cursor(), 0);
    assert_eq!(current_id(&queue), Some("a"));

    let event = queue.commit(Decision::Reject).unwrap();
    assert_eq!(event.candidate_id, "a");
    assert_eq!(event.decision, Decision::Reject);
    assert_eq!(queue.cursor(), 1);

    let ledger = queue.into_sink();
    assert_eq!(ledger.records().len(), 2);
    assert_eq!(ledger.latest_decision("a"), Some(Decision::Reject));
}

#[test]
fn empty_deck_rejects_commit_and_records_nothing() {
    let mut queue: DecisionQueue<Job, SwipeLedger> =
        DecisionQueue::with_default_threshold(Vec::new(), SwipeLedger::in_memory("t1"));

    assert!(queue.current().is_none());
    assert!(matches!(
        queue.commit(Decision::Accept),
        Err(JswpError::EmptyQueue)
    ));
    assert!(queue.sink().records().is_empty());
}

#[test]
fn gesture_below_threshold_springs_back() {
    let dir = TempDir::new().unwrap();
    let jobs: Vec<Job> = catalog(&dir).into_iter().take(1).collect();
    let mut queue = DecisionQueue::new(
        jobs,
        GestureConfig { threshold: 100.0 },
        SwipeLedger::in_memory("t1"),
    );

    queue.update_gesture(50.0);
    assert!(queue.end_gesture().unwrap().is_none());
    assert!(queue.gesture().is_neutral());
    assert!(queue.sink().records().is_empty());

    queue.update_gesture(150.0);
    let event = queue.end_gesture().unwrap().unwrap();
    assert_eq!(event.candidate_id, "a");
    assert_eq!(event.decision, Decision::Accept);
    assert!(queue.is_exhausted());
    assert_eq!(queue.sink().applied_job_ids(), vec!["a"]);
}

#[test]
fn swiped_jobs_are_hidden_in_the_next_session() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog(&dir);
    let ledger_path = dir.path().join("swipes.jsonl");

    {
        let ledger = SwipeLedger::open(&ledger_path, "t1").unwrap();
        let jobs = filter_jobs(&catalog, &JobFilter::default());
        let mut queue = DecisionQueue::with_default_threshold(jobs, ledger);
        queue.commit(Decision::Accept).unwrap();
        queue.commit(Decision::Reject).unwrap();
    }

    let ledger = SwipeLedger::open(&ledger_path, "t1").unwrap();
    let filter = JobFilter {
        exclude_ids: ledger.swiped_job_ids(),
        ..Default::default()
    };
    let jobs = filter_jobs(&catalog, &filter);

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "c");

    let applied = ledger.applied_jobs(&catalog);
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].company_name(), "Acme");
}

#[test]
fn reset_after_filter_change_starts_from_the_top() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog(&dir);
    let mut filter = JobFilter::default();
    let mut queue = DecisionQueue::with_default_threshold(
        filter_jobs(&catalog, &filter),
        SwipeLedger::in_memory("t1"),
    );
    queue.commit(Decision::Reject).unwrap();
    queue.commit(Decision::Reject).unwrap();

    filter.cycle_job_type();
    filter.cycle_job_type();
    queue.reset(filter_jobs(&catalog, &filter));

    assert_eq!(queue.cursor(), 0);
    assert_eq!(queue.len(), 1);
    assert_eq!(current_id(&queue), Some("b"));
    assert_eq!(queue.sink().records().len(), 2);
}
