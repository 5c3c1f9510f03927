/// Integration tests for the scan-targets use case against a mock API.
///
/// The mock drives one behavior per target so a single run can mix
/// successes, slow jobs, and every failure kind.
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::{json, Value};

use aibom_scan::config::ScanTuning;
use aibom_scan::ports::outbound::ProgressReporter;
use aibom_scan::prelude::*;

// ============================================================================
// Test Doubles
// ============================================================================

/// Per-target behavior of the mock API, keyed by target id.
enum Behavior {
    /// Job finishes on the first poll and serves this document.
    Document(Value),
    /// Job submission is rejected.
    SubmitFails,
    /// Job never reaches a terminal state.
    NeverFinishes,
    /// Job ends in the errored state.
    JobErrors,
    /// Job finishes but the document fetch fails.
    FetchFails,
}

struct MockApi {
    targets: Vec<Target>,
    behaviors: HashMap<String, Behavior>,
}

impl MockApi {
    fn new(targets: Vec<Target>, behaviors: HashMap<String, Behavior>) -> Self {
        Self { targets, behaviors }
    }

    // Only eligible targets ever reach the job endpoints, so every
    // looked-up id must have a registered behavior.
    fn behavior(&self, id: &str) -> &Behavior {
        self.behaviors
            .get(id)
            .expect("behavior registered for target")
    }
}

#[async_trait]
impl AibomApi for MockApi {
    async fn list_targets(&self) -> Result<Vec<Target>> {
        Ok(self.targets.clone())
    }

    async fn submit_job(&self, target: &Target) -> Result<JobHandle> {
        match self.behavior(target.id()) {
            Behavior::SubmitFails => Err(anyhow!("incompatible target type (HTTP 422)")),
            _ => Ok(JobHandle {
                job_id: target.id().to_string(),
                org_id: target.org_id().to_string(),
                initial_status: JobState::Pending,
            }),
        }
    }

    async fn job_status(&self, job: &JobHandle) -> Result<JobState> {
        match self.behavior(&job.job_id) {
            Behavior::NeverFinishes => Ok(JobState::Running),
            Behavior::JobErrors => Ok(JobState::Errored {
                details: "scm checkout failed".to_string(),
            }),
            _ => Ok(JobState::Finished),
        }
    }

    async fn fetch_document(&self, job: &JobHandle) -> Result<Value> {
        match self.behavior(&job.job_id) {
            Behavior::Document(document) => Ok(document.clone()),
            Behavior::FetchFails => Err(anyhow!("HTTP 500 Internal Server Error")),
            _ => Err(anyhow!("document requested for unfinished job")),
        }
    }
}

/// Progress reporter that swallows everything.
struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_debug(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

/// Progress reporter that counts completion calls.
struct CountingProgressReporter {
    completions: std::sync::atomic::AtomicUsize,
}

impl CountingProgressReporter {
    fn new() -> Self {
        Self {
            completions: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

impl ProgressReporter for &CountingProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_debug(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {
        self.completions
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn fast_tuning() -> ScanTuning {
    ScanTuning {
        max_concurrency: 5,
        poll_initial_delay: Duration::from_millis(1),
        poll_max_delay: Duration::from_millis(2),
        poll_backoff_factor: 1.5,
        max_poll_attempts: 3,
    }
}

fn git_target(id: &str, name: &str) -> Target {
    Target::new(
        id.to_string(),
        name.to_string(),
        "org-1".to_string(),
        RepoType::GitHub,
    )
}

fn container_target(id: &str, name: &str) -> Target {
    Target::new(
        id.to_string(),
        name.to_string(),
        "org-1".to_string(),
        RepoType::parse("docker-hub"),
    )
}

fn document_with_models(models: &[&str]) -> Value {
    let components: Vec<Value> = models
        .iter()
        .map(|name| json!({"name": name, "type": "machine-learning-model"}))
        .collect();
    json!({"data": {"attributes": {"components": components}}})
}

fn use_case(api: MockApi) -> ScanTargetsUseCase<MockApi, NullProgressReporter> {
    ScanTargetsUseCase::new(api, NullProgressReporter, fast_tuning())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_search_run_filters_counts_and_matches() {
    // 45 targets, 3 of them container images, 3 of the rest using deepseek.
    let mut targets = Vec::new();
    let mut behaviors = HashMap::new();
    for i in 0..42 {
        let id = format!("t-{:02}", i);
        targets.push(git_target(&id, &format!("org/repo-{:02}", i)));
        let document = if i < 3 {
            document_with_models(&["deepseek-r1"])
        } else {
            document_with_models(&[])
        };
        behaviors.insert(id, Behavior::Document(document));
    }
    for i in 0..3 {
        let id = format!("c-{}", i);
        targets.push(container_target(&id, &format!("image-{}:latest", i)));
    }

    let report = use_case(MockApi::new(targets, behaviors))
        .execute(ScanRequest::search(vec!["deepseek".to_string()]))
        .await
        .unwrap();

    assert_eq!(report.summary.total_targets, 45);
    assert_eq!(report.summary.eligible_targets, 42);
    assert_eq!(report.summary.succeeded_targets, 42);
    assert_eq!(report.summary.matched_targets, 3);
    assert_eq!(report.summary.failed_targets, 0);

    let matches = report.matches();
    assert_eq!(matches.len(), 3);
    for result in matches {
        let expected: BTreeSet<String> = ["deepseek".to_string()].into_iter().collect();
        assert_eq!(result.matched_terms(), &expected);
    }
}

#[tokio::test]
async fn test_search_or_semantics_across_terms() {
    let targets = vec![git_target("t-1", "org/a"), git_target("t-2", "org/b")];
    let mut behaviors = HashMap::new();
    behaviors.insert(
        "t-1".to_string(),
        Behavior::Document(document_with_models(&["mistral-7b"])),
    );
    behaviors.insert(
        "t-2".to_string(),
        Behavior::Document(document_with_models(&["numpy-helper"])),
    );

    let report = use_case(MockApi::new(targets, behaviors))
        .execute(ScanRequest::search(vec![
            "deepseek".to_string(),
            "mistral".to_string(),
        ]))
        .await
        .unwrap();

    assert_eq!(report.summary.matched_targets, 1);
    let matches = report.matches();
    assert_eq!(matches[0].target_name(), "org/a");
    assert!(matches[0].matched_terms().contains("mistral"));
    assert!(!matches[0].matched_terms().contains("deepseek"));
}

#[tokio::test]
async fn test_policy_scan_flags_exact_names_only() {
    let targets = vec![
        git_target("t-1", "org/uses-gpt4"),
        git_target("t-2", "org/uses-gpt4-turbo"),
    ];
    let mut behaviors = HashMap::new();
    behaviors.insert(
        "t-1".to_string(),
        Behavior::Document(document_with_models(&["gpt-4"])),
    );
    behaviors.insert(
        "t-2".to_string(),
        Behavior::Document(document_with_models(&["gpt-4-turbo"])),
    );

    let rejected: BTreeSet<String> = ["gpt-4".to_string()].into_iter().collect();
    let report = use_case(MockApi::new(targets, behaviors))
        .execute(ScanRequest::inventory(Some(rejected)))
        .await
        .unwrap();

    assert_eq!(report.summary.succeeded_targets, 2);
    assert_eq!(report.summary.matched_targets, 1);
    let matches = report.matches();
    assert_eq!(matches[0].target_name(), "org/uses-gpt4");
    assert!(matches[0].matched_terms().contains("gpt-4"));
}

#[tokio::test]
async fn test_inventory_without_policy_matches_nothing() {
    let targets = vec![git_target("t-1", "org/a")];
    let mut behaviors = HashMap::new();
    behaviors.insert(
        "t-1".to_string(),
        Behavior::Document(document_with_models(&["gpt-4"])),
    );

    let report = use_case(MockApi::new(targets, behaviors))
        .execute(ScanRequest::inventory(None))
        .await
        .unwrap();

    assert_eq!(report.summary.succeeded_targets, 1);
    assert_eq!(report.summary.matched_targets, 0);
    // The document itself is still part of the report.
    assert_eq!(report.results.len(), 1);
}

#[tokio::test]
async fn test_failures_are_recorded_and_never_abort_the_run() {
    let targets = vec![
        git_target("t-ok", "org/fine"),
        git_target("t-slow", "org/never-finishes"),
        git_target("t-reject", "org/rejected"),
        git_target("t-err", "org/job-errors"),
        git_target("t-fetch", "org/fetch-fails"),
    ];
    let mut behaviors = HashMap::new();
    behaviors.insert(
        "t-ok".to_string(),
        Behavior::Document(document_with_models(&["deepseek-r1"])),
    );
    behaviors.insert("t-slow".to_string(), Behavior::NeverFinishes);
    behaviors.insert("t-reject".to_string(), Behavior::SubmitFails);
    behaviors.insert("t-err".to_string(), Behavior::JobErrors);
    behaviors.insert("t-fetch".to_string(), Behavior::FetchFails);

    let report = use_case(MockApi::new(targets, behaviors))
        .execute(ScanRequest::search(vec!["deepseek".to_string()]))
        .await
        .unwrap();

    assert_eq!(report.summary.total_targets, 5);
    assert_eq!(report.summary.eligible_targets, 5);
    assert_eq!(report.summary.succeeded_targets, 1);
    assert_eq!(report.summary.matched_targets, 1);
    assert_eq!(report.summary.failed_targets, 4);

    let failure_of = |name: &str| {
        &report
            .failures
            .iter()
            .find(|f| f.target_name == name)
            .unwrap()
            .failure
    };
    assert!(matches!(
        failure_of("org/never-finishes"),
        TargetFailure::PollTimeout { attempts: 3 }
    ));
    assert!(matches!(
        failure_of("org/rejected"),
        TargetFailure::Submission { .. }
    ));
    assert!(matches!(
        failure_of("org/job-errors"),
        TargetFailure::JobErrored { .. }
    ));
    assert!(matches!(
        failure_of("org/fetch-fails"),
        TargetFailure::Fetch { .. }
    ));
}

#[tokio::test]
async fn test_results_are_sorted_by_name_not_arrival() {
    // Mixed-case names exercise the case-insensitive ordering.
    let targets = vec![
        git_target("t-1", "Zeta/repo"),
        git_target("t-2", "alpha/repo"),
        git_target("t-3", "Beta/repo"),
    ];
    let mut behaviors = HashMap::new();
    for id in ["t-1", "t-2", "t-3"] {
        behaviors.insert(
            id.to_string(),
            Behavior::Document(document_with_models(&[])),
        );
    }

    let report = use_case(MockApi::new(targets, behaviors))
        .execute(ScanRequest::inventory(None))
        .await
        .unwrap();

    let names: Vec<&str> = report.results.iter().map(|r| r.target_name()).collect();
    assert_eq!(names, vec!["alpha/repo", "Beta/repo", "Zeta/repo"]);
}

#[tokio::test]
async fn test_empty_organization_yields_empty_report() {
    let report = use_case(MockApi::new(Vec::new(), HashMap::new()))
        .execute(ScanRequest::search(vec!["deepseek".to_string()]))
        .await
        .unwrap();

    assert_eq!(report.summary, ScanSummary::default());
    assert!(report.results.is_empty());
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_completion_is_reported_once_per_run() {
    let targets = vec![git_target("t-1", "org/a"), git_target("t-2", "org/b")];
    let mut behaviors = HashMap::new();
    for id in ["t-1", "t-2"] {
        behaviors.insert(
            id.to_string(),
            Behavior::Document(document_with_models(&[])),
        );
    }

    let reporter = CountingProgressReporter::new();
    let use_case = ScanTargetsUseCase::new(MockApi::new(targets, behaviors), &reporter, fast_tuning());
    use_case
        .execute(ScanRequest::inventory(None))
        .await
        .unwrap();

    assert_eq!(
        reporter
            .completions
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

#[tokio::test]
async fn test_repeated_run_is_deterministic() {
    let build = || {
        let targets = vec![
            git_target("t-1", "org/b"),
            git_target("t-2", "org/a"),
            git_target("t-3", "org/c"),
        ];
        let mut behaviors = HashMap::new();
        behaviors.insert(
            "t-1".to_string(),
            Behavior::Document(document_with_models(&["deepseek-r1"])),
        );
        behaviors.insert(
            "t-2".to_string(),
            Behavior::Document(document_with_models(&["deepseek-coder"])),
        );
        behaviors.insert(
            "t-3".to_string(),
            Behavior::Document(document_with_models(&[])),
        );
        MockApi::new(targets, behaviors)
    };

    let first = use_case(build())
        .execute(ScanRequest::search(vec!["deepseek".to_string()]))
        .await
        .unwrap();
    let second = use_case(build())
        .execute(ScanRequest::search(vec!["deepseek".to_string()]))
        .await
        .unwrap();

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.results, second.results);
}
