use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};

use crate::application::dto::{FailedTarget, ScanMode, ScanReport, ScanRequest};
use crate::config::ScanTuning;
use crate::ports::outbound::{AibomApi, ProgressReporter};
use crate::scanning::domain::{
    JobState, ScanResult, ScanSummary, Target, TargetFailure, TargetOutcome,
};
use crate::scanning::services::{extract_components, match_keywords, match_policy};
use crate::shared::Result;

/// ScanTargetsUseCase - Core use case for auditing an organization
///
/// Enumerates all targets, runs one generation-job pipeline per eligible
/// target under bounded concurrency, and folds the outcomes into a
/// deterministic report.
///
/// # Type Parameters
/// * `API` - AibomApi implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanTargetsUseCase<API, PR> {
    api: API,
    progress_reporter: PR,
    tuning: ScanTuning,
}

impl<API, PR> ScanTargetsUseCase<API, PR>
where
    API: AibomApi,
    PR: ProgressReporter,
{
    /// Creates a new ScanTargetsUseCase with injected dependencies
    pub fn new(api: API, progress_reporter: PR, tuning: ScanTuning) -> Self {
        Self {
            api,
            progress_reporter,
            tuning,
        }
    }

    /// Executes the scan.
    ///
    /// # Arguments
    /// * `request` - Matching mode for the run
    ///
    /// # Returns
    /// A ScanReport with per-target results in name-sorted order. Failures
    /// scoped to a single target are recorded in the report and never
    /// abort the run; only enumeration-level errors propagate.
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanReport> {
        // Step 1: Enumerate all targets (pre-filter count is final).
        let all_targets = self.api.list_targets().await?;
        let total_targets = all_targets.len();
        if total_targets == 0 {
            return Ok(ScanReport {
                summary: ScanSummary::default(),
                results: Vec::new(),
                failures: Vec::new(),
            });
        }
        self.progress_reporter.report(&format!(
            "🎯 Found {} total targets in the organization.",
            total_targets
        ));

        // Step 2: Filter to git-hosted targets. Expected and non-exceptional,
        // so skips are visible only at debug verbosity.
        let (eligible, skipped): (Vec<Target>, Vec<Target>) =
            all_targets.into_iter().partition(Target::is_eligible);
        for target in &skipped {
            self.progress_reporter.report_debug(&format!(
                "Skipping Target: {} (Integration: {})",
                target.display_name(),
                target.repo_type()
            ));
        }

        let eligible_count = eligible.len();
        self.progress_reporter.report(&format!(
            "📊 Processing {} supported targets...",
            eligible_count
        ));

        // Step 3: One job pipeline per target, at most `max_concurrency`
        // in flight. A slow or failing target never blocks the others.
        let completed = AtomicUsize::new(0);
        let mut outcomes: Vec<TargetOutcome> = stream::iter(eligible)
            .map(|target| {
                let completed = &completed;
                async move {
                    let outcome = self.process_target(target).await;
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    self.progress_reporter.report_progress(
                        done,
                        eligible_count,
                        Some(outcome.target.display_name()),
                    );
                    outcome
                }
            })
            .buffer_unordered(self.tuning.max_concurrency.max(1))
            .collect()
            .await;

        // Closes out the progress display before the report is printed.
        self.progress_reporter.report_completion(&format!(
            "🏁 Finished processing {} targets.",
            eligible_count
        ));

        // Step 4: Arrival order depends on network timing and must not
        // leak into output.
        outcomes.sort_by(|a, b| outcome_sort_key(a).cmp(&outcome_sort_key(b)));

        // Step 5: Match and aggregate.
        let mut results = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            let target_name = outcome.target.display_name().to_string();
            match outcome.document {
                Ok(document) => {
                    let components = extract_components(&document);
                    self.progress_reporter.report(&format!(
                        "  ✅ {}: {} AI components",
                        target_name,
                        components.len()
                    ));

                    let matched = match &request.mode {
                        ScanMode::Search { terms } => match_keywords(&document, terms),
                        ScanMode::Inventory {
                            rejected_models: Some(rejected),
                        } => match_policy(&components, rejected),
                        ScanMode::Inventory {
                            rejected_models: None,
                        } => BTreeSet::new(),
                    };

                    if !matched.is_empty() {
                        if let ScanMode::Search { .. } = request.mode {
                            self.progress_reporter
                                .report(&format!("  ✅ FOUND match in {}!", target_name));
                        }
                    }

                    results.push(ScanResult::new(target_name, matched, document));
                }
                Err(failure) => {
                    self.progress_reporter
                        .report_error(&format!("  ❌ Error scanning {}", target_name));
                    self.progress_reporter
                        .report_debug(&format!("  > {}: {}", target_name, failure));
                    failures.push(FailedTarget {
                        target_name,
                        failure,
                    });
                }
            }
        }

        let matched_targets = results.iter().filter(|r| r.has_matches()).count();
        let summary = ScanSummary {
            total_targets,
            eligible_targets: eligible_count,
            succeeded_targets: results.len(),
            matched_targets,
            failed_targets: failures.len(),
        };

        Ok(ScanReport {
            summary,
            results,
            failures,
        })
    }

    /// Runs one target's pipeline: submit, poll to a terminal state under
    /// the attempt budget, then fetch the document.
    ///
    /// Every failure is folded into the outcome; this function never
    /// returns an error, so one target can never abort the run.
    async fn process_target(&self, target: Target) -> TargetOutcome {
        self.progress_reporter.report_debug(&format!(
            "Processing Target: {} ({})",
            target.display_name(),
            target.id()
        ));

        let job = match self.api.submit_job(&target).await {
            Ok(job) => job,
            Err(e) => {
                return TargetOutcome {
                    target,
                    document: Err(TargetFailure::Submission {
                        details: e.to_string(),
                    }),
                }
            }
        };
        self.progress_reporter.report_debug(&format!(
            "  > Job created for {}. Initial status: {:?}",
            target.display_name(),
            job.initial_status
        ));

        let mut state = job.initial_status.clone();
        let mut delay = self.tuning.poll_initial_delay;
        let mut attempts = 0u32;

        while !state.is_terminal() {
            if attempts >= self.tuning.max_poll_attempts {
                // The job keeps running server-side; we only stop waiting.
                return TargetOutcome {
                    target,
                    document: Err(TargetFailure::PollTimeout { attempts }),
                };
            }
            attempts += 1;

            tokio::time::sleep(delay).await;
            delay = self.tuning.next_delay(delay);

            state = match self.api.job_status(&job).await {
                Ok(next) => {
                    self.progress_reporter.report_debug(&format!(
                        "  > Polling {}... status is now: {:?}",
                        target.display_name(),
                        next
                    ));
                    next
                }
                Err(e) => {
                    return TargetOutcome {
                        target,
                        document: Err(TargetFailure::JobErrored {
                            details: format!("status poll failed: {}", e),
                        }),
                    }
                }
            };
        }

        if let JobState::Errored { details } = state {
            return TargetOutcome {
                target,
                document: Err(TargetFailure::JobErrored { details }),
            };
        }

        // A fetch failure after `finished` is a data-integrity problem,
        // distinct from a timeout.
        match self.api.fetch_document(&job).await {
            Ok(document) => TargetOutcome {
                target,
                document: Ok(document),
            },
            Err(e) => TargetOutcome {
                target,
                document: Err(TargetFailure::Fetch {
                    details: e.to_string(),
                }),
            },
        }
    }
}

fn outcome_sort_key(outcome: &TargetOutcome) -> (String, String, String) {
    (
        outcome.target.display_name().to_lowercase(),
        outcome.target.display_name().to_string(),
        outcome.target.id().to_string(),
    )
}
