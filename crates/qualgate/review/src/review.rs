//! The review record: one iteration of one unit of work.
//!
//! Created once per iteration and mutated by repeated merges within that
//! iteration. A new iteration gets a new record via [`Review::next_iteration`].
//!
//! Totals and verdict are always recomputed by a full rescan of `findings`
//! rather than updated incrementally. `carry_forward_worker` does not
//! rescan, so an iteration must end with [`Review::finalize`].

use std::collections::{BTreeMap, BTreeSet};

use qualgate_types::{validate, SchemaVersion, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ReviewError, ReviewResult};
use crate::finding::{ReviewVerdict, WorkerResult};
use crate::patch::{generate_ranked_patches, RankedPatch};

/// Aggregate root for one review iteration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub schema: SchemaVersion,
    pub story_id: String,
    pub iteration: u32,
    pub timestamp: Timestamp,
    pub verdict: ReviewVerdict,
    #[serde(default)]
    pub workers_run: Vec<String>,
    #[serde(default)]
    pub workers_skipped: Vec<String>,
    #[serde(default)]
    pub ranked_patches: Vec<RankedPatch>,
    #[serde(default)]
    pub findings: BTreeMap<String, WorkerResult>,
    #[serde(default)]
    pub total_errors: u32,
    #[serde(default)]
    pub total_warnings: u32,
    #[serde(default)]
    pub auto_fixable_count: u32,
}

impl Review {
    /// Start a review iteration. With no workers recorded the verdict is a
    /// vacuous PASS.
    pub fn new(story_id: impl Into<String>, iteration: u32) -> ReviewResult<Self> {
        let story_id = story_id.into();
        validate::non_empty("story_id", &story_id)?;
        if iteration == 0 {
            return Err(ReviewError::InvalidIteration(iteration));
        }
        Ok(Self {
            schema: SchemaVersion::V1,
            story_id,
            iteration,
            timestamp: qualgate_types::now(),
            verdict: ReviewVerdict::Pass,
            workers_run: vec![],
            workers_skipped: vec![],
            ranked_patches: vec![],
            findings: BTreeMap::new(),
            total_errors: 0,
            total_warnings: 0,
            auto_fixable_count: 0,
        })
    }

    /// First iteration for a story.
    pub fn first(story_id: impl Into<String>) -> ReviewResult<Self> {
        Self::new(story_id, 1)
    }

    /// Fresh record for the following iteration of the same story.
    pub fn next_iteration(&self) -> ReviewResult<Self> {
        let iteration = self
            .iteration
            .checked_add(1)
            .ok_or(ReviewError::IterationOverflow(self.iteration))?;
        Ok(Self {
            schema: SchemaVersion::V1,
            story_id: self.story_id.clone(),
            iteration,
            timestamp: qualgate_types::now(),
            verdict: ReviewVerdict::Pass,
            workers_run: vec![],
            workers_skipped: vec![],
            ranked_patches: vec![],
            findings: BTreeMap::new(),
            total_errors: 0,
            total_warnings: 0,
            auto_fixable_count: 0,
        })
    }

    /// Record a worker's fresh result and rescan totals and verdict.
    ///
    /// Overwrites any earlier entry for the same worker, including one that
    /// was carried forward.
    pub fn add_worker_result(
        &mut self,
        worker: impl Into<String>,
        result: WorkerResult,
    ) -> ReviewResult<()> {
        let worker = worker.into();
        validate_worker_name(&worker)?;

        debug!(
            story_id = %self.story_id,
            iteration = self.iteration,
            worker = %worker,
            verdict = %result.verdict,
            errors = result.errors,
            warnings = result.warnings,
            "Merging worker result"
        );

        self.workers_skipped.retain(|w| w != &worker);
        if !self.workers_run.contains(&worker) {
            self.workers_run.push(worker.clone());
        }
        self.findings.insert(worker, result);
        self.recompute_totals();
        Ok(())
    }

    /// Reuse a worker's result from a prior iteration, marked `skipped`.
    ///
    /// Does not rescan totals or verdict. Applying it twice leaves the
    /// record unchanged apart from the timestamp.
    pub fn carry_forward_worker(
        &mut self,
        worker: impl Into<String>,
        previous: &WorkerResult,
    ) -> ReviewResult<()> {
        let worker = worker.into();
        validate_worker_name(&worker)?;

        debug!(
            story_id = %self.story_id,
            iteration = self.iteration,
            worker = %worker,
            "Carrying forward worker result"
        );

        self.workers_run.retain(|w| w != &worker);
        if !self.workers_skipped.contains(&worker) {
            self.workers_skipped.push(worker.clone());
        }
        self.findings.insert(worker, previous.carried_forward());
        self.timestamp = qualgate_types::now();
        Ok(())
    }

    /// Full rescan of `findings`: totals, auto-fixable count and verdict.
    ///
    /// Totals saturate at `u32::MAX`.
    pub fn recompute_totals(&mut self) {
        self.total_errors = saturating_total(self.findings.values().map(|r| r.errors));
        self.total_warnings = saturating_total(self.findings.values().map(|r| r.warnings));
        self.auto_fixable_count = saturating_total(
            self.findings
                .values()
                .map(WorkerResult::auto_fixable_count),
        );
        self.verdict = if self.findings.values().any(WorkerResult::is_fail) {
            ReviewVerdict::Fail
        } else {
            ReviewVerdict::Pass
        };
        self.timestamp = qualgate_types::now();
    }

    /// Close the iteration: rescan totals, then rebuild the ranked patches.
    pub fn finalize(&mut self) {
        self.recompute_totals();
        self.ranked_patches = generate_ranked_patches(self);

        info!(
            story_id = %self.story_id,
            iteration = self.iteration,
            verdict = %self.verdict,
            workers_run = self.workers_run.len(),
            workers_skipped = self.workers_skipped.len(),
            total_errors = self.total_errors,
            total_warnings = self.total_warnings,
            patches = self.ranked_patches.len(),
            "Review iteration finalized"
        );
    }

    /// Worker results in recording order: fresh runs first, then
    /// carried-forward ones.
    pub fn ordered_results(&self) -> impl Iterator<Item = (&str, &WorkerResult)> {
        self.workers_run
            .iter()
            .chain(self.workers_skipped.iter())
            .filter_map(move |w| self.findings.get(w).map(|r| (w.as_str(), r)))
    }

    /// Names of workers whose current result is FAIL.
    pub fn failed_workers(&self) -> Vec<&str> {
        self.ordered_results()
            .filter(|(_, r)| r.is_fail())
            .map(|(w, _)| w)
            .collect()
    }

    pub fn is_pass(&self) -> bool {
        self.verdict == ReviewVerdict::Pass
    }

    /// Patches an automated fixer can apply without a human.
    pub fn auto_fixable_patches(&self) -> impl Iterator<Item = &RankedPatch> {
        self.ranked_patches.iter().filter(|p| p.auto_fixable)
    }

    /// Check field constraints and worker bookkeeping.
    pub fn validate(&self) -> ReviewResult<()> {
        validate::non_empty("story_id", &self.story_id)?;
        if self.iteration == 0 {
            return Err(ReviewError::InvalidIteration(self.iteration));
        }

        let run: BTreeSet<&str> = self.workers_run.iter().map(String::as_str).collect();
        let skipped: BTreeSet<&str> = self.workers_skipped.iter().map(String::as_str).collect();
        if let Some(both) = run.intersection(&skipped).next() {
            return Err(ReviewError::WorkerSetMismatch(format!(
                "worker '{both}' is both run and skipped"
            )));
        }
        let recorded: BTreeSet<&str> = run.union(&skipped).copied().collect();
        let keys: BTreeSet<&str> = self.findings.keys().map(String::as_str).collect();
        if recorded != keys {
            return Err(ReviewError::WorkerSetMismatch(format!(
                "{} worker(s) recorded, {} result(s) present",
                recorded.len(),
                keys.len()
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> ReviewResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a persisted review.
    pub fn from_json(json: &str) -> ReviewResult<Self> {
        let review: Review = serde_json::from_str(json)?;
        review.validate()?;
        Ok(review)
    }
}

fn validate_worker_name(worker: &str) -> ReviewResult<()> {
    if worker.trim().is_empty() {
        return Err(ReviewError::EmptyWorkerName);
    }
    Ok(())
}

fn saturating_total(counts: impl Iterator<Item = u32>) -> u32 {
    counts.fold(0, u32::saturating_add)
}
