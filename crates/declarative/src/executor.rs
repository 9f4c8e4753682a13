//! Execution engine - reconciles a catalog, optionally in parallel

use crate::context::{Applier, CollectingReporter, Reporter, StateFetcher};
use crate::diff::{Delta, DiffSummary};
use crate::error::Error;
use crate::planner::{Catalog, ResourceRequest};
use crate::reconciler::{Phase, ReconcileOutcome, Reconciler};
use crate::report::Event;
use crate::resource::ProviderRegistry;
use crate::types::{ApplyResult, ExecuteOptions, ExecuteSummary};
use rayon::prelude::*;
use serde::Serialize;

/// Everything a run produced, in catalog order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecuteReport {
    pub outcomes: Vec<ReconcileOutcome>,
    pub summary: ExecuteSummary,
}

impl ExecuteReport {
    fn from_outcomes(outcomes: Vec<ReconcileOutcome>) -> Self {
        let mut summary = ExecuteSummary::default();
        for outcome in &outcomes {
            summary.add_result(&outcome.result);
        }
        Self { outcomes, summary }
    }

    pub fn is_success(&self) -> bool {
        self.summary.is_success()
    }

    pub fn diff_summary(&self) -> DiffSummary {
        DiffSummary::from_deltas(self.outcomes.iter().map(|o| &o.delta))
    }
}

/// Reconcile every resource in `catalog`.
///
/// A failing resource never stops the run. With `opts.jobs > 1` resources
/// are reconciled on a rayon pool; events are buffered per resource and
/// replayed into `reporter` in catalog order once the pool finishes.
pub fn execute(
    catalog: &Catalog,
    registry: &ProviderRegistry,
    fetcher: &dyn StateFetcher,
    applier: &dyn Applier,
    opts: &ExecuteOptions,
    reporter: &mut dyn Reporter,
) -> ExecuteReport {
    if catalog.is_empty() {
        return ExecuteReport::default();
    }

    let reconciler = Reconciler::from_options(opts);
    log::debug!(
        "reconciling {} resource(s) with strict={} jobs={}",
        catalog.len(),
        reconciler.strict(),
        opts.jobs
    );

    let outcomes = if opts.jobs <= 1 || catalog.len() == 1 {
        catalog
            .iter()
            .map(|request| reconcile_one(&reconciler, registry, fetcher, applier, request, reporter))
            .collect()
    } else {
        execute_parallel(&reconciler, catalog, registry, fetcher, applier, opts.jobs, reporter)
    };

    ExecuteReport::from_outcomes(outcomes)
}

fn execute_parallel(
    reconciler: &Reconciler,
    catalog: &Catalog,
    registry: &ProviderRegistry,
    fetcher: &dyn StateFetcher,
    applier: &dyn Applier,
    jobs: usize,
    reporter: &mut dyn Reporter,
) -> Vec<ReconcileOutcome> {
    let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("Failed to create thread pool, running sequentially: {e}");
            return catalog
                .iter()
                .map(|request| {
                    reconcile_one(reconciler, registry, fetcher, applier, request, reporter)
                })
                .collect();
        }
    };

    // Reporters are not shared across threads; each resource buffers its own
    let results: Vec<(ReconcileOutcome, CollectingReporter)> = pool.install(|| {
        catalog
            .resources
            .par_iter()
            .map(|request| {
                let mut buffer = CollectingReporter::new();
                let outcome =
                    reconcile_one(reconciler, registry, fetcher, applier, request, &mut buffer);
                (outcome, buffer)
            })
            .collect()
    });

    results
        .into_iter()
        .map(|(outcome, buffer)| {
            buffer.replay(reporter);
            outcome
        })
        .collect()
}

fn reconcile_one(
    reconciler: &Reconciler,
    registry: &ProviderRegistry,
    fetcher: &dyn StateFetcher,
    applier: &dyn Applier,
    request: &ResourceRequest,
    reporter: &mut dyn Reporter,
) -> ReconcileOutcome {
    match registry.require(&request.resource_type) {
        Ok(provider) => reconciler.reconcile(provider, fetcher, applier, request, reporter),
        Err(e) => unknown_type(request, &e, reporter),
    }
}

fn unknown_type(
    request: &ResourceRequest,
    error: &Error,
    reporter: &mut dyn Reporter,
) -> ReconcileOutcome {
    reporter.report(&Event::Failed {
        resource_type: request.resource_type.clone(),
        resource_id: request.id.to_string(),
        message: error.to_string(),
    });
    ReconcileOutcome {
        resource_type: request.resource_type.clone(),
        resource_id: request.id.to_string(),
        phase: Phase::Reported,
        result: ApplyResult::Failed {
            error: error.to_string(),
        },
        delta: Delta::default(),
    }
}
