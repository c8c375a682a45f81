use std::collections::HashSet;
use std::path::PathBuf;

use crate::model::{BatchJob, SkipReason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPlan {
    Run(BatchJob),
    Skip { job: BatchJob, reason: SkipReason },
}

pub fn plan_batch(
    jobs: &[BatchJob],
    existing_sources: &HashSet<PathBuf>,
    existing_outputs: &HashSet<PathBuf>,
    force: bool,
) -> Vec<JobPlan> {
    jobs.iter()
        .map(|job| {
            if !force && existing_outputs.contains(&job.output) {
                JobPlan::Skip {
                    job: job.clone(),
                    reason: SkipReason::OutputExists,
                }
            } else if !existing_sources.contains(&job.source) {
                JobPlan::Skip {
                    job: job.clone(),
                    reason: SkipReason::SourceMissing,
                }
            } else {
                JobPlan::Run(job.clone())
            }
        })
        .collect()
}
