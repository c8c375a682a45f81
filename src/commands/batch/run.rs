use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use super::jobs::{discover_jobs, load_jobs_manifest};
use super::plan::{JobPlan, plan_batch};
use crate::cli::BatchArgs;
use crate::commands::index::{self, IndexUpdate};
use crate::commands::parse::{DocketParser, LineSource, parse_document};
use crate::model::{
    BatchCounts, BatchJob, BatchPaths, BatchRunManifest, JobOutcome, JobReport, ParseStats,
    SkipReason,
};
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

pub fn run(args: BatchArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("batch-{}", utc_compact_string(started_ts));

    let pdf_dir = args.paths.pdf_dir();
    let output_dir = args.paths.output_dir();
    let report_path = args.report_path.clone().unwrap_or_else(|| {
        args.paths
            .manifest_dir()
            .join(format!("batch_run_{}.json", utc_compact_string(started_ts)))
    });

    info!(
        pdf_dir = %pdf_dir.display(),
        output_dir = %output_dir.display(),
        force = args.force,
        run_id = %run_id,
        "starting batch"
    );

    let jobs = match &args.jobs_manifest {
        Some(path) => load_jobs_manifest(path, &pdf_dir, &output_dir)?,
        None => discover_jobs(&pdf_dir, &output_dir, args.input_format.extension())?,
    };

    let source = LineSource::new(args.input_format, args.layout);
    let reports = execute_batch(&jobs, source, args.force)?;
    let counts = summarize(&reports);

    let manifest = BatchRunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        updated_at: now_utc_string(),
        force: args.force,
        input_format: args.input_format.as_str().to_string(),
        paths: BatchPaths {
            source_dir: pdf_dir.display().to_string(),
            output_dir: output_dir.display().to_string(),
            jobs_manifest_path: args
                .jobs_manifest
                .as_ref()
                .map(|path| path.display().to_string()),
        },
        counts: counts.clone(),
        jobs: reports,
    };
    write_json_pretty(&report_path, &manifest)?;
    info!(path = %report_path.display(), "wrote batch run report");

    if counts.failed_count > 0 {
        warn!(failed = counts.failed_count, "batch finished with failed jobs");
    }
    info!(
        jobs = counts.job_count,
        parsed = counts.success_count,
        skipped_existing = counts.skipped_output_exists_count,
        skipped_missing = counts.skipped_source_missing_count,
        failed = counts.failed_count,
        records = counts.records_written,
        "batch completed"
    );

    Ok(())
}

pub fn execute_batch(jobs: &[BatchJob], source: LineSource, force: bool) -> Result<Vec<JobReport>> {
    let parser = DocketParser::new()?;

    let existing_sources: HashSet<PathBuf> = jobs
        .iter()
        .filter(|job| job.source.is_file())
        .map(|job| job.source.clone())
        .collect();
    let existing_outputs: HashSet<PathBuf> = jobs
        .iter()
        .filter(|job| job.output.exists())
        .map(|job| job.output.clone())
        .collect();

    let plans = plan_batch(jobs, &existing_sources, &existing_outputs, force);
    let mut written_outputs: HashSet<PathBuf> = HashSet::new();
    let mut reports = Vec::with_capacity(plans.len());

    for plan in plans {
        let report = match plan {
            JobPlan::Run(job) if output_taken(&job, &written_outputs, force) => {
                skip_job(job, SkipReason::OutputExists)
            }
            JobPlan::Run(job) => {
                let report = execute_job(&parser, source, job.clone());
                if matches!(report.outcome, JobOutcome::Success { .. }) {
                    written_outputs.insert(job.output);
                }
                report
            }
            JobPlan::Skip { job, reason } => skip_job(job, reason),
        };
        reports.push(report);
    }

    Ok(reports)
}

fn output_taken(job: &BatchJob, written_outputs: &HashSet<PathBuf>, force: bool) -> bool {
    written_outputs.contains(&job.output) || (!force && job.output.exists())
}

fn skip_job(job: BatchJob, reason: SkipReason) -> JobReport {
    match reason {
        SkipReason::OutputExists => {
            info!(output = %job.output.display(), "output already exists, skipping");
            reconcile_indexes(&job);
        }
        SkipReason::SourceMissing => {
            warn!(source = %job.source.display(), "source not found, skipping");
        }
    }

    JobReport {
        source: job.source.display().to_string(),
        output: job.output.display().to_string(),
        source_sha256: None,
        outcome: JobOutcome::Skipped { reason },
        stats: None,
    }
}

fn reconcile_indexes(job: &BatchJob) {
    let update = match index::record_output(&job.output) {
        Ok(update) => update,
        Err(err) => {
            let reason = format!("{err:#}");
            warn!(output = %job.output.display(), error = %reason, "failed to index existing output");
            return;
        }
    };

    if update == IndexUpdate::AlreadyPresent {
        return;
    }

    info!(output = %job.output.display(), "indexed existing output");
    if !job.source.is_file() {
        return;
    }
    if let Err(err) = index::record_source(&job.source) {
        let reason = format!("{err:#}");
        warn!(source = %job.source.display(), error = %reason, "failed to index source");
    }
}

fn execute_job(parser: &DocketParser, source: LineSource, job: BatchJob) -> JobReport {
    info!(
        source = %job.source.display(),
        output = %job.output.display(),
        "parsing report"
    );

    let source_sha256 = sha256_file(&job.source).ok();
    let (outcome, stats) = match run_pipeline(parser, source, &job) {
        Ok(stats) => {
            info!(records = stats.records, output = %job.output.display(), "parsed report");
            (JobOutcome::Success { records: stats.records }, Some(stats))
        }
        Err(err) => {
            let reason = format!("{err:#}");
            warn!(source = %job.source.display(), error = %reason, "job failed");
            (JobOutcome::Failed { reason }, None)
        }
    };

    JobReport {
        source: job.source.display().to_string(),
        output: job.output.display().to_string(),
        source_sha256,
        outcome,
        stats,
    }
}

fn run_pipeline(parser: &DocketParser, source: LineSource, job: &BatchJob) -> Result<ParseStats> {
    let stats = parse_document(parser, source, &job.source, &job.output)?;
    index::record_output(&job.output)?;
    index::record_source(&job.source)?;
    Ok(stats)
}

pub fn summarize(reports: &[JobReport]) -> BatchCounts {
    let mut counts = BatchCounts {
        job_count: reports.len(),
        ..BatchCounts::default()
    };

    for report in reports {
        match &report.outcome {
            JobOutcome::Success { records } => {
                counts.success_count += 1;
                counts.records_written += records;
            }
            JobOutcome::Skipped {
                reason: SkipReason::OutputExists,
            } => counts.skipped_output_exists_count += 1,
            JobOutcome::Skipped {
                reason: SkipReason::SourceMissing,
            } => counts.skipped_source_missing_count += 1,
            JobOutcome::Failed { .. } => counts.failed_count += 1,
        }
    }

    counts
}
