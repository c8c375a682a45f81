use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;

use crate::model::BatchJob;
use crate::util::{file_name_string, list_files_with_extension};

const OUTPUT_EXTENSION: &str = "json";

pub fn load_jobs_manifest(
    manifest_path: &Path,
    pdf_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<BatchJob>> {
    let raw = fs::read(manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let jobs: Vec<BatchJob> = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

    Ok(jobs
        .into_iter()
        .map(|job| BatchJob {
            source: pdf_dir.join(job.source),
            output: output_dir.join(job.output),
        })
        .collect())
}

pub fn discover_jobs(pdf_dir: &Path, output_dir: &Path, extension: &str) -> Result<Vec<BatchJob>> {
    let pattern = Regex::new(r"^Pending_MDL_Dockets_By_District-([A-Za-z]+)-(\d{1,2})-(\d{4})\.")
        .context("failed to compile report filename regex")?;

    let mut dated = Vec::new();
    for path in list_files_with_extension(pdf_dir, extension)? {
        let filename = file_name_string(&path)?;
        match report_date(&filename, &pattern) {
            Some(date) => dated.push((date, path)),
            None => warn!(file = %filename, "filename does not carry a report date, skipping"),
        }
    }

    dated.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    Ok(dated
        .into_iter()
        .map(|(date, source)| BatchJob {
            source,
            output: output_dir.join(format!("{}.{OUTPUT_EXTENSION}", output_key(date))),
        })
        .collect())
}

pub fn report_date(filename: &str, pattern: &Regex) -> Option<NaiveDate> {
    let captures = pattern.captures(filename)?;
    let month = captures.get(1)?.as_str();
    let day = captures.get(2)?.as_str();
    let year = captures.get(3)?.as_str();

    NaiveDate::parse_from_str(&format!("{month} {day} {year}"), "%B %d %Y").ok()
}

pub fn output_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
