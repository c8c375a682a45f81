use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocketRecord {
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Judge")]
    pub judge: String,
    #[serde(rename = "MDL")]
    pub mdl_number: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Pending")]
    pub pending: u64,
    #[serde(rename = "Total")]
    pub total: u64,
    #[serde(rename = "MDL Count")]
    pub mdl_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines_seen: usize,
    pub blank_lines: usize,
    pub district_headers: usize,
    pub records: usize,
    pub unattributed_lines: usize,
    pub malformed_lines: usize,
    pub pending_exceeds_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    OutputExists,
    SourceMissing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome {
    Skipped { reason: SkipReason },
    Success { records: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub source: String,
    pub output: String,
    pub source_sha256: Option<String>,
    pub outcome: JobOutcome,
    pub stats: Option<ParseStats>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchCounts {
    pub job_count: usize,
    pub success_count: usize,
    pub skipped_output_exists_count: usize,
    pub skipped_source_missing_count: usize,
    pub failed_count: usize,
    pub records_written: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchPaths {
    pub source_dir: String,
    pub output_dir: String,
    pub jobs_manifest_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub updated_at: String,
    pub force: bool,
    pub input_format: String,
    pub paths: BatchPaths,
    pub counts: BatchCounts,
    pub jobs: Vec<JobReport>,
}
