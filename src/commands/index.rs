use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::IndexArgs;
use crate::util::{file_name_string, file_stem_string, list_files_with_extension, write_json_pretty};

pub const INDEX_FILE_NAME: &str = "index.json";

const SOURCE_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexUpdate {
    Added,
    AlreadyPresent,
}

pub fn run(args: IndexArgs) -> Result<()> {
    let output_index = args.paths.output_dir().join(INDEX_FILE_NAME);

    if !args.keys.is_empty() {
        for key in &args.keys {
            let update = record_key(&output_index, key)?;
            info!(key = %key, update = ?update, "recorded index key");
        }
        return Ok(());
    }

    let output_keys = output_keys_on_disk(&args.paths.output_dir())?;
    let added = record_keys(&output_index, &output_keys)?;
    info!(
        path = %output_index.display(),
        on_disk = output_keys.len(),
        added,
        "synced output index"
    );

    let pdf_dir = args.paths.pdf_dir();
    let source_index = pdf_dir.join(INDEX_FILE_NAME);
    let source_names = source_names_on_disk(&pdf_dir)?;
    let added = record_keys(&source_index, &source_names)?;
    info!(
        path = %source_index.display(),
        on_disk = source_names.len(),
        added,
        "synced source index"
    );

    Ok(())
}

pub fn load_index(index_path: &Path) -> Result<Vec<String>> {
    if !index_path.exists() {
        return Ok(Vec::new());
    }

    let raw = fs::read(index_path)
        .with_context(|| format!("failed to read {}", index_path.display()))?;
    let keys: Vec<String> = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", index_path.display()))?;

    Ok(keys)
}

pub fn record_key(index_path: &Path, key: &str) -> Result<IndexUpdate> {
    let added = record_keys(index_path, &[key.to_string()])?;
    Ok(if added > 0 {
        IndexUpdate::Added
    } else {
        IndexUpdate::AlreadyPresent
    })
}

pub fn record_keys(index_path: &Path, keys: &[String]) -> Result<usize> {
    let mut index = load_index(index_path)?;
    let before = index.len();

    for key in keys {
        if !index.contains(key) {
            index.push(key.clone());
        }
    }

    let added = index.len() - before;
    if added == 0 {
        return Ok(0);
    }

    index.sort();
    index.dedup();
    write_json_pretty(index_path, &index)?;
    info!(
        path = %index_path.display(),
        added,
        total = index.len(),
        "updated index"
    );

    Ok(added)
}

pub fn record_output(output_path: &Path) -> Result<IndexUpdate> {
    let key = file_stem_string(output_path)?;
    record_key(&sibling_index_path(output_path), &key)
}

pub fn record_source(source_path: &Path) -> Result<IndexUpdate> {
    let key = file_name_string(source_path)?;
    record_key(&sibling_index_path(source_path), &key)
}

pub fn sibling_index_path(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(INDEX_FILE_NAME),
        None => PathBuf::from(INDEX_FILE_NAME),
    }
}

pub fn output_keys_on_disk(output_dir: &Path) -> Result<Vec<String>> {
    if !output_dir.is_dir() {
        return Ok(Vec::new());
    }

    list_files_with_extension(output_dir, "json")?
        .iter()
        .filter(|path| !is_index_file(path))
        .map(|path| file_stem_string(path))
        .collect()
}

pub fn source_names_on_disk(pdf_dir: &Path) -> Result<Vec<String>> {
    if !pdf_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for extension in SOURCE_EXTENSIONS {
        for path in list_files_with_extension(pdf_dir, extension)? {
            names.push(file_name_string(&path)?);
        }
    }
    names.sort();
    Ok(names)
}

fn is_index_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name == INDEX_FILE_NAME)
        .unwrap_or(false)
}
