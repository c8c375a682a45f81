use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::index::{
    INDEX_FILE_NAME, load_index, output_keys_on_disk, source_names_on_disk,
};

pub fn run(args: StatusArgs) -> Result<()> {
    let output_dir = args.paths.output_dir();
    let pdf_dir = args.paths.pdf_dir();

    info!(data_root = %args.paths.data_root.display(), "status requested");

    let output_index_path = output_dir.join(INDEX_FILE_NAME);
    if output_index_path.exists() {
        let index = load_index(&output_index_path)?;
        let on_disk = output_keys_on_disk(&output_dir)?;
        let unindexed = missing_from_index(&index, &on_disk);

        info!(
            path = %output_index_path.display(),
            entries = index.len(),
            outputs_on_disk = on_disk.len(),
            latest = %index.last().cloned().unwrap_or_default(),
            "loaded output index"
        );
        if !unindexed.is_empty() {
            warn!(
                count = unindexed.len(),
                keys = %unindexed.join(","),
                "outputs on disk missing from index; run `index` to sync"
            );
        }
    } else {
        warn!(path = %output_index_path.display(), "output index missing");
    }

    let source_index_path = pdf_dir.join(INDEX_FILE_NAME);
    if source_index_path.exists() {
        let index = load_index(&source_index_path)?;
        let on_disk = source_names_on_disk(&pdf_dir)?;
        let unprocessed = missing_from_index(&index, &on_disk);

        info!(
            path = %source_index_path.display(),
            entries = index.len(),
            sources_on_disk = on_disk.len(),
            unprocessed = unprocessed.len(),
            "loaded source index"
        );
    } else {
        warn!(path = %source_index_path.display(), "source index missing");
    }

    Ok(())
}

fn missing_from_index(index: &[String], on_disk: &[String]) -> Vec<String> {
    on_disk
        .iter()
        .filter(|key| !index.contains(*key))
        .cloned()
        .collect()
}
