use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;

use super::{DocketParser, LineSource};
use crate::cli::ParseArgs;
use crate::commands::index;
use crate::model::ParseStats;
use crate::util::write_json_pretty;

pub fn run(args: ParseArgs) -> Result<()> {
    if !args.input.is_file() {
        bail!("input document not found: {}", args.input.display());
    }

    let parser = DocketParser::new()?;
    let source = LineSource::new(args.input_format, args.layout);
    let stats = parse_document(&parser, source, &args.input, &args.output)?;

    info!(
        path = %args.output.display(),
        records = stats.records,
        district_headers = stats.district_headers,
        malformed_lines = stats.malformed_lines,
        unattributed_lines = stats.unattributed_lines,
        "wrote docket records"
    );

    if !args.no_index {
        index::record_output(&args.output)?;
        index::record_source(&args.input)?;
    }

    Ok(())
}

pub fn parse_document(
    parser: &DocketParser,
    source: LineSource,
    input: &Path,
    output: &Path,
) -> Result<ParseStats> {
    let lines = source.read_lines(input)?;
    let document = parser.parse_lines(&lines);
    write_json_pretty(output, &document.records)?;
    Ok(document.stats)
}
