use anyhow::{Context, Result};
use regex::Regex;

const MDL_PREFIX: &str = "MDL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBody {
    pub judge: String,
    pub mdl_number: String,
    pub title: String,
    pub pending_raw: String,
    pub total_raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictHeader<'a> {
    pub token: &'a str,
    pub rest: &'a str,
}

pub struct DocketGrammar {
    district_header: Regex,
    record_body: Regex,
}

impl DocketGrammar {
    pub fn new() -> Result<Self> {
        Ok(Self {
            district_header: Regex::new(r"^([A-Z]{2,4})\b")
                .context("failed to compile district header regex")?,
            record_body: Regex::new(
                r"^(.*?)MDL\s*[-–—]?\s*(\d+)\s+(.+?)\s+([\d,]+)\s+([\d,]+)$",
            )
            .context("failed to compile record body regex")?,
        })
    }

    pub fn match_district<'a>(&self, line: &'a str) -> Option<DistrictHeader<'a>> {
        let captures = self.district_header.captures(line)?;
        let token = captures.get(1)?;
        Some(DistrictHeader {
            token: token.as_str(),
            rest: line[token.end()..].trim_start(),
        })
    }

    pub fn match_body(&self, line: &str) -> Option<RecordBody> {
        let captures = self.record_body.captures(line)?;
        let field = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str())
                .unwrap_or_default()
        };

        Some(RecordBody {
            judge: field(1).trim().to_string(),
            mdl_number: format!("{MDL_PREFIX}-{}", field(2)),
            title: field(3).trim().to_string(),
            pending_raw: field(4).to_string(),
            total_raw: field(5).to_string(),
        })
    }
}
