use anyhow::Result;
use tracing::debug;

use super::grammar::DocketGrammar;
use super::normalize::{normalize_district, parse_count};
use crate::model::{DocketRecord, ParseStats};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub current_district: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    NoRecordShape,
    BadCount(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Unattributed,
    HeaderOnly,
    Record(DocketRecord),
    Malformed(MalformedReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResult {
    pub district_header: Option<String>,
    pub outcome: LineOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub records: Vec<DocketRecord>,
    pub stats: ParseStats,
}

pub struct DocketParser {
    grammar: DocketGrammar,
}

impl DocketParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            grammar: DocketGrammar::new()?,
        })
    }

    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> ParsedDocument {
        let mut state = ParseState::default();
        let mut document = ParsedDocument::default();

        for (index, line) in lines.iter().enumerate() {
            let result = self.parse_line(&mut state, line.as_ref());
            let stats = &mut document.stats;
            stats.lines_seen += 1;
            if result.district_header.is_some() {
                stats.district_headers += 1;
            }

            match result.outcome {
                LineOutcome::Blank => stats.blank_lines += 1,
                LineOutcome::HeaderOnly => {}
                LineOutcome::Unattributed => {
                    stats.unattributed_lines += 1;
                    debug!(line_number = index + 1, "dropped line before first district header");
                }
                LineOutcome::Malformed(reason) => {
                    stats.malformed_lines += 1;
                    debug!(line_number = index + 1, reason = ?reason, "dropped malformed line");
                }
                LineOutcome::Record(record) => {
                    if record.pending > record.total {
                        stats.pending_exceeds_total += 1;
                        debug!(
                            line_number = index + 1,
                            mdl = %record.mdl_number,
                            pending = record.pending,
                            total = record.total,
                            "pending count exceeds total"
                        );
                    }
                    stats.records += 1;
                    document.records.push(record);
                }
            }
        }

        document
    }

    pub fn parse_line(&self, state: &mut ParseState, line: &str) -> LineResult {
        let mut body = line.trim_end();
        let mut district_header = None;

        if let Some(header) = self.grammar.match_district(body) {
            state.current_district = Some(header.token.to_string());
            district_header = Some(header.token.to_string());
            body = header.rest;
        }

        let outcome = match state.current_district.as_deref() {
            None if body.trim().is_empty() => LineOutcome::Blank,
            None => LineOutcome::Unattributed,
            Some(_) if body.is_empty() && district_header.is_some() => LineOutcome::HeaderOnly,
            Some(_) if body.trim().is_empty() => LineOutcome::Blank,
            Some(district) => self.extract_record(district, body),
        };

        LineResult {
            district_header,
            outcome,
        }
    }

    fn extract_record(&self, district: &str, body: &str) -> LineOutcome {
        let Some(fields) = self.grammar.match_body(body) else {
            return LineOutcome::Malformed(MalformedReason::NoRecordShape);
        };
        let Some(pending) = parse_count(&fields.pending_raw) else {
            return LineOutcome::Malformed(MalformedReason::BadCount(fields.pending_raw));
        };
        let Some(total) = parse_count(&fields.total_raw) else {
            return LineOutcome::Malformed(MalformedReason::BadCount(fields.total_raw));
        };

        LineOutcome::Record(DocketRecord {
            district: normalize_district(district),
            judge: fields.judge,
            mdl_number: fields.mdl_number,
            title: fields.title,
            pending,
            total,
            mdl_count: pending,
        })
    }
}
