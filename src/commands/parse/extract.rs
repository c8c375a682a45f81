use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::cli::{InputFormat, TextLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSource {
    Pdftotext { layout: bool },
    PlainText,
}

impl LineSource {
    pub fn new(format: InputFormat, layout: TextLayout) -> Self {
        match format {
            InputFormat::Pdf => Self::Pdftotext {
                layout: matches!(layout, TextLayout::Layout),
            },
            InputFormat::Text => Self::PlainText,
        }
    }

    pub fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        match self {
            Self::Pdftotext { layout } => {
                let pages = extract_pages_with_pdftotext(path, *layout)?;
                debug!(path = %path.display(), pages = pages.len(), "extracted text layer");
                Ok(pages_to_lines(&pages))
            }
            Self::PlainText => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Ok(raw.lines().map(ToOwned::to_owned).collect())
            }
        }
    }
}

fn extract_pages_with_pdftotext(pdf_path: &Path, layout: bool) -> Result<Vec<String>> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8");
    if layout {
        command.arg("-layout");
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    Ok(split_pages(&raw))
}

pub fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages
}

pub fn pages_to_lines(pages: &[String]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| page.lines())
        .map(ToOwned::to_owned)
        .collect()
}
