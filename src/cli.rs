use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "mdl-dockets",
    version,
    about = "Convert pending MDL docket reports into structured JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Parse(ParseArgs),
    Batch(BatchArgs),
    Index(IndexArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DataPaths {
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub pdf_dir: Option<PathBuf>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl DataPaths {
    pub fn pdf_dir(&self) -> PathBuf {
        self.pdf_dir
            .clone()
            .unwrap_or_else(|| self.data_root.join("pdfs"))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.data_root.join("mdl"))
    }

    pub fn manifest_dir(&self) -> PathBuf {
        self.data_root.join("manifests")
    }
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = InputFormat::Pdf)]
    pub input_format: InputFormat,

    #[arg(long, value_enum, default_value_t = TextLayout::Layout)]
    pub layout: TextLayout,

    #[arg(long, default_value_t = false)]
    pub no_index: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub paths: DataPaths,

    #[arg(long)]
    pub jobs_manifest: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub force: bool,

    #[arg(long, value_enum, default_value_t = InputFormat::Pdf)]
    pub input_format: InputFormat,

    #[arg(long, value_enum, default_value_t = TextLayout::Layout)]
    pub layout: TextLayout,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    #[command(flatten)]
    pub paths: DataPaths,

    #[arg(long = "key")]
    pub keys: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub paths: DataPaths,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    Pdf,
    Text,
}

impl InputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "text",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum TextLayout {
    Layout,
    Raw,
}
