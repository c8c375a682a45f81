mod extract;
mod grammar;
mod line_parser;
mod normalize;
mod run;
#[cfg(test)]
mod tests;

pub use extract::LineSource;
pub use line_parser::DocketParser;
pub use run::{parse_document, run};

#[cfg(test)]
use extract::*;
#[cfg(test)]
use line_parser::*;
#[cfg(test)]
use normalize::*;
