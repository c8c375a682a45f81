mod jobs;
mod plan;
mod run;

pub use run::run;

#[cfg(test)]
use jobs::*;
#[cfg(test)]
use plan::*;
#[cfg(test)]
use run::*;
