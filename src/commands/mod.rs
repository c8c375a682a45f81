pub mod batch;
pub mod index;
pub mod parse;
pub mod status;
