mod paginator;
mod source;

pub use paginator::{ContinuationOutcome, LoadState, Paginator};
pub use source::{HttpPageSource, PageRequest, PageSource};
