mod record_query;
mod report;

pub use record_query::RecordQuery;
pub use report::{ChatCount, Report, TermCount, UserCount};
