pub mod client;
pub mod error;
pub mod extract;
pub mod types;

mod rate_limit;

pub use client::RenderClient;
pub use error::{ExtractError, FetchError};
pub use extract::extract_report;
pub use types::{RawPage, ReportText};
