pub mod cli;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod rss;

pub use error::{AppError, FetchError};
pub use rss::Entry;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_OUTPUT: &str = "output";
