mod types;
mod utils;

pub use types::{BackoffPolicy, RetryConfig};
pub use utils::calculate_delay;
