pub mod judge;
pub mod task;

pub use judge::{ApiType, JudgeConfig, RetryPolicy};
pub use task::{TaskConfig, TaskMetadata};
