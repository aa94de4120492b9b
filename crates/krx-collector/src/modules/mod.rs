//! 데이터 수집 모듈.

pub mod collect;
pub mod retry;

pub use collect::{collect_snapshot, normalize_snapshot, render_json, CollectTarget};
pub use retry::{run_with_retry, RetryPolicy};
