//! Task-local trace id for the request currently being served.
//!
//! `RequestTrace` establishes the scope; error rendering and log lines read it
//! back with [`trace_id`]. Outside a request scope the id is `"unknown"`.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
        .unwrap_or_else(|| "unknown".to_string())
}

/// Run `future` with `trace_id` visible to [`trace_id()`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_outside_a_request() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn scoped_id_is_visible_and_restored() {
        let seen = with_trace_id("req-42".to_string(), async { trace_id() }).await;
        assert_eq!(seen, "req-42");
        assert_eq!(trace_id(), "unknown");
    }
}
