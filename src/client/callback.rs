//! Node-style completion handler adapter
//!
//! Client operations are plain futures. Callers that prefer a completion
//! handler wrap an operation with [`deliver`], which settles the future
//! and invokes the handler with `(error, value)` in node style. The error
//! is consumed by the handler; it does not propagate past the call.

use std::future::Future;

use crate::error::{Error, Result};

/// Await `operation` and hand its settlement to `handler`.
///
/// On success the handler is invoked with `(None, Some(&value))` and the
/// value is returned. On failure it is invoked with `(Some(&error), None)`
/// and `None` is returned; both paths observe the same outcome the future
/// settled with.
pub async fn deliver<T, F, H>(operation: F, handler: H) -> Option<T>
where
    F: Future<Output = Result<T>>,
    H: FnOnce(Option<&Error>, Option<&T>),
{
    match operation.await {
        Ok(value) => {
            handler(None, Some(&value));
            Some(value)
        }
        Err(err) => {
            handler(Some(&err), None);
            None
        }
    }
}
