//! Deferred schema references

use super::types::LazySchema;
use super::Schema;

/// A schema resolved on first use, enabling two element schemas to
/// reference each other without evaluating either at definition time.
///
/// The thunk is invoked at most once; the result is cached and delegated
/// to directly on every subsequent use. It must be side-effect-free and
/// idempotent. A panic inside the thunk is a schema configuration bug and
/// propagates as a panic rather than a validation failure.
///
/// ```
/// use arbor_validation::schema::{define, lazy, string, Schema};
///
/// fn item() -> Schema {
///     define("Item")
///         .property("label", string())
///         .property("child", lazy(group))
///         .build()
///         .unwrap()
/// }
///
/// fn group() -> Schema {
///     define("Group")
///         .property("child", lazy(item))
///         .build()
///         .unwrap()
/// }
///
/// // Neither schema evaluates the other until a tree is validated.
/// let _schema = item();
/// ```
pub fn lazy<F>(thunk: F) -> Schema
where
    F: Fn() -> Schema + Send + Sync + 'static,
{
    Schema::Lazy(LazySchema::new(thunk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::literal;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_thunk_runs_once_and_result_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            literal(json!("go"))
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(schema.is_valid(&json!("go")));
        assert!(!schema.is_valid(&json!("stop")));
        assert!(schema.is_valid(&json!("go")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_use_resolves_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            literal(json!(1))
        });

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let schema = schema.clone();
                scope.spawn(move || {
                    assert!(schema.is_valid(&json!(1)));
                });
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
