//! Expression-oriented diagnostic logging.
//!
//! `logged` renders a value next to a label and hands the value back, so it
//! can wrap any expression without changing control flow. Rendering runs
//! under `catch_unwind`: a panicking `Debug` impl costs the message, never
//! the result.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn, Level};

/// Logs `label: {value:?}` at debug level and returns `value` unchanged.
pub fn logged<T: fmt::Debug>(label: &str, value: T) -> T {
    if tracing::enabled!(Level::DEBUG) {
        match catch_unwind(AssertUnwindSafe(|| format!("{:?}", value))) {
            Ok(rendered) => debug!(target: "arbor::trace", "{}: {}", label, rendered),
            Err(_) => {
                warn!(target: "arbor::diagnostics", label, "rendering diagnostic failed, message dropped")
            }
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;

    struct Exploding;

    impl fmt::Debug for Exploding {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("cannot render");
        }
    }

    #[test]
    fn test_logged_returns_value() {
        testing::init_test_setup();
        assert_eq!(logged("answer", 42), 42);
        assert_eq!(logged("path", vec![1, 5, 13]), vec![1, 5, 13]);
    }

    #[test]
    fn test_logged_swallows_rendering_panic() {
        testing::init_test_setup();
        let value = logged("exploding", Exploding);
        // still usable afterwards
        let _ = value;
    }
}
