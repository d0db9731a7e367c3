//! Collision-free fixture values.
//!
//! Integration tests share one schema per test binary, so display names and
//! emails get a ULID suffix to stay unique under the `users.email` index.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@hackathon.test`
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let a = unique_email("lead");
/// let b = unique_email("lead");
/// assert_ne!(a, b);
/// assert!(a.starts_with("lead-"));
/// assert!(a.ends_with("@hackathon.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@hackathon.test", prefix.to_lowercase(), Ulid::new())
}
