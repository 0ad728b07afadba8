//! Candidate filter: rejects tokens that only look like email addresses.
//!
//! The extraction pattern is deliberately loose, so it also matches image
//! names embedded in markup (`logo@2x.png`), boundaries like `a@.b`, and a
//! few addresses that show up in nearly every paste on some sites.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::debug;

/// Substrings that mark a token as a filename or malformed boundary.
const REJECTED_FRAGMENTS: [&str; 5] = [".png", ".gif", ".jpg", "._", "@."];

/// Known-noise addresses that are never harvested.
static BLACKLIST: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["formorer@debian.org", "user@user"]));

/// Whether `token` carries a filename or boundary marker.
pub fn is_artifact(token: &str) -> bool {
    REJECTED_FRAGMENTS.iter().any(|f| token.contains(f))
}

/// Decide whether a raw candidate is worth keeping.
pub fn keep(candidate: &str) -> bool {
    if is_artifact(candidate) {
        return false;
    }
    if !candidate.contains('.') {
        return false;
    }
    if BLACKLIST.contains(candidate) {
        debug!(candidate, "blacklisted address dropped");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_plain_addresses() {
        assert!(keep("alice@example.com"));
        assert!(keep("bob_smith@mail.example.org"));
    }

    #[test]
    fn test_rejects_image_and_boundary_artifacts() {
        for token in [
            "logo@site.png",
            "banner@2x.gif",
            "photo@cdn.jpg",
            "icon.png@example.com",
            "a@host._private",
            "name@.example.com",
        ] {
            assert!(!keep(token), "{token} should be rejected");
        }
    }

    #[test]
    fn test_rejects_tokens_without_dot() {
        assert!(!keep("foo@bar"));
        assert!(!keep("root@localhost"));
    }

    #[test]
    fn test_rejects_blacklisted_addresses() {
        assert!(!keep("formorer@debian.org"));
        assert!(!keep("user@user"));
        // Only exact matches are blacklisted.
        assert!(keep("formorer@debian.org.uk"));
    }

    #[test]
    fn test_verdict_is_stable() {
        for token in ["alice@example.com", "foo@bar", "x@y.png", "user@user"] {
            let first = keep(token);
            for _ in 0..3 {
                assert_eq!(keep(token), first);
            }
        }
    }

    #[test]
    fn test_is_artifact() {
        assert!(is_artifact("logo.png@site.x"));
        assert!(is_artifact("a@.b"));
        assert!(!is_artifact("png@site.x"));
        assert!(!is_artifact("foo@bar"));
    }
}
