//! Exit code constants for the lockable CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, not inside a repository)
//! - 2: Filesystem failure (missing or invalid directory, I/O, path resolution)
//! - 3: Git operation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or not inside a repository.
pub const USER_ERROR: i32 = 1;

/// Filesystem failure: listing, stat, or permission write failed, or a path
/// could not be resolved against the repository root.
pub const FS_FAILURE: i32 = 2;

/// Git operation failure.
pub const GIT_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, FS_FAILURE, GIT_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
