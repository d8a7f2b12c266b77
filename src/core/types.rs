/*!
 * Core Types
 * Common types shared across the engine
 */

/// Process ID type
///
/// Signed to match raw kernel pids (procfs entry names, `kill(2)`).
pub type Pid = i32;

/// User ID type
pub type Uid = u32;

/// UIDs repeat per user profile in blocks of this size
pub const UIDS_PER_USER: Uid = 100_000;

/// Per-profile UID floor of the isolated-service range
pub const ISOLATED_UID_FLOOR: Uid = 90_000;

/// Whether a UID falls in the isolated-service range of its user profile
pub fn is_isolated_uid(uid: Uid) -> bool {
    uid % UIDS_PER_USER >= ISOLATED_UID_FLOOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolated_uid_range() {
        assert!(is_isolated_uid(90_000));
        assert!(is_isolated_uid(99_999));
        assert!(is_isolated_uid(1_090_000));
        assert!(!is_isolated_uid(89_999));
        assert!(!is_isolated_uid(10_123));
        assert!(!is_isolated_uid(1_010_123));
    }
}
