/*!
 * Policy Validator
 * Grammar checks for denylist package and process names
 */

use super::types::ISOLATED_MAGIC;

/// Whether `(package, process)` is a well-formed denylist entry.
///
/// Pure ASCII byte classification; multi-byte UTF-8 sequences fail the class
/// checks and are rejected like any other disallowed byte.
pub fn validate(package: &str, process: &str) -> bool {
    if package == ISOLATED_MAGIC {
        valid_isolated_pattern(process)
    } else {
        valid_package(package) && valid_process(process)
    }
}

/// Real package names: two or more non-empty `[A-Za-z0-9_]` segments
/// separated by single dots. Rejects leading/trailing/doubled dots.
fn valid_package(package: &str) -> bool {
    if package.is_empty() {
        return false;
    }
    let mut segments = 0;
    for segment in package.split('.') {
        if segment.is_empty() || !segment.bytes().all(is_segment_byte) {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

/// Process names: `[A-Za-z0-9_:.]` only
fn valid_process(process: &str) -> bool {
    process.bytes().all(|b| is_segment_byte(b) || b == b':' || b == b'.')
}

/// Isolated patterns: `[A-Za-z0-9_.]` up to an optional `:`; the tail after
/// the colon is an instance-specific suffix and is not validated.
fn valid_isolated_pattern(pattern: &str) -> bool {
    for b in pattern.bytes() {
        if b == b':' {
            return true;
        }
        if !is_segment_byte(b) && b != b'.' {
            return false;
        }
    }
    true
}

fn is_segment_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
