//! Applying encoder steps to UI state

/// Move a cursor over `count` entries by `delta`, wrapping at both ends
///
/// Returns 0 when there are no entries.
pub fn wrap_index(index: usize, delta: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let count = count as i64;
    let moved = (index as i64 % count) + i64::from(delta);
    moved.rem_euclid(count) as usize
}

/// Adjust a bounded setting by `delta` steps of `step` each
///
/// The result is clamped to `min..=max`.
pub fn step_clamped(value: i32, delta: i32, step: i32, min: i32, max: i32) -> i32 {
    value
        .saturating_add(delta.saturating_mul(step))
        .clamp(min, max)
}
