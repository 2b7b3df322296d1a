use std::collections::HashSet;
use std::hash::Hash;
use std::time::{Duration, Instant};

use log::info;

/// Returns the unique values of `input`, keeping the order of their first
/// occurrence.
///
/// # Examples
/// ```
/// use utilkit::utils::distinct;
///
/// assert_eq!(distinct(&[1, 2, 2, 3, 1]), vec![1, 2, 3]);
/// ```
pub fn distinct<T>(input: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(input.len());
    let mut ret = Vec::with_capacity(input.len());
    for value in input {
        if seen.insert(value) {
            ret.push(value.clone());
        }
    }
    ret
}

/// Lowercases every value and returns the unique results in first
/// occurrence order. `["Test1", "tEst1"]` becomes `["test1"]`.
pub fn distinct_lowercase<S>(input: &[S]) -> Vec<String>
where
    S: AsRef<str>,
{
    let mut seen = HashSet::with_capacity(input.len());
    let mut ret = Vec::with_capacity(input.len());
    for value in input {
        let lower = value.as_ref().to_lowercase();
        if !seen.contains(&lower) {
            seen.insert(lower.clone());
            ret.push(lower);
        }
    }
    ret
}

/// Case sensitive for strings.
#[inline]
pub fn contains<T>(slice: &[T], value: &T) -> bool
where
    T: PartialEq,
{
    slice.iter().any(|v| v == value)
}

/// Rounds `num` to `precision` decimal places, halves away from zero.
pub fn to_fixed(num: f64, precision: i32) -> f64 {
    let output = 10f64.powi(precision);
    (num * output).round() / output
}

/// Logs how long has passed since `start`, e.g. `load users, 12ms 345us`.
pub fn time_track(start: Instant, name: &str) -> Duration {
    let elapsed = start.elapsed();
    info!("{name}, {}", humantime::format_duration(elapsed));
    elapsed
}
