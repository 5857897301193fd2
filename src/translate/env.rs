// ABOUTME: Environment mapping to KEY=VALUE assignments.
// ABOUTME: One assignment per entry, in the iteration order of the input.

/// Render each `(key, value)` pair as `KEY=VALUE`.
pub fn environment<I, K, V>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    env.into_iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect()
}
