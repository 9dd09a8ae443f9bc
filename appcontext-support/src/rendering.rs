//! Text rendering utilities for human-friendly error messages.
//!
//! Provides helpers to format resolution chains and helpful
//! suggestions in error output.

/// Renders a resolution chain as a readable string.
///
/// # Examples
/// ```
/// use appcontext_support::rendering::render_chain;
///
/// let chain = vec!["user_service", "user_repo", "database", "user_service"];
/// let rendered = render_chain(&chain);
/// assert_eq!(rendered, "user_service -> user_repo -> database -> user_service");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Generates "did you mean?" suggestions based on registered object ids.
///
/// Compares the requested id against the available ids and returns close
/// matches, best first.
///
/// # Examples
/// ```
/// use appcontext_support::rendering::suggest_similar;
///
/// let available = vec!["logger", "user_service", "database"];
/// let suggestions = suggest_similar("user_servise", &available, 3);
/// assert_eq!(suggestions, vec!["user_service".to_string()]);
/// ```
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();

            // Exact substring match (highest priority)
            if name_lower.contains(&requested_lower)
                || requested_lower.contains(&name_lower)
            {
                return Some((name, 100));
            }

            // Common prefix
            let common = name_lower
                .chars()
                .zip(requested_lower.chars())
                .take_while(|(a, b)| a == b)
                .count();

            if common >= 3 {
                return Some((name, common * 10));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}
