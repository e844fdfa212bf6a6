//! Input resolution for the address bar
//!
//! Every navigation entry point (typed input, new tabs, restored tabs,
//! history replay) goes through [`resolve_input`] so they all agree on what
//! a bare host means.

/// Scheme prefixes that are navigated as-is even without `//`.
const PASSTHROUGH_PREFIXES: [&str; 4] = ["about:", "file:", "javascript:", "data:"];

/// Resolve raw address bar text into a URL to load.
///
/// Returns `None` for blank input; callers must not navigate in that case.
pub fn resolve_input(input: &str) -> Option<String> {
    let input = input.trim();

    if input.is_empty() {
        return None;
    }

    if input.contains("://")
        || PASSTHROUGH_PREFIXES
            .iter()
            .any(|prefix| input.starts_with(prefix))
    {
        return Some(input.to_string());
    }

    Some(format!("https://{}", input))
}
