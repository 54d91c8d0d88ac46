/// Lowercases, trims, and joins whitespace-separated words with single hyphens.
pub(crate) fn slug(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
