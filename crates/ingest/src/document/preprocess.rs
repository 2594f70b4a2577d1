/// Collapse every whitespace run (spaces, tabs, newlines) into a single space
/// and trim both ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
