/// Conservative normalization for catalog lookups: trim and collapse runs
/// of whitespace, nothing else. No case folding or punctuation stripping,
/// so two distinct source strings can never alias to the same key.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
