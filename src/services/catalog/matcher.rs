use super::model::CatalogEntry;
use super::{hash, normalize};

pub fn exact_match<'a>(entries: &'a [CatalogEntry], original: &str) -> Option<&'a CatalogEntry> {
    let trimmed = original.trim();
    if trimmed.is_empty() {
        return None;
    }

    let norm = normalize::normalize(trimmed);
    let h = hash::hash_norm(&norm);

    entries
        .iter()
        .find(|e| e.hash == h && e.normalized == norm)
}
