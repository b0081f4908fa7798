pub mod hash;
pub mod matcher;
pub mod model;
pub mod normalize;

use crate::model::entry::{EntryKind, PoFile};
use self::model::CatalogEntry;

/// Builds the reuse catalog from an already-translated file. Only complete
/// pairs count; the header and plural blocks never enter the catalog.
/// The first translation for a given source wins.
pub fn from_po(file: &PoFile) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = Vec::new();

    for e in &file.entries {
        if e.kind != EntryKind::Message {
            continue;
        }
        if e.msgid.trim().is_empty() || e.msgstr.trim().is_empty() {
            continue;
        }
        if matcher::exact_match(&entries, &e.msgid).is_some() {
            continue;
        }

        let norm = normalize::normalize(e.msgid.trim());
        let h = hash::hash_norm(&norm);

        entries.push(CatalogEntry {
            original: e.msgid.clone(),
            translation: e.msgstr.clone(),
            normalized: norm,
            hash: h,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::po;

    #[test]
    fn collects_only_complete_pairs() {
        let text = "msgid \"\"\nmsgstr \"\"\n\"Language: zh_CN\\n\"\n\n\
                    msgid \"Order\"\nmsgstr \"订单\"\n\n\
                    msgid \"Pending\"\nmsgstr \"\"\n";
        let file = po::parse(text).unwrap();
        let catalog = from_po(&file);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].original, "Order");
        assert_eq!(catalog[0].translation, "订单");
    }

    #[test]
    fn lookup_tolerates_whitespace_differences() {
        let text = "msgid \"Sales  Order\"\nmsgstr \"销售订单\"\n";
        let file = po::parse(text).unwrap();
        let catalog = from_po(&file);
        let hit = matcher::exact_match(&catalog, " Sales Order ").unwrap();
        assert_eq!(hit.translation, "销售订单");
    }

    #[test]
    fn lookup_never_crosses_distinct_sources() {
        let text = "msgid \"Invoice\"\nmsgstr \"发票\"\n";
        let file = po::parse(text).unwrap();
        let catalog = from_po(&file);
        assert!(matcher::exact_match(&catalog, "invoice").is_none());
    }

    #[test]
    fn first_translation_wins_on_duplicates() {
        let text = "msgid \"Order\"\nmsgstr \"订单\"\n\nmsgid \"Order\"\nmsgstr \"排序\"\n";
        let file = po::parse(text).unwrap();
        let catalog = from_po(&file);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].translation, "订单");
    }
}
