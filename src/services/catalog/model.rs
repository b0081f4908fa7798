/// One reusable translation recovered from a previously written
/// `zh_CN.po` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub original: String,
    pub translation: String,

    pub normalized: String,

    pub hash: String,
}
