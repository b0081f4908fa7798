use std::path::PathBuf;

/// An Odoo module directory that carries a translation template.
#[derive(Debug, Clone)]
pub struct OdooModule {
    pub name: String,
    pub dir: PathBuf,

    /// `<dir>/i18n/<name>.pot`
    pub pot_path: PathBuf,

    /// `<dir>/i18n/zh_CN.po`
    pub po_path: PathBuf,
}
