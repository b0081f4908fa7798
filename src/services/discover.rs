use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::model::module::OdooModule;

/// Finds translatable Odoo modules directly under `base`: a directory
/// with an `__manifest__.py` and a matching `i18n/<name>.pot`. Results
/// come back name-sorted so runs are deterministic.
pub fn find_modules(base: &Path) -> Result<Vec<OdooModule>, Error> {
    let mut modules = Vec::new();

    for dent in fs::read_dir(base)? {
        let dent = match dent {
            Ok(d) => d,
            Err(_) => continue,
        };

        let dir = dent.path();
        if !dir.is_dir() || !dir.join("__manifest__.py").exists() {
            continue;
        }

        let name = match dir.file_name().and_then(|s| s.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };

        let i18n = dir.join("i18n");
        let pot_path = i18n.join(format!("{name}.pot"));
        if !pot_path.exists() {
            continue;
        }

        modules.push(OdooModule {
            name,
            po_path: i18n.join("zh_CN.po"),
            pot_path,
            dir,
        });
    }

    modules.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(modules)
}
