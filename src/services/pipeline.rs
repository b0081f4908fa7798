use crate::error::Error;
use crate::model::entry::{EntryKind, PoEntry, PoFile};
use crate::model::module::OdooModule;
use crate::parsers::po;
use crate::services::catalog::{self, matcher, model::CatalogEntry};
use crate::services::classifier::{self, ClassifierConfig};
use crate::services::{encoding, formatter, rebuild};
use crate::services::translator::Translate;

use serde::Serialize;
use tracing::{debug, warn};

const TARGET_LANG: &str = "zh_CN";

/// Outcome counts for one template file.
#[derive(Debug, Serialize, Default)]
pub struct RunReport {
    /// Entries that had to go to the translation service.
    pub candidates: usize,
    pub translated: usize,
    pub reused: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Translates one module: load the reuse catalog from any existing
/// `zh_CN.po`, parse the template, fill in translations, write the result
/// atomically. Parse and IO failures are fatal for this module only.
pub fn run_module(
    module: &OdooModule,
    translator: &dyn Translate,
    cfg: &ClassifierConfig,
) -> Result<RunReport, Error> {
    let catalog_entries = load_catalog(module);

    let text = encoding::read_to_string(&module.pot_path)?;
    let mut file = po::parse(&text)?;

    let report = apply(&mut file, &catalog_entries, translator, cfg);

    rebuild::write_atomic(&module.po_path, rebuild::render(&file).as_bytes())?;

    Ok(report)
}

/// A broken existing output never blocks retranslation; it just means no
/// reuse this run.
fn load_catalog(module: &OdooModule) -> Vec<CatalogEntry> {
    if !module.po_path.exists() {
        return Vec::new();
    }

    let text = match encoding::read_to_string(&module.po_path) {
        Ok(t) => t,
        Err(e) => {
            warn!(path = %module.po_path.display(), "cannot read existing translations: {e}");
            return Vec::new();
        }
    };

    match po::parse(&text) {
        Ok(file) => {
            let entries = catalog::from_po(&file);
            if !entries.is_empty() {
                println!(
                    "loaded {} existing translation(s) from {}",
                    entries.len(),
                    module.po_path.display()
                );
            }
            entries
        }
        Err(e) => {
            warn!(path = %module.po_path.display(), "ignoring malformed existing translations: {e}");
            Vec::new()
        }
    }
}

/// Per-entry decision ladder: keep non-empty translations, skip what the
/// classifier flags, reuse catalog hits, and only then call the service.
/// A service failure leaves that entry blank and the run moves on.
pub fn apply(
    file: &mut PoFile,
    catalog_entries: &[CatalogEntry],
    translator: &dyn Translate,
    cfg: &ClassifierConfig,
) -> RunReport {
    let mut report = RunReport::default();

    if let Some(h) = file.entries.iter_mut().find(|e| e.is_header()) {
        let patched = formatter::patch_header_language(&h.msgstr, TARGET_LANG);
        if patched != h.msgstr {
            h.msgstr_lines = formatter::emit_header_msgstr(&patched);
            h.msgstr = patched;
        }
    }

    // Total up front so progress lines can show [done/total].
    report.candidates = file
        .entries
        .iter()
        .filter(|e| needs_service(e, catalog_entries, cfg))
        .count();

    let mut done = 0usize;

    for e in file.entries.iter_mut() {
        if e.kind != EntryKind::Message {
            continue;
        }

        // A pre-existing translation is never overwritten.
        if !e.msgstr.trim().is_empty() {
            continue;
        }

        if let Some(reason) = classifier::classify(&e.msgid, cfg) {
            debug!(line = e.line_number, reason = reason.as_str(), "skipped");
            report.skipped += 1;
            continue;
        }

        if let Some(hit) = matcher::exact_match(catalog_entries, &e.msgid) {
            set_translation(e, hit.translation.clone());
            report.reused += 1;
            continue;
        }

        done += 1;
        match translator.translate(&e.msgid) {
            Ok(raw) => {
                let text = formatter::sanitize(&raw);
                if text.is_empty() {
                    warn!(line = e.line_number, "service returned an empty translation");
                    report.failed += 1;
                    continue;
                }
                println!("[{done}/{}] {} -> {}", report.candidates, e.msgid, text);
                set_translation(e, text);
                report.translated += 1;
            }
            Err(err) => {
                warn!(line = e.line_number, msgid = %e.msgid, "translation failed: {err}");
                report.failed += 1;
            }
        }
    }

    report
}

fn needs_service(e: &PoEntry, catalog_entries: &[CatalogEntry], cfg: &ClassifierConfig) -> bool {
    e.kind == EntryKind::Message
        && e.msgstr.trim().is_empty()
        && classifier::classify(&e.msgid, cfg).is_none()
        && matcher::exact_match(catalog_entries, &e.msgid).is_none()
}

fn set_translation(e: &mut PoEntry, text: String) {
    e.msgstr_lines = formatter::emit_msgstr(&text);
    e.msgstr = text;
}
