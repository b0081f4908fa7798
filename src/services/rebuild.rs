use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::entry::PoFile;

/// Serializes entries back to file text. All raw lines are emitted in
/// their original order; the pipeline has already swapped msgstr lines
/// where a translation was filled in, everything else reproduces the
/// input byte-for-byte.
pub fn render(file: &PoFile) -> String {
    let mut out: Vec<&str> = Vec::new();

    for e in &file.entries {
        for line in &e.lead_lines {
            out.push(line.as_str());
        }
        for line in &e.msgctxt_lines {
            out.push(line.as_str());
        }
        for line in &e.msgid_lines {
            out.push(line.as_str());
        }
        for line in &e.msgstr_lines {
            out.push(line.as_str());
        }
    }

    for line in &file.tail_lines {
        out.push(line.as_str());
    }

    let mut text = out.join("\n");
    if file.trailing_newline {
        text.push('\n');
    }
    text
}

/// Writes via a temp file in the same directory, then renames over the
/// target, so a crash mid-write never leaves a truncated po file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&tmp, bytes)?;

    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp, path)?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "po".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::po;

    const SAMPLE: &str = "# Translation of Odoo Server.\n\
                          # This file contains the translation of the following modules:\n\
                          #\t* sale\n\
                          msgid \"\"\n\
                          msgstr \"\"\n\
                          \"Project-Id-Version: Odoo Server 18.0\\n\"\n\
                          \n\
                          #. module: sale\n\
                          msgid \"Sales Order\"\n\
                          msgstr \"\"\n\
                          \n\
                          msgid \"\"\n\
                          \"Long \"\n\
                          \"source\"\n\
                          msgstr \"\"\n";

    #[test]
    fn untouched_file_renders_byte_identical() {
        let file = po::parse(SAMPLE).unwrap();
        assert_eq!(render(&file), SAMPLE);
    }

    #[test]
    fn render_parse_render_is_stable() {
        let file = po::parse(SAMPLE).unwrap();
        let once = render(&file);
        let twice = render(&po::parse(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn file_without_trailing_newline_stays_that_way() {
        let text = "msgid \"a\"\nmsgstr \"b\"";
        let file = po::parse(text).unwrap();
        assert_eq!(render(&file), text);
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zh_CN.po");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!tmp_path(&path).exists());
    }
}
