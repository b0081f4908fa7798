use crate::parsers::po;

/// Cleans up text coming back from the translation service so it matches
/// the conventions of the template: ASCII quotes only, no stray spaces
/// around line breaks.
pub fn sanitize(raw: &str) -> String {
    let mut s = raw.trim().to_string();

    // Services tend to localize quotes; the templates keep ASCII ones.
    for (from, to) in [('“', '"'), ('”', '"'), ('‘', '\''), ('’', '\'')] {
        s = s.replace(from, &to.to_string());
    }

    // Padding around line breaks shows up when the service re-wraps text.
    s.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a filled-in translation as a single `msgstr` line, PO-escaped.
pub fn emit_msgstr(text: &str) -> Vec<String> {
    vec![format!("msgstr \"{}\"", po::escape(text))]
}

/// Renders a header msgstr in the conventional multi-line form: an empty
/// first string, then one quoted line per header field.
pub fn emit_header_msgstr(text: &str) -> Vec<String> {
    let mut out = vec!["msgstr \"\"".to_string()];
    for piece in text.split_inclusive('\n') {
        out.push(format!("\"{}\"", po::escape(piece)));
    }
    out
}

/// Ensures the header metadata carries `Language: <lang>`, replacing an
/// existing `Language:` field or appending one. Returns the header text
/// unchanged when it is already correct.
pub fn patch_header_language(header: &str, lang: &str) -> String {
    if header.trim().is_empty() {
        return format!("Language: {lang}\n");
    }

    let had_trailing = header.ends_with('\n');
    let mut lines: Vec<String> = header
        .split('\n')
        .map(str::to_string)
        .collect();
    if had_trailing {
        lines.pop();
    }

    let wanted = format!("Language: {lang}");
    let mut found = false;

    for line in lines.iter_mut() {
        if line.starts_with("Language:") {
            *line = wanted.clone();
            found = true;
            break;
        }
    }

    if !found {
        lines.push(wanted);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
