/// One gettext entry block, with every original line kept verbatim so the
/// file can be re-emitted byte-for-byte. Only `msgstr` (and its raw lines)
/// may be replaced between parse and render.
#[derive(Debug, Clone)]
pub struct PoEntry {
    /// Comment and blank lines preceding the entry, verbatim.
    pub lead_lines: Vec<String>,

    /// Raw `msgctxt` directive + continuation lines, verbatim.
    pub msgctxt_lines: Vec<String>,

    /// Raw `msgid` (and `msgid_plural`) lines, verbatim.
    pub msgid_lines: Vec<String>,

    /// Raw `msgstr` lines. Replaced when a translation is filled in.
    pub msgstr_lines: Vec<String>,

    /// Unescaped msgid text.
    pub msgid: String,

    /// Unescaped msgstr text.
    pub msgstr: String,

    /// 1-based line number of the `msgid` directive.
    pub line_number: usize,

    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The `msgid ""` metadata entry at the top of the file.
    Header,

    /// Ordinary single-form entry.
    Message,

    /// Entry with `msgid_plural`. Carried through untouched.
    Plural,
}

/// A parsed template file: its entries in order plus any trailing
/// comment/blank lines after the last entry.
#[derive(Debug, Clone)]
pub struct PoFile {
    pub entries: Vec<PoEntry>,
    pub tail_lines: Vec<String>,
    pub trailing_newline: bool,
}

impl PoEntry {
    pub fn is_header(&self) -> bool {
        self.kind == EntryKind::Header
    }
}
