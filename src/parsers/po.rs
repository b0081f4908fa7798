use crate::error::Error;
use crate::model::entry::{EntryKind, PoEntry, PoFile};

/// Which directive the parser is currently collecting continuation
/// lines for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
}

#[derive(Default)]
struct Draft {
    lead: Vec<String>,
    msgctxt_lines: Vec<String>,
    msgid_lines: Vec<String>,
    msgstr_lines: Vec<String>,
    msgid: String,
    msgstr: String,
    line_number: usize,
    plural: bool,
    has_msgid: bool,
    has_msgstr: bool,
}

impl Draft {
    fn flush(&mut self, entries: &mut Vec<PoEntry>) {
        let d = std::mem::take(self);

        let kind = if d.plural {
            EntryKind::Plural
        } else if d.msgid.is_empty() {
            EntryKind::Header
        } else {
            EntryKind::Message
        };

        entries.push(PoEntry {
            lead_lines: d.lead,
            msgctxt_lines: d.msgctxt_lines,
            msgid_lines: d.msgid_lines,
            msgstr_lines: d.msgstr_lines,
            msgid: d.msgid,
            msgstr: d.msgstr,
            line_number: d.line_number,
            kind,
        });
    }
}

/// Parses a POT/PO file into entry blocks.
///
/// Every input line is kept verbatim in exactly one bucket (lead, msgctxt,
/// msgid or msgstr lines), so `rebuild::render` can reproduce the input
/// byte-for-byte. Structural violations fail with `Error::Parse`; a fatal
/// outcome for this file, the batch moves on.
pub fn parse(text: &str) -> Result<PoFile, Error> {
    let trailing_newline = text.ends_with('\n');

    // split('\n') instead of lines(): a trailing '\r' must stay inside the
    // stored raw line or CRLF files would be rewritten with bare LF.
    let mut raw_lines: Vec<&str> = text.split('\n').collect();
    if trailing_newline {
        raw_lines.pop();
    }

    let mut entries: Vec<PoEntry> = Vec::new();
    let mut draft = Draft::default();
    let mut field = Field::None;

    for (i, raw) in raw_lines.iter().enumerate() {
        let ln = i + 1;
        let t = raw.trim_end_matches('\r').trim();

        if t.is_empty() {
            if field == Field::Msgstr {
                draft.flush(&mut entries);
                field = Field::None;
            } else if draft.has_msgid {
                return Err(Error::Parse(format!(
                    "line {ln}: blank line inside entry started at line {}",
                    draft.line_number
                )));
            }
            draft.lead.push((*raw).to_string());
            continue;
        }

        if t.starts_with('#') {
            if field == Field::Msgstr {
                draft.flush(&mut entries);
                field = Field::None;
            } else if draft.has_msgid {
                return Err(Error::Parse(format!(
                    "line {ln}: comment inside entry started at line {}",
                    draft.line_number
                )));
            }
            draft.lead.push((*raw).to_string());
            continue;
        }

        if let Some(rest) = t.strip_prefix("msgctxt ") {
            if field == Field::Msgstr {
                draft.flush(&mut entries);
                field = Field::None;
            }
            if draft.has_msgid || !draft.msgctxt_lines.is_empty() {
                return Err(Error::Parse(format!("line {ln}: unexpected msgctxt")));
            }
            parse_quoted(rest, ln)?;
            draft.msgctxt_lines.push((*raw).to_string());
            field = Field::Msgctxt;
            continue;
        }

        if let Some(rest) = t.strip_prefix("msgid_plural ") {
            if field != Field::Msgid {
                return Err(Error::Parse(format!(
                    "line {ln}: msgid_plural must follow msgid"
                )));
            }
            parse_quoted(rest, ln)?;
            draft.msgid_lines.push((*raw).to_string());
            draft.plural = true;
            field = Field::MsgidPlural;
            continue;
        }

        if let Some(rest) = t.strip_prefix("msgid ") {
            if field == Field::Msgstr {
                draft.flush(&mut entries);
                field = Field::None;
            }
            if draft.has_msgid {
                return Err(Error::Parse(format!(
                    "line {ln}: msgid while entry at line {} has no msgstr",
                    draft.line_number
                )));
            }
            draft.msgid = parse_quoted(rest, ln)?;
            draft.msgid_lines.push((*raw).to_string());
            draft.line_number = ln;
            draft.has_msgid = true;
            field = Field::Msgid;
            continue;
        }

        if let Some(rest) = t.strip_prefix("msgstr[") {
            let close = rest
                .find(']')
                .ok_or_else(|| Error::Parse(format!("line {ln}: malformed msgstr[N]")))?;
            if close == 0 || !rest[..close].bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::Parse(format!("line {ln}: malformed msgstr[N]")));
            }
            if !draft.plural || !(field == Field::MsgidPlural || field == Field::Msgstr) {
                return Err(Error::Parse(format!(
                    "line {ln}: msgstr[N] without msgid_plural"
                )));
            }
            parse_quoted(&rest[close + 1..], ln)?;
            draft.msgstr_lines.push((*raw).to_string());
            draft.has_msgstr = true;
            field = Field::Msgstr;
            continue;
        }

        if let Some(rest) = t.strip_prefix("msgstr ") {
            if !draft.has_msgid {
                return Err(Error::Parse(format!("line {ln}: msgstr without msgid")));
            }
            if draft.plural {
                return Err(Error::Parse(format!(
                    "line {ln}: plain msgstr after msgid_plural"
                )));
            }
            if draft.has_msgstr {
                return Err(Error::Parse(format!("line {ln}: duplicate msgstr")));
            }
            draft.msgstr = parse_quoted(rest, ln)?;
            draft.msgstr_lines.push((*raw).to_string());
            draft.has_msgstr = true;
            field = Field::Msgstr;
            continue;
        }

        if t.starts_with('"') {
            let piece = parse_quoted(t, ln)?;
            match field {
                Field::Msgctxt => draft.msgctxt_lines.push((*raw).to_string()),
                Field::Msgid => {
                    draft.msgid.push_str(&piece);
                    draft.msgid_lines.push((*raw).to_string());
                }
                Field::MsgidPlural => draft.msgid_lines.push((*raw).to_string()),
                Field::Msgstr => {
                    if !draft.plural {
                        draft.msgstr.push_str(&piece);
                    }
                    draft.msgstr_lines.push((*raw).to_string());
                }
                Field::None => {
                    return Err(Error::Parse(format!(
                        "line {ln}: string continuation without a directive"
                    )));
                }
            }
            continue;
        }

        return Err(Error::Parse(format!("line {ln}: unrecognized line: {t}")));
    }

    if draft.has_msgid {
        if !draft.has_msgstr {
            return Err(Error::Parse(format!(
                "entry at line {}: missing msgstr",
                draft.line_number
            )));
        }
        draft.flush(&mut entries);
    }

    Ok(PoFile {
        entries,
        tail_lines: draft.lead,
        trailing_newline,
    })
}

/// Unescapes one quoted string, rejecting anything but optional whitespace
/// after the closing quote.
///
/// Single-pass so `\\n` (literal backslash + n) is never confused with a
/// newline escape.
fn parse_quoted(s: &str, ln: usize) -> Result<String, Error> {
    let s = s.trim();
    if !s.starts_with('"') {
        return Err(Error::Parse(format!("line {ln}: expected quoted string")));
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s[1..].chars();
    let mut closed = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => {
                    return Err(Error::Parse(format!("line {ln}: unterminated escape")));
                }
            },
            '"' => {
                closed = true;
                break;
            }
            c => out.push(c),
        }
    }

    if !closed {
        return Err(Error::Parse(format!("line {ln}: unterminated string")));
    }

    let rest: String = chars.collect();
    if !rest.trim().is_empty() {
        return Err(Error::Parse(format!(
            "line {ln}: trailing characters after closing quote"
        )));
    }

    Ok(out)
}

/// Escapes logical text back into PO string syntax. Inverse of the
/// unescaping done while parsing.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::EntryKind;

    #[test]
    fn parses_simple_entries() {
        let text = "msgid \"Hello\"\nmsgstr \"\"\n\nmsgid \"Goodbye\"\nmsgstr \"再见\"\n";
        let file = parse(text).unwrap();
        assert_eq!(file.entries.len(), 2);
        assert_eq!(file.entries[0].msgid, "Hello");
        assert_eq!(file.entries[0].msgstr, "");
        assert_eq!(file.entries[1].msgid, "Goodbye");
        assert_eq!(file.entries[1].msgstr, "再见");
        assert!(file.trailing_newline);
    }

    #[test]
    fn header_entry_is_flagged() {
        let text = "msgid \"\"\nmsgstr \"\"\n\"Project-Id-Version: x\\n\"\n\"Language: \\n\"\n";
        let file = parse(text).unwrap();
        assert_eq!(file.entries[0].kind, EntryKind::Header);
        assert_eq!(
            file.entries[0].msgstr,
            "Project-Id-Version: x\nLanguage: \n"
        );
    }

    #[test]
    fn multiline_msgid_concatenates() {
        let text = "msgid \"\"\n\"Hello \"\n\"World\"\nmsgstr \"\"\n";
        let file = parse(text).unwrap();
        assert_eq!(file.entries[0].msgid, "Hello World");
        assert_eq!(file.entries[0].kind, EntryKind::Message);
        assert_eq!(file.entries[0].msgid_lines.len(), 3);
    }

    #[test]
    fn comments_attach_to_following_entry() {
        let text = "#. module: sale\n#: model:ir.model,name\nmsgid \"Order\"\nmsgstr \"\"\n";
        let file = parse(text).unwrap();
        assert_eq!(file.entries[0].lead_lines.len(), 2);
        assert_eq!(file.entries[0].lead_lines[0], "#. module: sale");
    }

    #[test]
    fn plural_entries_are_passed_through() {
        let text = "msgid \"%d file\"\nmsgid_plural \"%d files\"\nmsgstr[0] \"\"\nmsgstr[1] \"\"\n";
        let file = parse(text).unwrap();
        assert_eq!(file.entries[0].kind, EntryKind::Plural);
        assert_eq!(file.entries[0].msgstr_lines.len(), 2);
    }

    #[test]
    fn escape_sequences_round_trip() {
        let original = "Line 1\nLine 2\t\"quoted\" \\ end";
        let escaped = escape(original);
        let text = format!("msgid \"{escaped}\"\nmsgstr \"\"\n");
        let file = parse(&text).unwrap();
        assert_eq!(file.entries[0].msgid, original);
    }

    #[test]
    fn double_backslash_n_is_not_a_newline() {
        let file = parse("msgid \"path\\\\nend\"\nmsgstr \"\"\n").unwrap();
        assert_eq!(file.entries[0].msgid, "path\\nend");
    }

    #[test]
    fn msgstr_without_msgid_is_an_error() {
        let err = parse("msgstr \"orphan\"\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn stray_continuation_is_an_error() {
        let err = parse("\"floating\"\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = parse("msgid \"open\nmsgstr \"\"\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn garbage_line_is_an_error() {
        let err = parse("msgid \"a\"\nmsgstr \"\"\n\nnot a directive\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_final_msgstr_is_an_error() {
        let err = parse("msgid \"dangling\"\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn msgctxt_is_preserved() {
        let text = "msgctxt \"menu\"\nmsgid \"File\"\nmsgstr \"\"\n";
        let file = parse(text).unwrap();
        assert_eq!(file.entries[0].msgctxt_lines, vec!["msgctxt \"menu\""]);
        assert_eq!(file.entries[0].msgid, "File");
    }

    #[test]
    fn trailing_comments_land_in_tail() {
        let text = "msgid \"a\"\nmsgstr \"b\"\n\n# done\n";
        let file = parse(text).unwrap();
        assert_eq!(file.entries.len(), 1);
        assert_eq!(file.tail_lines, vec!["", "# done"]);
    }
}
