use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use tracing::warn;

use crate::error::Error;

/// Reads a template file as text. POT files are UTF-8 in practice, but
/// third-party modules occasionally ship legacy encodings, so anything
/// that is not valid UTF-8 goes through charset detection instead of
/// failing the whole module.
pub fn read_to_string(path: &Path) -> Result<String, Error> {
    let bytes = fs::read(path)?;
    Ok(decode(&bytes, path))
}

fn decode(bytes: &[u8], path: &Path) -> String {
    // A BOM wins outright; Encoding::decode strips it.
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let (text, _, _) = encoding.decode(bytes);
        return text.into_owned();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "decoded with replacement characters"
        );
    }

    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn p() -> PathBuf {
        PathBuf::from("test.pot")
    }

    #[test]
    fn strips_utf8_bom() {
        let bytes = [0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(decode(&bytes, &p()), "hi");
    }

    #[test]
    fn passes_utf8_through() {
        assert_eq!(decode("你好".as_bytes(), &p()), "你好");
    }

    #[test]
    fn recovers_non_utf8_input() {
        // "caf\xe9" in latin-1
        let bytes = [b'c', b'a', b'f', 0xE9];
        let text = decode(&bytes, &p());
        assert!(text.starts_with("caf"));
        assert_eq!(text.chars().count(), 4);
    }
}
