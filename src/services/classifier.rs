use regex::Regex;

/// Why a source string was held back from the translation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Empty,
    CodeLike,
    Markup,
    NumericOrSymbolic,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Empty => "empty",
            SkipReason::CodeLike => "code-like",
            SkipReason::Markup => "markup",
            SkipReason::NumericOrSymbolic => "numeric-or-symbolic",
        }
    }
}

/// Skip policy, kept as data so the token lists can be tuned without
/// touching the rule order.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Substrings that mark a string as embedded code (format fields,
    /// brackets, assignments). `%s`-style placeholders are deliberately
    /// absent: plain printf placeholders still translate fine.
    pub code_tokens: Vec<String>,

    /// Substrings that mark a string as markup even without a full tag.
    pub markup_tokens: Vec<String>,

    markup_tag: Regex,
    symbolic: Regex,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let code_tokens = ["(", ")", "_", "{", "}", "+", "=", "[", "]"]
            .into_iter()
            .map(str::to_string)
            .collect();

        let markup_tokens = ["<", ">", "/", "style=", "class="]
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            code_tokens,
            markup_tokens,
            markup_tag: Regex::new(r"</?[A-Za-z][^>]*>").unwrap(),
            symbolic: Regex::new(r"^[0-9.,:\-_/\\]+$").unwrap(),
        }
    }
}

/// Ordered guard clauses over the source text; first matching rule wins.
/// `None` means the string is eligible for translation.
pub fn classify(text: &str, cfg: &ClassifierConfig) -> Option<SkipReason> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Some(SkipReason::Empty);
    }

    if cfg.code_tokens.iter().any(|tok| trimmed.contains(tok.as_str())) {
        return Some(SkipReason::CodeLike);
    }

    // Conservative markup rule: any tag (or tag fragment) skips the whole
    // string, even with prose around it. Splicing a translation back
    // between tags cannot be done safely without a real markup parser.
    if cfg.markup_tag.is_match(trimmed)
        || cfg
            .markup_tokens
            .iter()
            .any(|tok| trimmed.contains(tok.as_str()))
    {
        return Some(SkipReason::Markup);
    }

    if cfg.symbolic.is_match(trimmed) {
        return Some(SkipReason::NumericOrSymbolic);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    #[test]
    fn empty_and_whitespace_skip() {
        assert_eq!(classify("", &cfg()), Some(SkipReason::Empty));
        assert_eq!(classify("   \t ", &cfg()), Some(SkipReason::Empty));
    }

    #[test]
    fn plain_prose_is_eligible() {
        assert_eq!(classify("Sales Order", &cfg()), None);
    }

    #[test]
    fn printf_placeholder_is_eligible() {
        assert_eq!(classify("Hello %s", &cfg()), None);
    }

    #[test]
    fn markup_skips() {
        assert_eq!(classify("<div>Price</div>", &cfg()), Some(SkipReason::Markup));
        assert_eq!(classify("Paid <b>in full", &cfg()), Some(SkipReason::Markup));
        assert_eq!(classify("and/or", &cfg()), Some(SkipReason::Markup));
    }

    #[test]
    fn code_like_skips() {
        assert_eq!(
            classify("amount_total", &cfg()),
            Some(SkipReason::CodeLike)
        );
        assert_eq!(
            classify("compute(x)", &cfg()),
            Some(SkipReason::CodeLike)
        );
        assert_eq!(classify("a = b", &cfg()), Some(SkipReason::CodeLike));
    }

    #[test]
    fn numeric_or_symbolic_skips() {
        assert_eq!(
            classify("10.5", &cfg()),
            Some(SkipReason::NumericOrSymbolic)
        );
        assert_eq!(
            classify("2024-01-31", &cfg()),
            Some(SkipReason::NumericOrSymbolic)
        );
    }

    #[test]
    fn numbers_with_words_are_eligible() {
        assert_eq!(classify("10 days", &cfg()), None);
    }

    #[test]
    fn code_tokens_are_configurable() {
        let mut cfg = cfg();
        cfg.code_tokens.push("%".to_string());
        assert_eq!(classify("Hello %s", &cfg), Some(SkipReason::CodeLike));
    }
}
