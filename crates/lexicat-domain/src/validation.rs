//! Field validation for article records
//!
//! Validators are pure functions of their inputs and never fail: they
//! return a [`Verdict`] the caller checks. An empty string is always
//! `Valid` — "required" is a separate presence check ([`is_present`],
//! [`missing_fields`]), never inferred from a validator's output.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::article::{Article, Lang, NewArticle};

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Valid,
    Invalid(String),
}

impl Verdict {
    fn invalid(reason: &str) -> Self {
        Verdict::Invalid(reason.to_string())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// The user-facing reason, present only for invalid verdicts.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(reason) => Some(reason),
        }
    }
}

lazy_static! {
    static ref LATIN_RE: Regex = Regex::new(r"[A-Za-z]").unwrap();
    static ref CYRILLIC_RE: Regex = Regex::new(r"[а-яА-ЯёЁ]").unwrap();

    // DOI: 10.<registrant digits> prefix, then a restricted suffix
    static ref DOI_PREFIX_RE: Regex = Regex::new(r"^10\.\d+").unwrap();
    static ref DOI_SUFFIX_RE: Regex = Regex::new(r"(?i)^[a-z0-9-]+$").unwrap();
    static ref RESERVED_CHARS_RE: Regex = Regex::new(r"[;/?:@&=+$,]").unwrap();

    // Short code: exactly six ASCII letters
    static ref SHORT_CODE_RE: Regex = Regex::new(r"^[A-Za-z]{6}$").unwrap();
}

/// Check that `text` is written in the expected script for `lang`.
///
/// A record in Russian must contain no Latin letters; a record in English
/// must contain no Cyrillic letters. Applies to `name`, `author`, and
/// `key_words`.
pub fn classify_script(lang: Lang, text: &str) -> Verdict {
    if text.is_empty() {
        return Verdict::Valid;
    }
    match lang {
        Lang::Ru if LATIN_RE.is_match(text) => {
            Verdict::invalid("field must contain only Cyrillic")
        }
        Lang::En if CYRILLIC_RE.is_match(text) => {
            Verdict::invalid("field must contain only Latin")
        }
        _ => Verdict::Valid,
    }
}

fn is_doi(text: &str) -> bool {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return false;
    }
    if !DOI_PREFIX_RE.is_match(text) {
        return false;
    }
    let suffix = parts[1];
    if !DOI_SUFFIX_RE.is_match(suffix) {
        return false;
    }
    // Reserved URI characters are rejected explicitly on top of the
    // character-class check above.
    if RESERVED_CHARS_RE.is_match(suffix) {
        return false;
    }
    true
}

fn is_short_code(text: &str) -> bool {
    SHORT_CODE_RE.is_match(text)
}

/// Check that `text` is a syntactically valid scholarly-document
/// identifier: either a two-part DOI (`10.<digits>/<suffix>`) or a
/// six-letter short code.
pub fn validate_identifier(text: &str) -> Verdict {
    if text.is_empty() || is_doi(text) || is_short_code(text) {
        Verdict::Valid
    } else {
        Verdict::invalid("identifier is not a recognized format")
    }
}

/// Per-field verdicts for the validated subset of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVerdicts {
    pub name: Verdict,
    pub author: Verdict,
    pub key_words: Verdict,
    pub identifier: Verdict,
}

impl FieldVerdicts {
    pub fn all_valid(&self) -> bool {
        self.name.is_valid()
            && self.author.is_valid()
            && self.key_words.is_valid()
            && self.identifier.is_valid()
    }

    /// Names of the fields that failed, paired with their reasons.
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        for (field, verdict) in [
            ("name", &self.name),
            ("author", &self.author),
            ("key_words", &self.key_words),
            ("identifier", &self.identifier),
        ] {
            if let Some(reason) = verdict.reason() {
                out.push((field, reason));
            }
        }
        out
    }
}

/// Validate the script-constrained fields and the identifier of an
/// article, keyed by its declared language.
pub fn validate_article(article: &Article) -> FieldVerdicts {
    FieldVerdicts {
        name: classify_script(article.lang, &article.name),
        author: classify_script(article.lang, &article.author),
        key_words: classify_script(article.lang, &article.key_words),
        identifier: validate_identifier(&article.identifier),
    }
}

/// Presence predicate, kept separate from well-formedness: an empty field
/// passes every validator above but still fails this check.
pub fn is_present(text: &str) -> bool {
    !text.is_empty()
}

/// Required fields of a creation payload that are still empty.
pub fn missing_fields(article: &NewArticle) -> Vec<&'static str> {
    let mut missing = Vec::new();
    for (field, value) in [
        ("name", &article.name),
        ("term", &article.term),
        ("terminology", &article.terminology),
        ("author", &article.author),
        ("key_words", &article.key_words),
        ("url", &article.url),
        ("identifier", &article.identifier),
        ("usage_context", &article.usage_context),
        ("math_apparatus", &article.math_apparatus),
        ("solving", &article.solving),
        ("interests", &article.interests),
    ] {
        if !is_present(value) {
            missing.push(field);
        }
    }
    missing
}

/// Membership check against the server-supplied controlled vocabulary for
/// the record's language. The vocabulary itself comes from the external
/// term service.
pub fn term_in_vocabulary(term: &str, vocabulary: &[String]) -> bool {
    vocabulary.iter().any(|t| t == term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Lang::Ru, "векторное пространство")]
    #[case(Lang::Ru, "базис, оболочка 123")]
    #[case(Lang::En, "vector space")]
    #[case(Lang::En, "basis, span 123")]
    fn matching_script_is_valid(#[case] lang: Lang, #[case] text: &str) {
        assert_eq!(classify_script(lang, text), Verdict::Valid);
    }

    #[test]
    fn latin_letter_fails_russian_text() {
        let verdict = classify_script(Lang::Ru, "векторноe пространство");
        assert_eq!(verdict.reason(), Some("field must contain only Cyrillic"));
    }

    #[test]
    fn cyrillic_letter_fails_english_text() {
        let verdict = classify_script(Lang::En, "vector spacе");
        assert_eq!(verdict.reason(), Some("field must contain only Latin"));
    }

    #[test]
    fn yo_counts_as_cyrillic() {
        assert!(!classify_script(Lang::En, "ёlk").is_valid());
        assert!(!classify_script(Lang::En, "Ёlk").is_valid());
    }

    #[test]
    fn empty_string_is_valid_for_both_languages() {
        assert_eq!(classify_script(Lang::Ru, ""), Verdict::Valid);
        assert_eq!(classify_script(Lang::En, ""), Verdict::Valid);
    }

    #[rstest]
    #[case("10.1000/xyz123")]
    #[case("10.1038/nphys1170")]
    #[case("ABCDEF")]
    #[case("abcdef")]
    #[case("")]
    fn accepted_identifiers(#[case] input: &str) {
        assert_eq!(validate_identifier(input), Verdict::Valid);
    }

    #[rstest]
    #[case("10.1000/xy;z")] // reserved character in suffix
    #[case("10.1038")] // no slash
    #[case("10.1038/")] // empty suffix
    #[case("/nphys1170")] // empty prefix
    #[case("10.1038/a/b")] // three parts
    #[case("11.1038/nphys1170")] // wrong registrant prefix
    #[case("10.abc/nphys1170")] // prefix digits missing
    #[case("10.1000/xyz 123")] // whitespace in suffix
    #[case("ABCDE")] // five letters
    #[case("ABCDEFG")] // seven letters
    #[case("ABC123")] // digits in short code
    #[case("not-an-id")]
    fn rejected_identifiers(#[case] input: &str) {
        assert_eq!(
            validate_identifier(input).reason(),
            Some("identifier is not a recognized format")
        );
    }

    fn article(lang: Lang) -> Article {
        Article {
            id: 1,
            name: String::new(),
            term: String::new(),
            terminology: String::new(),
            author: String::new(),
            key_words: String::new(),
            publication_year: 2000,
            url: String::new(),
            identifier: String::new(),
            usage_context: String::new(),
            math_apparatus: String::new(),
            solving: String::new(),
            interests: String::new(),
            lang,
        }
    }

    #[test]
    fn unset_fields_are_indistinguishable_from_valid_ones() {
        // Blank article: every verdict passes, presence does not.
        let blank = article(Lang::En);
        assert!(validate_article(&blank).all_valid());
        assert!(!is_present(&blank.name));
    }

    #[test]
    fn field_verdicts_report_failures_by_name() {
        let mut bad = article(Lang::En);
        bad.name = "пространство".to_string();
        bad.identifier = "nope".to_string();
        let verdicts = validate_article(&bad);
        assert!(!verdicts.all_valid());
        let failed: Vec<&str> = verdicts.failures().iter().map(|(f, _)| *f).collect();
        assert_eq!(failed, vec!["name", "identifier"]);
    }

    #[test]
    fn missing_fields_lists_empty_required_fields() {
        let new = NewArticle {
            name: "Vector Space".to_string(),
            term: "vector".to_string(),
            terminology: String::new(),
            author: "Halmos".to_string(),
            key_words: String::new(),
            publication_year: 1974,
            url: "https://example.org".to_string(),
            identifier: "ABCDEF".to_string(),
            usage_context: "x".to_string(),
            math_apparatus: "x".to_string(),
            solving: "x".to_string(),
            interests: "x".to_string(),
            lang: Lang::En,
        };
        assert_eq!(missing_fields(&new), vec!["terminology", "key_words"]);
    }

    #[test]
    fn term_vocabulary_membership() {
        let vocab = vec!["vector".to_string(), "basis".to_string()];
        assert!(term_in_vocabulary("basis", &vocab));
        assert!(!term_in_vocabulary("span", &vocab));
        assert!(!term_in_vocabulary("", &vocab));
    }
}
