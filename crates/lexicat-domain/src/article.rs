//! Article records and their wire-facing payload shapes.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::problem::Problem;

/// Earliest publication year the catalog accepts.
pub const MIN_PUBLICATION_YEAR: i32 = 1900;

/// Language a record is written in. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ru,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }
}

/// A cataloged record describing a term's usage in a source publication.
///
/// `id`, `lang`, and `publication_year` are write-once: the update path
/// never carries them (see [`ArticleUpdate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub name: String,
    pub term: String,
    pub terminology: String,
    pub author: String,
    pub key_words: String,
    pub publication_year: i32,
    pub url: String,
    pub identifier: String,
    pub usage_context: String,
    pub math_apparatus: String,
    pub solving: String,
    pub interests: String,
    pub lang: Lang,
}

/// Compact row returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleShort {
    pub id: i64,
    pub name: String,
    pub lang: Lang,
    pub user_id: i64,
    pub url: String,
}

/// Creation payload: every field of [`Article`] except the server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    pub name: String,
    pub term: String,
    pub terminology: String,
    pub author: String,
    pub key_words: String,
    pub publication_year: i32,
    pub url: String,
    pub identifier: String,
    pub usage_context: String,
    pub math_apparatus: String,
    pub solving: String,
    pub interests: String,
    pub lang: Lang,
}

/// Server response to a successful creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedArticle {
    pub id: i64,
}

/// Full record as served by the detail endpoint: the article, its owner,
/// and the attached problem ledger. Problems never outlive the article and
/// are always fetched together with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub user_id: i64,
    pub problems: Vec<Problem>,
}

/// Update payload sent on commit.
///
/// The immutable fields (`id`, `lang`, `publication_year`) and the owner id
/// are stripped at the type level rather than filtered at the call site.
/// The problem list rides along so resolved states reach the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub name: String,
    pub term: String,
    pub terminology: String,
    pub author: String,
    pub key_words: String,
    pub url: String,
    pub identifier: String,
    pub usage_context: String,
    pub math_apparatus: String,
    pub solving: String,
    pub interests: String,
    pub problems: Vec<Problem>,
}

impl From<&ArticleDetail> for ArticleUpdate {
    fn from(detail: &ArticleDetail) -> Self {
        let article = &detail.article;
        ArticleUpdate {
            name: article.name.clone(),
            term: article.term.clone(),
            terminology: article.terminology.clone(),
            author: article.author.clone(),
            key_words: article.key_words.clone(),
            url: article.url.clone(),
            identifier: article.identifier.clone(),
            usage_context: article.usage_context.clone(),
            math_apparatus: article.math_apparatus.clone(),
            solving: article.solving.clone(),
            interests: article.interests.clone(),
            problems: detail.problems.clone(),
        }
    }
}

/// Normalize a source URL to its stored form with a fixed `https://` prefix.
/// Idempotent: an already-prefixed input is not double-prefixed.
pub fn normalize_url(url: &str) -> String {
    let suffix = url.strip_prefix("https://").unwrap_or(url);
    format!("https://{suffix}")
}

/// The editable surface of a stored URL: everything after the fixed prefix.
pub fn display_url(url: &str) -> &str {
    url.strip_prefix("https://").unwrap_or(url)
}

/// Latest publication year the catalog accepts (one past the current year).
pub fn max_publication_year() -> i32 {
    Utc::now().year() + 1
}

/// Range check applied at creation; the year is immutable afterwards.
pub fn publication_year_in_range(year: i32) -> bool {
    (MIN_PUBLICATION_YEAR..=max_publication_year()).contains(&year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_detail() -> ArticleDetail {
        ArticleDetail {
            article: Article {
                id: 7,
                name: "Vector Space".to_string(),
                term: "vector".to_string(),
                terminology: "linear algebra".to_string(),
                author: "Halmos".to_string(),
                key_words: "basis, span".to_string(),
                publication_year: 1974,
                url: "https://example.org/halmos".to_string(),
                identifier: "10.1000/xyz123".to_string(),
                usage_context: "textbook".to_string(),
                math_apparatus: "axioms".to_string(),
                solving: "none".to_string(),
                interests: "students".to_string(),
                lang: Lang::En,
            },
            user_id: 42,
            problems: vec![Problem {
                id: 1,
                text: "typo in key words".to_string(),
                is_solved: false,
            }],
        }
    }

    #[test]
    fn lang_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Lang::Ru).unwrap(), "\"ru\"");
        assert_eq!(serde_json::to_string(&Lang::En).unwrap(), "\"en\"");
        let lang: Lang = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Lang::En);
    }

    #[test]
    fn detail_serializes_flat_json() {
        let json = serde_json::to_value(sample_detail()).unwrap();
        // The article fields sit at the top level next to user_id/problems.
        assert_eq!(json["name"], "Vector Space");
        assert_eq!(json["user_id"], 42);
        assert_eq!(json["problems"][0]["is_solved"], false);
    }

    #[test]
    fn update_payload_strips_immutable_fields() {
        let update = ArticleUpdate::from(&sample_detail());
        let json = serde_json::to_value(&update).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("lang"));
        assert!(!obj.contains_key("publication_year"));
        assert!(!obj.contains_key("user_id"));
        assert!(obj.contains_key("problems"));
    }

    #[test]
    fn url_normalization_is_idempotent() {
        assert_eq!(normalize_url("example.org/a"), "https://example.org/a");
        assert_eq!(
            normalize_url("https://example.org/a"),
            "https://example.org/a"
        );
        assert_eq!(display_url("https://example.org/a"), "example.org/a");
    }

    #[test]
    fn publication_year_bounds() {
        assert!(publication_year_in_range(1900));
        assert!(publication_year_in_range(Utc::now().year() + 1));
        assert!(!publication_year_in_range(1899));
        assert!(!publication_year_in_range(Utc::now().year() + 2));
    }
}
