//! Article repository, term vocabulary, and problem reporting endpoints.

use serde::Serialize;

use lexicat_domain::{
    ArticleDetail, ArticleShort, ArticleUpdate, CreatedArticle, Lang, NewArticle, Problem,
};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Optional conjunctive filter for the article list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArticleFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
}

#[derive(Debug, Serialize)]
struct NewProblemRequest<'a> {
    problem: &'a str,
}

impl ApiClient {
    /// Submit a new article. All fields are required; the backend assigns
    /// the id.
    pub async fn create_article(&self, article: &NewArticle) -> Result<CreatedArticle, ApiError> {
        let url = self.endpoint("api/articles/")?;
        tracing::debug!(name = %article.name, "creating article");
        let response = self.execute(|http| http.post(url.clone()).json(article)).await?;
        Ok(response.json().await?)
    }

    /// Fetch one article with its owner and problem ledger.
    pub async fn get_article(&self, article_id: i64) -> Result<ArticleDetail, ApiError> {
        let url = self.endpoint(&format!("api/articles/{article_id}/"))?;
        let response = self.execute(|http| http.get(url.clone())).await?;
        Ok(response.json().await?)
    }

    /// Push an update for an owned article. The payload type carries no
    /// `id`, `lang`, or `publication_year`.
    pub async fn update_article(
        &self,
        article_id: i64,
        payload: &ArticleUpdate,
    ) -> Result<ArticleDetail, ApiError> {
        let url = self.endpoint(&format!("api/articles/{article_id}/"))?;
        tracing::debug!(article_id, "updating article");
        let response = self.execute(|http| http.put(url.clone()).json(payload)).await?;
        Ok(response.json().await?)
    }

    /// List catalog rows, optionally filtered.
    pub async fn list_articles(&self, filter: &ArticleFilter) -> Result<Vec<ArticleShort>, ApiError> {
        let url = self.endpoint("api/articles/")?;
        let response = self
            .execute(|http| http.get(url.clone()).query(filter))
            .await?;
        Ok(response.json().await?)
    }

    /// List the signed-in user's own articles.
    pub async fn list_my_articles(&self) -> Result<Vec<ArticleShort>, ApiError> {
        let url = self.endpoint("api/articles/my/")?;
        let response = self.execute(|http| http.get(url.clone())).await?;
        Ok(response.json().await?)
    }

    /// The controlled term vocabulary for one language.
    pub async fn get_terms(&self, lang: Lang) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint("api/articles/terms")?;
        let response = self
            .execute(|http| http.get(url.clone()).query(&[("lang", lang.as_str())]))
            .await?;
        Ok(response.json().await?)
    }

    /// Report a data-quality problem against someone else's article.
    pub async fn report_problem(&self, article_id: i64, text: &str) -> Result<Problem, ApiError> {
        let url = self.endpoint(&format!("api/articles/{article_id}/"))?;
        tracing::debug!(article_id, "reporting problem");
        let response = self
            .execute(|http| http.post(url.clone()).json(&NewProblemRequest { problem: text }))
            .await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_serializes_to_no_parameters() {
        let filter = ArticleFilter::default();
        let json = serde_json::to_value(&filter).unwrap();
        assert!(json.as_object().unwrap().is_empty());
    }

    #[test]
    fn filter_keeps_only_the_set_fields() {
        let filter = ArticleFilter {
            author: Some("Halmos".to_string()),
            publication_year: Some(1974),
            ..Default::default()
        };
        let json = serde_json::to_value(&filter).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["author"], "Halmos");
        assert_eq!(obj["publication_year"], 1974);
    }
}
