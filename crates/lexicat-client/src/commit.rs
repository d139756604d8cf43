//! Commit driver: ties the edit-session state machine to the update
//! endpoint.
//!
//! `begin_commit` validates and marks the commit in flight; the external
//! update runs while the driver holds the aggregate exclusively, so no two
//! commits for the same aggregate can overlap.

use thiserror::Error;

use lexicat_domain::{ArticleDetail, ArticleUpdate};
use lexicat_session::{CommitError, EditSession, Session};

use crate::client::ApiClient;
use crate::error::ApiError;

/// The update side of the article repository, split out so the driver can
/// be exercised against a stub.
#[allow(async_fn_in_trait)] // single-threaded caller, no Send bound needed
pub trait UpdateArticles {
    async fn update_article(
        &self,
        article_id: i64,
        payload: &ArticleUpdate,
    ) -> Result<ArticleDetail, ApiError>;
}

impl UpdateArticles for ApiClient {
    async fn update_article(
        &self,
        article_id: i64,
        payload: &ArticleUpdate,
    ) -> Result<ArticleDetail, ApiError> {
        ApiClient::update_article(self, article_id, payload).await
    }
}

/// Why a commit did not land.
#[derive(Debug, Error)]
pub enum CommitFailure {
    /// Rejected locally before any request was issued: unresolved problems
    /// or invalid fields.
    #[error(transparent)]
    Rejected(#[from] CommitError),
    /// The backend turned the update down.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validate, push the update, and settle the aggregate. On backend failure
/// the aggregate stays in edit mode with the working copy intact.
pub async fn commit_session<S, R>(
    session: &mut EditSession<S>,
    repository: &R,
) -> Result<(), CommitFailure>
where
    S: Session,
    R: UpdateArticles,
{
    let article_id = session.article().id;
    let payload = session.begin_commit()?;
    match repository.update_article(article_id, &payload).await {
        Ok(detail) => {
            session.complete_commit(detail);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(article_id, error = %err, "article update failed");
            session.fail_commit();
            Err(CommitFailure::Api(err))
        }
    }
}
