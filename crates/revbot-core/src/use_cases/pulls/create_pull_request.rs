use async_trait::async_trait;
use revbot_database_interface::{DbTransaction, PullRequestStore, UserStore};
use revbot_models::{PullRequest, PullRequestStatus};
use shaku::{Component, Interface};
use tracing::warn;

use super::resolve_status_id;
use crate::{
    use_cases::reviews::select_reviewers::pick_initial_reviewers, CoreContext, DomainError,
    Result, UnitOfWork,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        title: &str,
        author_id: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        title: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = self
            .create(uow.store(), pull_request_id, title, author_id)
            .await;

        uow.finish(result).await
    }
}

impl CreatePullRequest {
    async fn create(
        &self,
        tx: &mut dyn DbTransaction,
        pull_request_id: &str,
        title: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        let author = match tx.users_get(author_id).await? {
            Some(author) => author,
            None => {
                warn!(author_id = %author_id, "Unknown pull request author");
                return Err(DomainError::AuthorNotFound(author_id.into()));
            }
        };

        let reviewer_ids: Vec<String> = pick_initial_reviewers(tx, &author)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        let open_status_id = resolve_status_id(tx, PullRequestStatus::Open).await?;
        tx.pull_requests_create(
            pull_request_id,
            title,
            author_id,
            open_status_id,
            PullRequest::needs_more_reviewers_for(reviewer_ids.len()),
        )
        .await?;

        if !reviewer_ids.is_empty() {
            tx.pull_requests_assign_reviewers(pull_request_id, &reviewer_ids)
                .await?;
        }

        Ok(tx.pull_requests_get_expect(pull_request_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_database_interface::{DbService, TeamStore};
    use revbot_database_memory::MemoryDb;
    use revbot_models::PullRequestStatusEntry;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn single_teammate() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", true), ("u2", true)]).await;

        let pr = CreatePullRequest
            .run(&ctx.as_context(), "pr1", "Add search", "u1")
            .await
            .unwrap();

        assert_eq!(pr.reviewers, vec!["u2"]);
        assert!(pr.needs_more_reviewers);
        assert_eq!(pr.status, PullRequestStatus::Open);
    }

    #[tokio::test]
    async fn two_reviewers_among_active_teammates() {
        let ctx = CoreContextTest::new();
        ctx.create_team(
            "backend",
            &[("u1", true), ("u2", true), ("u3", false), ("u4", true), ("u5", true)],
        )
        .await;
        ctx.create_team("frontend", &[("u6", true)]).await;

        let pr = CreatePullRequest
            .run(&ctx.as_context(), "pr1", "Add search", "u1")
            .await
            .unwrap();

        assert_eq!(pr.reviewers.len(), 2);
        assert!(!pr.needs_more_reviewers);
        for reviewer in &pr.reviewers {
            assert!(["u2", "u4", "u5"].contains(&&reviewer[..]));
        }
    }

    #[tokio::test]
    async fn alone_in_team() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", true), ("u2", false)]).await;

        let pr = CreatePullRequest
            .run(&ctx.as_context(), "pr1", "Add search", "u1")
            .await
            .unwrap();

        assert!(pr.reviewers.is_empty());
        assert!(pr.needs_more_reviewers);
    }

    #[tokio::test]
    async fn unknown_author() {
        let ctx = CoreContextTest::new();

        assert!(matches!(
            CreatePullRequest
                .run(&ctx.as_context(), "pr1", "Add search", "nope")
                .await,
            Err(DomainError::AuthorNotFound(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_rolls_back() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", true), ("u2", true)]).await;

        CreatePullRequest
            .run(&ctx.as_context(), "pr1", "Add search", "u1")
            .await
            .unwrap();

        assert!(matches!(
            CreatePullRequest
                .run(&ctx.as_context(), "pr1", "Other", "u1")
                .await,
            Err(DomainError::PullRequestAlreadyExists(_))
        ));
        assert!(matches!(
            CreatePullRequest
                .run(&ctx.as_context(), "pr2", "Add search", "u1")
                .await,
            Err(DomainError::PullRequestAlreadyExists(_))
        ));

        let mut tx = ctx.db_service.begin().await.unwrap();
        assert_eq!(tx.pull_requests_get("pr2").await.unwrap(), None);
        assert_eq!(tx.teams_all(10, 0).await.unwrap().1, 1);
    }

    #[tokio::test]
    async fn missing_open_status() {
        let mut ctx = CoreContextTest::new();
        ctx.db_service = MemoryDb::new().with_status_catalog(vec![PullRequestStatusEntry {
            id: 2,
            name: "MERGED".into(),
        }]);
        ctx.create_team("backend", &[("u1", true)]).await;

        assert!(matches!(
            CreatePullRequest
                .run(&ctx.as_context(), "pr1", "Add search", "u1")
                .await,
            Err(DomainError::StatusNotFound(_))
        ));
    }
}
