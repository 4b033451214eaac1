use async_trait::async_trait;
use revbot_database_interface::{DbTransaction, PullRequestStore, TeamStore};
use shaku::{Component, Interface};
use tracing::{debug, info};

use crate::{
    use_cases::reviews::select_reviewers::pick_cascade_replacement, CoreContext, Result,
    UnitOfWork,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerReplacement {
    pub pull_request_id: String,
    pub old_reviewer_id: String,
    pub new_reviewer_id: String,
}

/// What a team deactivation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDeactivation {
    pub team_name: String,
    pub deactivated_user_ids: Vec<String>,
    pub replacements: Vec<ReviewerReplacement>,
    /// Merged pull requests keep their reviewers.
    pub skipped_merged_pull_request_ids: Vec<String>,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DeactivateTeamAndReassignInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<TeamDeactivation>;
}

#[derive(Component)]
#[shaku(interface = DeactivateTeamAndReassignInterface)]
pub(crate) struct DeactivateTeamAndReassign;

#[async_trait]
impl DeactivateTeamAndReassignInterface for DeactivateTeamAndReassign {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<TeamDeactivation> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = self.deactivate(uow.store(), team_name).await;

        uow.finish(result).await
    }
}

impl DeactivateTeamAndReassign {
    async fn deactivate(
        &self,
        tx: &mut dyn DbTransaction,
        team_name: &str,
    ) -> Result<TeamDeactivation> {
        let deactivated = tx.teams_deactivate_members(team_name).await?;
        let mut summary = TeamDeactivation {
            team_name: team_name.into(),
            deactivated_user_ids: deactivated.into_iter().map(|u| u.id).collect(),
            ..Default::default()
        };

        if summary.deactivated_user_ids.is_empty() {
            debug!(team_name = %team_name, "No active member to deactivate");
            return Ok(summary);
        }

        for user_id in &summary.deactivated_user_ids {
            for pr in tx.pull_requests_list_by_reviewer(user_id).await? {
                if pr.is_merged() {
                    debug!(
                        pull_request_id = %pr.id,
                        reviewer_id = %user_id,
                        "Skipping merged pull request"
                    );
                    summary.skipped_merged_pull_request_ids.push(pr.id);
                    continue;
                }

                // Reload, a previous replacement may have changed the reviewers
                let pr = tx.pull_requests_get_for_update_expect(&pr.id).await?;
                let replacement =
                    pick_cascade_replacement(tx, &pr, &summary.deactivated_user_ids).await?;
                tx.pull_requests_replace_reviewer(&pr.id, user_id, &replacement.id)
                    .await?;

                summary.replacements.push(ReviewerReplacement {
                    pull_request_id: pr.id,
                    old_reviewer_id: user_id.clone(),
                    new_reviewer_id: replacement.id,
                });
            }
        }

        info!(
            team_name = %team_name,
            deactivated = summary.deactivated_user_ids.len(),
            replacements = summary.replacements.len(),
            "Team deactivated"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_database_interface::{DbService, UserStore};

    use super::*;
    use crate::{
        context::tests::CoreContextTest,
        use_cases::pulls::{
            assign_reviewer::AssignReviewer, merge_pull_request::MergePullRequest,
            AssignReviewerInterface, MergePullRequestInterface,
        },
        DomainError,
    };

    #[tokio::test]
    async fn reassigns_open_reviews() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u2", true)]).await;
        ctx.create_team("other", &[("a", true), ("c", true)]).await;
        ctx.create_team("ops", &[("d", true)]).await;

        let pr = ctx.create_pull_request("pr5", "a").await;
        assert_eq!(pr.reviewers, vec!["c"]);
        AssignReviewer
            .run(&ctx.as_context(), "pr5", "u2")
            .await
            .unwrap();

        let summary = DeactivateTeamAndReassign
            .run(&ctx.as_context(), "backend")
            .await
            .unwrap();
        assert_eq!(summary.deactivated_user_ids, vec!["u2"]);
        assert_eq!(
            summary.replacements,
            vec![ReviewerReplacement {
                pull_request_id: "pr5".into(),
                old_reviewer_id: "u2".into(),
                new_reviewer_id: "d".into(),
            }]
        );

        let mut tx = ctx.db_service.begin().await.unwrap();
        let pr = tx.pull_requests_get_expect("pr5").await.unwrap();
        assert_eq!(pr.reviewers, vec!["c", "d"]);
        assert!(!pr.needs_more_reviewers);
        assert!(!tx.users_get_expect("u2").await.unwrap().is_active);
    }

    #[tokio::test]
    async fn both_reviewers_deactivated() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", true), ("u2", true), ("u3", true)])
            .await;
        ctx.create_team("other", &[("x", true), ("y", true)]).await;
        let pr = ctx.create_pull_request("pr1", "u1").await;
        assert_eq!(pr.reviewers.len(), 2);

        let summary = DeactivateTeamAndReassign
            .run(&ctx.as_context(), "backend")
            .await
            .unwrap();
        assert_eq!(summary.deactivated_user_ids, vec!["u1", "u2", "u3"]);
        assert_eq!(summary.replacements.len(), 2);

        let mut tx = ctx.db_service.begin().await.unwrap();
        let mut reviewers = tx.pull_requests_get_expect("pr1").await.unwrap().reviewers;
        reviewers.sort();
        assert_eq!(reviewers, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn no_active_members() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", false)]).await;

        let summary = DeactivateTeamAndReassign
            .run(&ctx.as_context(), "backend")
            .await
            .unwrap();
        assert_eq!(
            summary,
            TeamDeactivation {
                team_name: "backend".into(),
                ..Default::default()
            }
        );

        let empty = ctx.create_team("empty", &[]).await;
        assert!(empty.members.is_empty());
        assert!(DeactivateTeamAndReassign
            .run(&ctx.as_context(), "empty")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn unknown_team() {
        let ctx = CoreContextTest::new();

        assert!(matches!(
            DeactivateTeamAndReassign
                .run(&ctx.as_context(), "nope")
                .await,
            Err(DomainError::TeamNotFound(_))
        ));
    }

    #[tokio::test]
    async fn merged_reviews_are_kept() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u2", true)]).await;
        ctx.create_team("other", &[("a", true)]).await;
        ctx.create_team("ops", &[("d", true)]).await;
        ctx.create_pull_request("pr1", "a").await;
        AssignReviewer
            .run(&ctx.as_context(), "pr1", "u2")
            .await
            .unwrap();
        MergePullRequest
            .run(&ctx.as_context(), "pr1")
            .await
            .unwrap();

        let summary = DeactivateTeamAndReassign
            .run(&ctx.as_context(), "backend")
            .await
            .unwrap();
        assert!(summary.replacements.is_empty());
        assert_eq!(summary.skipped_merged_pull_request_ids, vec!["pr1"]);

        let mut tx = ctx.db_service.begin().await.unwrap();
        assert_eq!(
            tx.pull_requests_get_expect("pr1").await.unwrap().reviewers,
            vec!["u2"]
        );
    }

    #[tokio::test]
    async fn failure_rolls_back_everything() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", true), ("u2", true)])
            .await;
        ctx.create_team("other", &[("a", true)]).await;
        ctx.create_pull_request("pr1", "a").await;
        AssignReviewer
            .run(&ctx.as_context(), "pr1", "u2")
            .await
            .unwrap();

        // Nobody outside of the team can replace u2
        assert!(matches!(
            DeactivateTeamAndReassign
                .run(&ctx.as_context(), "backend")
                .await,
            Err(DomainError::NoMoreReviewersToReassign(_))
        ));

        let mut tx = ctx.db_service.begin().await.unwrap();
        assert!(tx.users_get_expect("u1").await.unwrap().is_active);
        assert!(tx.users_get_expect("u2").await.unwrap().is_active);
        assert_eq!(
            tx.pull_requests_get_expect("pr1").await.unwrap().reviewers,
            vec!["u2"]
        );
    }
}
