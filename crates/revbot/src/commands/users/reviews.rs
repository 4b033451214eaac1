use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::users::ListUserReviewsInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List pull requests reviewed by a user
#[derive(Parser)]
pub(crate) struct UserReviewsCommand {
    /// User ID
    user_id: String,
}

#[async_trait]
impl Command for UserReviewsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
        let pull_requests = list_user_reviews
            .run(&ctx.as_core_context(), &self.user_id)
            .await?;

        let mut writer = ctx.writer.write().await;
        if pull_requests.is_empty() {
            writeln!(writer, "No review assigned to '{}'.", self.user_id)?;
        }
        for pr in pull_requests {
            writeln!(
                writer,
                "- {} '{}' by {} [{}]",
                pr.id, pr.title, pr.author_id, pr.status
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_database_memory::MemoryDb;

    use crate::testutils::test_command_on;

    #[tokio::test]
    async fn run() {
        let db = MemoryDb::new();
        test_command_on(
            &db,
            &["teams", "add", "backend", "--member", "u1:Alice", "--member", "u2:Bob"],
        )
        .await;
        test_command_on(&db, &["pull-requests", "create", "pr1", "Add search", "u1"]).await;
        test_command_on(&db, &["pull-requests", "merge", "pr1"]).await;

        assert_eq!(
            test_command_on(&db, &["users", "reviews", "u2"]).await,
            "- pr1 'Add search' by u1 [MERGED]\n"
        );
        assert_eq!(
            test_command_on(&db, &["users", "reviews", "u1"]).await,
            "No review assigned to 'u1'.\n"
        );
    }
}
