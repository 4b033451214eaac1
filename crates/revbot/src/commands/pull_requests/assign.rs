use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::AssignReviewerInterface;
use shaku::HasComponent;

use super::format_reviewers;
use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Add a reviewer to a pull request
#[derive(Parser)]
pub(crate) struct PullRequestAssignCommand {
    /// Pull request ID
    pull_request_id: String,

    /// Reviewer ID
    reviewer_id: String,
}

#[async_trait]
impl Command for PullRequestAssignCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let assign_reviewer: &dyn AssignReviewerInterface = ctx.core_module.resolve_ref();
        let pr = assign_reviewer
            .run(
                &ctx.as_core_context(),
                &self.pull_request_id,
                &self.reviewer_id,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Reviewer '{}' assigned to pull request '{}', reviewers: {}.",
            self.reviewer_id,
            pr.id,
            format_reviewers(&pr)
        )?;

        Ok(())
    }
}
