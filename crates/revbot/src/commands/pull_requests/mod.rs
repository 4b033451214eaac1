//! Pull request commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use revbot_models::PullRequest;

use super::{Command, CommandContext};
use crate::Result;

mod assign;
mod create;
mod list;
mod merge;
mod reassign;

use self::{
    assign::PullRequestAssignCommand, create::PullRequestCreateCommand,
    list::PullRequestListCommand, merge::PullRequestMergeCommand,
    reassign::PullRequestReassignCommand,
};

/// Manage pull requests
#[derive(Parser)]
pub(crate) struct PullRequestCommand {
    #[clap(subcommand)]
    inner: PullRequestSubCommand,
}

#[async_trait]
impl Command for PullRequestCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum PullRequestSubCommand {
    Create(PullRequestCreateCommand),
    Assign(PullRequestAssignCommand),
    Reassign(PullRequestReassignCommand),
    Merge(PullRequestMergeCommand),
    List(PullRequestListCommand),
}

#[async_trait]
impl Command for PullRequestSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Create(sub) => sub.execute(ctx).await,
            Self::Assign(sub) => sub.execute(ctx).await,
            Self::Reassign(sub) => sub.execute(ctx).await,
            Self::Merge(sub) => sub.execute(ctx).await,
            Self::List(sub) => sub.execute(ctx).await,
        }
    }
}

fn format_reviewers(pr: &PullRequest) -> String {
    if pr.reviewers.is_empty() {
        "none".into()
    } else {
        pr.reviewers.join(", ")
    }
}
