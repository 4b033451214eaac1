use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::ListPullRequestsInterface;
use revbot_models::Pagination;
use shaku::HasComponent;

use super::format_reviewers;
use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List pull requests, newest first
#[derive(Parser)]
pub(crate) struct PullRequestListCommand {
    /// Page number
    #[arg(long)]
    page: Option<i64>,

    /// Page size
    #[arg(long)]
    page_size: Option<i64>,
}

#[async_trait]
impl Command for PullRequestListCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list_pull_requests: &dyn ListPullRequestsInterface = ctx.core_module.resolve_ref();
        let page = list_pull_requests
            .run(
                &ctx.as_core_context(),
                Pagination::new(self.page, self.page_size),
            )
            .await?;

        let mut writer = ctx.writer.write().await;
        if page.total_items == 0 {
            writeln!(writer, "No pull request known.")?;
            return Ok(());
        }

        for pr in &page.items {
            writeln!(
                writer,
                "- {} '{}' by {} [{}] reviewers: {}",
                pr.id,
                pr.title,
                pr.author_id,
                pr.status,
                format_reviewers(pr)
            )?;
        }
        writeln!(
            writer,
            "Page {}/{} ({} pull request(s))",
            page.page, page.total_pages, page.total_items
        )?;

        Ok(())
    }
}
