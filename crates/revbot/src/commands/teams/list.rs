use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::teams::ListTeamsInterface;
use revbot_models::Pagination;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List teams, newest first
#[derive(Parser)]
pub(crate) struct TeamListCommand {
    /// Page number
    #[arg(long)]
    page: Option<i64>,

    /// Page size
    #[arg(long)]
    page_size: Option<i64>,
}

#[async_trait]
impl Command for TeamListCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list_teams: &dyn ListTeamsInterface = ctx.core_module.resolve_ref();
        let page = list_teams
            .run(
                &ctx.as_core_context(),
                Pagination::new(self.page, self.page_size),
            )
            .await?;

        let mut writer = ctx.writer.write().await;
        if page.total_items == 0 {
            writeln!(writer, "No team known.")?;
            return Ok(());
        }

        for team in &page.items {
            writeln!(writer, "- {}", team.name)?;
        }
        writeln!(
            writer,
            "Page {}/{} ({} team(s))",
            page.page, page.total_pages, page.total_items
        )?;

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
        assert_eq!(test_command_on(&db, &["teams", "list"]).await, "No team known.\n");

        for team in ["backend", "frontend", "ops"] {
            test_command_on(&db, &["teams", "add", team]).await;
        }

        assert_eq!(
            test_command_on(&db, &["teams", "list", "--page-size", "2"]).await,
            "- ops\n- frontend\nPage 1/2 (3 team(s))\n"
        );
        assert_eq!(
            test_command_on(&db, &["teams", "list", "--page", "2", "--page-size", "2"]).await,
            "- backend\nPage 2/2 (3 team(s))\n"
        );
    }
}
