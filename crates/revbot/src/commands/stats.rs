use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::stats::GetStatsInterface;
use shaku::HasComponent;

use super::{Command, CommandContext};
use crate::Result;

/// Show assignment statistics
#[derive(Parser)]
pub(crate) struct StatsCommand;

#[async_trait]
impl Command for StatsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_stats: &dyn GetStatsInterface = ctx.core_module.resolve_ref();
        let stats = get_stats.run(&ctx.as_core_context()).await?;

        let mut writer = ctx.writer.write().await;
        writeln!(
            writer,
            "Pull requests: {} ({} open, {} merged)",
            stats.pull_requests.total, stats.pull_requests.open, stats.pull_requests.merged
        )?;
        writeln!(
            writer,
            "Users: {} active, {} inactive",
            stats.users.active, stats.users.inactive
        )?;
        writeln!(writer, "Teams: {}", stats.teams.total)?;
        if let Some(team) = stats.teams.most_active_team {
            writeln!(
                writer,
                "Most active team: {} ({} pull request(s))",
                team.team_name, team.pull_requests_count
            )?;
        }

        if !stats.users.most_busy_users.is_empty() {
            writeln!(writer, "Busiest reviewers:")?;
            for user in stats.users.most_busy_users {
                writeln!(
                    writer,
                    "- {} ({}): {} review(s)",
                    user.user_id, user.user_name, user.assignments
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_database_memory::MemoryDb;

    use crate::testutils::{test_command, test_command_on, CommandContextTest};

    #[tokio::test]
    async fn empty() {
        assert_eq!(
            test_command(CommandContextTest::new(), &["stats"]).await,
            "Pull requests: 0 (0 open, 0 merged)\nUsers: 0 active, 0 inactive\nTeams: 0\n"
        );
    }

    #[tokio::test]
    async fn run() {
        let db = MemoryDb::new();
        test_command_on(
            &db,
            &["teams", "add", "backend", "--member", "u1:Alice", "--member", "u2:Bob"],
        )
        .await;
        test_command_on(&db, &["pull-requests", "create", "pr1", "Add search", "u1"]).await;

        assert_eq!(
            test_command_on(&db, &["stats"]).await,
            concat!(
                "Pull requests: 1 (1 open, 0 merged)\n",
                "Users: 2 active, 0 inactive\n",
                "Teams: 1\n",
                "Most active team: backend (1 pull request(s))\n",
                "Busiest reviewers:\n",
                "- u2 (Bob): 1 review(s)\n"
            )
        );
    }
}
