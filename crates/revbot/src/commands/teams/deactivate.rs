use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::teams::DeactivateTeamAndReassignInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Deactivate every member of a team and move their open reviews to other users
#[derive(Parser)]
pub(crate) struct TeamDeactivateCommand {
    /// Team name
    team_name: String,
}

#[async_trait]
impl Command for TeamDeactivateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let deactivate_team_and_reassign: &dyn DeactivateTeamAndReassignInterface =
            ctx.core_module.resolve_ref();
        let summary = deactivate_team_and_reassign
            .run(&ctx.as_core_context(), &self.team_name)
            .await?;

        let mut writer = ctx.writer.write().await;
        writeln!(
            writer,
            "Team '{}' deactivated: {} user(s), {} review(s) moved.",
            summary.team_name,
            summary.deactivated_user_ids.len(),
            summary.replacements.len()
        )?;
        for replacement in summary.replacements {
            writeln!(
                writer,
                "- {}: {} -> {}",
                replacement.pull_request_id,
                replacement.old_reviewer_id,
                replacement.new_reviewer_id
            )?;
        }
        for pull_request_id in summary.skipped_merged_pull_request_ids {
            writeln!(writer, "- {}: merged, kept", pull_request_id)?;
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
        test_command_on(&db, &["teams", "add", "backend", "--member", "u2:Bob"]).await;
        test_command_on(
            &db,
            &["teams", "add", "other", "--member", "a:Ann", "--member", "c:Cid"],
        )
        .await;
        test_command_on(&db, &["teams", "add", "ops", "--member", "d:Dan"]).await;
        test_command_on(&db, &["pull-requests", "create", "pr5", "Fix login", "a"]).await;
        test_command_on(&db, &["pull-requests", "assign", "pr5", "u2"]).await;

        assert_eq!(
            test_command_on(&db, &["teams", "deactivate", "backend"]).await,
            "Team 'backend' deactivated: 1 user(s), 1 review(s) moved.\n- pr5: u2 -> d\n"
        );
        assert_eq!(
            test_command_on(&db, &["teams", "deactivate", "backend"]).await,
            "Team 'backend' deactivated: 0 user(s), 0 review(s) moved.\n"
        );
    }
}
