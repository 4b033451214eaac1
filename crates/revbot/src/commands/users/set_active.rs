use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::users::SetUserActiveInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Set user activity
#[derive(Parser)]
pub(crate) struct UserSetActiveCommand {
    /// User ID
    user_id: String,

    /// Activity
    #[arg(action = clap::ArgAction::Set)]
    is_active: bool,
}

#[async_trait]
impl Command for UserSetActiveCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let set_user_active: &dyn SetUserActiveInterface = ctx.core_module.resolve_ref();
        let user = set_user_active
            .run(&ctx.as_core_context(), &self.user_id, self.is_active)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "User '{}' is now {}.",
            user.id,
            if user.is_active { "active" } else { "inactive" }
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
        test_command_on(&db, &["teams", "add", "backend", "--member", "u1:Alice"]).await;

        assert_eq!(
            test_command_on(&db, &["users", "set-active", "u1", "false"]).await,
            "User 'u1' is now inactive.\n"
        );
        assert_eq!(
            test_command_on(&db, &["teams", "show", "backend"]).await,
            "Team 'backend':\n- u1 (Alice) [inactive]\n"
        );
        assert_eq!(
            test_command_on(&db, &["users", "set-active", "u1", "true"]).await,
            "User 'u1' is now active.\n"
        );
    }
}
