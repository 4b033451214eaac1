use std::str::FromStr;

use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::teams::CreateTeamWithUsersInterface;
use revbot_models::NewTeamMember;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Team member, written `id:name`, or `id:name:inactive`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MemberArg(NewTeamMember);

impl FromStr for MemberArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid member '{s}', expected 'id:name' or 'id:name:inactive'");

        let mut parts = s.split(':');
        let id = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let name = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let is_active = match parts.next() {
            None => true,
            Some("inactive") => false,
            Some(_) => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(NewTeamMember::new(id, name, is_active)))
    }
}

/// Create a team with its members
#[derive(Parser)]
pub(crate) struct TeamAddCommand {
    /// Team name
    team_name: String,

    /// Team member (repeatable)
    #[arg(long = "member")]
    members: Vec<MemberArg>,
}

#[async_trait]
impl Command for TeamAddCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let members: Vec<NewTeamMember> = self.members.into_iter().map(|m| m.0).collect();

        let create_team_with_users: &dyn CreateTeamWithUsersInterface =
            ctx.core_module.resolve_ref();
        let team = create_team_with_users
            .run(&ctx.as_core_context(), &self.team_name, &members)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}' created with {} member(s).",
            team.team.name,
            team.members.len()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_core::DomainError;
    use revbot_database_memory::MemoryDb;

    use super::*;
    use crate::testutils::{test_command_on, try_test_command, CommandContextTest};

    #[test]
    fn parse_member() {
        assert_eq!(
            MemberArg::from_str("u1:Alice").unwrap(),
            MemberArg(NewTeamMember::new("u1", "Alice", true))
        );
        assert_eq!(
            MemberArg::from_str("u2:Bob:inactive").unwrap(),
            MemberArg(NewTeamMember::new("u2", "Bob", false))
        );
        assert!(MemberArg::from_str("u1").is_err());
        assert!(MemberArg::from_str(":Alice").is_err());
        assert!(MemberArg::from_str("u1:Alice:away").is_err());
        assert!(MemberArg::from_str("u1:Alice:inactive:x").is_err());
    }

    #[tokio::test]
    async fn run() {
        let db = MemoryDb::new();

        assert_eq!(
            test_command_on(
                &db,
                &["teams", "add", "backend", "--member", "u1:Alice", "--member", "u2:Bob:inactive"]
            )
            .await,
            "Team 'backend' created with 2 member(s).\n"
        );

        let (result, output) = try_test_command(
            CommandContextTest::with_db(db.clone()),
            &["teams", "add", "backend"],
        )
        .await;
        assert!(output.is_empty());
        assert!(matches!(
            result.unwrap_err().downcast_ref::<DomainError>(),
            Some(DomainError::TeamAlreadyExists(_))
        ));
    }
}
