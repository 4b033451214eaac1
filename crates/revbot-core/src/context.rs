use revbot_config::Config;
use revbot_database_interface::DbService;

use crate::CoreModule;

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use revbot_config::Config;
    use revbot_database_memory::MemoryDb;
    use revbot_models::{NewTeamMember, PullRequest, TeamWithMembers};

    use crate::{
        use_cases::{
            pulls::{create_pull_request::CreatePullRequest, CreatePullRequestInterface},
            teams::{create_team_with_users::CreateTeamWithUsers, CreateTeamWithUsersInterface},
        },
        CoreContext, CoreModule,
    };

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub db_service: MemoryDb,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            Self {
                config: Config::from_env_no_version(),
                core_module: CoreModule::builder().build(),
                db_service: MemoryDb::new(),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                db_service: &self.db_service,
            }
        }

        /// Creates a team whose members are named after their IDs.
        #[allow(dead_code)]
        pub async fn create_team(
            &self,
            name: &str,
            members: &[(&str, bool)],
        ) -> TeamWithMembers {
            let members: Vec<_> = members
                .iter()
                .map(|(id, active)| NewTeamMember::new(*id, format!("User {id}"), *active))
                .collect();

            CreateTeamWithUsers
                .run(&self.as_context(), name, &members)
                .await
                .unwrap()
        }

        #[allow(dead_code)]
        pub async fn create_pull_request(&self, id: &str, author_id: &str) -> PullRequest {
            CreatePullRequest
                .run(&self.as_context(), id, &format!("Title {id}"), author_id)
                .await
                .unwrap()
        }
    }
}
