use async_trait::async_trait;
use revbot_database_interface::UserStore;
use revbot_models::User;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SetUserActiveInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str, is_active: bool)
        -> Result<User>;
}

#[derive(Component)]
#[shaku(interface = SetUserActiveInterface)]
pub(crate) struct SetUserActive;

#[async_trait]
impl SetUserActiveInterface for SetUserActive {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
        is_active: bool,
    ) -> Result<User> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = uow
            .store()
            .users_set_active(user_id, is_active)
            .await
            .map_err(Into::into);

        if result.is_ok() {
            info!(user_id = %user_id, is_active = is_active, "User activity changed");
        }

        uow.finish(result).await
    }
}
