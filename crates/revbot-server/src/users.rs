//! User handlers.

use actix_web::{web, HttpResponse};
use revbot_core::use_cases::users::{ListUserReviewsInterface, SetUserActiveInterface};
use shaku::HasComponent;

use crate::{
    dto::{SetIsActiveRequest, UserQuery, UserResponse, UserReviewsResponse},
    server::AppContext,
    Result,
};

#[tracing::instrument(skip_all, fields(user_id = data.user_id, is_active = data.is_active))]
pub(crate) async fn users_set_is_active(
    ctx: web::Data<AppContext>,
    data: web::Json<SetIsActiveRequest>,
) -> Result<HttpResponse> {
    let set_user_active: &dyn SetUserActiveInterface = ctx.core_module.resolve_ref();
    let user = set_user_active
        .run(&ctx.as_core_context(), &data.user_id, data.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse { user: user.into() }))
}

#[tracing::instrument(skip_all, fields(user_id = query.user_id))]
pub(crate) async fn users_reviews(
    ctx: web::Data<AppContext>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
    let pull_requests = list_user_reviews
        .run(&ctx.as_core_context(), &query.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(UserReviewsResponse {
        user_id: query.into_inner().user_id,
        pull_requests: pull_requests.into_iter().map(Into::into).collect(),
    }))
}
