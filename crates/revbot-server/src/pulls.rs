//! Pull request handlers.

use actix_web::{web, HttpResponse};
use revbot_core::use_cases::pulls::{
    AssignReviewerInterface, CreatePullRequestInterface, ListPullRequestsInterface,
    MergePullRequestInterface, ReassignReviewerInterface,
};
use shaku::HasComponent;

use crate::{
    dto::{
        AssignReviewerRequest, CreatePullRequestRequest, MergePullRequestRequest, PageQuery,
        PullRequestResponse, PullRequestsPage, ReassignResponse, ReassignReviewerRequest,
    },
    server::AppContext,
    Result,
};

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    author_id = data.author_id
))]
pub(crate) async fn pull_requests_create(
    ctx: web::Data<AppContext>,
    data: web::Json<CreatePullRequestRequest>,
) -> Result<HttpResponse> {
    let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    let pr = create_pull_request
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.pull_request_name,
            &data.author_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(PullRequestResponse { pr: pr.into() }))
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    new_reviewer_id = data.new_reviewer_id
))]
pub(crate) async fn pull_requests_assign(
    ctx: web::Data<AppContext>,
    data: web::Json<AssignReviewerRequest>,
) -> Result<HttpResponse> {
    let assign_reviewer: &dyn AssignReviewerInterface = ctx.core_module.resolve_ref();
    let pr = assign_reviewer
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.new_reviewer_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(PullRequestResponse { pr: pr.into() }))
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    old_user_id = data.old_user_id
))]
pub(crate) async fn pull_requests_reassign(
    ctx: web::Data<AppContext>,
    data: web::Json<ReassignReviewerRequest>,
) -> Result<HttpResponse> {
    let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
    let reassignment = reassign_reviewer
        .run(&ctx.as_core_context(), &data.pull_request_id, &data.old_user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ReassignResponse::from(reassignment)))
}

#[tracing::instrument(skip_all, fields(pull_request_id = data.pull_request_id))]
pub(crate) async fn pull_requests_merge(
    ctx: web::Data<AppContext>,
    data: web::Json<MergePullRequestRequest>,
) -> Result<HttpResponse> {
    let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    let pr = merge_pull_request
        .run(&ctx.as_core_context(), &data.pull_request_id)
        .await?;

    Ok(HttpResponse::Ok().json(PullRequestResponse { pr: pr.into() }))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn pull_requests_list(
    ctx: web::Data<AppContext>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let list_pull_requests: &dyn ListPullRequestsInterface = ctx.core_module.resolve_ref();
    let page = list_pull_requests
        .run(&ctx.as_core_context(), query.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(PullRequestsPage::from(page)))
}
