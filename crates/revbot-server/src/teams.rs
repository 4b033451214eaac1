//! Team handlers.

use actix_web::{web, HttpResponse};
use revbot_core::use_cases::teams::{
    CreateTeamWithUsersInterface, DeactivateTeamAndReassignInterface, GetTeamWithMembersInterface,
    ListTeamsInterface,
};
use revbot_models::NewTeamMember;
use shaku::HasComponent;

use crate::{
    dto::{
        CreateTeamRequest, DeactivateTeamRequest, PageQuery, TeamJson, TeamQuery, TeamResponse,
        TeamsPage,
    },
    server::AppContext,
    Result,
};

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
pub(crate) async fn teams_create(
    ctx: web::Data<AppContext>,
    data: web::Json<CreateTeamRequest>,
) -> Result<HttpResponse> {
    let CreateTeamRequest { team_name, members } = data.into_inner();
    let members: Vec<NewTeamMember> = members.into_iter().map(Into::into).collect();

    let create_team_with_users: &dyn CreateTeamWithUsersInterface = ctx.core_module.resolve_ref();
    let team = create_team_with_users
        .run(&ctx.as_core_context(), &team_name, &members)
        .await?;

    Ok(HttpResponse::Created().json(TeamResponse { team: team.into() }))
}

#[tracing::instrument(skip_all, fields(team_name = query.team_name))]
pub(crate) async fn teams_get(
    ctx: web::Data<AppContext>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse> {
    let get_team_with_members: &dyn GetTeamWithMembersInterface = ctx.core_module.resolve_ref();
    let team = get_team_with_members
        .run(&ctx.as_core_context(), &query.team_name)
        .await?;

    Ok(HttpResponse::Ok().json(TeamJson::from(team)))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn teams_list(
    ctx: web::Data<AppContext>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let list_teams: &dyn ListTeamsInterface = ctx.core_module.resolve_ref();
    let page = list_teams
        .run(&ctx.as_core_context(), query.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(TeamsPage::from(page)))
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
pub(crate) async fn teams_deactivate(
    ctx: web::Data<AppContext>,
    data: web::Json<DeactivateTeamRequest>,
) -> Result<HttpResponse> {
    let deactivate_team_and_reassign: &dyn DeactivateTeamAndReassignInterface =
        ctx.core_module.resolve_ref();
    deactivate_team_and_reassign
        .run(&ctx.as_core_context(), &data.team_name)
        .await?;

    Ok(HttpResponse::Ok().finish())
}
