use actix_web::{web, HttpResponse};
use revbot_core::use_cases::stats::GetStatsInterface;
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[tracing::instrument(skip_all)]
pub(crate) async fn stats_get(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let get_stats: &dyn GetStatsInterface = ctx.core_module.resolve_ref();
    let stats = get_stats.run(&ctx.as_core_context()).await?;

    Ok(HttpResponse::Ok().json(stats))
}
