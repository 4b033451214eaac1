//! Server module.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer, ResponseError,
};
use revbot_config::Config;
use revbot_core::{CoreContext, CoreModule};
use revbot_database_interface::DbService;
use revbot_database_pg::{DbPool, PostgresDb};
use tracing::info;

use crate::{
    health::health_check_route,
    pulls::{
        pull_requests_assign, pull_requests_create, pull_requests_list, pull_requests_merge,
        pull_requests_reassign,
    },
    stats::stats_get,
    teams::{teams_create, teams_deactivate, teams_get, teams_list},
    users::{users_reviews, users_set_is_active},
    Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Database adapter.
    pub db_service: Box<dyn DbService>,
}

impl AppContext {
    /// Create new app context.
    pub fn new(config: Config, core_module: CoreModule, pool: DbPool) -> Self {
        Self {
            config,
            core_module,
            db_service: Box::new(PostgresDb::new(pool)),
        }
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        db_service: Box<dyn DbService>,
    ) -> Self {
        Self {
            config,
            core_module,
            db_service,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(Logger::default())
        .service(
            web::scope("/team")
                .route("", web::get().to(teams_list))
                .route("/add", web::post().to(teams_create))
                .route("/get", web::get().to(teams_get))
                .route("/deactivate", web::post().to(teams_deactivate)),
        )
        .service(
            web::scope("/users")
                .route("/setIsActive", web::post().to(users_set_is_active))
                .route("/getReview", web::get().to(users_reviews)),
        )
        .service(
            web::scope("/pullRequest")
                .route("", web::get().to(pull_requests_list))
                .route("/create", web::post().to(pull_requests_create))
                .route("/assign", web::post().to(pull_requests_assign))
                .route("/reassign", web::post().to(pull_requests_reassign))
                .route("/merge", web::post().to(pull_requests_merge)),
        )
        .route("/stats", web::get().to(stats_get))
        .route("/health", web::get().to(health_check_route))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            // Display Bad Request response on invalid JSON data
            error::InternalError::from_response(
                "",
                ServerError::BadRequest(err.to_string()).error_response(),
            )
            .into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            error::InternalError::from_response(
                "",
                ServerError::BadRequest(err.to_string()).error_response(),
            )
            .into()
        }))
}

/// Run bot server.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting server",
    );

    run_bot_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_bot_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();

    let mut server = HttpServer::new(move || build_actix_app(context.clone()));

    if let Some(workers) = cloned_context.config.server.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
