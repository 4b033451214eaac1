#![cfg(test)]

use actix_http::{Request, StatusCode};
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test,
    web::Data,
};
use pretty_assertions::assert_eq;
use revbot_config::Config;
use revbot_core::{
    use_cases::pulls::{MergePullRequestInterface, MockMergePullRequestInterface},
    CoreModule, DomainError,
};
use revbot_database_interface::DbService;
use revbot_database_tests::db_test_case;
use revbot_models::PullRequestStatus;
use revbot_server::{
    dto::{
        ErrorResponse, PullRequestResponse, PullRequestsPage, ReassignResponse, TeamJson,
        TeamMemberJson, TeamResponse, TeamsPage, UserResponse, UserReviewsResponse,
    },
    server::{build_actix_app, run_bot_server, AppContext},
};
use serde_json::{json, Value};

fn build_context(core_module: CoreModule, db_service: Box<dyn DbService>) -> AppContext {
    AppContext::new_with_adapters(Config::from_env_no_version(), core_module, db_service)
}

async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, req).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, value)
}

fn post(uri: &str, body: Value) -> Request {
    test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request()
}

fn get(uri: &str) -> Request {
    test::TestRequest::get().uri(uri).to_request()
}

fn error_code(body: Value) -> String {
    serde_json::from_value::<ErrorResponse>(body).unwrap().error.code
}

fn team_body(name: &str, members: &[&str]) -> Value {
    json!({
        "team_name": name,
        "members": members
            .iter()
            .map(|id| json!({"user_id": id, "username": format!("User {id}"), "is_active": true}))
            .collect::<Vec<_>>()
    })
}

#[actix_web::test]
async fn teams() {
    db_test_case("server_tests_teams", |db_service| async move {
        let app = test::init_service(build_actix_app(Data::new(build_context(
            CoreModule::builder().build(),
            db_service,
        ))))
        .await;

        let (status, body) =
            send(&app, post("/team/add", team_body("backend", &["u1", "u2"]))).await;
        assert_eq!(status, StatusCode::CREATED);
        let team: TeamResponse = serde_json::from_value(body)?;
        assert_eq!(
            team.team,
            TeamJson {
                team_name: "backend".into(),
                members: vec![
                    TeamMemberJson {
                        user_id: "u1".into(),
                        username: "User u1".into(),
                        is_active: true
                    },
                    TeamMemberJson {
                        user_id: "u2".into(),
                        username: "User u2".into(),
                        is_active: true
                    }
                ]
            }
        );

        let (status, body) = send(&app, post("/team/add", team_body("backend", &[]))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(body), "TEAM_EXISTS");

        let (status, body) = send(&app, post("/team/add", team_body("frontend", &["u1"]))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(body), "USER_EXISTS");

        let (status, body) = send(&app, get("/team/get?team_name=backend")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_value::<TeamJson>(body)?.members.len(), 2);

        let (status, body) = send(&app, get("/team/get?team_name=frontend")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_code(body), "NOT_FOUND");

        let (status, body) = send(&app, get("/team?page=0&page_size=500")).await;
        assert_eq!(status, StatusCode::OK);
        let page: TeamsPage = serde_json::from_value(body)?;
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.teams[0].team_name, "backend");

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn pull_requests() {
    db_test_case("server_tests_pull_requests", |db_service| async move {
        let app = test::init_service(build_actix_app(Data::new(build_context(
            CoreModule::builder().build(),
            db_service,
        ))))
        .await;

        send(&app, post("/team/add", team_body("backend", &["u1", "u2"]))).await;
        send(&app, post("/team/add", team_body("frontend", &["u3"]))).await;

        let (status, body) = send(
            &app,
            post(
                "/pullRequest/create",
                json!({"pull_request_id": "pr1", "pull_request_name": "Add search", "author_id": "u1"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let pr = serde_json::from_value::<PullRequestResponse>(body)?.pr;
        assert_eq!(pr.assigned_reviewers, vec!["u2"]);
        assert!(pr.need_more_reviewers);
        assert_eq!(pr.status, PullRequestStatus::Open);

        let (status, body) = send(
            &app,
            post(
                "/pullRequest/create",
                json!({"pull_request_id": "pr1", "pull_request_name": "Other", "author_id": "u1"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(body), "PR_EXISTS");

        let (status, body) = send(
            &app,
            post(
                "/pullRequest/assign",
                json!({"pull_request_id": "pr1", "new_reviewer_id": "u3"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let pr = serde_json::from_value::<PullRequestResponse>(body)?.pr;
        assert_eq!(pr.assigned_reviewers, vec!["u2", "u3"]);
        assert!(!pr.need_more_reviewers);

        let (status, body) = send(
            &app,
            post(
                "/pullRequest/assign",
                json!({"pull_request_id": "pr1", "new_reviewer_id": "u1"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(body), "NOT_ASSIGNED");

        let (status, body) = send(&app, get("/users/getReview?user_id=u3")).await;
        assert_eq!(status, StatusCode::OK);
        let reviews: UserReviewsResponse = serde_json::from_value(body)?;
        assert_eq!(reviews.user_id, "u3");
        assert_eq!(reviews.pull_requests[0].pull_request_id, "pr1");

        for _ in 0..2 {
            let (status, body) =
                send(&app, post("/pullRequest/merge", json!({"pull_request_id": "pr1"}))).await;
            assert_eq!(status, StatusCode::OK);
            let pr = serde_json::from_value::<PullRequestResponse>(body)?.pr;
            assert_eq!(pr.status, PullRequestStatus::Merged);
            assert!(pr.merged_at.is_some());
        }

        let (status, body) = send(
            &app,
            post(
                "/pullRequest/reassign",
                json!({"pull_request_id": "pr1", "old_user_id": "u2"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(body), "PR_MERGED");

        let (status, body) = send(&app, get("/pullRequest")).await;
        assert_eq!(status, StatusCode::OK);
        let page: PullRequestsPage = serde_json::from_value(body)?;
        assert_eq!(page.total_items, 1);
        assert_eq!(page.total_pages, 1);

        let (status, body) = send(
            &app,
            get("/pullRequest?page=9223372036854775807&page_size=100"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let page: PullRequestsPage = serde_json::from_value(body)?;
        assert!(page.pull_requests.is_empty());
        assert_eq!(page.total_items, 1);

        let (status, body) = send(&app, get("/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pull_requests"]["merged"], 1);
        assert_eq!(body["teams"]["most_active_team"]["team_name"], "backend");

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn reassign_and_deactivate() {
    db_test_case("server_tests_reassign_and_deactivate", |db_service| async move {
        let app = test::init_service(build_actix_app(Data::new(build_context(
            CoreModule::builder().build(),
            db_service,
        ))))
        .await;

        send(
            &app,
            post("/team/add", team_body("backend", &["u1", "u2", "u3", "u4"])),
        )
        .await;
        send(&app, post("/team/add", team_body("ops", &["o1", "o2"]))).await;

        let (_, body) = send(
            &app,
            post(
                "/pullRequest/create",
                json!({"pull_request_id": "pr1", "pull_request_name": "Add search", "author_id": "u1"}),
            ),
        )
        .await;
        let pr = serde_json::from_value::<PullRequestResponse>(body)?.pr;
        assert_eq!(pr.assigned_reviewers.len(), 2);

        // Only one teammate is neither the author nor a reviewer
        let old_reviewer = pr.assigned_reviewers[0].clone();
        let expected = ["u2", "u3", "u4"]
            .into_iter()
            .find(|id| !pr.assigned_reviewers.iter().any(|r| r == id))
            .unwrap();
        let (status, body) = send(
            &app,
            post(
                "/pullRequest/reassign",
                json!({"pull_request_id": "pr1", "old_user_id": old_reviewer}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reassignment: ReassignResponse = serde_json::from_value(body)?;
        assert_eq!(reassignment.replaced_by, expected);
        assert!(!reassignment.pr.assigned_reviewers.contains(&old_reviewer));

        let (status, body) = send(
            &app,
            post(
                "/pullRequest/reassign",
                json!({"pull_request_id": "pr1", "old_user_id": "o1"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_code(body), "NOT_FOUND");

        let (status, body) =
            send(&app, post("/team/deactivate", json!({"team_name": "backend"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let (_, body) = send(&app, get("/pullRequest")).await;
        let page: PullRequestsPage = serde_json::from_value(body)?;
        let mut reviewers = page.pull_requests[0].assigned_reviewers.clone();
        reviewers.sort();
        assert_eq!(reviewers, vec!["o1", "o2"]);

        let (status, body) = send(
            &app,
            post("/users/setIsActive", json!({"user_id": "u2", "is_active": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let user = serde_json::from_value::<UserResponse>(body)?.user;
        assert!(user.is_active);
        assert_eq!(user.team_name, "backend");

        let (status, body) = send(
            &app,
            post("/users/setIsActive", json!({"user_id": "nope", "is_active": true})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_code(body), "NOT_FOUND");

        let (status, body) =
            send(&app, post("/team/deactivate", json!({"team_name": "nope"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_code(body), "NOT_FOUND");

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn bad_requests() {
    db_test_case("server_tests_bad_requests", |db_service| async move {
        let app = test::init_service(build_actix_app(Data::new(build_context(
            CoreModule::builder().build(),
            db_service,
        ))))
        .await;

        let req = test::TestRequest::post()
            .uri("/pullRequest/create")
            .insert_header(("content-type", "application/json"))
            .set_payload("{")
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(body), "BAD_REQUEST");

        let (status, body) = send(&app, post("/pullRequest/merge", json!({"id": "pr1"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(body), "BAD_REQUEST");

        let (status, body) = send(&app, get("/team/get")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(body), "BAD_REQUEST");

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"database": true}));

        Ok(())
    })
    .await;
}

#[actix_web::test]
async fn internal_errors() {
    db_test_case("server_tests_internal_errors", |db_service| async move {
        let mut merge_pull_request = MockMergePullRequestInterface::new();
        merge_pull_request
            .expect_run()
            .once()
            .withf(|_, pull_request_id| pull_request_id == "pr1")
            .return_once(|_, _| Err(DomainError::StatusNotFound("MERGED".into())));

        let core_module = CoreModule::builder()
            .with_component_override::<dyn MergePullRequestInterface>(Box::new(merge_pull_request))
            .build();

        let app =
            test::init_service(build_actix_app(Data::new(build_context(core_module, db_service))))
                .await;

        let (status, body) =
            send(&app, post("/pullRequest/merge", json!({"pull_request_id": "pr1"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_code(body), "INTERNAL");

        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore]
async fn health() {
    const PORT: u16 = 50511;

    db_test_case("server_tests_health", |db_service| async move {
        let local_set = tokio::task::LocalSet::new();
        local_set
            .run_until(async move {
                let mut context = build_context(CoreModule::builder().build(), db_service);
                context.config.server.workers_count = Some(2);
                context.config.server.bind_ip = "127.0.0.1".into();
                context.config.server.bind_port = PORT;
                tokio::task::spawn_local(run_bot_server(context));

                let response = reqwest::get(format!("http://127.0.0.1:{PORT}/health"))
                    .await
                    .unwrap();

                assert_eq!(response.status(), reqwest::StatusCode::OK);
            })
            .await;

        Ok(())
    })
    .await;
}
