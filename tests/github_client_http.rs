//! HTTP-level tests for the GitHub client.
//!
//! A wiremock server stands in for the REST API. These cover request shape
//! (paths, headers, body) and how status codes map onto results, plus one
//! full run through `auto_approve` over real HTTP.

use env_auto_approve::auto_approve;
use env_auto_approve::error::AppError;
use env_auto_approve::models::{ExecutionOutcome, RunContext};
use env_auto_approve::services::github_client::{
    DeploymentsApi, GitHubClient, GitHubClientConfig, MembershipLookup,
};
use env_auto_approve::services::ActionsReporter;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PENDING_PATH: &str = "/repos/acme/web/actions/runs/1234/pending_deployments";

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(GitHubClientConfig {
        api_url: server.uri(),
        token: "ghs_test".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn run_for(actor: &str) -> RunContext {
    RunContext {
        owner: "acme".to_string(),
        repo: "web".to_string(),
        run_id: 1234,
        actor: actor.to_string(),
    }
}

fn pending_body() -> serde_json::Value {
    json!([
        {
            "environment": {"id": 1, "node_id": "EN_1", "name": "prod"},
            "wait_timer": 0,
            "current_user_can_approve": true,
            "reviewers": [
                {"type": "Team", "reviewer": {"id": 7, "name": "Ops", "slug": "ops"}},
                {"type": "User", "reviewer": {"id": 9, "login": "alice"}}
            ]
        }
    ])
}

#[tokio::test]
async fn test_pending_deployments_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PENDING_PATH))
        .and(header("authorization", "Bearer ghs_test"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending_body()))
        .expect(1)
        .mount(&server)
        .await;

    let deployments = client(&server)
        .pending_deployments(&run_for("alice"))
        .await
        .unwrap();

    assert_eq!(deployments.len(), 1);
    assert_eq!(deployments[0].environment.name, "prod");
    assert_eq!(deployments[0].reviewers.len(), 2);
}

#[tokio::test]
async fn test_error_status_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PENDING_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Resource not accessible by integration"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .pending_deployments(&run_for("alice"))
        .await
        .unwrap_err();

    match err {
        AppError::GitHubApi {
            message,
            status_code,
            endpoint,
        } => {
            assert_eq!(message, "Resource not accessible by integration");
            assert_eq!(status_code, Some(403));
            assert_eq!(endpoint.as_deref(), Some(PENDING_PATH));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PENDING_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .pending_deployments(&run_for("alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Authentication { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_team_membership_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/teams/ops/memberships/carol"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"url": "x", "role": "member", "state": "active"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/teams/ops/memberships/bob"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/teams/secret/memberships/carol"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.is_team_member("acme", "ops", "carol").await.unwrap());
    assert!(!client.is_team_member("acme", "ops", "bob").await.unwrap());
    assert!(client.is_team_member("acme", "secret", "carol").await.is_err());
}

#[tokio::test]
async fn test_any_success_status_counts_as_membership() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/teams/ops/memberships/carol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/teams/release/memberships/carol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"role": "member"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/teams/qa/memberships/carol"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.is_team_member("acme", "ops", "carol").await.unwrap());
    assert!(client.is_team_member("acme", "release", "carol").await.unwrap());
    assert!(client.is_team_member("acme", "qa", "carol").await.unwrap());
}

#[tokio::test]
async fn test_undecodable_success_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PENDING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>proxy</html>"),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .pending_deployments(&run_for("alice"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status_code(), Some(200));
    assert!(!env_auto_approve::fails_step(&Err(err), false));
}

#[tokio::test]
async fn test_approval_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PENDING_PATH))
        .and(body_json(json!({
            "environment_ids": [1, 3],
            "state": "approved",
            "comment": "looks good"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .approve_pending_deployments(&run_for("alice"), &[1, 3], "looks good")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_full_run_approves_team_member() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PENDING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/teams/ops/memberships/carol"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"role": "member", "state": "active"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PENDING_PATH))
        .and(body_json(json!({
            "environment_ids": [1],
            "state": "approved",
            "comment": "Auto-Approved by GitHub Action for environment(s) - prod"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join("step_summary.md");
    let mut reporter = ActionsReporter::new(Vec::new(), Some(summary.clone()));

    let outcome = auto_approve(&client(&server), &mut reporter, &run_for("carol"), "Prod")
        .await
        .unwrap();

    assert!(outcome.is_approved());
    let content = std::fs::read_to_string(&summary).unwrap();
    assert!(content.contains("Reviewer: carol"));
}

#[tokio::test]
async fn test_full_run_surfaces_approval_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PENDING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PENDING_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "Unprocessable"})))
        .mount(&server)
        .await;

    let mut reporter = ActionsReporter::new(Vec::new(), None);
    let err = auto_approve(&client(&server), &mut reporter, &run_for("alice"), "prod")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(422));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_full_run_not_found_makes_single_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PENDING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut reporter = ActionsReporter::new(Vec::new(), None);
    let outcome = auto_approve(&client(&server), &mut reporter, &run_for("alice"), "prod")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ExecutionOutcome::EnvironmentNotFound {
            environment: "prod".to_string()
        }
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
