// Login pass-through against a stubbed new Cognito user pool
use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::net::TcpListener;
use userbridge::handlers::configure_services;
use userbridge::models::Credential;
use userbridge::testing::constants::{NEW_CLIENT_ID, TEST_PASSWORD, TEST_USERNAME};
use userbridge::testing::TestFixtures;
use userbridge::{CognitoClient, LoginPassThrough};
use wiremock::matchers::{body_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pass_through(endpoint: &str) -> LoginPassThrough {
    let settings = TestFixtures::settings_for_endpoint(endpoint);
    let client = CognitoClient::from_settings(&settings.new_provider, reqwest::Client::new())
        .expect("new provider should be configured");
    LoginPassThrough::new(client)
}

async fn mount_new_pool(server: &MockServer) {
    Mock::given(method("POST"))
        .and(header(
            "X-Amz-Target",
            "AWSCognitoIdentityProviderService.InitiateAuth",
        ))
        .and(body_json(json!({
            "AuthParameters": {"USERNAME": TEST_USERNAME, "PASSWORD": TEST_PASSWORD},
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": NEW_CLIENT_ID
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(TestFixtures::initiate_auth_success("new-pool-id-token")),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(TestFixtures::initiate_auth_not_authorized()),
        )
        .with_priority(10)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_forward_success_relays_body() {
    let server = MockServer::start().await;
    mount_new_pool(&server).await;

    let outcome = pass_through(&server.uri())
        .forward(&Credential::new(TEST_USERNAME, TEST_PASSWORD))
        .await;
    assert_eq!(outcome.status, 200);
    assert_eq!(
        outcome.body,
        TestFixtures::initiate_auth_success("new-pool-id-token")
    );
}

#[tokio::test]
async fn test_forward_failure_relays_raw_error() {
    let server = MockServer::start().await;
    mount_new_pool(&server).await;

    let outcome = pass_through(&server.uri())
        .forward(&Credential::new(TEST_USERNAME, "wrong"))
        .await;
    assert_eq!(outcome.status, 500);
    assert_eq!(outcome.body, TestFixtures::initiate_auth_not_authorized());
}

#[tokio::test]
async fn test_forward_unreachable_provider() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let outcome = pass_through(&uri)
        .forward(&Credential::new(TEST_USERNAME, TEST_PASSWORD))
        .await;
    assert_eq!(outcome.status, 500);
    assert!(outcome.body["message"].is_string());
}

/// Answers one request with 200 headers and then closes the connection
/// before the promised body has been sent
fn spawn_truncating_pool() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let address = listener.local_addr().expect("local address");
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.ends_with(b"}") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&chunk[..n]),
            }
        }
        let _ = stream.write_all(
            b"HTTP/1.1 200 OK\r\n\
              Content-Type: application/x-amz-json-1.1\r\n\
              Content-Length: 512\r\n\r\n\
              {\"AuthenticationResult\":{\"IdToken\":",
        );
        let _ = stream.flush();
    });
    format!("http://{address}/")
}

#[tokio::test]
async fn test_forward_truncated_success_body_is_failure() {
    let endpoint = spawn_truncating_pool();

    let outcome = pass_through(&endpoint)
        .forward(&Credential::new(TEST_USERNAME, TEST_PASSWORD))
        .await;
    assert_eq!(outcome.status, 500);
    assert!(!outcome.is_success());
    assert!(outcome.body["message"].is_string());
}

#[actix_web::test]
async fn test_login_endpoint() {
    let server = MockServer::start().await;
    mount_new_pool(&server).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pass_through(&server.uri())))
            .configure(configure_services),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": TEST_USERNAME, "password": TEST_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["AuthenticationResult"]["IdToken"],
        "new-pool-id-token"
    );

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": TEST_USERNAME, "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["__type"], "NotAuthorizedException");
}
