// client_test.rs

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;
    use stitch_admin::{AdminClientBuilder, Credentials, StitchAdminClient, StitchError};
    use std::sync::Arc;

    fn create_test_client(server: &ServerGuard) -> Arc<StitchAdminClient> {
        AdminClientBuilder::new().url(server.url()).build().unwrap()
    }

    async fn setup_auth_mock(server: &mut ServerGuard) {
        server
            .mock("POST", "/api/v3/auth/providers/api-key/login")
            .match_header("Authorization", Matcher::Missing)
            .match_body(Matcher::Json(json!({"key": "test-key"})))
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"access_token":"access-1","refresh_token":"refresh-1","user_id":"u1","device_id":"d1"}"#)
            .create_async()
            .await;
    }

    async fn login(client: &StitchAdminClient) {
        client.authenticate(Credentials::api_key("test-key")).await.unwrap();
    }

    #[tokio::test]
    async fn test_authenticate() {
        let mut server = Server::new_async().await;
        setup_auth_mock(&mut server).await;

        let client = create_test_client(&server);
        let user_id = client.authenticate(Credentials::api_key("test-key")).await.unwrap();

        assert_eq!(user_id, "u1");
        let session = client.session().unwrap();
        assert_eq!(session.access_token, "access-1");
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(session.device_id.as_deref(), Some("d1"));
    }

    #[tokio::test]
    async fn test_authenticate_rejected() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v3/auth/providers/local-userpass/login")
            .with_status(401)
            .with_body(r#"{"error":"invalid username/password"}"#)
            .create_async()
            .await;

        let client = create_test_client(&server);
        let result = client.authenticate(Credentials::user_pass("admin", "wrong")).await;
        assert!(matches!(result, Err(StitchError::AuthError(_))));
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_once() {
        let mut server = Server::new_async().await;
        setup_auth_mock(&mut server).await;

        let expired = server
            .mock("GET", "/api/v3/groups/g1/apps")
            .match_header("Authorization", "Bearer access-1")
            .with_status(401)
            .with_body(r#"{"error":"invalid session","error_code":"InvalidSession"}"#)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/api/v3/auth/session")
            .match_header("Authorization", "Bearer refresh-1")
            .with_status(201)
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"access_token":"access-2"}"#)
            .expect(1)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/api/v3/groups/g1/apps")
            .match_header("Authorization", "Bearer access-2")
            .with_status(200)
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_body(r#"[{"_id":"a1","name":"planner"}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_test_client(&server);
        login(&client).await;
        let apps = client.apps("g1").list(None).await.unwrap().into_json().unwrap();

        assert_eq!(apps[0]["name"], "planner");
        assert_eq!(client.session().unwrap().access_token, "access-2");
        assert_eq!(client.session().unwrap().refresh_token.as_deref(), Some("refresh-1"));
        expired.assert_async().await;
        refresh.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session() {
        let mut server = Server::new_async().await;
        setup_auth_mock(&mut server).await;

        server.mock("GET", "/api/v3/groups/g1/apps").with_status(401).create_async().await;
        server.mock("POST", "/api/v3/auth/session").with_status(401).create_async().await;

        let client = create_test_client(&server);
        login(&client).await;
        let result = client.apps("g1").list(None).await;

        assert!(matches!(result, Err(StitchError::AuthError(_))));
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout() {
        let mut server = Server::new_async().await;
        setup_auth_mock(&mut server).await;
        let logout = server
            .mock("DELETE", "/api/v3/auth/session")
            .match_header("Authorization", "Bearer refresh-1")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let client = create_test_client(&server);
        login(&client).await;
        client.logout().await.unwrap();

        assert!(!client.is_authenticated());
        logout.assert_async().await;
    }

    #[tokio::test]
    async fn test_logout_clears_session_when_server_refuses() {
        let mut server = Server::new_async().await;
        setup_auth_mock(&mut server).await;
        server.mock("DELETE", "/api/v3/auth/session").with_status(500).create_async().await;

        let client = create_test_client(&server);
        login(&client).await;
        assert!(client.logout().await.is_ok());
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_auth_providers_without_session() {
        let mut server = Server::new_async().await;
        let providers = server
            .mock("GET", "/api/v3/auth/providers")
            .match_header("Authorization", Matcher::Missing)
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(r#"[{"type":"api-key"},{"type":"local-userpass"}]"#)
            .create_async()
            .await;

        let client = create_test_client(&server);
        let result = client.get_auth_providers().await.unwrap();

        assert_eq!(result.as_array().unwrap().len(), 2);
        providers.assert_async().await;
    }

    #[tokio::test]
    async fn test_session_file_survives_restart() {
        let mut server = Server::new_async().await;
        setup_auth_mock(&mut server).await;
        server
            .mock("GET", "/api/v3/auth/profile")
            .match_header("Authorization", "Bearer access-1")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"user_id":"u1","type":"normal"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let session_file = dir.path().join("admin-session.json");

        let first = AdminClientBuilder::new().url(server.url()).session_file(&session_file).build().unwrap();
        login(&first).await;
        drop(first);

        let second = AdminClientBuilder::new().url(server.url()).session_file(&session_file).build().unwrap();
        assert!(second.is_authenticated());
        let profile = second.user_profile().await.unwrap().into_json().unwrap();
        assert_eq!(profile["user_id"], "u1");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = AdminClientBuilder::new().url("http://127.0.0.1:1").timeout_secs(5).build().unwrap();
        let result = client.get_auth_providers().await;
        assert!(matches!(result, Err(ref e) if e.is_retryable()), "{:?}", result);
    }
}
