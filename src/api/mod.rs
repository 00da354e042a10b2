//! Typed client for the admin API: auth, metrics and raw game data.

pub mod auth;
pub mod client;
pub mod error;
pub mod game;
pub mod metrics;

pub use client::ApiClient;
pub use error::ApiError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::router::{Navigator, Route};
    use crate::server::{DEFAULT_ADMIN_PASSWORD, test_support};
    use crate::session::{SessionStore, UserProfile};

    fn client_for(base_url: String) -> (ApiClient, Navigator) {
        let config = DashboardConfig {
            base_url,
            ..DashboardConfig::default()
        };
        let (navigator, _rx) = Navigator::new(Route::Overview);
        let client = ApiClient::new(&config, SessionStore::in_memory(), navigator.clone()).unwrap();
        (client, navigator)
    }

    #[tokio::test]
    async fn admin_sign_in_stores_the_session() {
        let (base, handle) = test_support::start().await;
        let (client, _) = client_for(base);

        let session = client.sign_in("admin", DEFAULT_ADMIN_PASSWORD).await.unwrap();
        assert!(session.user.is_admin());
        assert_eq!(client.session().admin_session(), Some(session));

        let overview = client.overview().await.unwrap();
        assert_eq!(overview.alerts.len(), 3);
        handle.abort();
    }

    #[tokio::test]
    async fn unauthorized_response_clears_session_and_redirects() {
        let (base, handle) = test_support::start().await;
        let (client, navigator) = client_for(base);
        let admin = UserProfile {
            id: Some(1),
            username: "admin".to_string(),
            email: None,
            full_name: None,
            role: "admin".to_string(),
            is_active: true,
        };
        client.session().store_login("stale-token", &admin).unwrap();

        let err = client.world_simulation().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(client.session().access_token().is_none());
        assert!(client.session().user().is_none());
        assert_eq!(navigator.current(), Route::Login);
        handle.abort();
    }

    fn stored_admin(client: &ApiClient, username: &str, token: &str) {
        let profile = UserProfile {
            id: Some(7),
            username: username.to_string(),
            email: None,
            full_name: None,
            role: "admin".to_string(),
            is_active: true,
        };
        client.session().store_login(token, &profile).unwrap();
    }

    #[tokio::test]
    async fn failed_profile_lookup_keeps_the_previous_session() {
        use axum::{Json, Router, http::StatusCode, routing::{get, post}};

        let broken_me = Router::new()
            .route(
                "/api/v1/auth/login",
                post(|| async {
                    Json(serde_json::json!({ "access_token": "tok-B", "token_type": "bearer" }))
                }),
            )
            .route(
                "/api/v1/auth/me",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable") }),
            );
        let (base, handle) = test_support::serve(broken_me).await;
        let (client, _) = client_for(base);
        stored_admin(&client, "alice", "tok-A");

        let err = client.sign_in("bob", "hunter22").await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 500, .. }));

        let session = client.session().admin_session().unwrap();
        assert_eq!(session.token, "tok-A");
        assert_eq!(session.user.username, "alice");
        handle.abort();
    }

    #[tokio::test]
    async fn wrong_password_reports_the_server_detail() {
        let (base, handle) = test_support::start().await;
        let (client, navigator) = client_for(base);
        stored_admin(&client, "alice", "tok-A");

        let err = client.sign_in("admin", "not-the-password").await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect username or password");
        assert_eq!(client.session().access_token().as_deref(), Some("tok-A"));
        assert_eq!(navigator.current(), Route::Overview);
        handle.abort();
    }

    #[tokio::test]
    async fn non_admin_sign_in_is_refused() {
        let (base, handle) = test_support::start().await;
        let (client, _) = client_for(base);
        client
            .register(&auth::RegisterRequest {
                username: "wanderer".to_string(),
                email: "wanderer@titan.local".to_string(),
                password: "long-enough".to_string(),
                full_name: None,
            })
            .await
            .unwrap();

        let err = client.sign_in("wanderer", "long-enough").await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert!(!client.session().is_authenticated());
        assert!(client.session().access_token().is_none());
        handle.abort();
    }

    #[tokio::test]
    async fn every_metrics_and_game_endpoint_decodes() {
        let (base, handle) = test_support::start().await;
        let (client, _) = client_for(base);
        client.sign_in("admin", DEFAULT_ADMIN_PASSWORD).await.unwrap();

        assert!(!client.world_simulation().await.unwrap().recent_events.is_empty());
        assert_eq!(client.player_metrics().await.unwrap().top_players.len(), 10);
        assert!(client.server_metrics().await.unwrap().total_requests > 0);
        assert_eq!(client.battle_metrics().await.unwrap().recent_battles.len(), 10);
        assert!(client.sessions().await.unwrap().is_array());
        assert!(client.events().await.unwrap().is_array());
        assert!(client.battles().await.unwrap().is_array());
        handle.abort();
    }

    #[tokio::test]
    async fn profile_and_password_updates() {
        let (base, handle) = test_support::start().await;
        let (client, _) = client_for(base);
        client.sign_in("admin", DEFAULT_ADMIN_PASSWORD).await.unwrap();

        let updated = client
            .update_user(&auth::UserUpdate {
                email: None,
                full_name: Some("Keeper of Titans".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(updated.full_name.as_deref(), Some("Keeper of Titans"));
        assert_eq!(client.current_user().await.unwrap().display_name(), "Keeper of Titans");

        let err = client.change_password("wrong", "whatever-new").await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 400, .. }));
        client
            .change_password(DEFAULT_ADMIN_PASSWORD, "brand-new-pass")
            .await
            .unwrap();
        assert!(client.login("admin", "brand-new-pass").await.is_ok());
        handle.abort();
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let (client, _) = client_for("http://127.0.0.1:9".to_string());
        let err = client.overview().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(err.is_transient());
    }
}
