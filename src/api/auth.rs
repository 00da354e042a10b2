use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::client::ApiClient;
use super::error::{ApiError, Result};
use crate::session::{AdminSession, UserProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl ApiClient {
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        self.send_json(Method::POST, "/auth/register", request).await
    }

    /// Form-encoded, as the token endpoint expects.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_credentials("/auth/login", &form).await
    }

    pub async fn current_user(&self) -> Result<UserProfile> {
        self.get_json("/auth/me").await
    }

    pub async fn update_user(&self, update: &UserUpdate) -> Result<UserProfile> {
        self.send_json(Method::PUT, "/auth/me", update).await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<MessageResponse> {
        let body = PasswordChange {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.send_json(Method::POST, "/auth/change-password", &body).await
    }

    /// Logs in and loads the profile with the new token. The session store
    /// is written only once the user is confirmed as an admin; any failure
    /// leaves the previous session as it was.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<AdminSession> {
        let token = self.login(username, password).await?;
        let body = self
            .send_credentials(
                self.bare_request(Method::GET, "/auth/me")
                    .bearer_auth(&token.access_token),
            )
            .await?;
        let user: UserProfile = serde_json::from_str(&body)?;
        if !user.is_admin() {
            return Err(ApiError::Forbidden(format!(
                "{} is not an administrator",
                user.username
            )));
        }

        self.session().store_login(&token.access_token, &user)?;
        info!(username = %user.username, "admin signed in");
        Ok(AdminSession {
            token: token.access_token,
            user,
        })
    }

    pub fn sign_out(&self) -> Result<()> {
        self.session().clear()?;
        info!("signed out");
        Ok(())
    }
}
