use std::sync::Arc;

use fleetdeck_api::ApiClient;
use fleetdeck_api::types::{CreateUserDto, UpdateAppSettingsDto, UpdateUserDto};

use crate::error::CoreError;
use crate::model::{AppSettings, User};

/// Adapts the settings singleton and user-administration endpoints.
///
/// Settings are mutated wholesale via a full-object PUT, never partially;
/// callers fetch, edit, and resubmit the whole record.
#[derive(Clone)]
pub struct SettingsService {
    api: Arc<ApiClient>,
}

impl SettingsService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<AppSettings, CoreError> {
        let dto = self.api.get_settings().await?;
        Ok(AppSettings::from(dto))
    }

    pub async fn update(&self, settings: &AppSettings) -> Result<AppSettings, CoreError> {
        let dto = UpdateAppSettingsDto::from(settings);
        let updated = self.api.update_settings(&dto).await?;
        Ok(AppSettings::from(updated))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let dtos = self.api.list_users().await?;
        Ok(dtos.into_iter().map(User::from).collect())
    }

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: &str,
        is_active: bool,
    ) -> Result<User, CoreError> {
        let dto = CreateUserDto {
            email: email.to_owned(),
            password: password.to_owned(),
            role: role.to_owned(),
            is_active,
        };
        let created = self.api.create_user(&dto).await?;
        Ok(User::from(created))
    }

    pub async fn update_user(
        &self,
        id: &str,
        role: &str,
        is_active: bool,
    ) -> Result<User, CoreError> {
        let dto = UpdateUserDto {
            role: role.to_owned(),
            is_active,
        };
        let updated = self.api.update_user(id, &dto).await?;
        Ok(User::from(updated))
    }
}
