// ABOUTME: Admin identity service with lookups, password handling and the save lifecycle
// ABOUTME: Wires repository, password hasher, clock and identity config together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Admin Identity Service
//!
//! Resolves identities (by id, username or reset token), checks passwords
//! and runs the validated save lifecycle:
//!
//! 1. synchronous scenario rules ([`validate_form`])
//! 2. uniqueness of username, email and mobile against storage
//! 3. the before-save hook (auth key, reset token and password hash for a
//!    new record; re-hash on edit when a password was submitted)
//! 4. `created_at` / `updated_at` from the injected clock
//! 5. the write itself, where a unique index violation caused by a
//!    concurrent writer comes back as the same field error as step 2

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::labels::attribute_label;
use super::validation::validate_form;
use crate::config::IdentityConfig;
use crate::constants::labels;
use crate::database::repositories::{AdminRepository, AdminRepositoryImpl};
use crate::database::{AdminUniqueField, Database, DatabaseError};
use crate::errors::{AppError, AppResult, ValidationErrors};
use crate::logging::AppLogger;
use crate::models::{Admin, AdminForm, AdminStatus, Scenario, Sex};
use crate::security::password::{hash_password, verify_password, BcryptHasher, PasswordHasher};
use crate::security::tokens;
use crate::utils::{Clock, SystemClock};

/// Identity component for administrator accounts
#[derive(Clone)]
pub struct AdminIdentityService {
    repository: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    config: IdentityConfig,
}

impl AdminIdentityService {
    /// Assemble a service from explicit collaborators
    #[must_use]
    pub fn new(
        repository: Arc<dyn AdminRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        config: IdentityConfig,
    ) -> Self {
        Self {
            repository,
            hasher,
            clock,
            config,
        }
    }

    /// Production wiring: SQLite repository, bcrypt at the configured cost,
    /// wall clock
    #[must_use]
    pub fn from_database(db: Database, config: IdentityConfig) -> Self {
        Self::new(
            Arc::new(AdminRepositoryImpl::new(db)),
            Arc::new(BcryptHasher::new(config.bcrypt_cost)),
            Arc::new(SystemClock),
            config,
        )
    }

    /// Identity settings in use
    #[must_use]
    pub const fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// Active account by primary key
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails
    pub async fn find_identity(&self, id: i64) -> AppResult<Option<Admin>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Alias of [`Self::find_identity`]
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Admin>> {
        self.find_identity(id).await
    }

    /// Bearer access tokens are not an identity source for admins
    ///
    /// # Errors
    ///
    /// Always returns `OperationNotSupported`
    pub fn find_identity_by_access_token(&self, _token: &str) -> AppResult<Option<Admin>> {
        Err(AppError::not_supported("findIdentityByAccessToken"))
    }

    /// Active account by username
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<Admin>> {
        Ok(self.repository.find_by_username(username).await?)
    }

    /// Active account holding a still-valid reset token
    ///
    /// Expired or malformed tokens return `None` without touching storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails
    pub async fn find_by_password_reset_token(&self, token: &str) -> AppResult<Option<Admin>> {
        if !self.is_password_reset_token_valid(token) {
            debug!("Rejected expired or malformed password reset token");
            return Ok(None);
        }
        Ok(self.repository.find_by_password_reset_token(token).await?)
    }

    /// Whether `token` is non-empty and issued no longer than the configured
    /// expiry ago
    #[must_use]
    pub fn is_password_reset_token_valid(&self, token: &str) -> bool {
        tokens::is_password_reset_token_valid(
            token,
            self.config.password_reset_token_expire,
            self.clock.now(),
        )
    }

    /// Check a plaintext password against the account's stored hash
    pub async fn validate_password(&self, admin: &Admin, password: &str) -> bool {
        verify_password(
            Arc::clone(&self.hasher),
            password.to_owned(),
            admin.password_hash.clone(),
        )
        .await
    }

    /// Replace the account's hash with a freshly salted hash of `password`
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails
    pub async fn set_password(&self, admin: &mut Admin, password: &str) -> AppResult<()> {
        admin.password_hash = hash_password(Arc::clone(&self.hasher), password.to_owned()).await?;
        Ok(())
    }

    /// Assign a reset token stamped with the current time
    pub fn generate_password_reset_token(&self, admin: &mut Admin) {
        admin.generate_password_reset_token(self.clock.now());
    }

    /// Resolve an active account by username and password
    ///
    /// Unknown usernames, disabled accounts and wrong passwords all yield
    /// `None`. A successful check records the login address and time.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        ip: Option<&str>,
    ) -> AppResult<Option<Admin>> {
        let Some(mut admin) = self.find_by_username(username).await? else {
            AppLogger::log_auth_event(username, "login", false, Some("unknown or disabled"));
            return Ok(None);
        };

        if !self.validate_password(&admin, password).await {
            AppLogger::log_security_event("login_failed", "medium", "wrong password", Some(username));
            return Ok(None);
        }

        if let Some(id) = admin.id {
            let now = self.clock.timestamp();
            self.repository.record_login(id, ip, now).await?;
            admin.last_login_ip = ip.map(str::to_owned);
            admin.last_login_time = Some(now);
        }
        AppLogger::log_auth_event(username, "login", true, None);
        Ok(Some(admin))
    }

    /// Validate `form` and insert a new account
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` with field errors, or a storage error
    pub async fn create(&self, form: &AdminForm, scenario: Scenario) -> AppResult<Admin> {
        let mut admin = Admin::new(form.username.clone());
        self.save(&mut admin, form, scenario).await?;
        Ok(admin)
    }

    /// Validate `form` and overwrite the account `id` (any status)
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, `ValidationFailed` with
    /// field errors, or a storage error
    pub async fn update(&self, id: i64, form: &AdminForm, scenario: Scenario) -> AppResult<Admin> {
        let mut admin = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Admin {id}")))?;
        self.save(&mut admin, form, scenario).await?;
        Ok(admin)
    }

    /// Run the full save lifecycle for `admin` with the submitted `form`
    ///
    /// Nothing is written when validation fails; `admin` is then left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` with field errors, or a storage error
    pub async fn save(
        &self,
        admin: &mut Admin,
        form: &AdminForm,
        scenario: Scenario,
    ) -> AppResult<()> {
        let is_new = admin.is_new_record();

        let mut errors = validate_form(form, scenario, is_new);
        self.check_uniqueness(form, admin.id, &mut errors).await?;
        if !errors.is_empty() {
            warn!(
                admin.id = ?admin.id,
                admin.username = %form.username,
                scenario = %scenario,
                errors = %errors,
                "Admin validation failed"
            );
            return Err(AppError::validation(&errors));
        }

        let mut candidate = admin.clone();
        apply_form(&mut candidate, form)?;

        if is_new {
            candidate.generate_auth_key();
            self.generate_password_reset_token(&mut candidate);
            self.set_password(&mut candidate, &form.password).await?;
        } else if !form.password.is_empty() {
            self.set_password(&mut candidate, &form.password).await?;
        }

        let now = self.clock.timestamp();
        if is_new {
            candidate.created_at = now;
        }
        candidate.updated_at = now;

        if let Err(error) = self.repository.save(&mut candidate).await {
            return Err(unique_violation_to_validation(error, form));
        }

        *admin = candidate;
        if is_new {
            info!(admin.id = ?admin.id, admin.username = %admin.username, "Admin account created");
        } else {
            info!(admin.id = ?admin.id, admin.username = %admin.username, scenario = %scenario, "Admin account updated");
        }
        Ok(())
    }

    async fn check_uniqueness(
        &self,
        form: &AdminForm,
        exclude_id: Option<i64>,
        errors: &mut ValidationErrors,
    ) -> AppResult<()> {
        for field in AdminUniqueField::ALL {
            let value = form_value(form, field);
            if value.is_empty() || errors.has(field.column()) {
                continue;
            }
            if self.repository.is_taken(field, value, exclude_id).await? {
                errors.add(field.column(), taken_message(field.column(), value));
            }
        }
        Ok(())
    }

    /// Store the address and time of a successful login
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or a storage error
    pub async fn record_login(&self, id: i64, ip: Option<&str>) -> AppResult<()> {
        self.repository
            .record_login(id, ip, self.clock.timestamp())
            .await?;
        Ok(())
    }

    /// Soft-disable or re-enable an account
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or a storage error
    pub async fn set_status(&self, id: i64, status: AdminStatus) -> AppResult<()> {
        self.repository
            .set_status(id, status, self.clock.timestamp())
            .await?;
        AppLogger::log_account_event(id, "status_changed", Some(status.label()));
        Ok(())
    }

    /// Every account's username keyed by id
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails
    pub async fn username_options(&self) -> AppResult<BTreeMap<i64, String>> {
        Ok(self.repository.usernames().await?.into_iter().collect())
    }

    /// Username of account `id`, `Unknown` when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails
    pub async fn username_label(&self, id: i64) -> AppResult<String> {
        Ok(self
            .username_options()
            .await?
            .remove(&id)
            .unwrap_or_else(|| labels::UNKNOWN.to_owned()))
    }
}

fn form_value(form: &AdminForm, field: AdminUniqueField) -> &str {
    match field {
        AdminUniqueField::Username => &form.username,
        AdminUniqueField::Email => &form.email,
        AdminUniqueField::Mobile => &form.mobile,
    }
}

fn taken_message(field: &str, value: &str) -> String {
    format!("{} \"{value}\" has already been taken.", attribute_label(field))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

/// Copy validated form values onto the record
fn apply_form(admin: &mut Admin, form: &AdminForm) -> AppResult<()> {
    admin.username.clone_from(&form.username);
    admin.email = non_empty(&form.email);
    admin.mobile = non_empty(&form.mobile);
    if let Some(avatar) = &form.avatar {
        admin.avatar = non_empty(avatar);
    }
    if let Some(sex) = form.sex {
        admin.sex = Sex::try_from(sex)?;
    }
    if let Some(status) = form.status {
        admin.status = AdminStatus::try_from(status)?;
    }
    Ok(())
}

/// Map a unique index rejection onto the field error a pre-check would give
fn unique_violation_to_validation(error: DatabaseError, form: &AdminForm) -> AppError {
    if let DatabaseError::UniqueViolation { field, .. } = &error {
        let value = AdminUniqueField::ALL
            .into_iter()
            .find(|f| f.column() == field.as_str())
            .map_or("", |f| form_value(form, f));
        let mut errors = ValidationErrors::new();
        errors.add(field.clone(), taken_message(field, value));
        warn!(field = %field, "Unique index rejected admin write");
        return AppError::validation(&errors).with_source(error);
    }
    AppError::from(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taken_message() {
        assert_eq!(
            taken_message("username", "alice"),
            "Username \"alice\" has already been taken."
        );
    }

    #[test]
    fn test_apply_form_stores_blank_contacts_as_null() {
        let mut admin = Admin::new("root");
        admin.email = Some("old@example.com".into());
        let form = AdminForm {
            username: "root".into(),
            sex: Some(2),
            ..AdminForm::default()
        };
        apply_form(&mut admin, &form).unwrap();
        assert_eq!(admin.email, None);
        assert_eq!(admin.mobile, None);
        assert_eq!(admin.sex, Sex::Woman);
        assert_eq!(admin.status, AdminStatus::Active);
    }

    #[test]
    fn test_unique_violation_maps_to_field_error() {
        let form = AdminForm {
            email: "a@b.cn".into(),
            ..AdminForm::default()
        };
        let error = unique_violation_to_validation(
            DatabaseError::UniqueViolation {
                table: "admin".into(),
                field: "email".into(),
            },
            &form,
        );
        let fields = error.validation_errors().unwrap();
        assert_eq!(
            fields.first("email"),
            Some("Email \"a@b.cn\" has already been taken.")
        );
    }
}
