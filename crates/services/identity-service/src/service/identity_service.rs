//! Identity service - registration, login and the current session.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{Password, RegisterUser, User, UserRecord};

use crate::repository::{SessionRepository, UserRepository};

/// Identity service trait for dependency injection.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Register a buyer account and sign it in
    async fn register(
        &self,
        username: String,
        password: String,
        confirm_password: String,
    ) -> AppResult<User>;

    /// Register from a full form (role included) and sign it in
    async fn register_user(&self, form: RegisterUser) -> AppResult<User>;

    /// Authenticate by exact username + password and sign in
    async fn login(&self, username: String, password: String) -> AppResult<User>;

    /// Look up a user by ID
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// The signed-in user, if any
    async fn current_user(&self) -> AppResult<Option<User>>;

    /// Sign out
    async fn logout(&self) -> AppResult<()>;
}

/// Concrete implementation of IdentityService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    delay: Duration,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            users,
            sessions,
            delay: Duration::ZERO,
        }
    }

    /// Simulated latency applied before register/login complete.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl IdentityService for Authenticator {
    async fn register(
        &self,
        username: String,
        password: String,
        confirm_password: String,
    ) -> AppResult<User> {
        self.register_user(RegisterUser::new(username, password, confirm_password))
            .await
    }

    async fn register_user(&self, form: RegisterUser) -> AppResult<User> {
        form.check()?;

        if self.users.find_by_username(&form.username).await?.is_some() {
            return Err(AppError::validation(
                "User with this username already exists",
            ));
        }

        self.simulate_latency().await;

        let password = Password::new(&form.password)?;
        let record = UserRecord::new(form.username, password, form.role);
        let user = User::from(self.users.create(record).await?);

        self.sessions.save(&user).await?;
        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    async fn login(&self, username: String, password: String) -> AppResult<User> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("Please fill in all fields"));
        }

        self.simulate_latency().await;

        let record = self.users.find_by_username(&username).await?;

        // Verify even when the user is unknown so both misses cost the same.
        let password_valid = match &record {
            Some(record) => record.verify_password(&password),
            None => Password::dummy().verify(&password),
        };

        let user = match record {
            Some(record) if password_valid => User::from(record),
            _ => {
                warn!(username = %username, "Login failed");
                return Err(AppError::InvalidCredentials);
            }
        };

        self.sessions.save(&user).await?;
        info!(user_id = %user.id, "User signed in");
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .map(User::from)
            .ok_or_not_found("User")
    }

    async fn current_user(&self) -> AppResult<Option<User>> {
        self.sessions.current().await
    }

    async fn logout(&self) -> AppResult<()> {
        self.sessions.clear().await
    }
}
