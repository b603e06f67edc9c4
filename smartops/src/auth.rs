//! Auth context: the signed-in user for the lifetime of the process, backed by
//! a token kept in local storage. There is no expiry or refresh handling.

use thiserror::Error;
use tracing::{info, warn};

use crate::api::DataService;
use crate::storage::{LocalStorage, TOKEN_KEY};
use crate::types::{AuthResponse, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Login failed")]
    LoginFailed,
    #[error("Registration failed")]
    RegistrationFailed,
}

pub struct AuthContext<S> {
    service: S,
    storage: LocalStorage,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

impl<S: DataService> AuthContext<S> {
    pub fn new(service: S, storage: LocalStorage) -> Self {
        Self {
            service,
            storage,
            user: None,
            loading: true,
            error: None,
        }
    }

    /// Restore the session from a stored token. A token the service rejects is
    /// dropped without surfacing an error.
    pub async fn init(&mut self) {
        if self.storage.get_item(TOKEN_KEY).is_some() {
            match self.service.get_current_user().await {
                Ok(user) => {
                    info!(user = %user.email, "session restored");
                    self.user = Some(user);
                }
                Err(e) => {
                    warn!(error = %e, "auth check failed");
                    self.forget_token();
                }
            }
        }
        self.loading = false;
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        self.error = None;
        match self.service.login(email, password).await {
            Ok(resp) => {
                self.accept(&resp);
                Ok(resp)
            }
            Err(e) => {
                warn!(error = %e, "login rejected");
                self.fail(AuthError::LoginFailed)
            }
        }
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, AuthError> {
        self.error = None;
        match self.service.register(email, password, name).await {
            Ok(resp) => {
                self.accept(&resp);
                Ok(resp)
            }
            Err(e) => {
                warn!(error = %e, "registration rejected");
                self.fail(AuthError::RegistrationFailed)
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user.email, "logged out");
        }
        self.forget_token();
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.storage.get_item(TOKEN_KEY)
    }

    fn accept(&mut self, resp: &AuthResponse) {
        info!(user = %resp.user.email, "signed in");
        self.user = Some(resp.user.clone());
        if let Err(e) = self.storage.set_item(TOKEN_KEY, &resp.token) {
            warn!(error = %e, "could not persist token");
        }
    }

    fn fail(&mut self, err: AuthError) -> Result<AuthResponse, AuthError> {
        self.error = Some(err.to_string());
        Err(err)
    }

    fn forget_token(&mut self) {
        if let Err(e) = self.storage.remove_item(TOKEN_KEY) {
            warn!(error = %e, "could not clear token");
        }
    }
}
