use fractic_server_error::ServerError;

use crate::{entities::GenerationConfig, util::SalesJournalUtil};

use super::authenticator::{AuthenticatedUser, Authenticator};

/// State of one user session: who is logged in and the generation settings
/// in use.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Option<AuthenticatedUser>,
    pub config: GenerationConfig,
}

impl Session {
    pub fn login<A: Authenticator>(
        authenticator: &A,
        username: &str,
        password: &str,
        config: GenerationConfig,
    ) -> Result<Self, ServerError> {
        let user = authenticator.authenticate(username, password)?;
        Ok(Self {
            user: Some(user),
            config,
        })
    }

    /// Session for local use, when no credential table is configured.
    pub fn unauthenticated(config: GenerationConfig) -> Self {
        Self { user: None, config }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn journal_util(&self) -> SalesJournalUtil {
        SalesJournalUtil::new(self.config.clone())
    }
}
