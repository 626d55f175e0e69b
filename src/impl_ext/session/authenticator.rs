use std::{collections::BTreeMap, str::FromStr as _};

use fractic_server_error::ServerError;

use crate::{data::models::credentials_model::CredentialsModel, errors::InvalidCredentials};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub display_name: String,
}

/// Checks a username/password pair.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str)
        -> Result<AuthenticatedUser, ServerError>;
}

/// Fixed credential table, typically loaded from a RON file.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    users: BTreeMap<String, (String, String)>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        self.users
            .insert(username.into(), (password.into(), display_name.into()));
        self
    }

    pub fn from_ron(s: &str) -> Result<Self, ServerError> {
        let model = CredentialsModel::from_str(s)?;
        Ok(Self {
            users: model
                .0
                .into_iter()
                .map(|(username, c)| {
                    let name = c.name.unwrap_or_else(|| username.clone());
                    (username, (c.password, name))
                })
                .collect(),
        })
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, ServerError> {
        match self.users.get(username) {
            Some((expected, display_name)) if expected == password => {
                log::info!("user '{}' logged in", username);
                Ok(AuthenticatedUser {
                    username: username.to_string(),
                    display_name: display_name.clone(),
                })
            }
            _ => {
                log::warn!("failed login for '{}'", username);
                Err(InvalidCredentials::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_users_only() {
        let credentials = StaticCredentials::from_ron(
            r#"{
                "alice": (password: "s3cret", name: Some("Alice Martin")),
                "bob": (password: "pw"),
            }"#,
        )
        .unwrap();
        let alice = credentials.authenticate("alice", "s3cret").unwrap();
        assert_eq!(alice.display_name, "Alice Martin");
        assert_eq!(credentials.authenticate("bob", "pw").unwrap().display_name, "bob");
        assert!(credentials.authenticate("alice", "S3CRET").is_err());
        assert!(credentials.authenticate("carol", "").is_err());
    }

    #[test]
    fn builder_adds_users() {
        let credentials = StaticCredentials::new().with_user("u", "p", "User");
        assert!(credentials.authenticate("u", "p").is_ok());
    }
}
