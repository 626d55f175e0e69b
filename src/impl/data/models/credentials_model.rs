use std::{collections::BTreeMap, str::FromStr};

use fractic_server_error::ServerError;

use crate::errors::InvalidRon;

/// RON credential table, keyed by username.
///
/// ```ron
/// {
///     "alice": (password: "...", name: "Alice Martin"),
/// }
/// ```
#[derive(Debug, serde_derive::Deserialize)]
#[serde(transparent)]
pub(crate) struct CredentialsModel(pub BTreeMap<String, CredentialModel>);

#[derive(Debug, Clone, serde_derive::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CredentialModel {
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl FromStr for CredentialsModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ron::Options::default()
            .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
            .from_str(s)
            .map_err(|e| InvalidRon::with_debug("Credentials", &e))
    }
}
