//! Persistence service identity
//!
//! Three environment variables identify the document store's service
//! account. Either all are set or none is; the project ID namespaces the
//! store so two projects never share documents.

use std::fmt;

use crate::error::{Result, config};

pub const PROJECT_ID_VAR: &str = "FIREBASE_ADMIN_PROJECT_ID";
pub const CLIENT_EMAIL_VAR: &str = "FIREBASE_ADMIN_CLIENT_EMAIL";
pub const PRIVATE_KEY_VAR: &str = "FIREBASE_ADMIN_PRIVATE_KEY";

/// Namespace used when no identity is configured
pub const LOCAL_NAMESPACE: &str = "local";

#[derive(Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
}

impl fmt::Debug for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceIdentity")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ServiceIdentity {
    /// Read the identity from the process environment
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the identity through `lookup`; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let project_id = read(PROJECT_ID_VAR);
        let client_email = read(CLIENT_EMAIL_VAR);
        let private_key = read(PRIVATE_KEY_VAR);

        match (project_id, client_email, private_key) {
            (None, None, None) => Ok(None),
            (Some(project_id), Some(client_email), Some(private_key)) => Ok(Some(Self {
                project_id,
                client_email,
                private_key: unescape_newlines(&private_key),
            })),
            (project_id, client_email, _) => {
                let missing = if project_id.is_none() {
                    PROJECT_ID_VAR
                } else if client_email.is_none() {
                    CLIENT_EMAIL_VAR
                } else {
                    PRIVATE_KEY_VAR
                };
                Err(config::missing_credential(missing))
            }
        }
    }

    pub fn namespace(&self) -> &str {
        &self.project_id
    }
}

/// Store namespace for an optional identity
pub fn namespace(identity: Option<&ServiceIdentity>) -> &str {
    identity.map_or(LOCAL_NAMESPACE, ServiceIdentity::namespace)
}

/// Private keys arrive with literal `\n` sequences
fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}
