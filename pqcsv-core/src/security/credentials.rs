//! Secure credential container with automatic memory zeroing.
//!
//! This module provides the `Credentials` struct which holds the login user
//! and the password resolved from the command line, the environment or the
//! pgpass file. Both are cleared from memory on drop using the `zeroize`
//! crate.

use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Secure credential container that automatically zeros memory on drop.
///
/// `Debug` output never shows the password.
///
/// # Example
///
/// ```rust
/// use pqcsv_core::security::Credentials;
///
/// let creds = Credentials::new("postgres".to_string(), Some("secret".to_string()));
/// assert_eq!(creds.username(), "postgres");
/// assert!(creds.has_password());
/// assert!(!format!("{:?}", creds).contains("secret"));
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<Option<String>>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    ///
    /// An empty password counts as no password at all, the same way an
    /// empty `--pass` flag does.
    pub fn new(username: String, password: Option<String>) -> Self {
        let password = password.filter(|p| !p.is_empty());
        Self {
            username: Zeroizing::new(username),
            password: Zeroizing::new(password),
        }
    }

    /// Returns a copy of these credentials with the password replaced.
    #[must_use]
    pub fn with_password(&self, password: &str) -> Self {
        Self::new(self.username().to_string(), Some(password.to_string()))
    }

    /// Gets the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Gets the password, if one was supplied or resolved.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Checks if password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username.as_str())
            .field(
                "password",
                &if self.has_password() { "****" } else { "<none>" },
            )
            .finish()
    }
}
