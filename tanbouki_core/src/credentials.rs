use crate::auth::login;
use std::fmt;

/// What the person has typed into the login form so far. We don't validate
/// anything here; empty or malformed values are sent as-is.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Email address
    pub email: String,

    /// Plaintext password (masked in `Debug` output)
    pub password: String,
}

impl Credentials {
    /// Make an empty set of credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// The request body for logging in with these credentials
    pub fn to_login_req(&self) -> login::Req {
        login::Req {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"*".repeat(self.password.chars().count()))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let creds = Credentials::new();

        assert_eq!(creds.email, "");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn test_debug_masks_password() {
        let creds = Credentials {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        };

        let debugged = format!("{creds:?}");

        assert!(debugged.contains("a@b.com"));
        assert!(!debugged.contains("hunter2"));
    }

    #[test]
    fn test_login_req_passes_empty_values_through() {
        let req = Credentials::new().to_login_req();

        assert_eq!(req.email, "");
        assert_eq!(req.password, "");
    }
}
