//! Administrator credential gate.
//!
//! A fixed plaintext credential pair guards the management commands.
//! This is explicitly not a security control: no hashing, no session
//! expiry, no rate limiting. A real deployment would delegate to an
//! external identity provider.

/// Expected administrator username.
pub const ADMIN_USERNAME: &str = "admin";

/// Expected administrator password.
pub const ADMIN_PASSWORD: &str = "123456";

/// Compare an entered pair against the fixed credentials.
#[must_use]
pub fn verify(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_fixed_pair() {
        assert!(verify(ADMIN_USERNAME, ADMIN_PASSWORD));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        assert!(!verify("admin", "654321"));
    }

    #[test]
    fn test_verify_rejects_wrong_username() {
        assert!(!verify("administrator", "123456"));
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        assert!(!verify("Admin", "123456"));
    }

    #[test]
    fn test_verify_rejects_empty() {
        assert!(!verify("", ""));
    }
}
