//! Validated authentication inputs.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler touches the registry or the
//! token signer. Each rule failure maps to a distinct, user-facing message so
//! screens can highlight the offending field.

use thiserror::Error;
use zeroize::Zeroizing;

/// Rule violations raised while validating signup or login input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialRuleError {
    /// Email missing or not shaped like `local@domain.tld`.
    #[error("Valid email required")]
    InvalidEmail,
    /// Password was blank.
    #[error("Password required")]
    EmptyPassword,
    /// Username shorter than 3 characters once trimmed.
    #[error("Username must be at least 3 characters")]
    ShortUsername,
    /// Password shorter than 6 characters.
    #[error("Password must be at least 6 characters")]
    ShortPassword,
    /// Device pairing code shorter than 8 characters.
    #[error("Device code must be at least 8 characters")]
    ShortDeviceCode,
}

impl CredentialRuleError {
    /// Whether the rule is a shape problem (400) rather than a length rule (422).
    #[must_use]
    pub const fn is_shape_error(self) -> bool {
        matches!(self, Self::InvalidEmail | Self::EmptyPassword)
    }

    /// Name of the field the rule applies to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidEmail => "email",
            Self::EmptyPassword | Self::ShortPassword => "password",
            Self::ShortUsername => "username",
            Self::ShortDeviceCode => "deviceUniqueCode",
        }
    }
}

/// Minimal structural email check: one `@`, non-empty local part, and a dot
/// inside the domain. Deliverability is not this service's problem.
#[must_use]
pub fn email_is_well_formed(email: &str) -> bool {
    let trimmed = email.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || trimmed.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and structurally valid.
/// - `password` is non-empty and retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialRuleError> {
        if !email_is_well_formed(email) {
            return Err(CredentialRuleError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(CredentialRuleError::EmptyPassword);
        }
        Ok(Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: String,
    username: String,
    password: Zeroizing<String>,
    device_unique_code: String,
}

impl Registration {
    /// Construct a registration from raw inputs, applying every signup rule.
    ///
    /// Rules, in evaluation order: email shape, username length >= 3,
    /// password length >= 6, device code length >= 8.
    pub fn try_from_parts(
        email: &str,
        username: &str,
        password: &str,
        device_unique_code: &str,
    ) -> Result<Self, CredentialRuleError> {
        if !email_is_well_formed(email) {
            return Err(CredentialRuleError::InvalidEmail);
        }
        let username = username.trim();
        if username.chars().count() < 3 {
            return Err(CredentialRuleError::ShortUsername);
        }
        if password.chars().count() < 6 {
            return Err(CredentialRuleError::ShortPassword);
        }
        let device_unique_code = device_unique_code.trim();
        if device_unique_code.chars().count() < 8 {
            return Err(CredentialRuleError::ShortDeviceCode);
        }
        Ok(Self {
            email: email.trim().to_owned(),
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            device_unique_code: device_unique_code.to_owned(),
        })
    }

    /// Account email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Display username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Account password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Device pairing code.
    pub fn device_unique_code(&self) -> &str {
        self.device_unique_code.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.com", true)]
    #[case("first.last@mail.example.org", true)]
    #[case("not-an-email", false)]
    #[case("@b.com", false)]
    #[case("a@", false)]
    #[case("a@nodot", false)]
    #[case("a b@c.com", false)]
    #[case("", false)]
    fn email_shape_check(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(email_is_well_formed(email), expected);
    }

    #[rstest]
    #[case("bad", "secret1", CredentialRuleError::InvalidEmail)]
    #[case("a@b.com", "", CredentialRuleError::EmptyPassword)]
    fn invalid_login_inputs(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialRuleError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn login_trims_email_but_not_password() {
        let creds =
            LoginCredentials::try_from_parts(" a@b.com ", " secret1 ").expect("valid creds");
        assert_eq!(creds.email(), "a@b.com");
        assert_eq!(creds.password(), " secret1 ");
    }

    #[rstest]
    #[case("bad", "ada", "secret1", "DEV12345", CredentialRuleError::InvalidEmail)]
    #[case("a@b.com", "ab", "secret1", "DEV12345", CredentialRuleError::ShortUsername)]
    #[case("a@b.com", "ada", "short", "DEV12345", CredentialRuleError::ShortPassword)]
    #[case("a@b.com", "ada", "secret1", "DEV1", CredentialRuleError::ShortDeviceCode)]
    fn invalid_registrations(
        #[case] email: &str,
        #[case] username: &str,
        #[case] password: &str,
        #[case] device_code: &str,
        #[case] expected: CredentialRuleError,
    ) {
        let err = Registration::try_from_parts(email, username, password, device_code)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn each_rule_has_a_distinct_message() {
        let messages = [
            CredentialRuleError::InvalidEmail.to_string(),
            CredentialRuleError::EmptyPassword.to_string(),
            CredentialRuleError::ShortUsername.to_string(),
            CredentialRuleError::ShortPassword.to_string(),
            CredentialRuleError::ShortDeviceCode.to_string(),
        ];
        let unique: std::collections::HashSet<_> = messages.iter().collect();
        assert_eq!(unique.len(), messages.len());
    }

    #[rstest]
    fn shape_versus_rule_classification() {
        assert!(CredentialRuleError::InvalidEmail.is_shape_error());
        assert!(CredentialRuleError::EmptyPassword.is_shape_error());
        assert!(!CredentialRuleError::ShortUsername.is_shape_error());
        assert!(!CredentialRuleError::ShortDeviceCode.is_shape_error());
    }
}
