//! Credential checks supplied from outside the engine
//!
//! The engine never holds secrets. Admin credentials arrive through a
//! [`CredentialVerifier`], member logins through a [`MemberDirectory`].

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use crate::error::AccessError;
use crate::members::Member;

/// Length of passwords issued to members created without one
pub const PASSWORD_LENGTH: usize = 8;

/// Verifies administrator credentials
pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Verifier for a single username/password pair injected at startup
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Login record of a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberLogin {
    pub member_id: u64,
    pub member_code: String,
    pub password: String,
}

impl MemberLogin {
    /// Login for `member`, generating a password of `length` characters
    /// when none (or an empty one) is supplied
    pub fn issue(member: &Member, password: Option<&str>, length: usize) -> Self {
        let password = match password.map(str::trim).filter(|p| !p.is_empty()) {
            Some(password) => password.to_string(),
            None => {
                log::info!("generated password for member {}", member.member_code);
                generate_password(length)
            }
        };
        Self {
            member_id: member.id,
            member_code: member.member_code.clone(),
            password,
        }
    }
}

/// Looks up member logins by member code
pub trait MemberDirectory {
    fn find_by_code(&self, member_code: &str) -> Result<Option<MemberLogin>, AccessError>;
}

impl MemberDirectory for [MemberLogin] {
    fn find_by_code(&self, member_code: &str) -> Result<Option<MemberLogin>, AccessError> {
        Ok(self.iter().find(|l| l.member_code == member_code).cloned())
    }
}

impl MemberDirectory for Vec<MemberLogin> {
    fn find_by_code(&self, member_code: &str) -> Result<Option<MemberLogin>, AccessError> {
        self.as_slice().find_by_code(member_code)
    }
}

pub fn authenticate_admin<V: CredentialVerifier + ?Sized>(
    verifier: &V,
    username: &str,
    password: &str,
) -> Result<(), AccessError> {
    if verifier.verify(username, password) {
        Ok(())
    } else {
        log::warn!("rejected admin login for '{}'", username);
        Err(AccessError::InvalidCredentials)
    }
}

/// Check a member login and return the member id.
///
/// Unknown codes, wrong passwords and directory failures are reported as
/// distinct errors.
pub fn authenticate_member<D: MemberDirectory + ?Sized>(
    directory: &D,
    member_code: &str,
    password: &str,
) -> Result<u64, AccessError> {
    let login = directory
        .find_by_code(member_code)?
        .ok_or_else(|| AccessError::NotFound(member_code.to_string()))?;

    if login.password == password {
        Ok(login.member_id)
    } else {
        log::warn!("rejected login for member {}", member_code);
        Err(AccessError::InvalidCredentials)
    }
}

/// Random alphanumeric password for a newly created member
pub fn generate_password(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingDirectory;

    impl MemberDirectory for FailingDirectory {
        fn find_by_code(&self, _member_code: &str) -> Result<Option<MemberLogin>, AccessError> {
            Err(AccessError::Unexpected("store offline".to_string()))
        }
    }

    fn directory() -> Vec<MemberLogin> {
        vec![MemberLogin {
            member_id: 4,
            member_code: "M0004".to_string(),
            password: "s3cretPW".to_string(),
        }]
    }

    #[test]
    fn test_admin_login() {
        let verifier = StaticCredentials::new("admin@example.org", "hunter2");
        assert_eq!(authenticate_admin(&verifier, "admin@example.org", "hunter2"), Ok(()));
        assert_eq!(
            authenticate_admin(&verifier, "admin@example.org", "wrong"),
            Err(AccessError::InvalidCredentials)
        );
    }

    #[test]
    fn test_member_login_outcomes() {
        let dir = directory();
        assert_eq!(authenticate_member(&dir, "M0004", "s3cretPW"), Ok(4));
        assert_eq!(
            authenticate_member(&dir, "M0004", "nope"),
            Err(AccessError::InvalidCredentials)
        );
        assert_eq!(
            authenticate_member(&dir, "M0099", "s3cretPW"),
            Err(AccessError::NotFound("M0099".to_string()))
        );
        assert_eq!(
            authenticate_member(&FailingDirectory, "M0004", "s3cretPW"),
            Err(AccessError::Unexpected("store offline".to_string()))
        );
    }

    #[test]
    fn test_generate_password() {
        let pw = generate_password(8);
        assert_eq!(pw.len(), 8);
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(generate_password(32), generate_password(32));
    }

    #[test]
    fn test_issue_login_generates_missing_password() {
        let joined = chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let member = Member::new(4, "Anil Das", joined);

        let login = MemberLogin::issue(&member, None, PASSWORD_LENGTH);
        assert_eq!(login.member_code, member.member_code);
        assert_eq!(login.password.len(), PASSWORD_LENGTH);
        assert!(login.password.chars().all(|c| c.is_ascii_alphanumeric()));

        let blank = MemberLogin::issue(&member, Some("  "), 12);
        assert_eq!(blank.password.len(), 12);

        let given = MemberLogin::issue(&member, Some("s3cret"), PASSWORD_LENGTH);
        assert_eq!(given.password, "s3cret");

        let directory = vec![login.clone()];
        assert_eq!(authenticate_member(&directory, &login.member_code, &login.password), Ok(4));
    }
}
