//! # Identity
//!
//! Account roster and the single logged-in session.
//!
//! Emails are matched exactly (case-sensitive). The roster does not decide
//! who may call what; role checks belong to the caller.

use crate::error::{CoreError, CoreResult};
use crate::types::{new_id, Account, User, UserRole};
use crate::validation::{validate_email, validate_name, validate_password};

/// Stored accounts plus the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    accounts: Vec<Account>,
    current: Option<User>,
}

impl Roster {
    pub fn new(accounts: Vec<Account>, current: Option<User>) -> Self {
        Roster { accounts, current }
    }

    /// Stored accounts in creation order, passwords included.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// True when someone is logged in with the admin role.
    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(User::is_admin)
    }

    /// Starts a session for the account matching both email and password.
    pub fn login(&mut self, email: &str, password: &str) -> CoreResult<User> {
        let user = self
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(Account::public)
            .ok_or(CoreError::InvalidCredentials)?;

        self.current = Some(user.clone());
        Ok(user)
    }

    /// Ends the session. Returns the user who was logged in, if any.
    pub fn logout(&mut self) -> Option<User> {
        self.current.take()
    }

    /// Appends a new account. Does not log it in.
    pub fn create_account(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> CoreResult<User> {
        validate_name("name", name)?;
        validate_email(email)?;
        validate_password(password)?;

        if self.accounts.iter().any(|a| a.email == email) {
            return Err(CoreError::DuplicateEmail(email.to_string()));
        }

        let account = Account {
            id: new_id(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            password: password.to_string(),
        };
        let user = account.public();
        self.accounts.push(account);
        Ok(user)
    }

    /// Removes an account.
    ///
    /// Returns false, changing nothing, when `id` is the logged-in user or
    /// matches no account.
    pub fn delete_account(&mut self, id: &str) -> bool {
        if self.current.as_ref().is_some_and(|u| u.id == id) {
            return false;
        }

        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        self.accounts.len() != before
    }

    /// Password-stripped accounts, stored order.
    pub fn list_accounts(&self) -> Vec<User> {
        self.accounts.iter().map(Account::public).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_accounts;

    fn roster() -> Roster {
        Roster::new(default_accounts(), None)
    }

    #[test]
    fn test_login_with_default_admin() {
        let mut roster = roster();

        let user = roster.login("admin@hospital.com", "admin123").unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.role, UserRole::Admin);
        assert!(roster.is_admin());
        assert_eq!(roster.current_user(), Some(&user));
    }

    #[test]
    fn test_login_failure_keeps_state() {
        let mut roster = roster();
        roster.login("user@hospital.com", "user123").unwrap();
        let before = roster.clone();

        assert!(matches!(
            roster.login("admin@hospital.com", "wrong"),
            Err(CoreError::InvalidCredentials)
        ));
        // Email match is exact
        assert!(roster.login("ADMIN@hospital.com", "admin123").is_err());
        assert_eq!(roster, before);
        assert!(!roster.is_admin());
    }

    #[test]
    fn test_logout() {
        let mut roster = roster();
        assert!(roster.logout().is_none());

        roster.login("admin@hospital.com", "admin123").unwrap();
        let user = roster.logout().unwrap();
        assert_eq!(user.email, "admin@hospital.com");
        assert!(roster.current_user().is_none());
    }

    #[test]
    fn test_create_account_rejects_duplicate_email() {
        let mut roster = roster();

        let created = roster
            .create_account("Bob", "bob@hospital.com", "pw", UserRole::User)
            .unwrap();
        assert_eq!(roster.list_accounts().len(), 3);
        assert!(roster.current_user().is_none());

        let result = roster.create_account("Robert", "bob@hospital.com", "other", UserRole::Admin);
        assert!(matches!(result, Err(CoreError::DuplicateEmail(_))));
        assert_eq!(roster.list_accounts().len(), 3);

        let user = roster.login("bob@hospital.com", "pw").unwrap();
        assert_eq!(user.id, created.id);
    }

    #[test]
    fn test_create_account_validates_input() {
        let mut roster = roster();
        assert!(roster
            .create_account("", "x@hospital.com", "pw", UserRole::User)
            .is_err());
        assert!(roster
            .create_account("X", "x.hospital.com", "pw", UserRole::User)
            .is_err());
        assert!(roster
            .create_account("X", "x@hospital.com", "", UserRole::User)
            .is_err());
        assert_eq!(roster.accounts().len(), 2);
    }

    #[test]
    fn test_cannot_delete_self() {
        let mut roster = roster();
        roster.login("admin@hospital.com", "admin123").unwrap();

        assert!(!roster.delete_account("1"));
        assert_eq!(roster.accounts().len(), 2);

        assert!(roster.delete_account("2"));
        assert_eq!(roster.accounts().len(), 1);
        assert!(!roster.delete_account("2"));
    }

    #[test]
    fn test_list_accounts_in_stored_order() {
        let mut roster = roster();
        roster
            .create_account("Carla", "carla@hospital.com", "pw", UserRole::User)
            .unwrap();

        let emails: Vec<String> = roster.list_accounts().into_iter().map(|u| u.email).collect();
        assert_eq!(
            emails,
            vec!["admin@hospital.com", "user@hospital.com", "carla@hospital.com"]
        );
    }
}
