//! # Identity Store
//!
//! Accounts and the logged-in session, persisted under `inventory_users`
//! and `inventory_user`.
//!
//! ## Startup
//! ```text
//! inventory_users   absent / corrupt ──► default accounts, written back
//! inventory_user    absent           ──► logged out
//!                   corrupt          ──► key removed, logged out
//! ```

use almox_core::seed::default_accounts;
use almox_core::{Account, Roster, User, UserRole};
use tracing::{debug, info, warn};

use super::{read_json, Stored};
use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::kv::{KvRepository, SESSION_KEY, USERS_KEY};

/// Account roster with write-through persistence.
#[derive(Debug)]
pub struct IdentityStore {
    kv: KvRepository,
    roster: Roster,
}

impl IdentityStore {
    /// Loads accounts and session, seeding defaults where needed.
    pub async fn open(db: &Database) -> DbResult<Self> {
        let kv = db.kv();

        let stored: Stored<Vec<Account>> = read_json(&kv, USERS_KEY).await?;
        let (accounts, seeded) = stored.or_else(default_accounts);
        if seeded {
            info!(count = accounts.len(), "Seeding default accounts");
            kv.put(USERS_KEY, &serde_json::to_string(&accounts)?).await?;
        }

        let current = match read_json::<User>(&kv, SESSION_KEY).await? {
            Stored::Found(user) => Some(user),
            Stored::Missing => None,
            Stored::Corrupt => {
                warn!("Dropping unreadable session");
                kv.remove(SESSION_KEY).await?;
                None
            }
        };

        debug!(
            accounts = accounts.len(),
            logged_in = current.is_some(),
            "Identity store opened"
        );

        Ok(IdentityStore {
            kv,
            roster: Roster::new(accounts, current),
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.roster.current_user()
    }

    pub fn is_admin(&self) -> bool {
        self.roster.is_admin()
    }

    /// Logs in and persists the session.
    pub async fn login(&mut self, email: &str, password: &str) -> DbResult<User> {
        let mut next = self.roster.clone();
        let user = next.login(email, password).map_err(|e| {
            debug!(email = %email, "Login rejected");
            e
        })?;

        self.kv
            .put(SESSION_KEY, &serde_json::to_string(&user)?)
            .await?;
        self.roster = next;

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Ends the session and removes the stored session record.
    pub async fn logout(&mut self) -> DbResult<()> {
        self.kv.remove(SESSION_KEY).await?;

        if let Some(user) = self.roster.logout() {
            info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    /// Creates an account. The session is unchanged.
    pub async fn create_account(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> DbResult<User> {
        let mut next = self.roster.clone();
        let user = next.create_account(name, email, password, role)?;

        self.persist_accounts(&next).await?;
        self.roster = next;

        info!(user_id = %user.id, role = ?role, "Account created");
        Ok(user)
    }

    /// Deletes an account.
    ///
    /// `Ok(false)` when `id` is the logged-in user or unknown; nothing is
    /// written then.
    pub async fn delete_account(&mut self, id: &str) -> DbResult<bool> {
        let mut next = self.roster.clone();
        if !next.delete_account(id) {
            debug!(user_id = %id, "Account not deleted");
            return Ok(false);
        }

        self.persist_accounts(&next).await?;
        self.roster = next;

        info!(user_id = %id, "Account deleted");
        Ok(true)
    }

    /// Accounts without passwords, stored order.
    pub fn list_accounts(&self) -> Vec<User> {
        self.roster.list_accounts()
    }

    async fn persist_accounts(&self, roster: &Roster) -> DbResult<()> {
        self.kv
            .put(USERS_KEY, &serde_json::to_string(roster.accounts())?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::DbError;
    use almox_core::CoreError;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_seeds_default_accounts() {
        let db = db().await;
        let store = IdentityStore::open(&db).await.unwrap();

        assert_eq!(store.list_accounts().len(), 2);
        assert!(store.current_user().is_none());
        assert!(db.kv().get(USERS_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_corrupt_accounts_fall_back_to_defaults() {
        let db = db().await;
        db.kv().put(USERS_KEY, "{not json").await.unwrap();
        db.kv().put(SESSION_KEY, "also not json").await.unwrap();

        let store = IdentityStore::open(&db).await.unwrap();

        assert_eq!(store.list_accounts()[0].email, "admin@hospital.com");
        assert!(store.current_user().is_none());
        assert_eq!(db.kv().get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let db = db().await;
        let mut store = IdentityStore::open(&db).await.unwrap();

        store.login("admin@hospital.com", "admin123").await.unwrap();
        assert!(store.is_admin());

        let reopened = IdentityStore::open(&db).await.unwrap();
        assert_eq!(reopened.current_user().map(|u| u.id.as_str()), Some("1"));

        let raw = db.kv().get(SESSION_KEY).await.unwrap().unwrap();
        assert!(!raw.contains("admin123"));
    }

    #[tokio::test]
    async fn test_bad_login_is_domain_error() {
        let db = db().await;
        let mut store = IdentityStore::open(&db).await.unwrap();

        let err = store.login("admin@hospital.com", "nope").await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::InvalidCredentials)));
        assert!(store.current_user().is_none());
        assert_eq!(db.kv().get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_removes_session() {
        let db = db().await;
        let mut store = IdentityStore::open(&db).await.unwrap();

        store.login("user@hospital.com", "user123").await.unwrap();
        store.logout().await.unwrap();

        assert!(store.current_user().is_none());
        assert_eq!(db.kv().get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_account_lifecycle() {
        let db = db().await;
        let mut store = IdentityStore::open(&db).await.unwrap();
        store.login("admin@hospital.com", "admin123").await.unwrap();

        let bob = store
            .create_account("Bob", "bob@hospital.com", "pw", UserRole::User)
            .await
            .unwrap();
        let dup = store
            .create_account("Bob 2", "bob@hospital.com", "pw", UserRole::User)
            .await;
        assert!(matches!(dup, Err(DbError::Domain(CoreError::DuplicateEmail(_)))));

        assert!(!store.delete_account("1").await.unwrap());
        assert!(store.delete_account(&bob.id).await.unwrap());
        assert!(!store.delete_account(&bob.id).await.unwrap());

        let reopened = IdentityStore::open(&db).await.unwrap();
        assert_eq!(reopened.list_accounts().len(), 2);
    }
}
