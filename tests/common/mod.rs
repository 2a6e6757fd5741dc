//! Shared fixtures for integration tests.
//!
//! `MemoryStore` implements [`DataStore`] over mutex-guarded maps. Its
//! conditional update checks and bumps the version under one lock, which is
//! the same single-row guarantee the SQL `UPDATE ... WHERE version = $n` gives.
//! A password update holds the user lock and the token lock together, like the
//! SQL transaction that pairs the update with the token delete.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use unboxing_api::config::{Config, DEFAULT_GRANTS};
use unboxing_api::domain::{
    Billing, Credential, Customer, NewBilling, NewCustomer, NewPayroll, NewUser, Payroll, Role,
    Token, User, Versioned,
};
use unboxing_api::errors::{AppError, AppResult};
use unboxing_api::infra::{
    BillingRepository, CustomerRepository, DataStore, PayrollRepository, PermissionRepository,
    RecordRepository, TokenRepository, UserRepository, VersionedRepository,
};
use unboxing_api::services::Services;
use unboxing_api::types::PaginationParams;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Builds a stored record from its insert payload.
pub trait FromNew<N>: Sized {
    fn from_new(id: i64, new: N) -> Self;

    /// Mirrors a unique index; `Some(entity)` when `self` collides with `other`.
    fn collides_with(&self, _other: &Self) -> Option<&'static str> {
        None
    }
}

impl FromNew<NewUser> for User {
    fn from_new(id: i64, new: NewUser) -> Self {
        User {
            id,
            created_at: Utc::now(),
            name: new.name,
            email: new.email,
            role: new.role,
            credential: new.credential,
            version: 1,
        }
    }

    fn collides_with(&self, other: &Self) -> Option<&'static str> {
        (self.id != other.id && self.email == other.email)
            .then_some("A user with this email address")
    }
}

impl FromNew<NewCustomer> for Customer {
    fn from_new(id: i64, new: NewCustomer) -> Self {
        Customer {
            id,
            created_at: Utc::now(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            version: 1,
        }
    }
}

impl FromNew<NewPayroll> for Payroll {
    fn from_new(id: i64, new: NewPayroll) -> Self {
        Payroll {
            id,
            employee_id: new.employee_id,
            amount: new.amount,
            date: new.date,
            version: 1,
        }
    }
}

impl FromNew<NewBilling> for Billing {
    fn from_new(id: i64, new: NewBilling) -> Self {
        Billing {
            id,
            customer_id: new.customer_id,
            amount: new.amount,
            date: new.date,
            version: 1,
        }
    }
}

struct TableState<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

/// One table of versioned records.
pub struct MemoryTable<T> {
    state: Mutex<TableState<T>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(TableState {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<T: Clone> MemoryTable<T> {
    pub fn get(&self, id: i64) -> Option<T> {
        self.state.lock().unwrap().rows.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl<T> VersionedRepository<T> for MemoryTable<T>
where
    T: Versioned + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> AppResult<Option<T>> {
        Ok(self.get(id))
    }

    async fn update_if_version(&self, record: &T) -> AppResult<Option<i32>> {
        let mut state = self.state.lock().unwrap();
        match state.rows.get_mut(&record.id()) {
            Some(stored) if stored.version() == record.version() => {
                let next = record.version() + 1;
                let mut updated = record.clone();
                updated.set_version(next);
                *stored = updated;
                Ok(Some(next))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl<T, N> RecordRepository<T, N> for MemoryTable<T>
where
    T: Versioned + FromNew<N> + Clone + Send + Sync + 'static,
    N: Send + 'static,
{
    async fn insert(&self, new: N) -> AppResult<T> {
        let mut state = self.state.lock().unwrap();
        let record = T::from_new(state.next_id, new);
        if let Some(entity) = state.rows.values().find_map(|r| record.collides_with(r)) {
            return Err(AppError::duplicate(entity));
        }
        state.next_id += 1;
        state.rows.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<T>, u64)> {
        let state = self.state.lock().unwrap();
        let page = state
            .rows
            .values()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .cloned()
            .collect();
        Ok((page, state.rows.len() as u64))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.state
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::RecordNotFound)
    }
}

#[derive(Clone)]
struct TokenRow {
    hash: Vec<u8>,
    user_id: i64,
    expiry: DateTime<Utc>,
    scope: String,
}

type TokenRows = Arc<Mutex<Vec<TokenRow>>>;

/// User table that shares the token rows for transactional revocation.
#[derive(Default)]
pub struct MemoryUsers {
    table: MemoryTable<User>,
    tokens: TokenRows,
    fail_revocation: AtomicBool,
}

impl MemoryUsers {
    pub fn get(&self, id: i64) -> Option<User> {
        self.table.get(id)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Make the token delete inside `update_revoking_tokens` fail.
    pub fn fail_revocation(&self) {
        self.fail_revocation.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl VersionedRepository<User> for MemoryUsers {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.table.find_by_id(id).await
    }

    async fn update_if_version(&self, record: &User) -> AppResult<Option<i32>> {
        self.table.update_if_version(record).await
    }
}

#[async_trait]
impl RecordRepository<User, NewUser> for MemoryUsers {
    async fn insert(&self, new: NewUser) -> AppResult<User> {
        RecordRepository::<User, NewUser>::insert(&self.table, new).await
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<User>, u64)> {
        RecordRepository::<User, NewUser>::list(&self.table, params).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        RecordRepository::<User, NewUser>::delete(&self.table, id).await
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.table.state.lock().unwrap();
        Ok(state.rows.values().find(|u| u.email == email).cloned())
    }

    async fn update_revoking_tokens(&self, user: &User, scope: &str) -> AppResult<Option<i32>> {
        let mut state = self.table.state.lock().unwrap();
        let mut tokens = self.tokens.lock().unwrap();

        let Some(stored) = state.rows.get_mut(&user.id) else {
            return Ok(None);
        };
        if stored.version != user.version {
            return Ok(None);
        }
        if self.fail_revocation.load(Ordering::SeqCst) {
            return Err(AppError::internal("token delete failed"));
        }

        let next = user.version + 1;
        let mut updated = user.clone();
        updated.version = next;
        *stored = updated;
        tokens.retain(|r| !(r.user_id == user.id && r.scope == scope));
        Ok(Some(next))
    }
}

/// Token table joined to the user table on lookup.
pub struct MemoryTokens {
    rows: TokenRows,
    users: Arc<MemoryUsers>,
}

impl MemoryTokens {
    /// Stored digests, for asserting what was persisted.
    pub fn hashes(&self) -> Vec<Vec<u8>> {
        self.rows.lock().unwrap().iter().map(|r| r.hash.clone()).collect()
    }

    pub fn count_for(&self, user_id: i64) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokens {
    async fn insert(&self, token: &Token) -> AppResult<()> {
        self.rows.lock().unwrap().push(TokenRow {
            hash: token.hash.clone(),
            user_id: token.user_id,
            expiry: token.expiry,
            scope: token.scope.clone(),
        });
        Ok(())
    }

    async fn find_user(
        &self,
        hash: &[u8],
        scope: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        let owner = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.hash == hash && r.scope == scope && r.expiry > now)
            .map(|r| r.user_id);
        Ok(owner.and_then(|id| self.users.get(id)))
    }

    async fn delete_all_for_user(&self, scope: &str, user_id: i64) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.user_id == user_id && r.scope == scope));
        Ok((before - rows.len()) as u64)
    }
}

/// Role to permission-code grants.
pub struct MemoryPermissions {
    grants: HashMap<String, Vec<String>>,
}

impl MemoryPermissions {
    pub fn from_grants(grants: &[(&str, &[&str])]) -> Self {
        Self {
            grants: grants
                .iter()
                .map(|(role, codes)| {
                    (
                        role.to_string(),
                        codes.iter().map(|c| c.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

#[async_trait]
impl PermissionRepository for MemoryPermissions {
    async fn all_for_role(&self, role: &str) -> AppResult<Vec<String>> {
        Ok(self.grants.get(role).cloned().unwrap_or_default())
    }
}

/// In-memory store context.
pub struct MemoryStore {
    pub users: Arc<MemoryUsers>,
    pub tokens: Arc<MemoryTokens>,
    pub permissions: Arc<MemoryPermissions>,
    pub customers: Arc<MemoryTable<Customer>>,
    pub payroll: Arc<MemoryTable<Payroll>>,
    pub billing: Arc<MemoryTable<Billing>>,
}

impl MemoryStore {
    /// Store seeded with the production grant matrix.
    pub fn new() -> Arc<Self> {
        Self::with_grants(DEFAULT_GRANTS)
    }

    pub fn with_grants(grants: &[(&str, &[&str])]) -> Arc<Self> {
        let users = Arc::new(MemoryUsers::default());
        Arc::new(Self {
            tokens: Arc::new(MemoryTokens {
                rows: users.tokens.clone(),
                users: users.clone(),
            }),
            users,
            permissions: Arc::new(MemoryPermissions::from_grants(grants)),
            customers: Arc::new(MemoryTable::default()),
            payroll: Arc::new(MemoryTable::default()),
            billing: Arc::new(MemoryTable::default()),
        })
    }

    /// Insert a user whose password is [`TEST_PASSWORD`].
    pub async fn seed_user(&self, email: &str, role: Role) -> User {
        let credential = Credential::set(TEST_PASSWORD).unwrap();
        RecordRepository::<User, NewUser>::insert(
            &*self.users,
            NewUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                role,
                credential,
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_customer(&self, name: &str) -> Customer {
        RecordRepository::<Customer, NewCustomer>::insert(
            &*self.customers,
            NewCustomer {
                name: name.to_string(),
                email: "accounts@acme.example".to_string(),
                phone: String::new(),
                address: String::new(),
            },
        )
        .await
        .unwrap()
    }
}

impl DataStore for MemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn tokens(&self) -> Arc<dyn TokenRepository> {
        self.tokens.clone()
    }

    fn permissions(&self) -> Arc<dyn PermissionRepository> {
        self.permissions.clone()
    }

    fn customers(&self) -> Arc<CustomerRepository> {
        self.customers.clone()
    }

    fn payroll(&self) -> Arc<PayrollRepository> {
        self.payroll.clone()
    }

    fn billing(&self) -> Arc<BillingRepository> {
        self.billing.clone()
    }
}

pub fn test_config() -> Config {
    Config::default().with_admin_registration_key("bootstrap-secret")
}

pub fn services(store: &Arc<MemoryStore>) -> Services {
    Services::from_store(store.clone(), &test_config())
}
