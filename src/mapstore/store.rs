//! Concurrency-safe holder of the current mapping snapshot.
//!
//! # Design Decisions
//! - A `Snapshot` is built fully formed outside any lock and installed with
//!   one atomic pointer swap (`ArcSwap`); readers are wait-free and can never
//!   observe a half-built state
//! - `replace` is the only mutation entry point; there is no incremental
//!   patching, the previous snapshot is discarded whole
//! - User/role keys are stored lowercased; account IDs verbatim

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::mapstore::records::{RoleMapping, UserMapping};

/// Returned when a lookup key has no entry in the current snapshot.
///
/// Expected in normal operation; callers handle it, nothing is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("user not found in mapping store")]
    UserNotFound,
    #[error("role not found in mapping store")]
    RoleNotFound,
}

/// One immutable, internally consistent view of the mapping tables.
#[derive(Debug, Default)]
struct Snapshot {
    users: HashMap<String, UserMapping>,
    roles: HashMap<String, RoleMapping>,
    accounts: HashSet<String>,
}

/// Case-folding applied to user/role keys before use as map keys.
fn normalize(key: &str) -> String {
    key.to_lowercase()
}

/// The process-scoped mapping store.
///
/// Created once, starts empty, and is refreshed by the sync loop for the
/// process lifetime. Lookups are non-blocking point reads against whichever
/// snapshot is current at call time.
#[derive(Debug, Default)]
pub struct MapStore {
    current: ArcSwap<Snapshot>,
}

impl MapStore {
    /// Create an empty store. Every lookup misses until the first `replace`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new snapshot from the given lists and atomically install it.
    ///
    /// Duplicate keys within a list are last-write-wins. The map/set
    /// construction happens before the swap, so concurrent readers see the
    /// old snapshot until the new one is complete.
    pub fn replace(
        &self,
        users: Vec<UserMapping>,
        roles: Vec<RoleMapping>,
        accounts: Vec<String>,
    ) {
        let mut snapshot = Snapshot::default();
        for user in users {
            snapshot.users.insert(normalize(&user.user_arn), user);
        }
        for role in roles {
            snapshot.roles.insert(normalize(&role.role_arn), role);
        }
        for account in accounts {
            snapshot.accounts.insert(account);
        }
        self.current.store(Arc::new(snapshot));
    }

    /// Look up a user mapping by ARN, case-insensitively.
    pub fn user_mapping(&self, arn: &str) -> Result<UserMapping, LookupError> {
        self.current
            .load()
            .users
            .get(&normalize(arn))
            .cloned()
            .ok_or(LookupError::UserNotFound)
    }

    /// Look up a role mapping by ARN, case-insensitively.
    pub fn role_mapping(&self, arn: &str) -> Result<RoleMapping, LookupError> {
        self.current
            .load()
            .roles
            .get(&normalize(arn))
            .cloned()
            .ok_or(LookupError::RoleNotFound)
    }

    /// Whether the given account ID is present. Exact match, no case folding.
    pub fn account_recognized(&self, id: &str) -> bool {
        self.current.load().accounts.contains(id)
    }
}
