//! Top-N ranking by balance.
//!
//! The ranking is rebuilt from a full `AccountStore` snapshot and published as
//! an immutable list, replacing the previous one wholesale. Accounts with equal
//! balances are ordered by canonical username, ascending.

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;

use simple_economy_core::{Account, AccountKey};

use crate::accounts::AccountStore;

#[derive(Debug, Clone)]
struct Published {
    version: u64,
    limit: usize,
    entries: Arc<[Account]>,
}

/// Read-optimized view of the richest accounts.
#[derive(Debug)]
pub struct RankingIndex {
    published: RwLock<Published>,
}

impl RankingIndex {
    /// Create an empty ranking holding at most `limit` accounts.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            published: RwLock::new(Published {
                version: 0,
                limit,
                entries: Arc::from(Vec::new()),
            }),
        }
    }

    /// The configured size.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.published.read().limit
    }

    /// The most recently published ranking, best first.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Account]> {
        Arc::clone(&self.published.read().entries)
    }

    /// Rebuild if the store changed since the last publication.
    pub fn refresh(&self, store: &AccountStore) {
        let (version, limit) = {
            let published = self.published.read();
            (published.version, published.limit)
        };
        if store.version() != version {
            self.publish(store, limit, false);
        }
    }

    /// Rebuild unconditionally.
    pub fn recompute(&self, store: &AccountStore) {
        let limit = self.limit();
        self.publish(store, limit, false);
    }

    /// Change the ranking size and rebuild.
    pub fn set_limit(&self, store: &AccountStore, limit: usize) {
        self.publish(store, limit, true);
    }

    fn publish(&self, store: &AccountStore, limit: usize, force: bool) {
        let snapshot = store.snapshot();
        let entries = rank(snapshot.accounts, limit);

        let mut published = self.published.write();
        // A slower rebuild from an older snapshot must not replace a newer one.
        if force || (published.limit == limit && snapshot.version >= published.version) {
            *published = Published {
                version: snapshot.version,
                limit,
                entries: Arc::from(entries),
            };
            tracing::trace!(version = snapshot.version, limit, "Ranking published");
        }
    }
}

fn by_rank(a: &(AccountKey, Account), b: &(AccountKey, Account)) -> Ordering {
    b.1.balance.cmp(&a.1.balance).then_with(|| a.0.cmp(&b.0))
}

/// Order accounts richest first and keep the top `limit`.
fn rank(mut accounts: Vec<(AccountKey, Account)>, limit: usize) -> Vec<Account> {
    if limit < accounts.len() {
        accounts.select_nth_unstable_by(limit, by_rank);
        accounts.truncate(limit);
    }
    // Keys are unique, so the order is total and the unstable sort deterministic.
    accounts.sort_unstable_by(by_rank);
    accounts.into_iter().map(|(_, account)| account).collect()
}
