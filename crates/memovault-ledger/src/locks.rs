//! Per-user mutual exclusion.

use std::collections::HashMap;
use std::sync::Arc;

use memovault_core::UserId;
use parking_lot::Mutex;

/// Idle entries are pruned once the table grows past this many users.
const PRUNE_THRESHOLD: usize = 1024;

/// A table of per-user locks.
#[derive(Debug, Default)]
pub(crate) struct UserLocks {
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    /// The lock guarding `user_id`'s state.
    pub(crate) fn for_user(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();

        if locks.len() >= PRUNE_THRESHOLD {
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }

        Arc::clone(locks.entry(user_id.clone()).or_default())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_user_shares_a_lock() {
        let locks = UserLocks::default();
        let user_id = UserId::new("u1").unwrap();
        let a = locks.for_user(&user_id);
        let b = locks.for_user(&user_id);
        assert!(Arc::ptr_eq(&a, &b));

        let other = locks.for_user(&UserId::new("u2").unwrap());
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[test]
    fn idle_locks_are_pruned() {
        let locks = UserLocks::default();
        let held_user = UserId::new("held").unwrap();
        let held = locks.for_user(&held_user);

        for i in 0..PRUNE_THRESHOLD {
            let _ = locks.for_user(&UserId::new(format!("u{i}")).unwrap());
        }
        let _ = locks.for_user(&UserId::new("trigger").unwrap());

        assert!(locks.len() < PRUNE_THRESHOLD);
        assert!(Arc::ptr_eq(&held, &locks.for_user(&held_user)));
    }
}
