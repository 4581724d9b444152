//! Single-Flight Module
//!
//! Per-key gates that serialize loads of the same cache key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Gate = Arc<AsyncMutex<()>>;

/// Gate for one key plus the number of callers holding or waiting on it.
#[derive(Debug)]
struct Slot {
    gate: Gate,
    users: usize,
}

// == Flight Group ==
/// Hands out one gate per key. Holding a `FlightGuard` means no other
/// caller is loading that key.
///
/// A key stays in the map while any caller holds or waits on its gate,
/// including waiters whose future is later dropped.
#[derive(Debug, Default)]
pub struct FlightGroup {
    gates: Mutex<HashMap<String, Slot>>,
}

impl FlightGroup {
    pub fn new() -> Self {
        Self::default()
    }

    // == Acquire ==
    /// Waits until no other caller holds the gate for `key`, then takes it.
    ///
    /// Cancel safe: dropping the returned future before it completes
    /// releases this caller's claim on the key.
    pub async fn acquire(&self, key: &str) -> FlightGuard<'_> {
        let gate = {
            let mut gates = self.lock_gates();
            let slot = gates.entry(key.to_string()).or_insert_with(|| Slot {
                gate: Gate::default(),
                users: 0,
            });
            slot.users += 1;
            slot.gate.clone()
        };
        // Registered before the await so a cancelled waiter still unregisters
        let registration = Registration {
            group: self,
            key: key.to_string(),
        };
        let permit = gate.lock_owned().await;

        FlightGuard {
            _permit: permit,
            registration,
        }
    }

    /// Number of keys with a load in progress or queued.
    pub fn in_flight(&self) -> usize {
        self.lock_gates().len()
    }

    fn release(&self, key: &str) {
        let mut gates = self.lock_gates();
        if let Some(slot) = gates.get_mut(key) {
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                gates.remove(key);
            }
        }
    }

    fn lock_gates(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.gates.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One caller's claim on a key, released on drop.
#[derive(Debug)]
struct Registration<'a> {
    group: &'a FlightGroup,
    key: String,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.group.release(&self.key);
    }
}

// == Flight Guard ==
/// Exclusive right to load one key. Released on drop.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    // Field order matters: the permit is released before the claim
    _permit: OwnedMutexGuard<()>,
    registration: Registration<'a>,
}

impl FlightGuard<'_> {
    pub fn key(&self) -> &str {
        &self.registration.key
    }
}
