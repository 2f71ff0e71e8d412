//! Counting gate over a tokio semaphore.
//!
//! A slot is represented by a [`GatePermit`]. Dropping the permit is the
//! release, so every exit path of the holder frees its slot exactly once.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use taskgate_core::error::{Result, TaskGateError};

#[derive(Debug)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl AdmissionGate {
    /// Build a gate with `capacity` slots, kept within 1..=`Semaphore::MAX_PERMITS`.
    /// A zero capacity would deadlock every caller.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait for a free slot. No timeout; waiters are served in the semaphore's
    /// FIFO order.
    ///
    /// Only fails if the gate was closed, which the service never does.
    pub async fn acquire(&self) -> Result<GatePermit> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| TaskGateError::GateClosed)?;
        Ok(GatePermit { _permit: permit })
    }

    /// Take a slot only if one is free right now.
    pub fn try_acquire(&self) -> Option<GatePermit> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|permit| GatePermit { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently held.
    pub fn occupancy(&self) -> usize {
        self.capacity - self.available()
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// One held slot of an [`AdmissionGate`].
#[derive(Debug)]
#[must_use = "dropping the permit releases the slot immediately"]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl GatePermit {
    /// Give the slot back. Consumes the permit, so a second release cannot compile.
    pub fn release(self) {
        drop(self);
    }
}
