//! Process-wide in-memory store.
//!
//! All tables live behind one `RwLock`. Operations that read and then write
//! (claiming a booking slot, recording a pledge against its project,
//! assigning a volunteer) hold the write guard for the whole step, so they
//! are atomic with respect to each other. Nothing survives a restart.

pub mod models;
pub mod seeders;

pub use models::*;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::Serialize;
use thiserror::Error;

/// Failures raised by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Time slot is already booked")]
    SlotTaken {
        professional_id: String,
        date: String,
        time: String,
    },

    #[error("{entity} is already {state}")]
    InvalidState {
        entity: &'static str,
        id: String,
        state: &'static str,
    },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Every table of the service
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tables {
    pub bookings: Vec<Booking>,
    pub projects: Vec<Project>,
    pub pledges: Vec<Pledge>,
    pub help_requests: Vec<HelpRequest>,
    pub professionals: Vec<Professional>,
}

#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// A store preloaded with the demo data
    pub fn seeded() -> Self {
        Self::from_tables(seeders::demo_tables())
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write()
    }

    /// Consistent copy of every table
    pub fn snapshot(&self) -> Tables {
        self.tables.read().clone()
    }
}
