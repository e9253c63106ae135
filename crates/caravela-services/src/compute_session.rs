//! Compute session state machine
//!
//! Tracks one cotation's edit -> compute -> save lifecycle. Compute
//! requests carry a monotonically increasing token; responses whose token
//! is no longer the latest are discarded (last request wins), so stale
//! network completions can never overwrite fresher state. Errors keep the
//! previously computed result and the edited entries, leaving the session
//! retryable.

use caravela_core::{
    models::{
        ComputeRequest, PaxComposition, RoomDemand, TarificationComputeResult,
        TarificationEntries, TarificationMode, TripDates,
    },
    AppError, AppResult,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// Lifecycle phase of a compute session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Editing,
    Computing,
    Computed,
    Saving,
    Saved,
    Error,
}

/// Per-cotation pricing session
#[derive(Debug, Clone)]
pub struct ComputeSession {
    cotation_id: Uuid,
    phase: SessionPhase,
    entries: TarificationEntries,
    room_demand: RoomDemand,
    pax: PaxComposition,
    trip: Option<TripDates>,
    next_token: u64,
    active_token: Option<u64>,
    result: Option<TarificationComputeResult>,
    last_error: Option<String>,
}

impl ComputeSession {
    /// Create an idle session for a cotation
    pub fn new(cotation_id: Uuid, mode: TarificationMode) -> Self {
        Self {
            cotation_id,
            phase: SessionPhase::Idle,
            entries: TarificationEntries::empty_for(mode),
            room_demand: RoomDemand::new(),
            pax: PaxComposition::default(),
            trip: None,
            next_token: 1,
            active_token: None,
            result: None,
            last_error: None,
        }
    }

    pub fn cotation_id(&self) -> Uuid {
        self.cotation_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> TarificationMode {
        self.entries.mode()
    }

    pub fn entries(&self) -> &TarificationEntries {
        &self.entries
    }

    pub fn result(&self) -> Option<&TarificationComputeResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the entries (variant replacement, not field mutation)
    ///
    /// Any in-flight compute is invalidated: its token can no longer win.
    pub fn edit_entries(&mut self, entries: TarificationEntries) {
        self.entries = entries;
        self.invalidate_in_flight();
        self.phase = SessionPhase::Editing;
    }

    /// Switch pricing mode, discarding the previous mode's entries
    pub fn switch_mode(&mut self, mode: TarificationMode) {
        if self.entries.mode() != mode {
            self.entries = TarificationEntries::empty_for(mode);
        }
        self.invalidate_in_flight();
        self.phase = SessionPhase::Editing;
    }

    /// Update the compute context (room demand, pax, trip dates)
    pub fn set_context(&mut self, room_demand: RoomDemand, pax: PaxComposition, trip: TripDates) {
        self.room_demand = room_demand;
        self.pax = pax;
        self.trip = Some(trip);
        self.invalidate_in_flight();
        self.phase = SessionPhase::Editing;
    }

    fn invalidate_in_flight(&mut self) {
        if let Some(token) = self.active_token.take() {
            debug!(token, "invalidating in-flight compute request");
        }
    }

    /// Start a compute, returning the request token and the request
    ///
    /// The token identifies the latest request; any previously issued
    /// token becomes stale.
    pub fn begin_compute(&mut self) -> AppResult<(u64, ComputeRequest)> {
        let trip = self
            .trip
            .ok_or_else(|| AppError::MissingField("trip dates".to_string()))?;

        let token = self.next_token;
        self.next_token += 1;
        self.active_token = Some(token);
        self.phase = SessionPhase::Computing;

        let request = ComputeRequest {
            cotation_id: self.cotation_id,
            entries: self.entries.clone(),
            room_demand: self.room_demand.clone(),
            pax: self.pax,
            trip,
        };
        Ok((token, request))
    }

    /// Apply a compute response
    ///
    /// Returns false when the token is stale; the response is discarded
    /// and the session state is untouched.
    pub fn complete_compute(&mut self, token: u64, result: TarificationComputeResult) -> bool {
        if self.active_token != Some(token) {
            warn!(token, "discarding stale compute response");
            return false;
        }
        self.active_token = None;
        self.result = Some(result);
        self.last_error = None;
        self.phase = SessionPhase::Computed;
        true
    }

    /// Apply a compute failure
    ///
    /// Stale failures are discarded like stale successes. A current
    /// failure moves to `Error` but keeps any previously computed result
    /// and the edited entries.
    pub fn fail_compute(&mut self, token: u64, message: impl Into<String>) -> bool {
        if self.active_token != Some(token) {
            warn!(token, "discarding stale compute failure");
            return false;
        }
        self.active_token = None;
        self.last_error = Some(message.into());
        self.phase = SessionPhase::Error;
        true
    }

    /// Start saving the entries (not the derived result)
    pub fn begin_save(&mut self) -> AppResult<&TarificationEntries> {
        if self.result.is_none() {
            return Err(AppError::InvalidTransition(
                "save requires a computed result".to_string(),
            ));
        }
        if self.phase == SessionPhase::Computing || self.phase == SessionPhase::Saving {
            return Err(AppError::InvalidTransition(format!(
                "cannot save while {:?}",
                self.phase
            )));
        }
        self.phase = SessionPhase::Saving;
        Ok(&self.entries)
    }

    /// Mark the save as persisted
    pub fn complete_save(&mut self) {
        self.phase = SessionPhase::Saved;
        self.last_error = None;
    }

    /// Record a save failure, preserving the computed state for retry
    pub fn fail_save(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.phase = SessionPhase::Error;
    }
}

/// In-memory session store, one session per cotation
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, ComputeSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure against the cotation's session, creating an idle
    /// per-person session on first access
    pub fn with<R>(&self, cotation_id: Uuid, f: impl FnOnce(&mut ComputeSession) -> R) -> R {
        let mut sessions = self.sessions.write();
        let session = sessions
            .entry(cotation_id)
            .or_insert_with(|| ComputeSession::new(cotation_id, TarificationMode::PerPerson));
        f(session)
    }

    /// Snapshot a session if it exists
    pub fn get(&self, cotation_id: Uuid) -> Option<ComputeSession> {
        self.sessions.read().get(&cotation_id).cloned()
    }

    /// Drop a session (e.g. when the cotation closes)
    pub fn remove(&self, cotation_id: Uuid) -> bool {
        self.sessions.write().remove(&cotation_id).is_some()
    }
}
