//! Mutex-guarded marker storage with sequential identifiers.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{MarkerRepository, MarkerRepositoryError};
use crate::domain::{Marker, MarkerDraft, MarkerId, UserId};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    markers: BTreeMap<MarkerId, Marker>,
}

/// In-memory [`MarkerRepository`]. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryMarkerRepository {
    state: Mutex<State>,
}

impl InMemoryMarkerRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, MarkerRepositoryError> {
        self.state
            .lock()
            .map_err(|_| MarkerRepositoryError::connection("marker store lock poisoned"))
    }
}

#[async_trait]
impl MarkerRepository for InMemoryMarkerRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Marker>, MarkerRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .markers
            .values()
            .filter(|marker| marker.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn list_by_owner_and_ids(
        &self,
        owner: &UserId,
        ids: &[MarkerId],
    ) -> Result<Vec<Marker>, MarkerRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .markers
            .values()
            .filter(|marker| marker.is_owned_by(owner) && ids.contains(&marker.id()))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: MarkerId) -> Result<Option<Marker>, MarkerRepositoryError> {
        Ok(self.lock()?.markers.get(&id).cloned())
    }

    async fn insert(
        &self,
        owner: &UserId,
        draft: &MarkerDraft,
    ) -> Result<Marker, MarkerRepositoryError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let marker = Marker::from_draft(MarkerId::new(state.next_id), *owner, draft.clone());
        state.markers.insert(marker.id(), marker.clone());
        Ok(marker)
    }

    async fn update(&self, marker: &Marker) -> Result<bool, MarkerRepositoryError> {
        let mut state = self.lock()?;
        match state.markers.get_mut(&marker.id()) {
            Some(stored) if stored.is_owned_by(marker.owner()) => {
                *stored = marker.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, owner: &UserId, id: MarkerId) -> Result<bool, MarkerRepositoryError> {
        let mut state = self.lock()?;
        let owned = state
            .markers
            .get(&id)
            .is_some_and(|marker| marker.is_owned_by(owner));
        if owned {
            state.markers.remove(&id);
        }
        Ok(owned)
    }
}
