use std::sync::Arc;

use crate::errors::internal::MovieError;
use crate::errors::InternalError;
use crate::services::audit_recorder::AuditRecorder;
use crate::stores::{MovieChanges, MovieStore, NewMovie, Page, PageRequest};
use crate::types::db::movie;
use crate::types::internal::audit::{AuditAction, EntityKind};
use crate::types::internal::auth::Actor;

/// Audited catalog workflows over the movie store
///
/// Reads pass straight through; every mutation records an audit entry with
/// the relevant state snapshots after the store write succeeds. Deletion is
/// invoked with a guard-resolved actor, never straight from a session.
pub struct MovieService {
    movie_store: Arc<MovieStore>,
    audit_recorder: Arc<AuditRecorder>,
}

impl MovieService {
    /// Create a new MovieService
    pub fn new(movie_store: Arc<MovieStore>, audit_recorder: Arc<AuditRecorder>) -> Self {
        Self {
            movie_store,
            audit_recorder,
        }
    }

    /// Fetch a movie by id
    ///
    /// # Errors
    /// * `MovieError::NotFound` when no row exists
    pub async fn get(&self, id: i32) -> Result<movie::Model, InternalError> {
        self.movie_store
            .get_by_id(id)
            .await?
            .ok_or_else(|| MovieError::NotFound(id).into())
    }

    /// List the whole catalog
    pub async fn all(&self) -> Result<Vec<movie::Model>, InternalError> {
        self.movie_store.all().await
    }

    /// List catalog entries with an exact genre match
    pub async fn by_genre(&self, genre: &str) -> Result<Vec<movie::Model>, InternalError> {
        self.movie_store.by_genre(genre).await
    }

    /// Grid search over the catalog
    pub async fn search(&self, request: &PageRequest) -> Result<Page<movie::Model>, InternalError> {
        self.movie_store.search_page(request).await
    }

    /// Confirm a movie exists before playback starts
    pub async fn watch(&self, id: i32) -> Result<(), InternalError> {
        self.get(id).await.map(|_| ())
    }

    /// Create a catalog entry and record it
    pub async fn create(
        &self,
        actor_id: i32,
        new_movie: NewMovie,
    ) -> Result<movie::Model, InternalError> {
        let created = self.movie_store.create(new_movie).await?;

        self.audit_recorder
            .entry(AuditAction::CreateMovie, EntityKind::Movie)
            .actor(actor_id)
            .entity_id(created.id)
            .details(format!("Created movie: {}", created.title))
            .current_state(&created)?
            .write()
            .await?;

        tracing::info!("Movie {} created by user {}", created.id, actor_id);
        Ok(created)
    }

    /// Apply changes to an existing entry and record before/after state
    pub async fn update(
        &self,
        actor_id: i32,
        id: i32,
        changes: MovieChanges,
    ) -> Result<movie::Model, InternalError> {
        let previous = self.get(id).await?;
        let updated = self.movie_store.update(id, changes).await?;

        self.audit_recorder
            .entry(AuditAction::UpdateMovie, EntityKind::Movie)
            .actor(actor_id)
            .entity_id(id)
            .details(format!(
                "Updated movie: {} (Image: {})",
                updated.title,
                updated.image_url.as_deref().unwrap_or("None")
            ))
            .previous_state(&previous)?
            .current_state(&updated)?
            .write()
            .await?;

        tracing::info!("Movie {} updated by user {}", id, actor_id);
        Ok(updated)
    }

    /// Delete an entry and record its final state
    ///
    /// The stored image file is not touched; only the row disappears.
    pub async fn delete(&self, actor: &Actor, id: i32) -> Result<(), InternalError> {
        let movie = self.get(id).await?;

        self.movie_store.delete(id).await?;

        self.audit_recorder
            .entry(AuditAction::DeleteMovie, EntityKind::Movie)
            .actor(actor.id)
            .entity_id(id)
            .details(format!("Deleted movie: {}", movie.title))
            .previous_state(&movie)?
            .write()
            .await?;

        tracing::info!("Movie {} deleted by user {}", id, actor.id);
        Ok(())
    }
}
