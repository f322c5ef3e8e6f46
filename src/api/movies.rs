use std::sync::Arc;

use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};

use crate::api::auth::BearerAuth;
use crate::api::helpers;
use crate::errors::CatalogError;
use crate::services::privileged_guard::Requirement;
use crate::services::{MovieService, PrivilegedGuard, TokenService};
use crate::types::dto::common::{GridQuery, MessageResponse};
use crate::types::dto::movies::{
    CreateMovieRequest, DeleteMovieRequest, MoviePageResponse, MovieResponse, UpdateMovieRequest,
};
use crate::types::internal::auth::Claims;
use crate::types::internal::roles::RoleName;

/// Movie catalog API endpoints
///
/// Reads require any authenticated account; create/update require the
/// Admin or SuperAdmin role on the session; delete additionally re-proves
/// credentials through the privileged guard.
pub struct MoviesApi {
    movie_service: Arc<MovieService>,
    guard: Arc<PrivilegedGuard>,
    token_service: Arc<TokenService>,
}

impl MoviesApi {
    /// Create a new MoviesApi
    pub fn new(
        movie_service: Arc<MovieService>,
        guard: Arc<PrivilegedGuard>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            movie_service,
            guard,
            token_service,
        }
    }

    fn authenticate(&self, auth: &BearerAuth) -> Result<Claims, CatalogError> {
        helpers::claims_from_token(&self.token_service, &auth.0.token)
            .map_err(|_| CatalogError::unauthorized())
    }

    fn require_catalog_admin(&self, auth: &BearerAuth) -> Result<Claims, CatalogError> {
        let claims = self.authenticate(auth)?;
        if !helpers::holds_any(&claims, &[RoleName::Admin, RoleName::SuperAdmin]) {
            return Err(CatalogError::admin_required());
        }
        Ok(claims)
    }
}

/// API tags for catalog endpoints
#[derive(Tags)]
enum MovieTags {
    /// Movie catalog
    Movies,
}

#[OpenApi(prefix_path = "/movies")]
impl MoviesApi {
    /// Grid search over the catalog
    #[oai(path = "/search", method = "post", tag = "MovieTags::Movies")]
    async fn search(
        &self,
        auth: BearerAuth,
        body: Json<GridQuery>,
    ) -> Result<Json<MoviePageResponse>, CatalogError> {
        self.authenticate(&auth)?;

        let page = self
            .movie_service
            .search(&body.to_page_request())
            .await
            .map_err(CatalogError::from_internal)?;

        Ok(Json(MoviePageResponse {
            rows: page.rows.into_iter().map(MovieResponse::from).collect(),
            total_matching: page.total_matching,
        }))
    }

    /// List the catalog, optionally narrowed to one genre
    #[oai(path = "/", method = "get", tag = "MovieTags::Movies")]
    async fn list(
        &self,
        auth: BearerAuth,
        genre: Query<Option<String>>,
    ) -> Result<Json<Vec<MovieResponse>>, CatalogError> {
        self.authenticate(&auth)?;

        let movies = match genre.0.as_deref() {
            Some(genre) => self.movie_service.by_genre(genre).await,
            None => self.movie_service.all().await,
        }
        .map_err(CatalogError::from_internal)?;

        Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
    }

    /// Fetch one catalog entry
    #[oai(path = "/:id", method = "get", tag = "MovieTags::Movies")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MovieResponse>, CatalogError> {
        self.authenticate(&auth)?;

        let movie = self
            .movie_service
            .get(id.0)
            .await
            .map_err(CatalogError::from_internal)?;

        Ok(Json(MovieResponse::from(movie)))
    }

    /// Confirm a movie exists before playback starts
    #[oai(path = "/:id/watch", method = "post", tag = "MovieTags::Movies")]
    async fn watch(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, CatalogError> {
        self.authenticate(&auth)?;

        self.movie_service
            .watch(id.0)
            .await
            .map_err(CatalogError::from_internal)?;

        Ok(Json(MessageResponse {
            message: "Movie watched successfully".to_string(),
        }))
    }

    /// Create a catalog entry (Admin or SuperAdmin)
    #[oai(path = "/", method = "post", tag = "MovieTags::Movies")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateMovieRequest>,
    ) -> Result<Json<MovieResponse>, CatalogError> {
        let claims = self.require_catalog_admin(&auth)?;
        let actor_id =
            helpers::subject_id(&claims).map_err(|_| CatalogError::unauthorized())?;

        let created = self
            .movie_service
            .create(actor_id, body.0.into_new_movie())
            .await
            .map_err(CatalogError::from_internal)?;

        Ok(Json(MovieResponse::from(created)))
    }

    /// Edit a catalog entry (Admin or SuperAdmin)
    #[oai(path = "/:id", method = "put", tag = "MovieTags::Movies")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateMovieRequest>,
    ) -> Result<Json<MovieResponse>, CatalogError> {
        let claims = self.require_catalog_admin(&auth)?;
        let actor_id =
            helpers::subject_id(&claims).map_err(|_| CatalogError::unauthorized())?;

        let updated = self
            .movie_service
            .update(actor_id, id.0, body.0.into_changes())
            .await
            .map_err(CatalogError::from_internal)?;

        Ok(Json(MovieResponse::from(updated)))
    }

    /// Delete a catalog entry with credential confirmation
    ///
    /// The session must already hold Admin or SuperAdmin; the body
    /// credentials are then re-verified by the guard immediately before
    /// the row is removed.
    #[oai(path = "/:id/delete", method = "post", tag = "MovieTags::Movies")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<DeleteMovieRequest>,
    ) -> Result<Json<MessageResponse>, CatalogError> {
        self.require_catalog_admin(&auth)?;

        let actor = self
            .guard
            .reauthenticate(&body.email, &body.password, Requirement::CatalogAdmin)
            .await
            .map_err(CatalogError::from_guard)?;

        self.movie_service
            .delete(&actor, id.0)
            .await
            .map_err(CatalogError::from_internal)?;

        Ok(Json(MessageResponse {
            message: "Movie deleted successfully".to_string(),
        }))
    }
}
