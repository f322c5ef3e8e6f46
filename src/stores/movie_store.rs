use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::internal::MovieError;
use crate::errors::InternalError;
use crate::stores::paging::{field_matches, paginate, Page, PageRequest};
use crate::types::db::movie::{self, Entity as Movie};

/// Fields required to create a catalog entry
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
    pub rating: String,
    pub price: Decimal,
    pub release_date: NaiveDate,
    pub image_url: Option<String>,
}

/// How an update treats the stored image reference
///
/// Edits arrive without image bytes more often than with them; Keep is the
/// default so a plain field edit never clobbers the stored path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImagePatch {
    #[default]
    Keep,
    Set(String),
    Remove,
}

/// Field values applied to an existing catalog entry
#[derive(Debug, Clone)]
pub struct MovieChanges {
    pub title: String,
    pub genre: String,
    pub rating: String,
    pub price: Decimal,
    pub release_date: NaiveDate,
    pub image: ImagePatch,
}

/// Repository for movie catalog rows
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    /// Create a new MovieStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch a movie by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<movie::Model>, InternalError> {
        Movie::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_movie_by_id", e))
    }

    /// Insert a new catalog entry and return the stored row
    pub async fn create(&self, new_movie: NewMovie) -> Result<movie::Model, InternalError> {
        let model = movie::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            title: Set(new_movie.title),
            genre: Set(new_movie.genre),
            rating: Set(new_movie.rating),
            price: Set(new_movie.price),
            release_date: Set(new_movie.release_date),
            image_url: Set(new_movie.image_url),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_movie", e))
    }

    /// Apply changes to the currently-persisted row
    ///
    /// Fetch-then-merge: fields are applied one by one onto the stored row
    /// rather than blind-overwriting it, and the image reference follows
    /// the patch so an edit without a new upload keeps the stored path.
    ///
    /// # Errors
    /// * `MovieError::NotFound` when no row exists for `id`
    pub async fn update(
        &self,
        id: i32,
        changes: MovieChanges,
    ) -> Result<movie::Model, InternalError> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or(MovieError::NotFound(id))?;

        let image_url = match changes.image {
            ImagePatch::Keep => existing.image_url.clone(),
            ImagePatch::Set(path) => Some(path),
            ImagePatch::Remove => None,
        };

        let mut model = existing.into_active_model();
        model.title = Set(changes.title);
        model.genre = Set(changes.genre);
        model.rating = Set(changes.rating);
        model.price = Set(changes.price);
        model.release_date = Set(changes.release_date);
        model.image_url = Set(image_url);

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_movie", e))
    }

    /// Remove the row. Any uploaded image file stays on disk; only the
    /// reference disappears with the row.
    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let result = Movie::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_movie", e))?;

        if result.rows_affected == 0 {
            return Err(MovieError::NotFound(id).into());
        }

        Ok(())
    }

    /// List the whole catalog ordered by id
    pub async fn all(&self) -> Result<Vec<movie::Model>, InternalError> {
        Movie::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_movies", e))
    }

    /// List catalog entries with an exact genre match
    pub async fn by_genre(&self, genre: &str) -> Result<Vec<movie::Model>, InternalError> {
        Movie::find()
            .filter(movie::Column::Genre.eq(genre))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_movies_by_genre", e))
    }

    /// Free-text search over the catalog for the grid UI
    ///
    /// The query matches title, genre, rating, price and image reference;
    /// `total_matching` counts rows after filtering, before pagination.
    pub async fn search_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<movie::Model>, InternalError> {
        let movies = self.all().await?;
        Ok(paginate(movies, request, movie_matches))
    }
}

fn movie_matches(movie: &movie::Model, query: &str) -> bool {
    field_matches(&movie.title, query)
        || field_matches(&movie.genre, query)
        || field_matches(&movie.rating, query)
        || movie.price.to_string().contains(query)
        || movie
            .image_url
            .as_deref()
            .is_some_and(|url| field_matches(url, query))
}
