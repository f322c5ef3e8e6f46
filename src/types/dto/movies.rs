use chrono::NaiveDate;
use poem_openapi::Object;
use rust_decimal::Decimal;

use crate::stores::{ImagePatch, MovieChanges, NewMovie};
use crate::types::db::movie;

/// A catalog entry as returned to clients
#[derive(Object, Debug, Clone)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub rating: String,
    pub price: Decimal,
    pub release_date: NaiveDate,
    pub image_url: Option<String>,
}

impl From<movie::Model> for MovieResponse {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            genre: m.genre,
            rating: m.rating,
            price: m.price,
            release_date: m.release_date,
            image_url: m.image_url,
        }
    }
}

/// Request model for creating a catalog entry
#[derive(Object, Debug)]
pub struct CreateMovieRequest {
    #[oai(validator(max_length = 60))]
    pub title: String,

    #[oai(validator(max_length = 30))]
    pub genre: String,

    #[oai(validator(max_length = 5))]
    pub rating: String,

    pub price: Decimal,

    pub release_date: NaiveDate,

    /// Relative path of an already-uploaded image
    pub image_url: Option<String>,
}

impl CreateMovieRequest {
    pub fn into_new_movie(self) -> NewMovie {
        NewMovie {
            title: self.title,
            genre: self.genre,
            rating: self.rating,
            price: self.price,
            release_date: self.release_date,
            image_url: self.image_url,
        }
    }
}

/// Request model for editing a catalog entry
///
/// The stored image survives unless a new path is supplied or
/// `remove_image` is set.
#[derive(Object, Debug)]
pub struct UpdateMovieRequest {
    #[oai(validator(max_length = 60))]
    pub title: String,

    #[oai(validator(max_length = 30))]
    pub genre: String,

    #[oai(validator(max_length = 5))]
    pub rating: String,

    pub price: Decimal,

    pub release_date: NaiveDate,

    /// Relative path of a newly-uploaded replacement image
    pub image_url: Option<String>,

    /// Clear the stored image reference
    pub remove_image: Option<bool>,
}

impl UpdateMovieRequest {
    pub fn into_changes(self) -> MovieChanges {
        let image = match (self.image_url, self.remove_image) {
            (Some(path), _) => ImagePatch::Set(path),
            (None, Some(true)) => ImagePatch::Remove,
            _ => ImagePatch::Keep,
        };

        MovieChanges {
            title: self.title,
            genre: self.genre,
            rating: self.rating,
            price: self.price,
            release_date: self.release_date,
            image,
        }
    }
}

/// Confirmation credentials for a catalog deletion
#[derive(Object, Debug)]
pub struct DeleteMovieRequest {
    pub email: String,
    pub password: String,
}

/// One grid page of catalog rows
#[derive(Object, Debug)]
pub struct MoviePageResponse {
    pub rows: Vec<MovieResponse>,

    /// Match count after filtering, before pagination
    pub total_matching: u64,
}
