use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};

/// Fields required to create a user record
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// UserStore manages user rows and their password credentials
///
/// Email lookup is case-insensitive via the normalized_email column.
/// Password hashes are Argon2id with the configured pepper as the secret
/// parameter; the hash never leaves this store in a usable form.
pub struct UserStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl UserStore {
    /// Create a new UserStore with the given database connection and
    /// password pepper
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self {
            db,
            password_pepper,
        }
    }

    /// Add a new user to the database
    ///
    /// # Errors
    /// * `UserError::EmailTaken` when the email is already registered
    ///   (case-insensitive)
    pub async fn create(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        let normalized_email = new_user.email.to_lowercase();

        let existing = User::find()
            .filter(user::Column::NormalizedEmail.eq(&normalized_email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?;

        if existing.is_some() {
            return Err(UserError::EmailTaken(new_user.email).into());
        }

        let password_hash = self.hash_password(&new_user.password)?;

        let model = user::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            email: Set(new_user.email.clone()),
            normalized_email: Set(normalized_email),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
            last_login_at: Set(None),
        };

        let created = model.insert(&self.db).await.map_err(|e| {
            // The unique index on normalized_email can still fire on a
            // concurrent insert between the check above and this write
            if e.to_string().contains("UNIQUE") {
                InternalError::from(UserError::EmailTaken(new_user.email.clone()))
            } else {
                InternalError::database("create_user", e)
            }
        })?;

        Ok(created)
    }

    /// Look up a user by email, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::NormalizedEmail.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    /// Fetch a user by id
    ///
    /// # Errors
    /// * `UserError::NotFound` when no row exists
    pub async fn get_by_id(&self, user_id: i32) -> Result<user::Model, InternalError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_id", e))?
            .ok_or_else(|| UserError::NotFound(user_id).into())
    }

    /// List all users ordered by id
    pub async fn all(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Verify a plaintext password against the user's stored credential
    ///
    /// Returns Ok(false) on mismatch; only infrastructure problems error.
    pub async fn verify_password(
        &self,
        user: &user::Model,
        password: &str,
    ) -> Result<bool, InternalError> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| InternalError::crypto("parse_password_hash", e.to_string()))?;

        match self.argon2()?.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(InternalError::crypto("verify_password", e.to_string())),
        }
    }

    /// Update the user's profile names using fetch-then-set semantics
    pub async fn update_profile(
        &self,
        user_id: i32,
        first_name: String,
        last_name: String,
    ) -> Result<user::Model, InternalError> {
        let user = self.get_by_id(user_id).await?;

        let mut model = user.into_active_model();
        model.first_name = Set(first_name);
        model.last_name = Set(last_name);

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_profile", e))
    }

    /// Stamp the user's last login time with the current UTC time
    pub async fn touch_last_login(&self, user_id: i32) -> Result<(), InternalError> {
        let user = self.get_by_id(user_id).await?;

        let mut model = user.into_active_model();
        model.last_login_at = Set(Some(Utc::now()));

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("touch_last_login", e))?;

        Ok(())
    }

    /// Physically delete a user row; role memberships cascade
    pub async fn delete(&self, user_id: i32) -> Result<(), InternalError> {
        let result = User::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(user_id).into());
        }

        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?;
        Ok(hash.to_string())
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }
}
