use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::errors::InternalError;
use crate::types::db::role::{self, Entity as Role};
use crate::types::db::user_role::{self, Entity as UserRole};

/// Repository for role rows and user-role memberships
///
/// Role rows are created lazily: `ensure_role` is idempotent and every
/// grant path goes through it, so nothing needs a pre-seeded roles table.
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create a new RoleStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Check whether a role row exists
    pub async fn role_exists(&self, name: &str) -> Result<bool, InternalError> {
        let count = Role::find()
            .filter(role::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("role_exists", e))?;
        Ok(count > 0)
    }

    /// Fetch the role row with the given name, creating it if missing
    pub async fn ensure_role(&self, name: &str) -> Result<role::Model, InternalError> {
        if let Some(existing) = self.find_role(name).await? {
            return Ok(existing);
        }

        let model = role::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(name.to_string()),
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok(created),
            // Lost a create race; the row exists now
            Err(e) if e.to_string().contains("UNIQUE") => self
                .find_role(name)
                .await?
                .ok_or_else(|| InternalError::database("ensure_role", e)),
            Err(e) => Err(InternalError::database("ensure_role", e)),
        }
    }

    /// Names of all roles held by the user, sorted
    pub async fn roles_for_user(&self, user_id: i32) -> Result<Vec<String>, InternalError> {
        let mut names: Vec<String> = Role::find()
            .inner_join(UserRole)
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("roles_for_user", e))?
            .into_iter()
            .map(|r| r.name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Check whether the user holds the named role
    pub async fn is_in_role(&self, user_id: i32, name: &str) -> Result<bool, InternalError> {
        let count = UserRole::find()
            .inner_join(Role)
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(role::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("is_in_role", e))?;
        Ok(count > 0)
    }

    /// Number of users currently holding the named role
    pub async fn count_in_role(&self, name: &str) -> Result<u64, InternalError> {
        UserRole::find()
            .inner_join(Role)
            .filter(role::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_in_role", e))
    }

    /// Grant the named role to the user, creating the role row if missing.
    /// Granting an already-held role is a no-op.
    pub async fn add_to_role(&self, user_id: i32, name: &str) -> Result<(), InternalError> {
        let role = self.ensure_role(name).await?;

        let existing = UserRole::find_by_id((user_id, role.id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("add_to_role", e))?;
        if existing.is_some() {
            return Ok(());
        }

        let membership = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role.id),
        };
        membership
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("add_to_role", e))?;

        Ok(())
    }

    /// Revoke the named role from the user. Revoking a role the user does
    /// not hold is a no-op.
    pub async fn remove_from_role(&self, user_id: i32, name: &str) -> Result<(), InternalError> {
        let Some(role) = self.find_role(name).await? else {
            return Ok(());
        };

        UserRole::delete_by_id((user_id, role.id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("remove_from_role", e))?;

        Ok(())
    }

    async fn find_role(&self, name: &str) -> Result<Option<role::Model>, InternalError> {
        Role::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_role", e))
    }
}
