use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::types::db::role::{self, Entity as Role};
use crate::types::db::user::Entity as User;
use crate::types::db::user_role::{self, Entity as UserRole};

/// Grants and revocations applied by a reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub granted: Vec<String>,
    pub revoked: Vec<String>,
}

impl ReconcileOutcome {
    /// True when the requested set equaled the current set
    pub fn unchanged(&self) -> bool {
        self.granted.is_empty() && self.revoked.is_empty()
    }
}

/// Moves a user from its current role set to a requested target role set
/// with the minimal set of grants and revocations
///
/// The whole add/remove sequence runs in a single transaction: a failure
/// partway rolls the user back to the pre-call role set instead of leaving
/// a mixed state. Role rows for granted names are created on demand before
/// the grant.
///
/// The reconciler accepts any target, including the empty set; callers
/// enforce invariants such as "at least one SuperAdmin remains" before
/// calling.
pub struct RoleReconciler {
    db: DatabaseConnection,
}

impl RoleReconciler {
    /// Create a new RoleReconciler on the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reconcile the user's roles to exactly `requested`
    ///
    /// Roles in both sets are untouched; `requested − current` is granted,
    /// `current − requested` revoked. Reconciling to the current set
    /// performs zero writes and still succeeds.
    ///
    /// # Errors
    /// * `UserError::NotFound` when the user does not exist
    pub async fn reconcile(
        &self,
        user_id: i32,
        requested: &BTreeSet<String>,
    ) -> Result<ReconcileOutcome, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("reconcile_begin", e))?;

        User::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("reconcile_find_user", e))?
            .ok_or(UserError::NotFound(user_id))?;

        let current_rows: Vec<role::Model> = Role::find()
            .inner_join(UserRole)
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&txn)
            .await
            .map_err(|e| InternalError::database("reconcile_current_roles", e))?;
        let current: BTreeSet<String> = current_rows.iter().map(|r| r.name.clone()).collect();

        let to_add: Vec<String> = requested.difference(&current).cloned().collect();
        let to_remove: Vec<String> = current.difference(requested).cloned().collect();

        for name in &to_add {
            // Role row creation precedes the grant
            let role = ensure_role(&txn, name).await?;
            let membership = user_role::ActiveModel {
                user_id: Set(user_id),
                role_id: Set(role.id),
            };
            membership
                .insert(&txn)
                .await
                .map_err(|e| InternalError::database("reconcile_grant", e))?;
        }

        for role in current_rows.iter().filter(|r| !requested.contains(&r.name)) {
            UserRole::delete_by_id((user_id, role.id))
                .exec(&txn)
                .await
                .map_err(|e| InternalError::database("reconcile_revoke", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::database("reconcile_commit", e))?;

        if !(to_add.is_empty() && to_remove.is_empty()) {
            tracing::info!(
                "Reconciled roles for user {}: granted {:?}, revoked {:?}",
                user_id,
                to_add,
                to_remove
            );
        }

        Ok(ReconcileOutcome {
            granted: to_add,
            revoked: to_remove,
        })
    }
}

async fn find_role(
    txn: &DatabaseTransaction,
    name: &str,
) -> Result<Option<role::Model>, InternalError> {
    Role::find()
        .filter(role::Column::Name.eq(name))
        .one(txn)
        .await
        .map_err(|e| InternalError::database("reconcile_find_role", e))
}

async fn ensure_role(
    txn: &DatabaseTransaction,
    name: &str,
) -> Result<role::Model, InternalError> {
    if let Some(existing) = find_role(txn, name).await? {
        return Ok(existing);
    }

    let model = role::ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(name.to_string()),
    };
    model
        .insert(txn)
        .await
        .map_err(|e| InternalError::database("reconcile_create_role", e))
}
