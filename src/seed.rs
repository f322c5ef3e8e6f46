use crate::app_data::AppData;
use crate::config::Settings;
use crate::errors::InternalError;
use crate::stores::NewUser;
use crate::types::internal::roles::RoleName;

/// Idempotent startup seeding
///
/// Ensures the three role rows exist and, when no user holds SuperAdmin,
/// creates the bootstrap SuperAdmin from settings. Every privileged flow
/// assumes at least one SuperAdmin exists, so a fresh database must get
/// one here.
pub async fn seed(app_data: &AppData, settings: &Settings) -> Result<(), InternalError> {
    for role in RoleName::ALL {
        app_data.role_store.ensure_role(role.as_str()).await?;
    }
    tracing::info!("Role rows ensured");

    let super_admins = app_data
        .role_store
        .count_in_role(RoleName::SuperAdmin.as_str())
        .await?;
    if super_admins > 0 {
        return Ok(());
    }

    let (Some(email), Some(password)) = (
        settings.superadmin_email.as_deref(),
        settings.superadmin_password.as_deref(),
    ) else {
        tracing::warn!(
            "No SuperAdmin exists and SUPERADMIN_EMAIL/SUPERADMIN_PASSWORD are not set; \
             user management will be unusable until one is created"
        );
        return Ok(());
    };

    // The account may already exist from an earlier run that seeded before
    // the role was introduced
    let user = match app_data.user_store.find_by_email(email).await? {
        Some(existing) => existing,
        None => {
            app_data
                .user_store
                .create(NewUser {
                    email: email.to_string(),
                    first_name: "Super".to_string(),
                    last_name: "Admin".to_string(),
                    password: password.to_string(),
                })
                .await?
        }
    };

    app_data
        .role_store
        .add_to_role(user.id, RoleName::SuperAdmin.as_str())
        .await?;

    tracing::info!("Bootstrap SuperAdmin {} seeded", email);
    Ok(())
}
