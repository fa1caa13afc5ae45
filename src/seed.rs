use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::Database;

/// Makes sure the configured `ADMIN_EMAIL` account exists with the admin role.
pub async fn seed_admin_user(db: &Database, config: &Config) -> Result<()> {
    let Some(email) = config.admin_email.as_deref() else {
        info!("ADMIN_EMAIL not set, skipping admin seeding");
        return Ok(());
    };

    if !email.contains('@') {
        warn!("ADMIN_EMAIL '{}' is not an email address, skipping admin seeding", email);
        return Ok(());
    }

    let existed = db.user_exists(email).await?;
    let id = db.ensure_admin(email).await?;
    if existed {
        info!("Admin user {} already exists ({})", email, id);
    } else {
        info!("Created admin user {} ({})", email, id);
    }

    Ok(())
}
