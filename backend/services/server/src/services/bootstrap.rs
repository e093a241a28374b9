use engine::types::user_types::{NewUser, Role, UserUpdate};
use engine::types::store_types::StoreError;
use engine::LotteryStore;
use log::{info, warn};

use crate::config::AdminSeed;
use crate::error::ApiError;
use crate::utils::password::hash_password;

/// Makes sure the configured administrator account exists and has the
/// admin role. An existing account keeps its password.
pub async fn ensure_admin(
    store: &LotteryStore,
    seed: &AdminSeed,
    bcrypt_cost: u32,
) -> Result<(), ApiError> {
    match store.get_user_by_email(&seed.email).await {
        Ok(user) if user.role == Role::Admin => {
            info!("Administrator {} already present", seed.email);
            Ok(())
        }
        Ok(user) => {
            warn!("Promoting existing account {} to administrator", seed.email);
            let update = UserUpdate {
                role: Some(Role::Admin),
                ..Default::default()
            };
            store.update_user(user.id, update).await?;
            Ok(())
        }
        Err(StoreError::UserNotFound) => {
            let password = hash_password(seed.password.clone(), bcrypt_cost).await?;
            let user = store
                .add_user(NewUser {
                    name: seed.name.clone(),
                    email: seed.email.clone(),
                    password,
                    role: Role::Admin,
                })
                .await?;
            info!("Created administrator {} (id {})", user.email, user.id);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
