//! User administration

use shared::dto::{NewUserRequest, PageParams, UserDto};
use shared::models::{GROUP_FOLLOWER, GROUP_FRIENDS_ALL};
use shared::{DbPool, Error, Result};
use tracing::info;

use crate::repositories::{GroupRepository, UserRepository};

pub struct UserService;

impl UserService {
    /// Users with the given ids, or every user when no ids are given
    pub async fn list(
        pool: &DbPool,
        ids: Option<Vec<i64>>,
        page: PageParams,
    ) -> Result<Vec<UserDto>> {
        let users = match ids {
            Some(ids) => UserRepository::list_by_ids(pool, &ids, page).await?,
            None => UserRepository::list(pool, page).await?,
        };

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Register a user together with the built-in friendship groups
    pub async fn create(pool: &DbPool, req: &NewUserRequest) -> Result<UserDto> {
        let email = req.email.trim();
        if UserRepository::email_exists(pool, email).await? {
            return Err(Error::conflict(format!(
                "User with email {} already exists",
                email
            )));
        }

        let mut tx = pool.begin().await?;
        let user = UserRepository::create(&mut *tx, req.name.trim(), email).await?;
        GroupRepository::create(&mut *tx, user.id, GROUP_FOLLOWER).await?;
        GroupRepository::create(&mut *tx, user.id, GROUP_FRIENDS_ALL).await?;
        tx.commit().await?;

        info!(user_id = user.id, "User created");
        Ok(UserDto::from(user))
    }

    pub async fn delete(pool: &DbPool, user_id: i64) -> Result<()> {
        if !UserRepository::delete(pool, user_id).await? {
            return Err(Error::not_found("User", user_id));
        }

        info!(user_id, "User deleted");
        Ok(())
    }
}

/// Fail with 404 unless the user exists
pub(crate) async fn ensure_user_exists(pool: &DbPool, user_id: i64) -> Result<()> {
    if !UserRepository::exists(pool, user_id).await? {
        return Err(Error::not_found("User", user_id));
    }
    Ok(())
}
