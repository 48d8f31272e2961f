//! Current User Use Case
//!
//! Profile lookup for the authenticated caller.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct CurrentUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
