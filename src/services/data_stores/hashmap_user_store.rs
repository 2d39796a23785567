use crate::domain::{
    verify_password_hash, Email, Password, User, UserStore, UserStoreError,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct HashmapUserStore {
    users: HashMap<Email, User>,
}

#[async_trait::async_trait]
impl UserStore for HashmapUserStore {
    async fn add_user(&mut self, user: User) -> Result<(), UserStoreError> {
        let email = &user.email;

        if self.users.contains_key(email) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        self.users.insert(email.clone(), user);
        Ok(())
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        match self.users.get(email) {
            Some(user) => Ok(user.clone()),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    async fn validate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let user = self.get_user(email).await?;
        verify_password_hash(
            user.hash.as_ref().to_owned(),
            password.as_ref().to_owned(),
        )
        .await
        .map_err(|_| UserStoreError::InvalidCredentials)
    }

    async fn delete_user(
        &mut self,
        email: &Email,
    ) -> Result<(), UserStoreError> {
        match self.users.remove(email) {
            Some(_) => Ok(()),
            None => Err(UserStoreError::UserNotFound),
        }
    }
}
