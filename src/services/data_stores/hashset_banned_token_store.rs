use color_eyre::eyre::Result;
use secrecy::{ExposeSecret, Secret};
use std::collections::HashSet;

use crate::domain::{BannedTokenStore, BannedTokenStoreError};

#[derive(Default)]
pub struct HashsetBannedTokenStore {
    banned_tokens: HashSet<String>,
}

#[async_trait::async_trait]
impl BannedTokenStore for HashsetBannedTokenStore {
    async fn add_token(&mut self, token: &Secret<String>) -> Result<()> {
        self.banned_tokens.insert(token.expose_secret().to_owned());
        Ok(())
    }

    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError> {
        if self.banned_tokens.contains(token.expose_secret()) {
            Err(BannedTokenStoreError::BannedToken)
        } else {
            Ok(())
        }
    }
}
