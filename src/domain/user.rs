use super::{Email, UserId, UserName, UserPasswordHash};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub hash: UserPasswordHash,
    pub image: Option<String>,
}

impl User {
    pub fn new(
        name: UserName,
        email: Email,
        hash: UserPasswordHash,
    ) -> Self {
        Self {
            id: UserId::default(),
            name,
            email,
            hash,
            image: None,
        }
    }
}
