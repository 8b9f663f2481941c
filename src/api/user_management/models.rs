use crate::crud::User;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct UserOut {
    pub user_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub city: Option<String>,
    pub phone: Option<String>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        UserOut {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            city: user.city,
            phone: user.phone,
        }
    }
}

/// What a login session remembers about its user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub user_id: i32,
    pub email: String,
}

pub struct UserLoggedIn(pub SessionUser);
