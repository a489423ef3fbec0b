use super::client::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
}

impl From<Option<User>> for AuthorInfo {
    fn from(user: Option<User>) -> Self {
        let user = user.unwrap_or_default();
        Self {
            login: user.login,
            avatar_url: user.avatar_url,
            profile_url: user.html_url,
        }
    }
}
