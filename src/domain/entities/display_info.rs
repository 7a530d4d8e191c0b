use super::{User, UserId};

/// The minimal author identity needed to render a message row.
///
/// The name is always present: users without a name are shown by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDisplayInfo {
    id: UserId,
    name: String,
    image_url: Option<String>,
}

impl UserDisplayInfo {
    /// Derives display info from a user, falling back to the id for the name.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user
                .name()
                .map_or_else(|| user.id().to_string(), String::from),
            image_url: user.image_url().map(String::from),
        }
    }

    /// Returns the user id.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the avatar URL, if the user has one.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

impl From<&User> for UserDisplayInfo {
    fn from(user: &User) -> Self {
        Self::from_user(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_falls_back_to_id() {
        let info = UserDisplayInfo::from_user(&User::new("u1"));

        assert_eq!(info.id().as_str(), "u1");
        assert_eq!(info.name(), "u1");
        assert!(info.image_url().is_none());
    }

    #[test]
    fn test_named_user_keeps_name_and_avatar() {
        let user = User::new("u2")
            .with_name("Han")
            .with_image_url("https://cdn.example.com/han.jpg");
        let info = UserDisplayInfo::from(&user);

        assert_eq!(info.name(), "Han");
        assert_eq!(info.image_url(), Some("https://cdn.example.com/han.jpg"));
    }
}
