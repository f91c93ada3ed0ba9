use serde::{Deserialize, Serialize};
use std::fmt;

/// Privilege level bound to a principal.
///
/// Every principal holds at least `User`: the data-access boundary returns
/// the default when no role row exists, so an absent assignment and an
/// explicit `user` row are the same value by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Tag stored in the `user_roles.role` column
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// Capitalized name for user-facing denial messages
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Moderator => "Moderator",
            Role::Admin => "Admin",
        }
    }

    /// Whether this assignment satisfies `required`.
    ///
    /// Admin is satisfied only by admin; user-level requirements are met
    /// by every authenticated principal.
    #[inline]
    pub const fn grants(&self, required: Role) -> bool {
        *self as u8 >= required as u8
    }

    /// Parse a stored role tag. Unknown tags resolve to the default
    /// `User` so a corrupt row can never widen privileges.
    pub fn from_code(code: &str) -> Self {
        match code {
            "user" => Role::User,
            "moderator" => Role::Moderator,
            "admin" => Role::Admin,
            other => {
                tracing::warn!(role = %other, "Unknown role tag, treating as user");
                Role::User
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("user"), Role::User);
        assert_eq!(Role::from_code("moderator"), Role::Moderator);
        assert_eq!(Role::from_code("admin"), Role::Admin);
    }

    #[test]
    fn test_unknown_code_is_user() {
        assert_eq!(Role::from_code("superuser"), Role::User);
        assert_eq!(Role::from_code(""), Role::User);
    }

    #[test]
    fn test_default_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_admin_grant_is_exact() {
        assert!(Role::Admin.grants(Role::Admin));
        assert!(!Role::Moderator.grants(Role::Admin));
        assert!(!Role::User.grants(Role::Admin));
    }

    #[test]
    fn test_user_grant_is_universal() {
        assert!(Role::User.grants(Role::User));
        assert!(Role::Moderator.grants(Role::User));
        assert!(Role::Admin.grants(Role::User));
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Admin.display_name(), "Admin");
    }
}
