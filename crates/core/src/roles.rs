//! Well-known role name constants and the role-satisfaction rule.
//!
//! Roles are plain strings on the user row. `admin` is a superuser role:
//! it satisfies every role requirement, so an admin-gated check is only
//! passed by admins while any other requirement is passed by holders of
//! that exact role plus admins.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Whether `user_role` meets a `required` role.
pub fn role_satisfies(user_role: &str, required: &str) -> bool {
    user_role == ROLE_ADMIN || user_role == required
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_satisfies_any_requirement() {
        assert!(role_satisfies(ROLE_ADMIN, ROLE_ADMIN));
        assert!(role_satisfies(ROLE_ADMIN, ROLE_EDITOR));
        assert!(role_satisfies(ROLE_ADMIN, "viewer"));
    }

    #[test]
    fn exact_role_satisfies_itself() {
        assert!(role_satisfies(ROLE_EDITOR, ROLE_EDITOR));
    }

    #[test]
    fn other_roles_are_rejected() {
        assert!(!role_satisfies("viewer", ROLE_EDITOR));
        assert!(!role_satisfies(ROLE_EDITOR, ROLE_ADMIN));
        assert!(!role_satisfies("", ROLE_EDITOR));
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert!(!role_satisfies("Admin", ROLE_EDITOR));
        assert!(!role_satisfies("EDITOR", ROLE_EDITOR));
    }
}
