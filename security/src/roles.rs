// security/src/roles.rs
use std::fmt;

use models::Session;

/// The two kinds of account. Admin accounts exist but no route requires one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Regular,
    Admin,
}

impl Role {
    pub fn of(session: &Session) -> Self {
        if session.is_admin { Role::Admin } else { Role::Regular }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Regular => "Parent",
            Role::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::medical::{NewUser, User};

    fn session(is_admin: bool) -> Session {
        Session::for_user(&User::from_new_user(
            1,
            NewUser {
                username: "root".to_string(),
                email: "root@example.com".to_string(),
                password_hash: "hash".to_string(),
                is_admin,
            },
        ))
    }

    #[test]
    fn role_follows_the_admin_flag() {
        assert_eq!(Role::of(&session(true)), Role::Admin);
        assert_eq!(Role::of(&session(false)), Role::Regular);
        assert_eq!(Role::Admin.to_string(), "Administrator");
    }
}
