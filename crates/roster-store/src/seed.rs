use chrono::Utc;
use roster_types::{NewUser, Role, User};

use crate::build_user;

pub fn seed_users() -> Vec<User> {
    [
        ("John Doe", "john@example.com", Some(25), Role::User),
        ("Jane Smith", "jane@example.com", Some(30), Role::Admin),
        ("Bob Wilson", "bob@example.com", None, Role::Moderator),
    ]
    .into_iter()
    .map(|(name, email, age, role)| {
        build_user(
            NewUser {
                name: name.to_string(),
                email: email.to_string(),
                age,
                role,
            },
            Utc::now(),
        )
    })
    .collect()
}
