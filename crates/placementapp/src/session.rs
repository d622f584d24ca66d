//! The signed-in user, passed explicitly to every controller.

use crate::records::closed_set;
use serde::{Deserialize, Serialize};

closed_set! {
    pub enum Role {
        Student => "student",
        ProStudent => "pro-student",
        Company => "company",
        Faculty => "faculty",
        ScadOffice => "scad-office",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_name: user_name.into(),
            role,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("SCAD Office", Role::ScadOffice)
    }
}
