
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Admin = 1,
    Employee = 2,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Employee),
            _ => None,
        }
    }

    pub fn from_is_admin(is_admin: bool) -> Self {
        if is_admin { Role::Admin } else { Role::Employee }
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}
