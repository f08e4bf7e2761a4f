use std::collections::HashSet;

/// Chat identity of a person operating the till.
pub type OperatorId = i64;

/// What an operator is allowed to do. Admin implies every Cashier capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Cashier,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Static operator -> role table, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    admins: HashSet<OperatorId>,
    cashiers: HashSet<OperatorId>,
}

impl Roster {
    pub fn new(
        admins: impl IntoIterator<Item = OperatorId>,
        cashiers: impl IntoIterator<Item = OperatorId>,
    ) -> Self {
        Self {
            admins: admins.into_iter().collect(),
            cashiers: cashiers.into_iter().collect(),
        }
    }

    /// Resolves an operator to a role; `None` means the operator is unknown.
    pub fn role_of(&self, id: OperatorId) -> Option<Role> {
        if self.admins.contains(&id) {
            Some(Role::Admin)
        } else if self.cashiers.contains(&id) {
            Some(Role::Cashier)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty() && self.cashiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_lookup() {
        let roster = Roster::new([1], [2, 1]);
        assert_eq!(roster.role_of(1), Some(Role::Admin));
        assert_eq!(roster.role_of(2), Some(Role::Cashier));
        assert_eq!(roster.role_of(3), None);
        assert!(Role::Admin.is_admin());
        assert!(!Role::Cashier.is_admin());
    }
}
