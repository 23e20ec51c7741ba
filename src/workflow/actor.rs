use serde::Serialize;

use crate::db::enums::Role;

/// The authenticated caller with its role memberships, resolved once per
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub user_id: i32,
    roles: Vec<Role>,
}

impl Actor {
    pub fn new(user_id: i32, roles: impl IntoIterator<Item = Role>) -> Self {
        let mut resolved: Vec<Role> = Vec::new();
        for role in roles {
            if !resolved.contains(&role) {
                resolved.push(role);
            }
        }
        resolved.sort_by_key(|role| Self::priority(*role));
        Self {
            user_id,
            roles: resolved,
        }
    }

    fn priority(role: Role) -> u8 {
        match role {
            Role::AuditManager => 0,
            Role::Auditor => 1,
            Role::DepartmentManager => 2,
        }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_audit_manager(&self) -> bool {
        self.has_role(Role::AuditManager)
    }

    /// Role that decides dashboards and listings: manager, then auditor,
    /// then department manager.
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }
}
