//! The acting user, as seen by the domain layer.
//!
//! Handlers build an [`Actor`] from the verified JWT claims; domain actions
//! check its predicates before reading or writing any state.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Username of the distinguished super-administrator account.
pub const SUPERUSER_USERNAME: &str = "admin";

/// Department whose administrators may transfer records.
pub const INTENDENCIA_DEPT_NAME: &str = "Intendencia";

pub const MESA_DE_ENTRADA_DEPT_NAME: &str = "Mesa de Entrada";

/// Departments whose members can see records of every department.
pub const PRIVILEGED_VIEW_DEPARTMENTS: [&str; 2] =
    [MESA_DE_ENTRADA_DEPT_NAME, INTENDENCIA_DEPT_NAME];

/// Snapshot of the requesting user for authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub username: String,
    pub role: String,
    pub department: String,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn is_superuser(&self) -> bool {
        self.username == SUPERUSER_USERNAME
    }

    /// Members of Mesa de Entrada or Intendencia see all departments.
    pub fn is_privileged_viewer(&self) -> bool {
        PRIVILEGED_VIEW_DEPARTMENTS.contains(&self.department.as_str())
    }

    /// Transfers require an Intendencia administrator or the superuser.
    pub fn can_transfer(&self) -> bool {
        (self.is_admin() && self.department == INTENDENCIA_DEPT_NAME) || self.is_superuser()
    }

    /// Whether every department's records are visible to this actor.
    pub fn can_view_all_departments(&self) -> bool {
        self.is_admin() || self.is_privileged_viewer()
    }

    /// Whether a record homed in `record_department` is visible to this actor.
    pub fn can_view_record(&self, record_department: &str) -> bool {
        self.can_view_all_departments() || self.department == record_department
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(username: &str, role: &str, department: &str) -> Actor {
        Actor {
            id: UserId::from_i64(1),
            username: username.to_string(),
            role: role.to_string(),
            department: department.to_string(),
        }
    }

    #[test]
    fn intendencia_admin_can_transfer() {
        assert!(actor("maria", "admin", "Intendencia").can_transfer());
    }

    #[test]
    fn superuser_can_transfer_from_any_department() {
        assert!(actor("admin", "admin", "Administración").can_transfer());
    }

    #[test]
    fn regular_admin_cannot_transfer() {
        assert!(!actor("jose", "admin", "Cultura").can_transfer());
    }

    #[test]
    fn mesa_de_entrada_user_sees_everything() {
        let a = actor("lucia", "user", "Mesa de Entrada");
        assert!(a.can_view_all_departments());
        assert!(a.can_view_record("Cementerio"));
    }

    #[test]
    fn regular_user_sees_only_own_department() {
        let a = actor("pedro", "user", "Cultura");
        assert!(!a.can_view_all_departments());
        assert!(a.can_view_record("Cultura"));
        assert!(!a.can_view_record("Hacienda"));
    }
}
