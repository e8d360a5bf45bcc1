//! Authorization scope resolution.
//!
//! Every core operation receives the acting [`Principal`] explicitly. The
//! predicates here decide which employee rows and punches that principal may
//! see or change. They never touch storage: callers load the rows first.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{User, UserRole};
use crate::errors::{AppError, AppResult};

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// True iff the principal has the admin role.
pub fn is_admin(principal: &Principal) -> bool {
    principal.role.is_admin()
}

/// True iff `employee` is managed by `admin`.
pub fn owns_employee(admin: &Principal, employee: &User) -> bool {
    employee.admin_id == Some(admin.id)
}

/// Admin-only operations. Non-admins get `Forbidden`.
pub fn require_admin(principal: &Principal) -> AppResult<()> {
    if is_admin(principal) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Time-clock operations. Admins cannot punch for themselves.
pub fn require_employee(principal: &Principal) -> AppResult<()> {
    if principal.role.is_employee() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Gate for reading or mutating a single employee.
///
/// A non-admin caller is `Forbidden`. An admin asking for a row that does
/// not exist, is not an employee, or belongs to another admin gets
/// `NotFound`, so other admins' employees are indistinguishable from
/// missing ones.
pub fn authorize_employee_access<'a>(
    principal: &Principal,
    employee: Option<&'a User>,
) -> AppResult<&'a User> {
    require_admin(principal)?;
    match employee {
        Some(user) if user.is_employee() && owns_employee(principal, user) => Ok(user),
        _ => Err(AppError::NotFound),
    }
}

/// Which rows an admin sees when listing employees or pulling reports.
///
/// `Owned` restricts to the admin's own employees; `Global` shows every
/// employee regardless of owner. Configured per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityScope {
    #[default]
    Owned,
    Global,
}

impl VisibilityScope {
    /// Resolve the configured rule for a concrete admin.
    pub fn resolve(self, admin: &Principal) -> RecordScope {
        match self {
            VisibilityScope::Owned => RecordScope::ManagedBy(admin.id),
            VisibilityScope::Global => RecordScope::All,
        }
    }
}

impl FromStr for VisibilityScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owned" => Ok(VisibilityScope::Owned),
            "global" => Ok(VisibilityScope::Global),
            other => Err(format!("unknown visibility scope: {}", other)),
        }
    }
}

/// Row filter derived from a [`VisibilityScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Every employee, across admins
    All,
    /// Only employees whose `admin_id` is the given admin
    ManagedBy(Uuid),
}

impl RecordScope {
    pub fn admin_id(&self) -> Option<Uuid> {
        match self {
            RecordScope::All => None,
            RecordScope::ManagedBy(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn principal(role: UserRole) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            name: "p".into(),
            email: "p@example.com".into(),
            role,
        }
    }

    fn employee_of(admin_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "e".into(),
            email: "e@example.com".into(),
            password_hash: "hash".into(),
            role: UserRole::Employee,
            admin_id,
            cpf: None,
            cargo: None,
            data_nascimento: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_can_access_employee() {
        let admin = principal(UserRole::Admin);
        let employee = employee_of(Some(admin.id));

        assert!(owns_employee(&admin, &employee));
        assert!(authorize_employee_access(&admin, Some(&employee)).is_ok());
    }

    #[test]
    fn other_admin_sees_not_found() {
        let owner = principal(UserRole::Admin);
        let intruder = principal(UserRole::Admin);
        let employee = employee_of(Some(owner.id));

        let result = authorize_employee_access(&intruder, Some(&employee));
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn missing_employee_is_not_found() {
        let admin = principal(UserRole::Admin);
        assert!(matches!(
            authorize_employee_access(&admin, None),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn admin_rows_are_not_employees() {
        let admin = principal(UserRole::Admin);
        let mut other_admin = employee_of(Some(admin.id));
        other_admin.role = UserRole::Admin;

        assert!(matches!(
            authorize_employee_access(&admin, Some(&other_admin)),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn employees_are_forbidden_from_management() {
        let employee = principal(UserRole::Employee);
        let target = employee_of(Some(employee.id));

        assert!(matches!(
            authorize_employee_access(&employee, Some(&target)),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn only_employees_punch() {
        assert!(require_employee(&principal(UserRole::Employee)).is_ok());
        assert!(matches!(
            require_employee(&principal(UserRole::Admin)),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn visibility_scope_resolves_per_admin() {
        let admin = principal(UserRole::Admin);
        assert_eq!(
            VisibilityScope::Owned.resolve(&admin),
            RecordScope::ManagedBy(admin.id)
        );
        assert_eq!(VisibilityScope::Global.resolve(&admin), RecordScope::All);
        assert_eq!(RecordScope::All.admin_id(), None);
    }

    #[test]
    fn visibility_scope_parses() {
        assert_eq!("owned".parse::<VisibilityScope>(), Ok(VisibilityScope::Owned));
        assert_eq!(" GLOBAL ".parse::<VisibilityScope>(), Ok(VisibilityScope::Global));
        assert!("everyone".parse::<VisibilityScope>().is_err());
    }
}
