//! User domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::address::{Address, AddressResponse, NewAddress};
use crate::config::{ROLE_ADMIN, ROLE_EMPLOYEE};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Employee,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn is_employee(&self) -> bool {
        matches!(self, UserRole::Employee)
    }
}

/// Unknown values fall back to the least privileged role.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Employee,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Employee => write!(f, "{}", ROLE_EMPLOYEE),
        }
    }
}

/// User domain entity.
///
/// Admins have no `admin_id`; every employee points at the admin that owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub admin_id: Option<Uuid>,
    pub cpf: Option<String>,
    pub cargo: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_employee(&self) -> bool {
        self.role.is_employee()
    }
}

/// Data required to insert a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub admin_id: Option<Uuid>,
    pub cpf: Option<String>,
    pub cargo: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
}

impl NewUser {
    /// Self-registered account. It owns employees, so it is an admin.
    pub fn admin(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash,
            role: UserRole::Admin,
            admin_id: None,
            cpf: None,
            cargo: None,
            data_nascimento: None,
        }
    }
}

/// Employee fields written by an admin on create or update.
#[derive(Debug, Clone)]
pub struct EmployeeProfile {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub cargo: String,
    pub data_nascimento: NaiveDate,
}

impl EmployeeProfile {
    pub fn into_new_user(self, admin_id: Uuid, password_hash: String) -> NewUser {
        NewUser {
            name: self.name,
            email: self.email,
            password_hash,
            role: UserRole::Employee,
            admin_id: Some(admin_id),
            cpf: Some(self.cpf),
            cargo: Some(self.cargo),
            data_nascimento: Some(self.data_nascimento),
        }
    }
}

/// Full update applied to an existing employee in one transaction.
#[derive(Debug, Clone)]
pub struct EmployeeUpdate {
    pub profile: EmployeeProfile,
    /// New password hash, when the admin resets it
    pub password_hash: Option<String>,
    pub address: NewAddress,
}

/// Employee aggregate: the user row plus its one-to-one address.
#[derive(Debug, Clone)]
pub struct Employee {
    pub user: User,
    pub address: Option<Address>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Maria Souza")]
    pub name: String,
    #[schema(example = "maria@empresa.com.br")]
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Employee as returned by the management endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub admin_id: Option<Uuid>,
    #[schema(example = "123.456.789-09")]
    pub cpf: Option<String>,
    #[schema(example = "Desenvolvedor")]
    pub cargo: Option<String>,
    #[schema(example = "1990-05-15")]
    pub data_nascimento: Option<NaiveDate>,
    pub address: Option<AddressResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        let Employee { user, address } = employee;
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            admin_id: user.admin_id,
            cpf: user.cpf,
            cargo: user.cargo,
            data_nascimento: user.data_nascimento,
            address: address.map(AddressResponse::from),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("employee"), UserRole::Employee);
        assert_eq!(String::from(UserRole::Admin), "admin");
        assert_eq!(UserRole::Employee.to_string(), "employee");
    }

    #[test]
    fn unknown_role_is_least_privileged() {
        assert_eq!(UserRole::from("root"), UserRole::Employee);
    }

    #[test]
    fn profile_becomes_owned_employee() {
        let admin_id = Uuid::new_v4();
        let profile = EmployeeProfile {
            name: "João".into(),
            email: "joao@empresa.com.br".into(),
            cpf: "529.982.247-25".into(),
            cargo: "Analista".into(),
            data_nascimento: NaiveDate::from_ymd_opt(1991, 3, 2).unwrap(),
        };

        let new_user = profile.into_new_user(admin_id, "hash".into());
        assert_eq!(new_user.role, UserRole::Employee);
        assert_eq!(new_user.admin_id, Some(admin_id));
        assert_eq!(new_user.cpf.as_deref(), Some("529.982.247-25"));
    }
}
