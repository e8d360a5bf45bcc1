//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    /// Managing admin; NULL for admins
    pub admin_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub cpf: Option<String>,
    pub cargo: Option<String>,
    pub data_nascimento: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::address::Entity")]
    Address,
    #[sea_orm(has_many = "super::punch_record::Entity")]
    PunchRecords,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::punch_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PunchRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role: UserRole::from(model.role.as_str()),
            admin_id: model.admin_id,
            cpf: model.cpf,
            cargo: model.cargo,
            data_nascimento: model.data_nascimento,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
