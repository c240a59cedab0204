use sea_orm::entity::prelude::*;

/// Account profile. Only `kind_of_user` is read here; the table is written by sign-up.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Role tag, e.g. "tenant" or "Landlord". Compared case-insensitively.
    pub kind_of_user: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::email_otps::Entity")]
    EmailOtps,
}

impl Related<super::email_otps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailOtps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
