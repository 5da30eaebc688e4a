use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub event_type: String,
    pub year: i32,
    pub country: String,
    pub host: String,
    #[sea_orm(column_name = "NOC")]
    #[serde(rename = "NOC")]
    pub noc: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<i32>,
    pub disabilities_included: Option<String>,
    pub countries: Option<i32>,
    pub events: Option<i32>,
    pub sports: Option<i32>,
    pub participants_m: Option<i32>,
    pub participants_f: Option<i32>,
    pub participants: Option<i32>,
    pub highlights: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // Declared for joins only; the store does not enforce it.
    #[sea_orm(
        belongs_to = "super::regions::Entity",
        from = "Column::Noc",
        to = "super::regions::Column::Noc"
    )]
    Region,
}

impl Related<super::regions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
