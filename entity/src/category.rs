use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub event_id: i32,
    pub name: String,
    /// Cap on active pairings in this category; `None` means unlimited.
    pub capacity: Option<i32>,
    /// Cap on individual filled slots, for categories that limit players
    /// rather than teams; `None` means unlimited.
    pub max_players: Option<i32>,
    /// Per-user active-registration limit; `None` falls back to the
    /// configured platform default.
    pub max_per_user: Option<i32>,
    /// Opaque eligibility restriction tag (e.g. gender division). Resolved
    /// and enforced by the identity layer, stored here for reference.
    pub eligibility: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
    #[sea_orm(has_many = "super::pairing::Entity")]
    Pairing,
    #[sea_orm(has_many = "super::waitlist_entry::Entity")]
    WaitlistEntry,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::pairing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pairing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
