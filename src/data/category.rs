use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct CategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRepository<'a, C> {
    /// Creates a new instance of [`CategoryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, category_id: i32) -> Result<Option<entity::category::Model>, DbErr> {
        entity::prelude::Category::find_by_id(category_id)
            .one(self.db)
            .await
    }

    /// Fetch a category scoped to its event; `None` when the category does
    /// not exist or belongs to a different event.
    pub async fn get_in_event(
        &self,
        event_id: i32,
        category_id: i32,
    ) -> Result<Option<entity::category::Model>, DbErr> {
        entity::prelude::Category::find_by_id(category_id)
            .filter(entity::category::Column::EventId.eq(event_id))
            .one(self.db)
            .await
    }
}
