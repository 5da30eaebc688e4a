use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryOrder,
};

use super::CrudResource;
use crate::database::entities::events;
use crate::schemas::EventSchema;

pub struct EventResource;

#[async_trait]
impl CrudResource for EventResource {
    type Schema = EventSchema;
    type Key = i32;

    const NAME: &'static str = "Event";

    async fn find_all<C>(db: &C) -> Result<Vec<events::Model>, DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        events::Entity::find()
            .order_by_asc(events::Column::Id)
            .all(db)
            .await
    }

    // Keyed on the primary key for get, update and delete alike.
    async fn find_one<C>(db: &C, key: &i32) -> Result<Option<events::Model>, DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        events::Entity::find_by_id(*key).one(db).await
    }

    async fn insert<C>(db: &C, record: events::ActiveModel) -> Result<events::Model, DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        record.insert(db).await
    }

    async fn save<C>(db: &C, record: events::ActiveModel) -> Result<(), DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        if record.is_changed() {
            record.update(db).await?;
        }
        Ok(())
    }

    async fn remove<C>(db: &C, record: events::Model) -> Result<(), DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        record.delete(db).await?;
        Ok(())
    }

    fn created_message(record: &events::Model) -> String {
        format!("Event added with id= {}", record.id)
    }

    fn updated_message(key: &i32) -> String {
        format!("Event with id={} updated.", key)
    }

    fn deleted_message(key: &i32) -> String {
        format!("Event {} deleted.", key)
    }
}
