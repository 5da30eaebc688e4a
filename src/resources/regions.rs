use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryOrder,
};

use super::CrudResource;
use crate::database::entities::regions;
use crate::schemas::RegionSchema;

pub struct RegionResource;

#[async_trait]
impl CrudResource for RegionResource {
    type Schema = RegionSchema;
    type Key = String;

    const NAME: &'static str = "Region";

    async fn find_all<C>(db: &C) -> Result<Vec<regions::Model>, DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        regions::Entity::find()
            .order_by_asc(regions::Column::Noc)
            .all(db)
            .await
    }

    async fn find_one<C>(db: &C, key: &String) -> Result<Option<regions::Model>, DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        regions::Entity::find_by_id(key.as_str()).one(db).await
    }

    async fn insert<C>(db: &C, record: regions::ActiveModel) -> Result<regions::Model, DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        record.insert(db).await
    }

    async fn save<C>(db: &C, record: regions::ActiveModel) -> Result<(), DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        if record.is_changed() {
            record.update(db).await?;
        }
        Ok(())
    }

    async fn remove<C>(db: &C, record: regions::Model) -> Result<(), DbErr>
    where
        C: ConnectionTrait + Sync,
    {
        record.delete(db).await?;
        Ok(())
    }

    fn created_message(record: &regions::Model) -> String {
        format!("Region added with NOC= {}", record.noc)
    }

    fn updated_message(key: &String) -> String {
        format!("Region {} updated.", key)
    }

    fn deleted_message(key: &String) -> String {
        format!("Region {} deleted.", key)
    }
}
