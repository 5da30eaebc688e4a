//! Store access for the resources served over HTTP.
//!
//! Each resource pairs a schema with the handful of queries the generic CRUD
//! handlers need. Every query takes the connection it runs on, which lets a
//! handler run its lookup and write inside one transaction.

pub mod events;
pub mod regions;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbErr};
use std::fmt::Display;
use std::str::FromStr;

use crate::schemas::RecordSchema;

pub use events::EventResource;
pub use regions::RegionResource;

pub type ModelOf<R> = <<R as CrudResource>::Schema as RecordSchema>::Model;
pub type ActiveModelOf<R> = <<R as CrudResource>::Schema as RecordSchema>::ActiveModel;

#[async_trait]
pub trait CrudResource: Sized + Send + Sync + 'static {
    type Schema: RecordSchema;
    type Key: FromStr + Display + Send + Sync + 'static;

    /// Singular name used in messages, e.g. "Region"
    const NAME: &'static str;

    async fn find_all<C>(db: &C) -> Result<Vec<ModelOf<Self>>, DbErr>
    where
        C: ConnectionTrait + Sync;

    async fn find_one<C>(db: &C, key: &Self::Key) -> Result<Option<ModelOf<Self>>, DbErr>
    where
        C: ConnectionTrait + Sync;

    async fn insert<C>(db: &C, record: ActiveModelOf<Self>) -> Result<ModelOf<Self>, DbErr>
    where
        C: ConnectionTrait + Sync;

    /// Writes the changed columns of `record`; unchanged records are not written.
    async fn save<C>(db: &C, record: ActiveModelOf<Self>) -> Result<(), DbErr>
    where
        C: ConnectionTrait + Sync;

    async fn remove<C>(db: &C, record: ModelOf<Self>) -> Result<(), DbErr>
    where
        C: ConnectionTrait + Sync;

    fn created_message(record: &ModelOf<Self>) -> String;

    fn updated_message(key: &Self::Key) -> String;

    fn deleted_message(key: &Self::Key) -> String;

    fn not_found_message(key: &str) -> String {
        format!("{} {} not found.", Self::NAME, key)
    }
}
