//! PostgreSQL entity store via SeaORM.

mod connections;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_store;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;

#[cfg(feature = "postgres")]
pub use postgres_store::{
    PostgresCategoryStore, PostgresCommentStore, PostgresLocationStore, PostgresPostStore,
    PostgresUserStore, postgres_stores,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
