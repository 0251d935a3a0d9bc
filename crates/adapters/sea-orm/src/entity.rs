//! SeaORM entity for the `users` table.
//!
//! ```sql
//! CREATE TABLE users (
//!     id VARCHAR(255) PRIMARY KEY,
//!     username VARCHAR(255) NOT NULL,
//!     avatar TEXT NOT NULL,
//!     cover TEXT NOT NULL
//! );
//! ```

pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub username: String,
        pub avatar: String,
        pub cover: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
