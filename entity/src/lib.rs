//! SeaORM entities for the shipgate database.

pub mod prelude;

pub mod shipping_token;
