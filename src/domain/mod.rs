//! Domain types shared by the GraphQL repository, the services and the views.

pub mod character;
pub mod query;
pub mod types;
pub mod view;
