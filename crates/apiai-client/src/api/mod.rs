//! API endpoint implementations.

mod contexts;
mod entities;
mod query;

pub use contexts::ContextsApi;
pub use entities::EntitiesApi;
pub use query::QueryApi;
