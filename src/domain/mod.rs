pub mod documents;
pub mod memo;
pub mod models;
pub mod pagination;
