pub mod detail;
pub mod health;
pub mod list;
