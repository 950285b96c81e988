pub mod pages;
pub mod routes;
pub mod services;

pub use routes::BookLibApi;
