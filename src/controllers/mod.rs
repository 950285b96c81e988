pub mod detail;
pub mod list;

#[cfg(test)]
pub(crate) mod fake;

pub use detail::DetailController;
pub use list::ListController;
