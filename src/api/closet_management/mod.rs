pub(crate) mod categories;
pub(crate) mod list;
pub(crate) mod search;
pub(crate) mod upload;
