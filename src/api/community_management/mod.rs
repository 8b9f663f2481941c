pub(crate) mod create;
pub(crate) mod items;
pub(crate) mod join;
pub(crate) mod list;
pub(crate) mod members;
