pub(crate) mod account;
pub(crate) mod login;
pub(crate) mod models;
pub(crate) mod register;
pub(crate) mod sessions;
