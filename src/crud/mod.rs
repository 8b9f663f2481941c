//! Data access for the closet tables.
//!
//! Every function takes the connection it runs on and performs a single
//! insert or a single filtered query. Lookups by key answer `Ok(None)` when
//! nothing matches; storage failures come back as `diesel::result::Error`.

mod carts;
mod categories;
mod checkouts;
mod communities;
mod items;
mod statuses;
mod users;

pub(crate) use carts::*;
pub(crate) use categories::*;
pub(crate) use checkouts::*;
pub(crate) use communities::*;
pub(crate) use items::*;
pub(crate) use statuses::*;
pub(crate) use users::*;
