//! Borrowing items from other closets.
//!
//! A borrower collects items in a cart and checks the whole cart out at once.
//! Every line item gets the same due date, `loan_days` after the checkout
//! date, and stays open until it is returned.

use crate::crud::{self, Checkout, CheckoutItem, Item, AVAILABLE, CHECKED_OUT};
use crate::error::ErrorResponse;
use chrono::{Duration, Local, NaiveDate};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::PgConnection;
use rocket::http::Status;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum LendingError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Item {item_id} is {status}")]
    Unavailable { item_id: i32, status: String },
    #[error("Item {0} is in your own closet")]
    OwnItem(i32),
    #[error("No item {0}")]
    UnknownItem(i32),
    #[error("Item {0} is already in your cart")]
    AlreadyInCart(i32),
    #[error("Item {0} is not in your cart")]
    NotInCart(i32),
    #[error("No loan {0}")]
    UnknownLoan(i32),
    #[error("Loan {0} belongs to someone else")]
    NotBorrower(i32),
    #[error("Loan {0} was already returned")]
    AlreadyReturned(i32),
    #[error("Loan of {0} days runs past the supported calendar")]
    DueDateOutOfRange(i64),
    #[error(transparent)]
    Database(#[from] DieselError),
}

impl From<LendingError> for ErrorResponse {
    fn from(err: LendingError) -> Self {
        let code = match err {
            LendingError::Database(err) => return err.into(),
            LendingError::EmptyCart
            | LendingError::Unavailable { .. }
            | LendingError::AlreadyInCart(_)
            | LendingError::AlreadyReturned(_) => 409,
            LendingError::OwnItem(_) | LendingError::DueDateOutOfRange(_) => 422,
            LendingError::UnknownItem(_)
            | LendingError::NotInCart(_)
            | LendingError::UnknownLoan(_) => 404,
            LendingError::NotBorrower(_) => 403,
        };
        ErrorResponse::new(Status { code }, err.to_string())
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct CheckoutOut {
    pub checkout: Checkout,
    pub items: Vec<CheckoutItem>,
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn due_date(checkout_date: NaiveDate, loan_days: i64) -> Result<NaiveDate, LendingError> {
    Duration::try_days(loan_days)
        .and_then(|loan| checkout_date.checked_add_signed(loan))
        .ok_or(LendingError::DueDateOutOfRange(loan_days))
}

pub(crate) fn check_borrowable(item: &Item, borrower: i32) -> Result<(), LendingError> {
    if item.user_id == borrower {
        return Err(LendingError::OwnItem(item.item_id));
    }
    if item.status_code != AVAILABLE {
        return Err(LendingError::Unavailable {
            item_id: item.item_id,
            status: item.status_code.clone(),
        });
    }
    Ok(())
}

pub(crate) fn is_overdue(line: &CheckoutItem, today: NaiveDate) -> bool {
    line.return_date.is_none() && today > line.due_date
}

/// Adds an item to the borrower's cart if it could be checked out right now.
/// Each item goes into a cart at most once.
pub(crate) fn add_to_cart(
    conn: &PgConnection,
    borrower: i32,
    item_id: i32,
) -> Result<crud::Cart, LendingError> {
    let item = crud::get_item_by_item_id(conn, item_id)?.ok_or(LendingError::UnknownItem(item_id))?;
    check_borrowable(&item, borrower)?;
    if crud::is_in_cart(conn, borrower, item_id)? {
        return Err(LendingError::AlreadyInCart(item_id));
    }

    crud::add_to_cart(conn, borrower, item_id).map_err(|err| match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            LendingError::AlreadyInCart(item_id)
        }
        err => err.into(),
    })
}

pub(crate) fn remove_from_cart(
    conn: &PgConnection,
    borrower: i32,
    item_id: i32,
) -> Result<(), LendingError> {
    match crud::remove_from_cart(conn, borrower, item_id)? {
        0 => Err(LendingError::NotInCart(item_id)),
        _ => Ok(()),
    }
}

/// Turns the borrower's cart into a checkout. Either every cart item is lent
/// out or nothing changes.
pub(crate) fn checkout_cart(
    conn: &PgConnection,
    borrower: i32,
    today: NaiveDate,
    loan_days: i64,
) -> Result<CheckoutOut, LendingError> {
    let due = due_date(today, loan_days)?;

    conn.transaction::<_, LendingError, _>(|| {
        let cart = crud::get_cart_by_user(conn, borrower)?;
        if cart.is_empty() {
            return Err(LendingError::EmptyCart);
        }

        let checkout = crud::create_checkout(conn, borrower, today)?;
        let mut items = Vec::with_capacity(cart.len());
        for item in &cart {
            // statuses may have changed since the item was put in the cart
            let current = crud::get_item_by_item_id(conn, item.item_id)?
                .ok_or(LendingError::UnknownItem(item.item_id))?;
            check_borrowable(&current, borrower)?;

            // another checkout may have taken the item since it was read
            crud::transition_item_status(conn, current.item_id, AVAILABLE, CHECKED_OUT)?
                .ok_or_else(|| LendingError::Unavailable {
                    item_id: current.item_id,
                    status: CHECKED_OUT.to_string(),
                })?;
            items.push(crud::create_checkout_item(
                conn,
                checkout.checkout_id,
                current.item_id,
                due,
            )?);
        }
        crud::clear_cart(conn, borrower)?;

        tracing::info!(
            checkout_id = checkout.checkout_id,
            borrower,
            items = items.len(),
            %due,
            "checked out cart"
        );

        Ok(CheckoutOut { checkout, items })
    })
}

/// Closes a loan and puts the item back on the shelf.
pub(crate) fn return_item(
    conn: &PgConnection,
    borrower: i32,
    checkout_item_id: i32,
    today: NaiveDate,
) -> Result<CheckoutItem, LendingError> {
    conn.transaction::<_, LendingError, _>(|| {
        let (line, checkout) = crud::get_checkout_item(conn, checkout_item_id)?
            .ok_or(LendingError::UnknownLoan(checkout_item_id))?;

        if checkout.user_borrowed_by != borrower {
            return Err(LendingError::NotBorrower(checkout_item_id));
        }
        if line.return_date.is_some() {
            return Err(LendingError::AlreadyReturned(checkout_item_id));
        }

        let returned = crud::mark_returned(conn, checkout_item_id, today)?;
        crud::set_item_status(conn, returned.item_id, AVAILABLE)?;

        tracing::info!(checkout_item_id, item_id = returned.item_id, "item returned");
        Ok(returned)
    })
}
