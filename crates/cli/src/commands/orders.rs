//! Order browsing command.

use chrono::{DateTime, NaiveDate, Utc};
use jabuticaba_core::OrderStatus;
use jabuticaba_storefront::accounts::Accounts;
use jabuticaba_storefront::orders::{OrderFilter, OrderHistory, filter_orders};
use thiserror::Error;

use super::Context;

/// Errors that can occur while listing orders.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// Unknown status name.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Date argument did not parse.
    #[error("Invalid date: {0} (expected RFC 3339 or YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Bound parsed from an argument: a full timestamp, or a bare date anchored
/// to the start or end of that day.
fn parse_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, OrdersError> {
    if let Ok(at) = raw.parse::<DateTime<Utc>>() {
        return Ok(at);
    }
    let date: NaiveDate = raw
        .parse()
        .map_err(|_| OrdersError::InvalidDate(raw.to_owned()))?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.map(|t| t.and_utc())
        .ok_or_else(|| OrdersError::InvalidDate(raw.to_owned()))
}

/// Print placed orders, newest first.
///
/// Without `--all`, only the signed-in customer's orders are shown; when
/// nobody is signed in the listing is empty.
#[allow(clippy::print_stdout)]
pub fn list(
    ctx: &Context,
    search: Option<String>,
    status: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    all: bool,
) -> Result<(), OrdersError> {
    let status = status
        .map(|raw| {
            raw.parse::<OrderStatus>()
                .map_err(|_| OrdersError::InvalidStatus(raw.to_owned()))
        })
        .transpose()?;
    let filter = OrderFilter {
        text: search,
        status,
        from: from.map(|raw| parse_bound(raw, false)).transpose()?,
        to: to.map(|raw| parse_bound(raw, true)).transpose()?,
    };

    let history = OrderHistory::new(ctx.store.clone());
    let orders = if all {
        history.all()
    } else {
        match Accounts::new(ctx.store.clone()).current() {
            Some(session) => history.for_customer(&session.email),
            None => Vec::new(),
        }
    };

    let mut matched = filter_orders(&orders, &filter);
    matched.reverse();

    if matched.is_empty() {
        println!("No orders.");
        return Ok(());
    }
    for order in matched {
        println!(
            "{}  {}  {}  {:<12}  {} item(s)  R$ {:.2}",
            order.number,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.customer_name,
            order.status,
            order.item_count(),
            order.total
        );
    }
    Ok(())
}
