//! Services feeding the orders listing.

use crate::dto::orders::OrdersPageData;
use crate::repository::OrderReader;
use crate::services::ServiceResult;
use crate::views::orders::{OrderQuery, orders_page};

/// Loads the visible orders for `query` from the current store snapshot.
pub fn load_orders_page<R>(repo: &R, query: &OrderQuery) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    let orders = repo.list_orders().map_err(|err| {
        log::error!("Failed to load orders: {err}");
        err
    })?;

    Ok(orders_page(&orders, query))
}
