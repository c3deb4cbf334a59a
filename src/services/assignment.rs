//! Assignment Engine: attributes order items to clients and tracks payment
//! status.
//!
//! Batch assignment to a client is gated: if any targeted item is already
//! assigned, the caller gets [`AssignmentOutcome::NeedsConfirmation`] and
//! nothing is written until [`batch_assign`] is called with the same ids.
//! Unassigning is never gated.

use crate::domain::types::{ClientId, ItemId, OrderId};
use crate::notifications::{
    ITEM_UNASSIGNED, ITEMS_ASSIGNED, ITEMS_MARKED_PAID, ITEMS_MARKED_UNPAID, ITEMS_UNASSIGNED,
};
use crate::repository::{OrderReader, OrderWriter};
use crate::services::{ServiceResult, is_silent_rejection};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// The store was updated; `message` is the toast to show.
    Applied { count: usize, message: &'static str },
    /// At least one item is already assigned; confirm to overwrite all of
    /// `item_ids`.
    NeedsConfirmation {
        client_id: ClientId,
        item_ids: Vec<ItemId>,
    },
    /// Nothing to do, or the ids were unknown.
    Skipped,
}

impl AssignmentOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            AssignmentOutcome::Applied { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Overwrites the assignment of one item without confirmation.
pub fn assign_single<R>(
    repo: &R,
    order_id: &OrderId,
    item_id: &ItemId,
    client_id: Option<ClientId>,
) -> ServiceResult<AssignmentOutcome>
where
    R: OrderWriter + ?Sized,
{
    match repo.set_item_assignment(order_id, item_id, client_id) {
        Ok(_) => {
            log::info!("Item {item_id} of order {order_id} assigned to {client_id:?}");
            let message = if client_id.is_some() {
                ITEMS_ASSIGNED
            } else {
                ITEM_UNASSIGNED
            };
            Ok(AssignmentOutcome::Applied { count: 1, message })
        }
        Err(err) if is_silent_rejection(&err) => {
            log::warn!("Ignoring assignment of item {item_id} in order {order_id}: {err}");
            Ok(AssignmentOutcome::Skipped)
        }
        Err(err) => {
            log::error!("Failed to assign item {item_id}: {err}");
            Err(err.into())
        }
    }
}

/// True when any of `item_ids` already carries a client.
pub fn has_assignment_conflict<R>(repo: &R, item_ids: &[ItemId]) -> ServiceResult<bool>
where
    R: OrderReader + ?Sized,
{
    let items = repo.find_items(item_ids)?;
    Ok(items.iter().any(|item| item.is_assigned()))
}

/// Entry point for multi-item assignment. Applies immediately unless the
/// conflict rule requires a confirmation first.
pub fn request_batch_assign<R>(
    repo: &R,
    item_ids: &[ItemId],
    client_id: Option<ClientId>,
) -> ServiceResult<AssignmentOutcome>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    if item_ids.is_empty() {
        return Ok(AssignmentOutcome::Skipped);
    }

    if let Some(client_id) = client_id {
        if has_assignment_conflict(repo, item_ids)? {
            log::info!(
                "Batch assignment of {} items to client {client_id} needs confirmation",
                item_ids.len()
            );
            return Ok(AssignmentOutcome::NeedsConfirmation {
                client_id,
                item_ids: item_ids.to_vec(),
            });
        }
    }

    batch_assign(repo, item_ids, client_id)
}

/// Unconditionally writes `client_id` to every item in `item_ids`.
pub fn batch_assign<R>(
    repo: &R,
    item_ids: &[ItemId],
    client_id: Option<ClientId>,
) -> ServiceResult<AssignmentOutcome>
where
    R: OrderWriter + ?Sized,
{
    if item_ids.is_empty() {
        return Ok(AssignmentOutcome::Skipped);
    }

    match repo.assign_items(item_ids, client_id) {
        Ok(0) => {
            log::warn!("Batch assignment matched no items");
            Ok(AssignmentOutcome::Skipped)
        }
        Ok(count) => {
            log::info!("Assigned {count} items to {client_id:?}");
            let message = if client_id.is_some() {
                ITEMS_ASSIGNED
            } else {
                ITEMS_UNASSIGNED
            };
            Ok(AssignmentOutcome::Applied { count, message })
        }
        Err(err) if is_silent_rejection(&err) => {
            log::warn!("Ignoring batch assignment: {err}");
            Ok(AssignmentOutcome::Skipped)
        }
        Err(err) => {
            log::error!("Failed to assign items: {err}");
            Err(err.into())
        }
    }
}

/// Replaces the payment label of every targeted item.
pub fn update_item_status<R>(
    repo: &R,
    item_ids: &[ItemId],
    is_paid: bool,
) -> ServiceResult<AssignmentOutcome>
where
    R: OrderWriter + ?Sized,
{
    if item_ids.is_empty() {
        return Ok(AssignmentOutcome::Skipped);
    }

    let count = repo.set_items_payment(item_ids, is_paid).map_err(|err| {
        log::error!("Failed to update item status: {err}");
        err
    })?;

    if count == 0 {
        log::warn!("Status update matched no items");
        return Ok(AssignmentOutcome::Skipped);
    }

    let message = if is_paid {
        ITEMS_MARKED_PAID
    } else {
        ITEMS_MARKED_UNPAID
    };
    Ok(AssignmentOutcome::Applied { count, message })
}

fn order_item_ids<R>(repo: &R, order_id: &OrderId) -> ServiceResult<Option<Vec<ItemId>>>
where
    R: OrderReader + ?Sized,
{
    let order = repo.get_order_by_id(order_id)?;
    if order.is_none() {
        log::warn!("Order {order_id} not found");
    }
    Ok(order.map(|order| order.item_ids()))
}

/// Assigns every item of an order, subject to the same conflict rule as a
/// selection batch.
pub fn request_order_assign<R>(
    repo: &R,
    order_id: &OrderId,
    client_id: Option<ClientId>,
) -> ServiceResult<AssignmentOutcome>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    match order_item_ids(repo, order_id)? {
        Some(item_ids) => request_batch_assign(repo, &item_ids, client_id),
        None => Ok(AssignmentOutcome::Skipped),
    }
}

/// Marks every item of an order paid or unpaid.
pub fn update_order_status<R>(
    repo: &R,
    order_id: &OrderId,
    is_paid: bool,
) -> ServiceResult<AssignmentOutcome>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    match order_item_ids(repo, order_id)? {
        Some(item_ids) => update_item_status(repo, &item_ids, is_paid),
        None => Ok(AssignmentOutcome::Skipped),
    }
}
