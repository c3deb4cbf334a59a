use crate::domain::order::{Order, OrderItem};
use crate::domain::types::{ClientId, ItemId, OrderId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{InMemoryRepository, OrderReader, OrderWriter, StoreState};
use crate::views::aggregates;

fn ensure_client(state: &StoreState, client_id: Option<ClientId>) -> RepositoryResult<()> {
    match client_id {
        Some(id) if !state.client_exists(id) => Err(RepositoryError::ConstraintViolation(
            format!("client {id} does not exist"),
        )),
        _ => Ok(()),
    }
}

impl OrderReader for InMemoryRepository {
    fn get_order_by_id(&self, id: &OrderId) -> RepositoryResult<Option<Order>> {
        let state = self.lock()?;
        Ok(state.orders.iter().find(|order| &order.id == id).cloned())
    }

    fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        Ok(self.lock()?.orders.clone())
    }

    fn unassigned_count(&self) -> RepositoryResult<usize> {
        Ok(aggregates::unassigned_count(&self.lock()?.orders))
    }

    fn find_items(&self, item_ids: &[ItemId]) -> RepositoryResult<Vec<OrderItem>> {
        let state = self.lock()?;
        Ok(state
            .orders
            .iter()
            .flat_map(|order| order.items.iter())
            .filter(|item| item_ids.contains(&item.id))
            .cloned()
            .collect())
    }
}

impl OrderWriter for InMemoryRepository {
    fn set_item_assignment(
        &self,
        order_id: &OrderId,
        item_id: &ItemId,
        client_id: Option<ClientId>,
    ) -> RepositoryResult<OrderItem> {
        let mut state = self.lock()?;
        ensure_client(&state, client_id)?;

        let item = state
            .orders
            .iter_mut()
            .find(|order| &order.id == order_id)
            .and_then(|order| order.item_mut(item_id))
            .ok_or(RepositoryError::NotFound)?;

        item.assigned_client_id = client_id;
        Ok(item.clone())
    }

    fn assign_items(
        &self,
        item_ids: &[ItemId],
        client_id: Option<ClientId>,
    ) -> RepositoryResult<usize> {
        let mut state = self.lock()?;
        ensure_client(&state, client_id)?;

        let mut affected = 0;
        for item in state
            .orders
            .iter_mut()
            .flat_map(|order| order.items.iter_mut())
            .filter(|item| item_ids.contains(&item.id))
        {
            item.assigned_client_id = client_id;
            affected += 1;
        }

        Ok(affected)
    }

    fn set_items_payment(&self, item_ids: &[ItemId], paid: bool) -> RepositoryResult<usize> {
        let mut state = self.lock()?;

        let mut affected = 0;
        for item in state
            .orders
            .iter_mut()
            .flat_map(|order| order.items.iter_mut())
            .filter(|item| item_ids.contains(&item.id))
        {
            item.status = item.status.with_payment(paid);
            affected += 1;
        }

        Ok(affected)
    }
}
