//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::order::{Order, OrderItem};
use crate::domain::types::{ClientId, ItemId, OrderId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, OrderReader, OrderWriter, SettingsReader, SettingsWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            client_id: ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
    }

    impl OrderReader for Repository {
        fn get_order_by_id(&self, id: &OrderId) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
        fn unassigned_count(&self) -> RepositoryResult<usize>;
        fn find_items(&self, item_ids: &[ItemId]) -> RepositoryResult<Vec<OrderItem>>;
    }

    impl OrderWriter for Repository {
        fn set_item_assignment(
            &self,
            order_id: &OrderId,
            item_id: &ItemId,
            client_id: Option<ClientId>,
        ) -> RepositoryResult<OrderItem>;
        fn assign_items(
            &self,
            item_ids: &[ItemId],
            client_id: Option<ClientId>,
        ) -> RepositoryResult<usize>;
        fn set_items_payment(&self, item_ids: &[ItemId], paid: bool) -> RepositoryResult<usize>;
    }

    impl SettingsReader for Repository {
        fn sales_goal(&self) -> RepositoryResult<u32>;
    }

    impl SettingsWriter for Repository {
        fn set_sales_goal(&self, goal: u32) -> RepositoryResult<()>;
    }
}
