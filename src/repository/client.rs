use chrono::Utc;

use crate::domain::client::{Client, ClientStats, DeliveryPreference, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, InMemoryRepository};

impl ClientReader for InMemoryRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let state = self.lock()?;
        Ok(state
            .clients
            .iter()
            .find(|client| client.id == id)
            .map(|client| state.hydrate(client)))
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        let state = self.lock()?;
        Ok(state
            .clients
            .iter()
            .map(|client| state.hydrate(client))
            .collect())
    }
}

impl ClientWriter for InMemoryRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut state = self.lock()?;

        let next_id = state
            .clients
            .iter()
            .map(|client| client.id.get())
            .max()
            .unwrap_or(0)
            + 1;

        let client = Client {
            id: ClientId::new(next_id)?,
            name: new_client.name.clone(),
            surname: new_client.surname.clone(),
            phone: new_client.phone.clone(),
            email: new_client.email.clone(),
            notes: new_client.notes.clone(),
            addresses: Vec::new(),
            product_requests: Vec::new(),
            delivery_preference: DeliveryPreference::default(),
            is_favourite: false,
            stats: ClientStats::default(),
            created_at: Utc::now().naive_utc(),
        };

        // Newest clients head the roster.
        state.clients.insert(0, client.clone());

        Ok(client)
    }

    fn update_client(
        &self,
        client_id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        let mut state = self.lock()?;

        let client = state
            .clients
            .iter_mut()
            .find(|client| client.id == client_id)
            .ok_or(RepositoryError::NotFound)?;

        updates.apply_to(client);
        let client = client.clone();

        Ok(state.hydrate(&client))
    }
}
