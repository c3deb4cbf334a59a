//! Client creation and the explicit client-update operations.
//!
//! Updates addressed to an unknown client are logged and ignored; the
//! functions then return `Ok(None)`.

use crate::domain::client::{
    Address, Client, DeliveryPreference, NewClient, ProductRequest, UpdateClient,
};
use crate::domain::types::ClientId;
use crate::dto::clients::ClientsPageData;
use crate::forms::address::AddAddressForm;
use crate::forms::client::{AddClientForm, PendingAssignment};
use crate::forms::product_request::AddProductRequestForm;
use crate::notifications::CLIENT_ADDED;
use crate::repository::{ClientReader, ClientWriter, OrderReader, OrderWriter};
use crate::services::assignment::{AssignmentOutcome, assign_single};
use crate::services::{ServiceError, ServiceResult, is_silent_rejection};
use crate::views::clients::{ClientQuery, filter_counts, list_clients};

/// Result of creating a client, including the follow-up assignment if the
/// user started from an unassigned item.
#[derive(Debug)]
pub struct ClientCreated {
    pub client: Client,
    pub assignment: Option<AssignmentOutcome>,
    pub message: &'static str,
}

/// Validates the add-client form, stores the client and applies the pending
/// assignment hint, if any, to the new client.
pub fn create_client<R>(
    repo: &R,
    form: AddClientForm,
    pending: Option<&PendingAssignment>,
) -> ServiceResult<ClientCreated>
where
    R: ClientWriter + OrderWriter + ?Sized,
{
    let new_client = NewClient::try_from(form).map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        ServiceError::from(err)
    })?;

    let client = repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        err
    })?;
    log::info!("Created client {} ({})", client.id, client.full_name());

    let assignment = pending
        .map(|hint| assign_single(repo, &hint.order_id, &hint.item_id, Some(client.id)))
        .transpose()?;

    let message = assignment
        .as_ref()
        .and_then(AssignmentOutcome::message)
        .unwrap_or(CLIENT_ADDED);

    Ok(ClientCreated {
        client,
        assignment,
        message,
    })
}

/// Applies a partial update to the client.
pub fn update_client<R>(
    repo: &R,
    client_id: ClientId,
    updates: &UpdateClient,
) -> ServiceResult<Option<Client>>
where
    R: ClientWriter + ?Sized,
{
    match repo.update_client(client_id, updates) {
        Ok(client) => Ok(Some(client)),
        Err(err) if is_silent_rejection(&err) => {
            log::warn!("Ignoring update of client {client_id}: {err}");
            Ok(None)
        }
        Err(err) => {
            log::error!("Failed to update client {client_id}: {err}");
            Err(err.into())
        }
    }
}

/// Reads the client, lets `build` derive an update from it, and writes it.
fn modify_client<R, F>(repo: &R, client_id: ClientId, build: F) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ClientWriter + ?Sized,
    F: FnOnce(&Client) -> Option<UpdateClient>,
{
    let Some(client) = repo.get_client_by_id(client_id)? else {
        log::warn!("Client {client_id} not found");
        return Ok(None);
    };

    match build(&client) {
        Some(updates) => update_client(repo, client_id, &updates),
        None => Ok(None),
    }
}

/// Appends an address to the client.
pub fn add_address<R>(
    repo: &R,
    client_id: ClientId,
    form: AddAddressForm,
) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let address = Address::try_from(form)?;

    modify_client(repo, client_id, |client| {
        let mut addresses = client.addresses.clone();
        addresses.push(address);
        Some(UpdateClient::default().addresses(addresses))
    })
}

pub fn delete_address<R>(
    repo: &R,
    client_id: ClientId,
    index: usize,
) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    modify_client(repo, client_id, |client| {
        if index >= client.addresses.len() {
            log::warn!("Client {client_id} has no address at {index}");
            return None;
        }
        let mut addresses = client.addresses.clone();
        addresses.remove(index);
        Some(UpdateClient::default().addresses(addresses))
    })
}

/// Records a product request; the newest request comes first.
pub fn add_product_request<R>(
    repo: &R,
    client_id: ClientId,
    form: AddProductRequestForm,
) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let request = ProductRequest::try_from(form)?;

    modify_client(repo, client_id, |client| {
        let requests = std::iter::once(request)
            .chain(client.product_requests.iter().cloned())
            .collect();
        Some(UpdateClient::default().product_requests(requests))
    })
}

pub fn delete_product_request<R>(
    repo: &R,
    client_id: ClientId,
    index: usize,
) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    modify_client(repo, client_id, |client| {
        if index >= client.product_requests.len() {
            log::warn!("Client {client_id} has no product request at {index}");
            return None;
        }
        let mut requests = client.product_requests.clone();
        requests.remove(index);
        Some(UpdateClient::default().product_requests(requests))
    })
}

pub fn set_delivery_preference<R>(
    repo: &R,
    client_id: ClientId,
    preference: DeliveryPreference,
) -> ServiceResult<Option<Client>>
where
    R: ClientWriter + ?Sized,
{
    update_client(
        repo,
        client_id,
        &UpdateClient::default().delivery_preference(preference),
    )
}

pub fn toggle_favourite<R>(repo: &R, client_id: ClientId) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    modify_client(repo, client_id, |client| {
        Some(UpdateClient::default().favourite(!client.is_favourite))
    })
}

/// Loads the clients listing for `query` with the per-filter counts.
pub fn load_clients_page<R>(repo: &R, query: &ClientQuery) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + OrderReader + ?Sized,
{
    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to load clients: {err}");
        err
    })?;

    Ok(ClientsPageData {
        listing: list_clients(&clients, query),
        counts: filter_counts(&clients),
        total_clients: clients.len(),
        unassigned_count: repo.unassigned_count()?,
    })
}
