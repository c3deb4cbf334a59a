//! The store object screens talk to.
//!
//! A [`Session`] owns the repository, the selection state machine, the order
//! filter toggles and the toast slot, and exposes the fixed command set of
//! the orders and clients screens. After every command the derived state is
//! brought back in line with the store: the unassigned filter switches
//! itself off once nothing is left to assign, and the selection is pruned
//! to what is still visible.

use std::time::Instant;

use crate::domain::client::{Client, DeliveryPreference, UpdateClient};
use crate::domain::types::{ClientId, ItemId, OrderId};
use crate::dto::clients::ClientsPageData;
use crate::dto::dashboard::DashboardSummary;
use crate::dto::orders::OrdersPageData;
use crate::forms::address::AddAddressForm;
use crate::forms::client::{AddClientForm, PendingAssignment};
use crate::forms::goal::SalesGoalForm;
use crate::forms::product_request::AddProductRequestForm;
use crate::models::config::EngineConfig;
use crate::notifications::{
    ADDRESS_ADDED, Notifier, PRODUCT_REQUEST_ADDED, SALES_GOAL_FAILED, SALES_GOAL_SET, Toast,
    ToastHandle, ToastKind,
};
use crate::repository::{
    ClientReader, ClientWriter, OrderReader, OrderWriter, SettingsReader, SettingsWriter,
};
use crate::selection::SelectionController;
use crate::services::assignment::{self, AssignmentOutcome};
use crate::services::{ServiceError, ServiceResult, clients, dashboard, goals, orders};
use crate::views::clients::{ClientQuery, search_clients};
use crate::views::orders::{
    ClientFilter, OrderFilters, OrderQuery, OrderSort, visible_item_ids, visible_orders,
};

/// Everything a session needs from its store.
pub trait Store:
    ClientReader + ClientWriter + OrderReader + OrderWriter + SettingsReader + SettingsWriter
{
}

impl<T> Store for T where
    T: ClientReader + ClientWriter + OrderReader + OrderWriter + SettingsReader + SettingsWriter
{
}

pub struct Session<R> {
    repo: R,
    selection: SelectionController,
    filters: OrderFilters,
    client_query: ClientQuery,
    notifier: Notifier,
    me: Option<ClientId>,
}

impl<R> Session<R>
where
    R: Store,
{
    pub fn new(repo: R, config: &EngineConfig) -> Self {
        Self {
            repo,
            selection: SelectionController::new(),
            filters: OrderFilters::new(config.unassigned_filter_on_start),
            client_query: ClientQuery::default(),
            notifier: Notifier::new(config.toast_duration()),
            me: config.me(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn filters(&self) -> &OrderFilters {
        &self.filters
    }

    pub fn client_query(&self) -> &ClientQuery {
        &self.client_query
    }

    /// Query for the orders listing under the current filters and mode.
    pub fn order_query(&self) -> OrderQuery {
        self.filters.to_query(self.selection.is_selecting(), self.me)
    }

    pub fn visible_item_ids(&self) -> ServiceResult<Vec<ItemId>> {
        let orders = self.repo.list_orders()?;
        Ok(visible_item_ids(&visible_orders(&orders, &self.order_query())))
    }

    fn sync(&mut self) -> ServiceResult<()> {
        let unassigned = self.repo.unassigned_count().map_err(|err| {
            log::error!("Failed to count unassigned items: {err}");
            err
        })?;
        if self.filters.reconcile(unassigned) {
            log::info!("No unassigned items left, unassigned filter switched off");
        }

        let visible = self.visible_item_ids()?;
        self.selection.retain_visible(&visible);
        Ok(())
    }

    fn report(&mut self, outcome: &AssignmentOutcome) {
        if let Some(message) = outcome.message() {
            self.notifier.show(message, ToastKind::Success);
        }
    }

    /// Per-item assignment from the item's action sheet. Never asks for
    /// confirmation.
    pub fn assign_item(
        &mut self,
        order_id: &OrderId,
        item_id: &ItemId,
        client_id: Option<ClientId>,
    ) -> ServiceResult<AssignmentOutcome> {
        let outcome = assignment::assign_single(&self.repo, order_id, item_id, client_id)?;
        self.report(&outcome);
        self.sync()?;
        Ok(outcome)
    }

    pub fn enter_selection(&mut self) {
        if let Err(err) = self.selection.enter() {
            log::warn!("Cannot enter selection mode: {err}");
        }
    }

    /// "Select" from an item's context menu.
    pub fn select_item(&mut self, item_id: ItemId) -> ServiceResult<()> {
        if let Err(err) = self.selection.select_single(item_id) {
            log::warn!("Cannot select item: {err}");
            return Ok(());
        }
        self.sync()
    }

    pub fn toggle_item(&mut self, item_id: &ItemId) -> ServiceResult<bool> {
        let visible = self.visible_item_ids()?;
        Ok(self.selection.toggle(item_id, &visible))
    }

    pub fn toggle_select_all(&mut self) -> ServiceResult<()> {
        let visible = self.visible_item_ids()?;
        self.selection.toggle_all(&visible);
        Ok(())
    }

    pub fn cancel_selection(&mut self) -> ServiceResult<()> {
        self.selection.cancel();
        self.sync()
    }

    /// Assigns the selection. Overwriting an existing assignment moves the
    /// controller to `PendingConfirmation` without touching the store.
    pub fn batch_assign_selected(
        &mut self,
        client_id: Option<ClientId>,
    ) -> ServiceResult<AssignmentOutcome> {
        let selected = self.selection.selected().to_vec();
        if !self.selection.is_selecting() || selected.is_empty() {
            return Ok(AssignmentOutcome::Skipped);
        }

        let outcome = assignment::request_batch_assign(&self.repo, &selected, client_id)?;
        self.apply_request(&outcome);
        self.sync()?;
        Ok(outcome)
    }

    fn apply_request(&mut self, outcome: &AssignmentOutcome) {
        match outcome {
            AssignmentOutcome::NeedsConfirmation {
                client_id,
                item_ids,
            } => {
                if let Err(err) = self
                    .selection
                    .begin_confirmation(*client_id, item_ids.clone())
                {
                    log::warn!("Cannot ask for confirmation: {err}");
                }
            }
            AssignmentOutcome::Applied { .. } => {
                self.report(outcome);
                self.selection.finish();
            }
            AssignmentOutcome::Skipped => self.selection.finish(),
        }
    }

    /// Commits the pending reassignment to every frozen item id.
    pub fn confirm_reassignment(&mut self) -> ServiceResult<AssignmentOutcome> {
        let pending = match self.selection.take_pending() {
            Ok(pending) => pending,
            Err(err) => {
                log::warn!("Ignoring confirmation: {err}");
                return Ok(AssignmentOutcome::Skipped);
            }
        };

        let outcome =
            assignment::batch_assign(&self.repo, &pending.item_ids, Some(pending.client_id))?;
        self.report(&outcome);
        self.sync()?;
        Ok(outcome)
    }

    /// Drops the pending reassignment; the store is left untouched.
    pub fn cancel_reassignment(&mut self) -> ServiceResult<()> {
        if self.selection.is_pending() {
            log::info!("Reassignment cancelled");
        }
        self.selection.cancel();
        self.sync()
    }

    pub fn mark_selected(&mut self, is_paid: bool) -> ServiceResult<AssignmentOutcome> {
        let selected = self.selection.selected().to_vec();
        if !self.selection.is_selecting() || selected.is_empty() {
            return Ok(AssignmentOutcome::Skipped);
        }

        let outcome = assignment::update_item_status(&self.repo, &selected, is_paid)?;
        self.report(&outcome);
        self.selection.finish();
        self.sync()?;
        Ok(outcome)
    }

    pub fn mark_item(
        &mut self,
        item_id: &ItemId,
        is_paid: bool,
    ) -> ServiceResult<AssignmentOutcome> {
        let outcome =
            assignment::update_item_status(&self.repo, std::slice::from_ref(item_id), is_paid)?;
        self.report(&outcome);
        self.sync()?;
        Ok(outcome)
    }

    pub fn mark_order(
        &mut self,
        order_id: &OrderId,
        is_paid: bool,
    ) -> ServiceResult<AssignmentOutcome> {
        let outcome = assignment::update_order_status(&self.repo, order_id, is_paid)?;
        self.report(&outcome);
        self.sync()?;
        Ok(outcome)
    }

    /// Assigns every item of an order under the batch conflict rule.
    pub fn assign_order(
        &mut self,
        order_id: &OrderId,
        client_id: Option<ClientId>,
    ) -> ServiceResult<AssignmentOutcome> {
        if self.selection.is_pending() {
            log::warn!("Ignoring order assignment while a reassignment is pending");
            return Ok(AssignmentOutcome::Skipped);
        }

        let outcome = assignment::request_order_assign(&self.repo, order_id, client_id)?;
        match &outcome {
            AssignmentOutcome::NeedsConfirmation { .. } => self.apply_request(&outcome),
            _ => self.report(&outcome),
        }
        self.sync()?;
        Ok(outcome)
    }

    pub fn select_client_filter(&mut self, filter: Option<ClientFilter>) -> ServiceResult<()> {
        self.filters.select_client(filter);
        self.sync()
    }

    pub fn toggle_unassigned_filter(&mut self) -> ServiceResult<()> {
        self.filters.toggle_unassigned();
        self.sync()
    }

    pub fn toggle_unpaid_filter(&mut self) -> ServiceResult<()> {
        self.filters.toggle_unpaid();
        self.sync()
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> ServiceResult<()> {
        self.filters.set_search(term);
        self.sync()
    }

    pub fn set_order_sort(&mut self, sort: OrderSort) -> ServiceResult<()> {
        self.filters.set_sort(sort);
        self.sync()
    }

    /// Dashboard shortcut to the unassigned items.
    pub fn show_unassigned(&mut self) -> ServiceResult<()> {
        self.filters.set_unassigned(true);
        self.sync()
    }

    /// Client profile shortcut to that client's items.
    pub fn view_order_history(&mut self, client_id: ClientId) -> ServiceResult<()> {
        self.select_client_filter(Some(ClientFilter::Client(client_id)))
    }

    pub fn set_client_query(&mut self, query: ClientQuery) {
        self.client_query = query;
    }

    pub fn create_client(
        &mut self,
        form: AddClientForm,
        pending: Option<PendingAssignment>,
    ) -> ServiceResult<Client> {
        let created = clients::create_client(&self.repo, form, pending.as_ref())?;
        self.notifier.show(created.message, ToastKind::Success);
        self.sync()?;
        Ok(created.client)
    }

    pub fn update_client(
        &mut self,
        client_id: ClientId,
        updates: &UpdateClient,
    ) -> ServiceResult<Option<Client>> {
        clients::update_client(&self.repo, client_id, updates)
    }

    pub fn add_address(
        &mut self,
        client_id: ClientId,
        form: AddAddressForm,
    ) -> ServiceResult<Option<Client>> {
        let client = clients::add_address(&self.repo, client_id, form)?;
        if client.is_some() {
            self.notifier.show(ADDRESS_ADDED, ToastKind::Success);
        }
        Ok(client)
    }

    pub fn delete_address(
        &mut self,
        client_id: ClientId,
        index: usize,
    ) -> ServiceResult<Option<Client>> {
        clients::delete_address(&self.repo, client_id, index)
    }

    pub fn add_product_request(
        &mut self,
        client_id: ClientId,
        form: AddProductRequestForm,
    ) -> ServiceResult<Option<Client>> {
        let client = clients::add_product_request(&self.repo, client_id, form)?;
        if client.is_some() {
            self.notifier.show(PRODUCT_REQUEST_ADDED, ToastKind::Success);
        }
        Ok(client)
    }

    pub fn delete_product_request(
        &mut self,
        client_id: ClientId,
        index: usize,
    ) -> ServiceResult<Option<Client>> {
        clients::delete_product_request(&self.repo, client_id, index)
    }

    pub fn set_delivery_preference(
        &mut self,
        client_id: ClientId,
        preference: DeliveryPreference,
    ) -> ServiceResult<Option<Client>> {
        clients::set_delivery_preference(&self.repo, client_id, preference)
    }

    pub fn toggle_favourite(&mut self, client_id: ClientId) -> ServiceResult<Option<Client>> {
        clients::toggle_favourite(&self.repo, client_id)
    }

    /// Stores a new goal from raw user input. A rejected input shows an error
    /// toast and keeps the previous goal.
    pub fn update_sales_goal(&mut self, raw: &str) -> ServiceResult<Option<u32>> {
        let form = SalesGoalForm {
            goal: raw.to_string(),
        };
        match goals::update_sales_goal(&self.repo, &form) {
            Ok(goal) => {
                self.notifier.show(SALES_GOAL_SET, ToastKind::Success);
                Ok(Some(goal))
            }
            Err(ServiceError::Form(_)) => {
                self.notifier.show(SALES_GOAL_FAILED, ToastKind::Error);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn orders_page(&self) -> ServiceResult<OrdersPageData> {
        orders::load_orders_page(&self.repo, &self.order_query())
    }

    pub fn clients_page(&self) -> ServiceResult<ClientsPageData> {
        clients::load_clients_page(&self.repo, &self.client_query)
    }

    pub fn dashboard(&self) -> ServiceResult<DashboardSummary> {
        dashboard::load_dashboard(&self.repo)
    }

    /// Client lookup for the assign and filter sheets.
    pub fn search_clients(&self, term: &str) -> ServiceResult<Vec<Client>> {
        let clients = self.repo.list_clients()?;
        Ok(search_clients(&clients, term).into_iter().cloned().collect())
    }

    pub fn toast(&mut self) -> Option<Toast> {
        self.notifier.current().cloned()
    }

    pub fn toast_at(&mut self, now: Instant) -> Option<Toast> {
        self.notifier.current_at(now).cloned()
    }

    pub fn show_toast_at(&mut self, message: &str, kind: ToastKind, now: Instant) -> ToastHandle {
        self.notifier.show_at(message, kind, now)
    }

    pub fn dismiss_toast(&mut self, handle: ToastHandle) -> bool {
        self.notifier.dismiss(handle)
    }

    /// Navigation drops whatever toast is showing.
    pub fn clear_toast(&mut self) {
        self.notifier.clear();
    }
}
