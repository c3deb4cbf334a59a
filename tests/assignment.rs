use shopper_desk::notifications::{ITEM_UNASSIGNED, ITEMS_ASSIGNED, ITEMS_MARKED_PAID, ToastKind};
use shopper_desk::repository::{ClientReader, OrderReader};
use shopper_desk::selection::SelectionState;
use shopper_desk::services::assignment::{
    AssignmentOutcome, assign_single, batch_assign, request_batch_assign, update_item_status,
};

mod common;

use common::{INITIAL_UNASSIGNED, assignee, client_id, count_unassigned, item_id, order_id};

#[test]
fn assigning_single_item_decrements_unassigned_count() {
    let mut session = common::session();
    let before = session.repository().unassigned_count().unwrap();

    let outcome = session
        .assign_item(&order_id("order-1"), &item_id("item-3"), Some(client_id(2)))
        .unwrap();

    let orders = session.repository().list_orders().unwrap();
    assert_eq!(assignee(&orders, "item-3"), Some(client_id(2)));
    assert_eq!(session.repository().unassigned_count().unwrap(), before - 1);
    assert_eq!(outcome.message(), Some(ITEMS_ASSIGNED));
    assert_eq!(
        session.toast().map(|toast| (toast.message, toast.kind)),
        Some((ITEMS_ASSIGNED.to_string(), ToastKind::Success))
    );
}

#[test]
fn repeating_single_assignment_is_idempotent() {
    let repo = common::repository();
    let (order, item) = (order_id("order-1"), item_id("item-3"));

    assign_single(&repo, &order, &item, Some(client_id(4))).unwrap();
    let first = repo.list_orders().unwrap();
    assign_single(&repo, &order, &item, Some(client_id(4))).unwrap();
    let second = repo.list_orders().unwrap();

    assert_eq!(first, second);
}

#[test]
fn unassigning_single_item_reports_unassigned() {
    let repo = common::repository();

    let outcome = assign_single(&repo, &order_id("order-1"), &item_id("item-1"), None).unwrap();

    assert_eq!(outcome.message(), Some(ITEM_UNASSIGNED));
    assert_eq!(repo.unassigned_count().unwrap(), INITIAL_UNASSIGNED + 1);
}

#[test]
fn unknown_ids_are_silent_no_ops() {
    let repo = common::repository();
    let before = repo.list_orders().unwrap();

    let unknown_order =
        assign_single(&repo, &order_id("order-9"), &item_id("item-3"), Some(client_id(2))).unwrap();
    let item_in_wrong_order =
        assign_single(&repo, &order_id("order-2"), &item_id("item-3"), Some(client_id(2))).unwrap();
    let unknown_client =
        assign_single(&repo, &order_id("order-1"), &item_id("item-3"), Some(client_id(99)))
            .unwrap();

    assert_eq!(unknown_order, AssignmentOutcome::Skipped);
    assert_eq!(item_in_wrong_order, AssignmentOutcome::Skipped);
    assert_eq!(unknown_client, AssignmentOutcome::Skipped);
    assert_eq!(repo.list_orders().unwrap(), before);
}

#[test]
fn counter_and_references_stay_consistent() {
    let repo = common::repository();
    let ids = [item_id("item-3"), item_id("item-ben-1"), item_id("item-unassigned-2")];

    batch_assign(&repo, &ids, Some(client_id(5))).unwrap();
    batch_assign(&repo, &ids[..1], None).unwrap();
    batch_assign(&repo, &ids, Some(client_id(404))).unwrap();
    update_item_status(&repo, &ids, false).unwrap();

    let orders = repo.list_orders().unwrap();
    let known: Vec<_> = repo
        .list_clients()
        .unwrap()
        .into_iter()
        .map(|client| client.id)
        .collect();

    assert_eq!(repo.unassigned_count().unwrap(), count_unassigned(&orders));
    for item in orders.iter().flat_map(|order| order.items.iter()) {
        if let Some(id) = item.assigned_client_id {
            assert!(known.contains(&id), "{} points at {id}", item.id);
        }
    }
}

#[test]
fn batch_to_client_is_gated_by_existing_assignment() {
    let repo = common::repository();
    let ids = [item_id("item-1"), item_id("item-3")];

    let outcome = request_batch_assign(&repo, &ids, Some(client_id(3))).unwrap();

    assert_eq!(
        outcome,
        AssignmentOutcome::NeedsConfirmation {
            client_id: client_id(3),
            item_ids: ids.to_vec(),
        }
    );
    let orders = repo.list_orders().unwrap();
    assert_eq!(assignee(&orders, "item-1"), Some(client_id(8)));
    assert_eq!(assignee(&orders, "item-3"), None);
}

#[test]
fn batch_of_unassigned_items_applies_immediately() {
    let repo = common::repository();
    let ids = [item_id("item-3"), item_id("item-unassigned-1")];

    let outcome = request_batch_assign(&repo, &ids, Some(client_id(3))).unwrap();

    assert_eq!(
        outcome,
        AssignmentOutcome::Applied {
            count: 2,
            message: ITEMS_ASSIGNED
        }
    );
}

#[test]
fn status_update_keeps_processing_and_puts_payment_first() {
    let repo = common::repository();

    let outcome = update_item_status(&repo, &[item_id("item-ben-2")], true).unwrap();

    assert_eq!(outcome.message(), Some(ITEMS_MARKED_PAID));
    let item = repo.find_items(&[item_id("item-ben-2")]).unwrap().remove(0);
    assert_eq!(
        item.status
            .labels()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec!["Paid", "Processing"]
    );
}

#[test]
fn confirming_reassignment_commits_every_frozen_item() {
    let mut session = common::session();
    session.enter_selection();
    session.toggle_item(&item_id("item-1")).unwrap();
    session.toggle_item(&item_id("item-3")).unwrap();

    let outcome = session.batch_assign_selected(Some(client_id(2))).unwrap();
    assert!(matches!(outcome, AssignmentOutcome::NeedsConfirmation { .. }));
    assert!(session.selection().is_pending());
    let untouched = session.repository().list_orders().unwrap();
    assert_eq!(assignee(&untouched, "item-1"), Some(client_id(8)));
    assert_eq!(assignee(&untouched, "item-3"), None);

    session.confirm_reassignment().unwrap();

    let orders = session.repository().list_orders().unwrap();
    assert_eq!(assignee(&orders, "item-1"), Some(client_id(2)));
    assert_eq!(assignee(&orders, "item-3"), Some(client_id(2)));
    assert_eq!(session.selection().state(), &SelectionState::Idle);
}

#[test]
fn cancelling_reassignment_leaves_store_untouched() {
    let mut session = common::session();
    let before = session.repository().list_orders().unwrap();
    session.enter_selection();
    session.toggle_item(&item_id("item-1")).unwrap();
    session.toggle_item(&item_id("item-3")).unwrap();
    session.batch_assign_selected(Some(client_id(2))).unwrap();

    session.cancel_reassignment().unwrap();

    assert_eq!(session.repository().list_orders().unwrap(), before);
    assert_eq!(session.selection().state(), &SelectionState::Idle);
    assert!(session.toast().is_none());
}

#[test]
fn unassigning_a_selection_never_asks() {
    let mut session = common::session();
    session.enter_selection();
    session.toggle_item(&item_id("item-1")).unwrap();
    session.toggle_item(&item_id("item-2")).unwrap();

    let outcome = session.batch_assign_selected(None).unwrap();

    assert!(matches!(outcome, AssignmentOutcome::Applied { count: 2, .. }));
    assert_eq!(session.selection().state(), &SelectionState::Idle);
    assert_eq!(
        session.repository().unassigned_count().unwrap(),
        INITIAL_UNASSIGNED + 2
    );
}

#[test]
fn assigning_whole_order_goes_through_conflict_check() {
    let mut session = common::session();

    let outcome = session
        .assign_order(&order_id("order-1"), Some(client_id(6)))
        .unwrap();

    assert!(matches!(outcome, AssignmentOutcome::NeedsConfirmation { ref item_ids, .. } if item_ids.len() == 5));
    assert!(session.selection().is_pending());

    session.confirm_reassignment().unwrap();
    let orders = session.repository().list_orders().unwrap();
    assert!(
        orders[0]
            .items
            .iter()
            .all(|item| item.assigned_client_id == Some(client_id(6)))
    );
}

#[test]
fn assigning_unassigned_order_applies_at_once() {
    let mut session = common::session();

    let outcome = session
        .assign_order(&order_id("order-3"), Some(client_id(6)))
        .unwrap();

    assert_eq!(
        outcome,
        AssignmentOutcome::Applied {
            count: 4,
            message: ITEMS_ASSIGNED
        }
    );
    assert!(!session.selection().is_pending());
}
