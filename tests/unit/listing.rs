use taskboard_backend::authz::{Denial, ResourceKind, TaskStore};
use taskboard_backend::db::models::workspace_member::WorkspaceMemberRole;
use taskboard_backend::services::{BoardsService, LabelsService, TasksService, WorkspacesService};

use crate::common::{MemoryStore, denial_of};

#[test]
fn boards_are_listed_for_their_workspace_only() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let w1 = store.workspace_of(&alice, "W1");
    let w2 = store.workspace_of(&alice, "W2");
    store.add_board(w1.id, "one");
    store.add_board(w2.id, "two");
    store.add_board(w2.id, "three");

    let boards = BoardsService::list(&mut store, &alice, w1.id).unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].title, "one");
    assert!(boards.iter().all(|b| b.workspace_id == w1.id));

    let boards = BoardsService::list(&mut store, &alice, w2.id).unwrap();
    assert_eq!(boards.len(), 2);
    assert!(boards.iter().all(|b| b.workspace_id == w2.id));
}

#[test]
fn tasks_and_labels_are_listed_for_their_board_only() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let ws = store.workspace_of(&alice, "W");
    let b1 = store.add_board(ws.id, "b1");
    let b2 = store.add_board(ws.id, "b2");
    let t1 = store.add_task(b1.id, "on b1");
    store.add_task(b2.id, "on b2");
    let l1 = store.add_label(b1.id, "bug");
    store.add_label(b2.id, "feature");
    store.replace_task_labels(t1.id, &[l1.id]).unwrap();

    let tasks = TasksService::list(&mut store, &alice, ws.id, b1.id).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].task.id, t1.id);
    assert_eq!(tasks[0].labels.len(), 1);
    assert_eq!(tasks[0].labels[0].id, l1.id);

    let labels = LabelsService::list(&mut store, &alice, ws.id, b1.id).unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].name, "bug");

    let tasks = TasksService::list(&mut store, &alice, ws.id, b2.id).unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].labels.is_empty());
}

#[test]
fn board_of_another_workspace_is_not_listed_through_a_foreign_path() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let w1 = store.workspace_of(&alice, "W1");
    let w2 = store.workspace_of(&alice, "W2");
    let b2 = store.add_board(w2.id, "two");
    store.add_task(b2.id, "hidden");

    let err = TasksService::list(&mut store, &alice, w1.id, b2.id).unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Board));
    let err = LabelsService::list(&mut store, &alice, w1.id, b2.id).unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Board));
}

#[test]
fn workspaces_listed_are_owned_or_joined() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    let own = store.workspace_of(&alice, "mine");
    let joined = store.workspace_of(&bob, "joined");
    let foreign = store.workspace_of(&bob, "foreign");
    store.add_member(joined.id, &alice, WorkspaceMemberRole::Member);

    let listed = WorkspacesService::list(&mut store, &alice).unwrap();
    assert_eq!(listed.len(), 2);
    let role_of = |id| listed.iter().find(|w| w.id == id).map(|w| w.role);
    assert_eq!(role_of(own.id), Some(Some(WorkspaceMemberRole::Owner)));
    assert_eq!(role_of(joined.id), Some(Some(WorkspaceMemberRole::Member)));
    assert_eq!(role_of(foreign.id), None);
}
