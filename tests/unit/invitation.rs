use taskboard_backend::authz::{Action, Denial, ResourceKind};
use taskboard_backend::db::models::workspace_member::{
    InviteMemberRequest, Membership, WorkspaceMemberRole,
};
use taskboard_backend::error::AppError;
use taskboard_backend::services::{InvitationsService, MembershipRegistry};

use crate::common::{MemoryStore, denial_of};

fn invite(email: &str, role: Option<WorkspaceMemberRole>) -> InviteMemberRequest {
    InviteMemberRequest {
        email: email.to_string(),
        role,
    }
}

#[test]
fn registered_user_is_attached_with_default_member_role() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let carol = store.add_user("carol");
    let workspace = store.workspace_of(&alice, "Team A");

    let membership =
        InvitationsService::invite(&mut store, &alice, workspace.id, &invite("carol@example.com", None)).unwrap();
    match membership {
        Membership::Active(active) => {
            assert_eq!(active.user_id, carol.id);
            assert_eq!(active.role, WorkspaceMemberRole::Member);
        }
        Membership::Pending(_) => panic!("carol has an account"),
    }
    assert!(
        MembershipRegistry::find_membership(&mut store, workspace.id, carol.id)
            .unwrap()
            .is_some()
    );
}

#[test]
fn inviting_an_existing_member_is_a_duplicate() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let carol = store.add_user("carol");
    let workspace = store.workspace_of(&alice, "Team A");
    store.add_member(workspace.id, &carol, WorkspaceMemberRole::Member);

    let err = InvitationsService::invite(&mut store, &alice, workspace.id, &invite("carol@example.com", None))
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateMembership { .. }));

    // the owner too
    let err = InvitationsService::invite(&mut store, &alice, workspace.id, &invite("alice@example.com", None))
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateMembership { .. }));
}

#[test]
fn second_pending_invite_to_the_same_email_is_a_duplicate() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let workspace = store.workspace_of(&alice, "Team A");

    let first = InvitationsService::invite(&mut store, &alice, workspace.id, &invite("new@example.com", None));
    assert!(first.unwrap().is_pending());
    let err = InvitationsService::invite(
        &mut store,
        &alice,
        workspace.id,
        &invite("new@example.com", Some(WorkspaceMemberRole::Admin)),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::DuplicateMembership { .. }));
}

#[test]
fn email_match_is_case_sensitive() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    store.add_user("carol");
    let workspace = store.workspace_of(&alice, "Team A");

    let membership =
        InvitationsService::invite(&mut store, &alice, workspace.id, &invite("Carol@example.com", None)).unwrap();
    assert!(membership.is_pending());
}

#[test]
fn member_cannot_invite() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let carol = store.add_user("carol");
    let workspace = store.workspace_of(&alice, "Team A");
    store.add_member(workspace.id, &carol, WorkspaceMemberRole::Member);

    let err = InvitationsService::invite(&mut store, &carol, workspace.id, &invite("x@example.com", None))
        .unwrap_err();
    assert_eq!(
        denial_of(err),
        Denial::InsufficientRole {
            role: WorkspaceMemberRole::Member,
            action: Action::Invite,
            kind: ResourceKind::Workspace,
        }
    );
    assert_eq!(store.rows_for(workspace.id).len(), 2);
}

#[test]
fn admin_may_invite_with_any_role() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let admin = store.add_user("admin");
    let workspace = store.workspace_of(&alice, "Team A");
    store.add_member(workspace.id, &admin, WorkspaceMemberRole::Admin);

    for (email, role) in [
        ("owner@example.com", WorkspaceMemberRole::Owner),
        ("admin2@example.com", WorkspaceMemberRole::Admin),
        ("member@example.com", WorkspaceMemberRole::Member),
    ] {
        let membership =
            InvitationsService::invite(&mut store, &admin, workspace.id, &invite(email, Some(role)))
                .unwrap();
        assert_eq!(membership.role(), role);
        assert!(membership.is_pending());
    }
    assert_eq!(store.rows_for(workspace.id).len(), 5);
}

#[test]
fn outsider_cannot_invite_and_nothing_is_written() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let eve = store.add_user("eve");
    let workspace = store.workspace_of(&alice, "Team A");

    let err = InvitationsService::invite(&mut store, &eve, workspace.id, &invite("eve@example.com", None))
        .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotMember);
    assert_eq!(store.rows_for(workspace.id).len(), 1);
}
