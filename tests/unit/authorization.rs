use taskboard_backend::authz::{self, Action, Denial, ResourceKind, ResourceRef};
use taskboard_backend::db::models::workspace_member::WorkspaceMemberRole;
use uuid::Uuid;

use crate::common::{MemoryStore, denial_of};

struct Tenant {
    store: MemoryStore,
    workspace_id: Uuid,
    board_id: Uuid,
    task_id: Uuid,
    label_id: Uuid,
}

fn tenant() -> Tenant {
    let mut store = MemoryStore::new();
    let owner = store.add_user("owner");
    let workspace = store.workspace_of(&owner, "W");
    let board = store.add_board(workspace.id, "Board");
    let task = store.add_task(board.id, "Task");
    let label = store.add_label(board.id, "bug");
    Tenant {
        store,
        workspace_id: workspace.id,
        board_id: board.id,
        task_id: task.id,
        label_id: label.id,
    }
}

impl Tenant {
    /// Every reference that names something inside the workspace.
    fn refs(&self) -> Vec<ResourceRef> {
        let (workspace_id, board_id) = (self.workspace_id, self.board_id);
        vec![
            ResourceRef::Workspace { workspace_id },
            ResourceRef::Boards { workspace_id },
            ResourceRef::Board { workspace_id, board_id },
            ResourceRef::Tasks { workspace_id, board_id },
            ResourceRef::Task { workspace_id, board_id, task_id: self.task_id },
            ResourceRef::Labels { workspace_id, board_id },
            ResourceRef::Label { workspace_id, board_id, label_id: self.label_id },
        ]
    }
}

#[test]
fn non_member_is_denied_everything_under_the_workspace() {
    let mut t = tenant();
    let outsider = t.store.add_user("outsider");

    for target in t.refs() {
        for action in [Action::Read, Action::Create, Action::Update, Action::Delete] {
            if let (ResourceRef::Workspace { .. }, Action::Create) = (target, action) {
                continue;
            }
            let err = authz::authorize(&mut t.store, &outsider, action, target).unwrap_err();
            assert_eq!(denial_of(err), Denial::NotMember, "{:?} {:?}", action, target);
        }
    }
    let err = authz::authorize(
        &mut t.store,
        &outsider,
        Action::Invite,
        ResourceRef::Workspace { workspace_id: t.workspace_id },
    )
    .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotMember);
}

#[test]
fn member_role_limits() {
    let mut t = tenant();
    let member = t.store.add_user("member");
    t.store.add_member(t.workspace_id, &member, WorkspaceMemberRole::Member);
    let (workspace_id, board_id) = (t.workspace_id, t.board_id);

    let denied = [
        (Action::Create, ResourceRef::Boards { workspace_id }),
        (Action::Update, ResourceRef::Board { workspace_id, board_id }),
        (Action::Delete, ResourceRef::Board { workspace_id, board_id }),
        (Action::Create, ResourceRef::Labels { workspace_id, board_id }),
        (Action::Update, ResourceRef::Workspace { workspace_id }),
        (Action::Delete, ResourceRef::Workspace { workspace_id }),
        (Action::Invite, ResourceRef::Workspace { workspace_id }),
    ];
    for (action, target) in denied {
        let err = authz::authorize(&mut t.store, &member, action, target).unwrap_err();
        assert!(
            matches!(denial_of(err), Denial::InsufficientRole { role: WorkspaceMemberRole::Member, .. }),
            "{:?} {:?}",
            action,
            target
        );
    }

    let task = ResourceRef::Task { workspace_id, board_id, task_id: t.task_id };
    let label = ResourceRef::Label { workspace_id, board_id, label_id: t.label_id };
    let allowed = [
        (Action::Read, ResourceRef::Workspace { workspace_id }),
        (Action::Read, ResourceRef::Boards { workspace_id }),
        (Action::Read, ResourceRef::Board { workspace_id, board_id }),
        (Action::Create, ResourceRef::Tasks { workspace_id, board_id }),
        (Action::Read, task),
        (Action::Update, task),
        (Action::Delete, task),
        (Action::Read, label),
        (Action::Update, label),
        (Action::Delete, label),
    ];
    for (action, target) in allowed {
        assert!(
            authz::authorize(&mut t.store, &member, action, target).is_ok(),
            "{:?} {:?}",
            action,
            target
        );
    }
}

#[test]
fn admin_manages_boards_but_cannot_delete_the_workspace() {
    let mut t = tenant();
    let admin = t.store.add_user("admin");
    t.store.add_member(t.workspace_id, &admin, WorkspaceMemberRole::Admin);
    let (workspace_id, board_id) = (t.workspace_id, t.board_id);

    for (action, target) in [
        (Action::Create, ResourceRef::Boards { workspace_id }),
        (Action::Delete, ResourceRef::Board { workspace_id, board_id }),
        (Action::Create, ResourceRef::Labels { workspace_id, board_id }),
        (Action::Update, ResourceRef::Workspace { workspace_id }),
        (Action::Invite, ResourceRef::Workspace { workspace_id }),
    ] {
        assert!(authz::authorize(&mut t.store, &admin, action, target).is_ok());
    }

    let err = authz::authorize(
        &mut t.store,
        &admin,
        Action::Delete,
        ResourceRef::Workspace { workspace_id },
    )
    .unwrap_err();
    assert_eq!(
        denial_of(err),
        Denial::InsufficientRole {
            role: WorkspaceMemberRole::Admin,
            action: Action::Delete,
            kind: ResourceKind::Workspace,
        }
    );
}

#[test]
fn nested_resources_resolve_to_their_workspace() {
    let mut t = tenant();
    let (workspace_id, board_id) = (t.workspace_id, t.board_id);

    let chain = authz::resolve(
        &mut t.store,
        ResourceRef::Task { workspace_id, board_id, task_id: t.task_id },
    )
    .unwrap();
    assert_eq!(chain.workspace.id, workspace_id);
    assert_eq!(chain.board.as_ref().map(|b| b.id), Some(board_id));
    assert_eq!(chain.task.as_ref().map(|t| t.id), Some(t.task_id));

    let chain = authz::resolve(
        &mut t.store,
        ResourceRef::Label { workspace_id, board_id, label_id: t.label_id },
    )
    .unwrap();
    assert_eq!(chain.workspace.id, workspace_id);
    assert_eq!(chain.label.as_ref().map(|l| l.board_id), Some(board_id));
}

#[test]
fn unknown_ids_are_not_found() {
    let mut t = tenant();
    let owner = t.store.add_user("someone");
    let workspace_id = t.workspace_id;

    let err = authz::authorize(
        &mut t.store,
        &owner,
        Action::Read,
        ResourceRef::Workspace { workspace_id: Uuid::new_v4() },
    )
    .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Workspace));

    let err = authz::authorize(
        &mut t.store,
        &owner,
        Action::Read,
        ResourceRef::Board { workspace_id, board_id: Uuid::new_v4() },
    )
    .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Board));

    let err = authz::authorize(
        &mut t.store,
        &owner,
        Action::Read,
        ResourceRef::Label { workspace_id, board_id: t.board_id, label_id: Uuid::new_v4() },
    )
    .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Label));
}

#[test]
fn path_naming_a_foreign_parent_is_not_found() {
    let mut store = MemoryStore::new();
    let mallory = store.add_user("mallory");
    let victim = store.add_user("victim");

    let own = store.workspace_of(&mallory, "Mine");
    let theirs = store.workspace_of(&victim, "Theirs");
    let own_board = store.add_board(own.id, "Mine");
    let their_board = store.add_board(theirs.id, "Secret");
    let their_task = store.add_task(their_board.id, "Secret task");
    let their_label = store.add_label(their_board.id, "secret");

    let err = authz::authorize(
        &mut store,
        &mallory,
        Action::Update,
        ResourceRef::Board { workspace_id: own.id, board_id: their_board.id },
    )
    .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Board));

    // a task of another board, named under mallory's own board
    let err = authz::authorize(
        &mut store,
        &mallory,
        Action::Delete,
        ResourceRef::Task { workspace_id: own.id, board_id: own_board.id, task_id: their_task.id },
    )
    .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Task));

    let err = authz::authorize(
        &mut store,
        &mallory,
        Action::Read,
        ResourceRef::Labels { workspace_id: own.id, board_id: their_board.id },
    )
    .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Board));

    let err = authz::authorize(
        &mut store,
        &mallory,
        Action::Update,
        ResourceRef::Label { workspace_id: own.id, board_id: own_board.id, label_id: their_label.id },
    )
    .unwrap_err();
    assert_eq!(denial_of(err), Denial::NotFound(ResourceKind::Label));
}

#[test]
fn role_in_another_workspace_does_not_carry_over() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    let w1 = store.workspace_of(&alice, "W1");
    let w2 = store.workspace_of(&bob, "W2");
    store.add_member(w2.id, &alice, WorkspaceMemberRole::Member);

    // alice owns W1 but is only a MEMBER of W2
    let err = authz::authorize(
        &mut store,
        &alice,
        Action::Create,
        ResourceRef::Boards { workspace_id: w2.id },
    )
    .unwrap_err();
    assert!(matches!(denial_of(err), Denial::InsufficientRole { .. }));
    assert!(
        authz::authorize(&mut store, &alice, Action::Create, ResourceRef::Boards { workspace_id: w1.id })
            .is_ok()
    );
}

#[test]
fn workspace_collection_is_open_to_any_actor() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("alice");
    let grant = authz::authorize(&mut store, &alice, Action::Create, ResourceRef::Workspaces).unwrap();
    assert!(grant.role().is_none());
    assert!(grant.workspace().is_err());
}
