use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    authz::{self, AccessStore, Action, ResourceRef},
    db::models::auth::AuthUser,
    db::models::label::{
        CreateLabelRequest, DEFAULT_LABEL_COLOR, Label, LabelChanges, NewLabel, UpdateLabelRequest,
    },
    db::repositories::labels::LabelRepo,
    error::{AppError, AppResult},
};

pub struct LabelsService;

impl LabelsService {
    pub fn list<S>(
        store: &mut S,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
    ) -> AppResult<Vec<Label>>
    where
        S: AccessStore + ?Sized,
    {
        let grant = authz::authorize(
            store,
            actor,
            Action::Read,
            ResourceRef::Labels { workspace_id, board_id },
        )?;
        store.labels_on(grant.board()?.id)
    }

    pub fn create(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        req: &CreateLabelRequest,
    ) -> AppResult<Label> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Create,
            ResourceRef::Labels { workspace_id, board_id },
        )?;

        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation_field("name", "Label name is required"));
        }
        let new_label = NewLabel {
            name: name.to_string(),
            color: req
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
            board_id: grant.board()?.id,
        };
        Ok(LabelRepo::insert(conn, &new_label)?)
    }

    pub fn get(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        label_id: Uuid,
    ) -> AppResult<Label> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Read,
            ResourceRef::Label { workspace_id, board_id, label_id },
        )?;
        Ok(grant.label()?.clone())
    }

    pub fn update(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        label_id: Uuid,
        req: &UpdateLabelRequest,
    ) -> AppResult<Label> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Update,
            ResourceRef::Label { workspace_id, board_id, label_id },
        )?;

        let changes = label_changes(req)?;
        Ok(LabelRepo::update_fields(conn, grant.label()?.id, &changes)?)
    }

    pub fn delete(
        conn: &mut PgConnection,
        actor: &AuthUser,
        workspace_id: Uuid,
        board_id: Uuid,
        label_id: Uuid,
    ) -> AppResult<()> {
        let grant = authz::authorize(
            conn,
            actor,
            Action::Delete,
            ResourceRef::Label { workspace_id, board_id, label_id },
        )?;
        LabelRepo::delete_by_id(conn, grant.label()?.id)?;
        Ok(())
    }
}

pub fn label_changes(req: &UpdateLabelRequest) -> AppResult<LabelChanges> {
    if req.name.is_none() && req.color.is_none() {
        return Err(AppError::validation("No update data provided"));
    }
    let name = match req.name.as_deref().map(str::trim) {
        Some("") => return Err(AppError::validation_field("name", "Label name cannot be empty")),
        other => other.map(str::to_string),
    };
    Ok(LabelChanges {
        name,
        color: req.color.clone(),
    })
}
