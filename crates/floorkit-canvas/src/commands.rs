//! Floor-plan mutation commands.
//!
//! Every mutation is expressed as a [`FloorPlanCommand`] applied by the
//! pure transform [`apply_command`]: the input plan is never touched,
//! the output is a fully-updated copy or `None` for a no-op. The commit
//! step (handing the new plan to the host) and the history/selection
//! bookkeeping live in the session, so this module is trivially
//! testable.
//!
//! No command performs a partial write: either the whole updated object
//! set comes back, or nothing changes.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use floorkit_core::constants;
use floorkit_core::{GridDelta, GridPoint, GridSize};

use crate::history::HistoryAction;
use crate::model::{
    FloorObject, FloorPlan, ObjectId, ObjectKind, ObjectMetadata, TableAttrs, TablePatch,
};

/// A mutation of the floor-plan document.
#[derive(Debug, Clone, PartialEq)]
pub enum FloorPlanCommand {
    /// Translates the matching objects by a grid delta.
    MoveObjects { ids: Vec<ObjectId>, delta: GridDelta },
    /// Removes the matching objects.
    DeleteObjects { ids: Vec<ObjectId> },
    /// Clones the matching objects with fresh ids and a positive grid
    /// offset from their sources.
    DuplicateObjects { ids: Vec<ObjectId> },
    /// Materializes a new table at a grid position, patch fields
    /// overriding the defaults.
    AddTable {
        patch: TablePatch,
        position: GridPoint,
    },
    /// Merges a patch into the matching table object. Ids resolving to
    /// non-table objects are left untouched.
    UpdateTable { id: ObjectId, patch: TablePatch },
}

/// Ambient facts a command application needs: the wall clock and the
/// acting operator.
#[derive(Debug, Clone)]
pub struct CommandCtx {
    pub now: DateTime<Utc>,
    pub actor: Option<String>,
}

impl CommandCtx {
    /// Context for an anonymous actor at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now, actor: None }
    }
}

/// How the session selection should change after a command commits.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEffect {
    Unchanged,
    Clear,
    Replace(Vec<ObjectId>),
}

/// The result of applying a command: the new plan plus the follow-up
/// effects the session performs.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub plan: FloorPlan,
    pub selection: SelectionEffect,
    pub action: HistoryAction,
    pub description: String,
}

/// Applies a command to a plan, returning the updated copy. `None`
/// means the command was a no-op (empty id list, nothing matched,
/// non-table update target) and nothing must be committed.
pub fn apply_command(
    plan: &FloorPlan,
    command: &FloorPlanCommand,
    ctx: &CommandCtx,
) -> Option<CommandOutcome> {
    match command {
        FloorPlanCommand::MoveObjects { ids, delta } => move_objects(plan, ids, *delta, ctx),
        FloorPlanCommand::DeleteObjects { ids } => delete_objects(plan, ids, ctx),
        FloorPlanCommand::DuplicateObjects { ids } => duplicate_objects(plan, ids, ctx),
        FloorPlanCommand::AddTable { patch, position } => add_table(plan, patch, *position, ctx),
        FloorPlanCommand::UpdateTable { id, patch } => update_table(plan, id, patch, ctx),
    }
}

fn move_objects(
    plan: &FloorPlan,
    ids: &[ObjectId],
    delta: GridDelta,
    ctx: &CommandCtx,
) -> Option<CommandOutcome> {
    if ids.is_empty() {
        tracing::warn!("move rejected: empty id list");
        return None;
    }

    let mut next = plan.clone();
    let mut moved = 0usize;
    for object in &mut next.objects {
        if ids.contains(&object.id) {
            object.position = object.position.translated(delta);
            object.metadata.last_modified = ctx.now;
            moved += 1;
        }
    }
    if moved == 0 {
        return None;
    }
    next.touch(ctx.now);

    tracing::debug!(moved, dx = delta.dx, dy = delta.dy, "objects moved");
    Some(CommandOutcome {
        plan: next,
        selection: SelectionEffect::Unchanged,
        action: HistoryAction::ObjectsMoved,
        description: format!("Moved {moved} object(s)"),
    })
}

fn delete_objects(plan: &FloorPlan, ids: &[ObjectId], ctx: &CommandCtx) -> Option<CommandOutcome> {
    if ids.is_empty() {
        tracing::warn!("delete rejected: empty id list");
        return None;
    }

    let mut next = plan.clone();
    let before = next.objects.len();
    next.objects.retain(|object| !ids.contains(&object.id));
    let deleted = before - next.objects.len();
    if deleted == 0 {
        return None;
    }
    next.touch(ctx.now);

    tracing::debug!(deleted, "objects deleted");
    Some(CommandOutcome {
        plan: next,
        selection: SelectionEffect::Clear,
        action: HistoryAction::ObjectsDeleted,
        description: format!("Deleted {deleted} object(s)"),
    })
}

fn duplicate_objects(
    plan: &FloorPlan,
    ids: &[ObjectId],
    ctx: &CommandCtx,
) -> Option<CommandOutcome> {
    if ids.is_empty() {
        tracing::warn!("duplicate rejected: empty id list");
        return None;
    }

    let offset = GridDelta::new(
        constants::DUPLICATE_OFFSET_GRID,
        constants::DUPLICATE_OFFSET_GRID,
    );
    let mut next = plan.clone();
    let mut clones = Vec::new();
    for object in &next.objects {
        if !ids.contains(&object.id) {
            continue;
        }
        let mut clone = object.clone();
        clone.id = duplicate_id(&object.id, &next, &clones, ctx.now);
        clone.position = object.position.translated(offset);
        clone.metadata = ObjectMetadata {
            created: ctx.now,
            last_modified: ctx.now,
            created_by: object.metadata.created_by.clone(),
        };
        clones.push(clone);
    }
    if clones.is_empty() {
        return None;
    }

    let new_ids: Vec<ObjectId> = clones.iter().map(|c| c.id.clone()).collect();
    let count = clones.len();
    next.objects.append(&mut clones);
    next.touch(ctx.now);

    tracing::debug!(count, "objects duplicated");
    Some(CommandOutcome {
        plan: next,
        selection: SelectionEffect::Replace(new_ids),
        action: HistoryAction::ObjectsDuplicated,
        description: format!("Duplicated {count} object(s)"),
    })
}

/// Synthesizes `"{original}_copy_{millis}"`, suffixing an ordinal when
/// the id is already taken (same source duplicated within one
/// millisecond).
fn duplicate_id(
    original: &ObjectId,
    plan: &FloorPlan,
    pending: &[FloorObject],
    now: DateTime<Utc>,
) -> ObjectId {
    let base = format!("{}_copy_{}", original, now.timestamp_millis());
    let taken = |candidate: &str| {
        plan.objects.iter().any(|o| o.id.as_str() == candidate)
            || pending.iter().any(|o| o.id.as_str() == candidate)
    };
    if !taken(&base) {
        return ObjectId::new(base);
    }
    let mut ordinal = 2;
    loop {
        let candidate = format!("{base}_{ordinal}");
        if !taken(&candidate) {
            return ObjectId::new(candidate);
        }
        ordinal += 1;
    }
}

fn add_table(
    plan: &FloorPlan,
    patch: &TablePatch,
    position: GridPoint,
    ctx: &CommandCtx,
) -> Option<CommandOutcome> {
    let mut attrs = TableAttrs {
        number: plan.next_table_number(),
        ..TableAttrs::default()
    };
    patch.merge_into(&mut attrs);

    let mut next = plan.clone();
    let id = ObjectId::new(format!("table_{}", Uuid::new_v4()));
    let object = FloorObject {
        id: id.clone(),
        position,
        size: patch.size.unwrap_or(GridSize::new(3.0, 3.0)),
        rotation: patch.rotation.unwrap_or(0.0),
        z_index: patch.z_index.unwrap_or(0),
        metadata: ObjectMetadata::created_at(ctx.now, ctx.actor.clone()),
        kind: ObjectKind::Table(attrs.clone()),
    };
    next.objects.push(object);
    next.touch(ctx.now);

    tracing::debug!(%id, number = attrs.number, "table added");
    Some(CommandOutcome {
        plan: next,
        selection: SelectionEffect::Replace(vec![id]),
        action: HistoryAction::TableAdded,
        description: format!("Added new {} table", attrs.sub_type),
    })
}

fn update_table(
    plan: &FloorPlan,
    id: &ObjectId,
    patch: &TablePatch,
    ctx: &CommandCtx,
) -> Option<CommandOutcome> {
    let mut next = plan.clone();
    let target = next.objects.iter_mut().find(|o| &o.id == id)?;

    // Type must match: an id colliding with a wall or chair is a no-op,
    // not a partial-type corruption.
    let Some(attrs) = target.table_mut() else {
        tracing::warn!(%id, "update skipped: object is not a table");
        return None;
    };
    patch.merge_into(attrs);
    if let Some(size) = patch.size {
        target.size = size;
    }
    if let Some(rotation) = patch.rotation {
        target.rotation = rotation;
    }
    if let Some(z_index) = patch.z_index {
        target.z_index = z_index;
    }
    target.metadata.last_modified = ctx.now;
    next.touch(ctx.now);

    tracing::debug!(%id, "table updated");
    Some(CommandOutcome {
        plan: next,
        selection: SelectionEffect::Unchanged,
        action: HistoryAction::TableUpdated,
        description: format!("Updated table {id}"),
    })
}
