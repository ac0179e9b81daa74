use super::{ActionContext, ActionError, ActionKind, ActionOutcome, ActionTransition, SkipReason};
use crate::state::{Direction, EntityId};

/// Step one tile in a cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub direction: Direction,
}

impl ActionTransition for MoveAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Move
    }

    fn apply(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        let destination = ctx.actor(actor)?.position.offset(self.direction);

        if !ctx.map.is_passable(destination) {
            return Ok(ActionOutcome::Skipped(SkipReason::Blocked));
        }
        if ctx.entities.occupied(destination, actor) {
            return Ok(ActionOutcome::Skipped(SkipReason::Occupied));
        }

        ctx.actor_mut(actor)?.position = destination;
        Ok(ActionOutcome::Applied)
    }
}
