use super::{ActionContext, ActionError, ActionKind, ActionOutcome, ActionTransition, SkipReason};
use crate::combat;
use crate::state::{CombatStyle, EntityId};

/// Attack `target` with `style` if it is within the style's reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub target: EntityId,
    pub style: CombatStyle,
}

impl AttackAction {
    fn reach(&self, ctx: &ActionContext<'_>) -> u32 {
        let combat = &ctx.config.combat;
        match self.style {
            CombatStyle::Melee => combat.melee_reach,
            CombatStyle::Range => combat.range_reach,
            CombatStyle::Mage => combat.mage_reach,
        }
    }
}

impl ActionTransition for AttackAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Attack
    }

    fn apply(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        if self.target == actor {
            return Ok(ActionOutcome::Skipped(SkipReason::TargetIsSelf));
        }
        let from = ctx.actor(actor)?.position;
        let Some(target) = ctx.entities.get(self.target) else {
            return Ok(ActionOutcome::Skipped(SkipReason::TargetMissing));
        };
        if !target.is_alive() {
            return Ok(ActionOutcome::Skipped(SkipReason::TargetDead));
        }
        if from.distance(target.position) > self.reach(ctx) {
            return Ok(ActionOutcome::Skipped(SkipReason::OutOfReach));
        }

        Ok(combat::attack(ctx, actor, self.target, self.style)
            .map(ActionOutcome::Attacked)
            .unwrap_or(ActionOutcome::Skipped(SkipReason::TargetDead)))
    }
}
