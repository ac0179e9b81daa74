//! Agent actions and their execution.
//!
//! Each action type is a small struct implementing [`ActionTransition`];
//! [`Action`] is the tagged union the scheduler moves around. Priority is a
//! property of the action type ([`ActionKind::priority`]), never of the
//! submitter.
//!
//! # Module Structure
//!
//! - `context`: [`ActionContext`], the mutable world slice actions run against
//! - `error`: [`ActionError`] (contract violations only)
//! - `combat`, `movement`, `inventory`, `exchange`: one file per action family
mod combat;
mod context;
mod error;
mod exchange;
mod inventory;
mod movement;

pub use combat::AttackAction;
pub use context::ActionContext;
pub use error::ActionError;
pub use exchange::{BuyAction, SellAction};
pub use inventory::{DestroyAction, GiveAction, UseAction};
pub use movement::MoveAction;

use std::collections::BTreeMap;

use strum::{EnumIter, IntoStaticStr};

use crate::combat::AttackReport;
use crate::exchange::BuyOutcome;
use crate::state::{EntityId, ItemId};

/// Defines how one action type mutates the world.
pub trait ActionTransition {
    fn kind(&self) -> ActionKind;

    /// Rejects arguments that violate the action's contract, before any
    /// state is touched.
    fn pre_validate(&self, _actor: EntityId, _ctx: &ActionContext<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action. Expected failures come back as
    /// [`ActionOutcome::Skipped`].
    fn apply(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError>;
}

/// Discriminant of [`Action`], ordered by execution priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Move,
    Use,
    Give,
    Destroy,
    Sell,
    Buy,
}

impl ActionKind {
    /// Bucket this action type executes in. Lower runs first.
    pub const fn priority(self) -> u8 {
        match self {
            ActionKind::Attack => 1,
            ActionKind::Move => 2,
            ActionKind::Use => 3,
            ActionKind::Give | ActionKind::Destroy => 4,
            ActionKind::Sell => 5,
            ActionKind::Buy => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Attack(AttackAction),
    Move(MoveAction),
    Use(UseAction),
    Give(GiveAction),
    Destroy(DestroyAction),
    Sell(SellAction),
    Buy(BuyAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        self.transition().kind()
    }

    pub fn priority(&self) -> u8 {
        self.kind().priority()
    }

    /// The item argument this action requires the actor to hold, if any.
    pub fn owned_item(&self) -> Option<ItemId> {
        match self {
            Action::Use(action) => Some(action.item),
            Action::Give(action) => Some(action.item),
            Action::Destroy(action) => Some(action.item),
            Action::Sell(action) => Some(action.item),
            Action::Attack(_) | Action::Move(_) | Action::Buy(_) => None,
        }
    }

    fn transition(&self) -> &dyn ActionTransition {
        match self {
            Action::Attack(action) => action,
            Action::Move(action) => action,
            Action::Use(action) => action,
            Action::Give(action) => action,
            Action::Destroy(action) => action,
            Action::Sell(action) => action,
            Action::Buy(action) => action,
        }
    }

    /// Validates then applies the action for `actor`.
    pub fn execute(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        let transition = self.transition();
        transition.pre_validate(actor, ctx)?;
        transition.apply(actor, ctx)
    }
}

macro_rules! impl_from_action {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_action! {
    Attack => AttackAction,
    Move => MoveAction,
    Use => UseAction,
    Give => GiveAction,
    Destroy => DestroyAction,
    Sell => SellAction,
    Buy => BuyAction,
}

/// What executing one action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Attacked(AttackReport),
    Traded(BuyOutcome),
    Skipped(SkipReason),
}

impl ActionOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, ActionOutcome::Skipped(_))
    }
}

/// Why an action was a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    TargetMissing,
    TargetDead,
    TargetIsSelf,
    TargetNotPlayer,
    OutOfReach,
    Blocked,
    Occupied,
    NoSpace,
    /// The item was held when the tick began but was used up, given away
    /// or destroyed by an earlier action.
    ItemGone,
    ItemListed,
    ItemEquipped,
    NotUsable,
    SystemDisabled,
}

/// One entity's submitted actions for a tick, at most one per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSet {
    actions: BTreeMap<ActionKind, Action>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, action: impl Into<Action>) -> Self {
        self.insert(action);
        self
    }

    /// Inserts an action, replacing any earlier one of the same kind.
    pub fn insert(&mut self, action: impl Into<Action>) -> Option<Action> {
        let action = action.into();
        self.actions.insert(action.kind(), action)
    }

    pub fn get(&self, kind: ActionKind) -> Option<&Action> {
        self.actions.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<A: Into<Action>> FromIterator<A> for ActionSet {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut set = ActionSet::new();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Intents submitted for one tick, keyed by acting entity.
pub type Intents = BTreeMap<EntityId, ActionSet>;

/// Item argument helper shared by the item actions.
pub(crate) fn require_owned(ctx: &ActionContext<'_>, actor: EntityId, item: ItemId) -> Result<(), ActionError> {
    if ctx.actor(actor)?.inventory.contains(item) {
        Ok(())
    } else {
        Err(ActionError::ItemNotOwned { actor, item })
    }
}
