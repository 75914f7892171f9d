//! Click handlers bound to stacks.
//!
//! A `Behavior` is the rule object of one stack. The dispatcher calls it
//! with the board, the stack it is attached to, and the index of the
//! clicked card (`None` when the stack is empty). A behavior that finds the
//! move legal issues table operations and selection calls; an illegal move
//! is simply `Ok(())` with nothing changed.
//!
//! Behaviors that reason about other piles close over their `StackId`s.

use crate::board::Board;
use crate::core::EngineError;
use crate::stack::StackId;

/// Equivalence class of behaviors.
///
/// Behaviors built for the same kind of pile report the same group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleGroup(pub u16);

impl RuleGroup {
    /// Group of the default, no-op behavior.
    pub const DEFAULT: RuleGroup = RuleGroup(0);
}

/// Rule object of a stack.
pub trait Behavior {
    /// Handle a single click.
    fn click(
        &self,
        board: &mut Board,
        stack: StackId,
        card_index: Option<usize>,
    ) -> Result<(), EngineError> {
        let _ = (board, stack, card_index);
        Ok(())
    }

    /// Handle a double click. Defaults to a single click.
    fn double_click(
        &self,
        board: &mut Board,
        stack: StackId,
        card_index: Option<usize>,
    ) -> Result<(), EngineError> {
        self.click(board, stack, card_index)
    }

    fn group(&self) -> RuleGroup {
        RuleGroup::DEFAULT
    }

    fn is_same_group(&self, other: &dyn Behavior) -> bool {
        self.group() == other.group()
    }

    /// Whether moving cards off this stack turns the newly exposed top card
    /// face up.
    fn reveals_exposed_card(&self) -> bool {
        false
    }
}

/// Ignores every click.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultBehavior;

impl Behavior for DefaultBehavior {}
