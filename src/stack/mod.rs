//! Stacks, their display mirrors, and the operation log.
//!
//! ## Key Types
//!
//! - [`StackId`]: Opaque handle to a stack on a [`Table`]
//! - [`Stack`]: Logical cards + rule object + display mirror
//! - [`StackView`]: The display mirror (independent card copies and layout)
//! - [`Operation`] / [`OperationLog`]: Two-phase mutations and their replay queue
//! - [`Table`]: Arena owning every stack, the log and the shuffle RNG
//!
//! Stacks never reference each other directly. A rule object that needs to
//! reason about other piles closes over their `StackId`s.

mod operation;
mod table;
mod view;

pub use operation::{Operation, OperationLog};
pub use table::Table;
pub use view::StackView;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::Card;
use crate::rules::Behavior;

/// Stack identifier, an index into its table's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StackId(pub u16);

impl StackId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stack({})", self.0)
    }
}

/// An ordered pile of cards. Index 0 is the bottom, the last card the top.
///
/// A stack always has exactly one behavior and one display mirror. Its cards
/// are only mutated through [`Table`] operations so that every change is
/// logged for display replay.
pub struct Stack {
    id: StackId,
    pub(crate) cards: Vec<Card>,
    behavior: Rc<dyn Behavior>,
    pub(crate) view: StackView,
}

impl Stack {
    pub(crate) fn new(id: StackId, behavior: Rc<dyn Behavior>, view: StackView) -> Self {
        Self {
            id,
            cards: Vec::new(),
            behavior,
            view,
        }
    }

    #[must_use]
    pub fn id(&self) -> StackId {
        self.id
    }

    /// Logical cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Top card, `None` when empty.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn behavior(&self) -> &dyn Behavior {
        self.behavior.as_ref()
    }

    /// A shared handle to the behavior, for dispatching while the table is
    /// mutably borrowed.
    #[must_use]
    pub fn behavior_handle(&self) -> Rc<dyn Behavior> {
        Rc::clone(&self.behavior)
    }

    pub fn set_behavior(&mut self, behavior: Rc<dyn Behavior>) {
        self.behavior = behavior;
    }

    #[must_use]
    pub fn view(&self) -> &StackView {
        &self.view
    }

    /// Layout access for the game and the resize path.
    pub fn view_mut(&mut self) -> &mut StackView {
        &mut self.view
    }

    /// Whether two stacks are governed by the same rule group.
    #[must_use]
    pub fn is_same_group(&self, other: &Stack) -> bool {
        self.behavior.is_same_group(other.behavior.as_ref())
    }
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("id", &self.id)
            .field("cards", &self.cards)
            .field("group", &self.behavior.group())
            .finish()
    }
}
