//! Saving and restoring the logical state of a table.
//!
//! A snapshot holds every stack's cards and the shuffle RNG position, so a
//! restored table both looks the same and shuffles the same from then on.
//! Behaviors and layout are not stored; a snapshot is restored onto a table
//! built by the same variant.
//!
//! ```
//! use card_forest::core::EngineConfig;
//! use card_forest::games::Klondike;
//! use card_forest::motion::InstantDriver;
//! use card_forest::session::GameSession;
//! use card_forest::snapshot::TableSnapshot;
//!
//! let mut game = GameSession::<Klondike>::new(EngineConfig::default().with_seed(11)).unwrap();
//! game.deal().unwrap();
//! let bytes = game.snapshot(&mut InstantDriver).unwrap().to_bytes().unwrap();
//!
//! let mut other = GameSession::<Klondike>::new(EngineConfig::default()).unwrap();
//! other.restore(&TableSnapshot::from_bytes(&bytes).unwrap(), &mut InstantDriver).unwrap();
//! let stock = other.variant().stock();
//! assert_eq!(other.board().table().stack(stock).unwrap().len(), 24);
//! ```

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Card, EngineError, GameRng, GameRngState};
use crate::stack::Table;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Cards of every stack, in table order, bottom first.
    pub stacks: Vec<Vec<Card>>,
    pub rng: GameRngState,
}

impl TableSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Table {
    /// Capture the logical cards and the RNG position.
    ///
    /// Pending display operations are not part of the snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            stacks: self.stacks().map(|s| s.cards().to_vec()).collect(),
            rng: self.rng().state(),
        }
    }

    /// Replace every stack's cards with the snapshot's.
    ///
    /// Pending operations are dropped and display mirrors are reset to the
    /// restored cards. Fails without changes if the stack counts differ.
    pub fn restore(&mut self, snapshot: &TableSnapshot) -> Result<(), EngineError> {
        if snapshot.stacks.len() != self.len() {
            return Err(EngineError::SnapshotMismatch {
                expected: self.len(),
                found: snapshot.stacks.len(),
            });
        }
        self.log_mut().clear();
        for (stack, cards) in self.stacks_mut().zip(&snapshot.stacks) {
            stack.cards = cards.clone();
            stack.view.cards = Vector::from(cards.clone());
            stack.view.update_bounds();
        }
        *self.rng_mut() = GameRng::from_state(&snapshot.rng);
        debug!("restored {} stacks", snapshot.stacks.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardMetrics, Deck};

    #[test]
    fn test_restore_rejects_other_layout() {
        let mut a = Table::new(CardMetrics::default(), GameRng::new(1));
        a.add_stack(0.5, 0.5, false);
        let snapshot = a.snapshot();

        let mut b = Table::new(CardMetrics::default(), GameRng::new(1));
        b.add_stack(0.5, 0.5, false);
        b.add_stack(0.5, 0.5, false);
        assert!(matches!(
            b.restore(&snapshot),
            Err(EngineError::SnapshotMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_restore_resets_display_and_log() {
        let mut table = Table::new(CardMetrics::default(), GameRng::new(1));
        let s = table.add_stack(0.5, 0.5, false);
        table.load(s, Deck::standard()).unwrap();
        let snapshot = table.snapshot();

        table.clear(s).unwrap();
        table.restore(&snapshot).unwrap();

        assert_eq!(table.pending_operations(), 0);
        assert_eq!(table.stack(s).unwrap().len(), 52);
        assert_eq!(table.stack(s).unwrap().view().len(), 52);
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut table = Table::new(CardMetrics::default(), GameRng::new(9));
        let s = table.add_stack(0.5, 0.5, false);
        table.load(s, Deck::standard()).unwrap();
        table.shuffle(s).unwrap();

        let snapshot = table.snapshot();
        let decoded = TableSnapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(matches!(
            TableSnapshot::from_bytes(&[0xff, 0x01]),
            Err(EngineError::Snapshot(_))
        ));
    }
}
