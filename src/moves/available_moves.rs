//! Insertion-ordered map of target square to candidate move.
//!
//! Order matters: the automated player picks by index, and a square that is
//! set twice keeps its first position with the newer move.

use crate::board::checkers_types::{Coordinate, VisualHandle};
use crate::moves::checkers_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableMove {
    pub mv: Move,
    /// Marker the presentation layer showed for this candidate, if any.
    pub instance: Option<VisualHandle>,
}

impl AvailableMove {
    #[inline]
    pub fn new(mv: Move) -> Self {
        Self { mv, instance: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableMoves {
    entries: Vec<(Coordinate, AvailableMove)>,
}

impl AvailableMoves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the move keyed by `key`.
    pub fn set(&mut self, key: Coordinate, mv: Move) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, entry)) => *entry = AvailableMove::new(mv),
            None => self.entries.push((key, AvailableMove::new(mv))),
        }
    }

    pub fn get(&self, key: Coordinate) -> Option<&AvailableMove> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, entry)| entry)
    }

    pub fn get_mut(&mut self, key: Coordinate) -> Option<&mut AvailableMove> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, entry)| entry)
    }

    #[inline]
    pub fn contains(&self, key: Coordinate) -> bool {
        self.get(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &AvailableMove)> + '_ {
        self.entries.iter().map(|(k, entry)| (*k, entry))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coordinate, &mut AvailableMove)> + '_ {
        self.entries.iter_mut().map(|(k, entry)| (*k, entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Entry at `index` in insertion order.
    pub fn nth(&self, index: usize) -> Option<(Coordinate, &AvailableMove)> {
        self.entries.get(index).map(|(k, entry)| (*k, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::AvailableMoves;
    use crate::board::checkers_types::Coordinate;
    use crate::moves::checkers_move::Move;

    #[test]
    fn set_replaces_in_place_and_keeps_order() {
        let a = Coordinate::new(1, 1);
        let b = Coordinate::new(0, 0);
        let mut moves = AvailableMoves::new();
        moves.set(a, Move::Movement { destination: a });
        moves.set(b, Move::Cancel { origin_square: b });
        moves.set(a, Move::Cancel { origin_square: a });

        assert_eq!(moves.len(), 2);
        assert_eq!(moves.keys().collect::<Vec<_>>(), vec![a, b]);
        assert!(moves.get(a).expect("a is set").mv.is_cancel());
        assert_eq!(moves.nth(1).map(|(k, _)| k), Some(b));
        assert!(moves.nth(2).is_none());
    }

    #[test]
    fn instance_handles_can_be_attached() {
        let a = Coordinate::new(2, 2);
        let mut moves = AvailableMoves::new();
        moves.set(a, Move::Movement { destination: a });
        moves.get_mut(a).expect("a is set").instance = Some(42);
        assert_eq!(moves.get(a).and_then(|m| m.instance), Some(42));
        assert!(!moves.contains(Coordinate::new(3, 3)));
    }
}
