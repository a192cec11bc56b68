//! Composition of selection rules for one move kind.
//!
//! A target is selected iff at least one additive rule accepts it and every
//! masking rule accepts it. Rules are evaluated in insertion order.

use crate::board::board::Board;
use crate::board::checkers_types::Coordinate;
use crate::rules::square_selection_rule::{SelectionRule, SquareSelectionRule};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SquareSelectionRuleSet {
    additive_rules: Vec<SquareSelectionRule>,
    masking_rules: Vec<SquareSelectionRule>,
}

impl SquareSelectionRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_additive_rule(&mut self, rule: SquareSelectionRule) {
        self.additive_rules.push(rule);
    }

    pub fn add_masking_rule(&mut self, rule: SquareSelectionRule) {
        self.masking_rules.push(rule);
    }

    pub fn additive_rules(&self) -> &[SquareSelectionRule] {
        &self.additive_rules
    }

    pub fn masking_rules(&self) -> &[SquareSelectionRule] {
        &self.masking_rules
    }

    pub fn select(&self, board: &Board, target: Coordinate, origin: Coordinate) -> bool {
        let eligible = self
            .additive_rules
            .iter()
            .any(|rule| rule.evaluate(board, origin, target));

        eligible
            && self
                .masking_rules
                .iter()
                .all(|rule| rule.evaluate(board, origin, target))
    }
}

#[cfg(test)]
mod tests {
    use super::SquareSelectionRuleSet;
    use crate::board::board::Board;
    use crate::board::checkers_types::{Coordinate, PieceKind, Player, PlayerSide};
    use crate::rules::square_selection_rule::SquareSelectionRule;

    #[test]
    fn empty_rule_set_selects_nothing() {
        let board = Board::new(4, 4);
        let set = SquareSelectionRuleSet::new();
        assert!(!set.select(&board, Coordinate::new(1, 1), Coordinate::new(0, 0)));
    }

    #[test]
    fn additive_rules_union_and_masks_intersect() {
        let mut board = Board::new(8, 8);
        board
            .add_piece(
                Player::new("black", PlayerSide::Black),
                PieceKind::Pawn,
                Coordinate::new(4, 4),
            )
            .expect("free square");
        let origin = Coordinate::new(3, 3);

        let mut set = SquareSelectionRuleSet::new();
        set.add_additive_rule(SquareSelectionRule::DiagonalExtents { depth: 1 });
        assert!(set.select(&board, Coordinate::new(4, 4), origin));
        assert!(!set.select(&board, Coordinate::new(5, 5), origin));

        set.add_additive_rule(SquareSelectionRule::DiagonalExtentsWithPieceBetween { depth: 2 });
        assert!(set.select(&board, Coordinate::new(5, 5), origin));

        set.add_masking_rule(SquareSelectionRule::EmptySquare);
        assert!(!set.select(&board, Coordinate::new(4, 4), origin));
        assert!(set.select(&board, Coordinate::new(5, 5), origin));
        assert!(set.select(&board, Coordinate::new(2, 2), origin));

        assert_eq!(set.additive_rules().len(), 2);
        assert_eq!(set.masking_rules(), &[SquareSelectionRule::EmptySquare]);
    }
}
