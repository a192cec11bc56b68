//! Rule sets of the checkers pawn.
//!
//! Movement: one diagonal step (or two over an own piece) onto an empty
//! square. Capture: two diagonal steps over an opposing piece onto an empty
//! square. All four diagonal directions are allowed.

use crate::board::checkers_types::Player;
use crate::rules::square_selection_rule::SquareSelectionRule;
use crate::rules::square_selection_rule_set::SquareSelectionRuleSet;

pub const PAWN_STEP_DEPTH: u8 = 1;
pub const PAWN_JUMP_DEPTH: u8 = 2;

pub fn pawn_movement_rules(owner: &Player) -> SquareSelectionRuleSet {
    let mut rules = SquareSelectionRuleSet::new();
    rules.add_additive_rule(SquareSelectionRule::DiagonalExtents {
        depth: PAWN_STEP_DEPTH,
    });
    rules.add_additive_rule(
        SquareSelectionRule::DiagonalExtentsWithCurrentPlayersPieceBetween {
            depth: PAWN_JUMP_DEPTH,
            owner: owner.clone(),
        },
    );
    rules.add_masking_rule(SquareSelectionRule::EmptySquare);
    rules
}

pub fn pawn_capture_rules(owner: &Player) -> SquareSelectionRuleSet {
    let mut rules = SquareSelectionRuleSet::new();
    rules.add_additive_rule(
        SquareSelectionRule::DiagonalExtentsWithOtherThanCurrentPlayersPieceBetween {
            depth: PAWN_JUMP_DEPTH,
            owner: owner.clone(),
        },
    );
    rules.add_masking_rule(SquareSelectionRule::EmptySquare);
    rules
}
