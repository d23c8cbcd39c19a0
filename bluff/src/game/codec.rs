//! Bid ordering.
//!
//! Every claim maps to a single integer score so that legality checks are a
//! plain comparison. Numbered faces of the same count sit next to each other,
//! and a slot for a wild claim is left after every second count, so a claim
//! of `k` wilds lands between `2k - 1` fives and `2k` ones.
//!
//! | claim | score |
//! |-------|-------|
//! | 1 one .. 1 five | 1 .. 5 |
//! | 1 wild | 6 |
//! | 2 ones .. 2 fives | 7 .. 11 |
//! | 3 ones .. 3 fives | 12 .. 16 |
//! | 2 wilds | 17 |

use super::entities::{Claim, Dice, NUMBERED_FACES};

pub type Score = u64;

const WILD_BASE: Score = 6;
const WILD_STEP: Score = 11;
const FACE_STEP: Score = 5;

const fn divmod(x: Score, y: Score) -> (Score, Score) {
    (x / y, x % y)
}

impl Claim {
    #[must_use]
    pub fn score(&self) -> Score {
        if self.count == 0 {
            return 0;
        }
        let count = Score::from(self.count);
        if self.dice.is_wild() {
            WILD_BASE + (count - 1) * WILD_STEP
        } else {
            // Leave space for the wilds.
            (count - 1) * FACE_STEP + Score::from(self.dice.ordinal()) + count / 2
        }
    }

    /// Inverse of [`Claim::score`]. A score of zero gives [`Claim::NONE`].
    #[must_use]
    pub fn from_score(score: Score) -> Self {
        if score == 0 {
            return Self::NONE;
        }
        let (stars, rem) = divmod(score.saturating_add(5), WILD_STEP);
        if rem == 0 {
            return Self::new(Dice::Wild, saturating_count(stars));
        }
        let (count, face) = divmod(score - stars - 1, FACE_STEP);
        Self::new(NUMBERED_FACES[face as usize], saturating_count(count + 1))
    }

    /// Strict: a claim never beats one with the same score.
    #[must_use]
    pub fn is_greater(&self, other: &Claim) -> bool {
        self.score() > other.score()
    }

    /// The lowest claim that beats this one.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::from_score(self.score() + 1)
    }

    /// Every claim above this one, lowest first.
    pub fn suggestions(&self) -> impl Iterator<Item = Claim> + use<> {
        std::iter::successors(Some(self.next()), |claim| Some(claim.next()))
    }
}

fn saturating_count(count: Score) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[must_use]
pub fn is_greater(lhs: &Claim, rhs: &Claim) -> bool {
    lhs.is_greater(rhs)
}
