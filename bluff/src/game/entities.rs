use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::constants::NUM_FACES;

/// A die face. The ordinal of each face is an input to the bid score, so
/// the discriminants are fixed.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum Dice {
    // Counts toward every claim, including a claim of wilds.
    Wild = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

/// The numbered faces, in ordinal order.
pub const NUMBERED_FACES: [Dice; 5] = [Dice::One, Dice::Two, Dice::Three, Dice::Four, Dice::Five];

impl Dice {
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Wild),
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Self::Wild)
    }

    /// Whether this die satisfies a claim for `face`. A wild die satisfies
    /// any claim exactly once.
    #[must_use]
    pub const fn matches(self, face: Dice) -> bool {
        self.is_wild() || self as u8 == face as u8
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Wild => "*️⃣",
            Self::One => "1️⃣",
            Self::Two => "2️⃣",
            Self::Three => "3️⃣",
            Self::Four => "4️⃣",
            Self::Five => "5️⃣",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown dice: {0}")]
pub struct ParseDiceError(pub String);

impl FromStr for Dice {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*" | "*️⃣" => Ok(Self::Wild),
            "1" | "1️⃣" => Ok(Self::One),
            "2" | "2️⃣" => Ok(Self::Two),
            "3" | "3️⃣" => Ok(Self::Three),
            "4" | "4️⃣" => Ok(Self::Four),
            "5" | "5️⃣" => Ok(Self::Five),
            other => Err(ParseDiceError(other.to_string())),
        }
    }
}

/// Every face, wild included, is equally likely.
impl Distribution<Dice> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Dice {
        match rng.random_range(0..NUM_FACES) {
            0 => Dice::Wild,
            1 => Dice::One,
            2 => Dice::Two,
            3 => Dice::Three,
            4 => Dice::Four,
            _ => Dice::Five,
        }
    }
}

/// Stable player identity for the lifetime of a session.
pub type PlayerId = i64;

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerInfo {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for PlayerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// A player's private dice. Order carries no meaning; only the count of
/// each face matters.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Hand(Vec<Dice>);

impl Hand {
    #[must_use]
    pub fn new(dice: Vec<Dice>) -> Self {
        Self(dice)
    }

    /// A fresh hand of `size` random dice.
    pub fn deal<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        (0..size).map(|_| rng.random::<Dice>()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn dice(&self) -> &[Dice] {
        &self.0
    }

    /// Number of dice satisfying a claim for `face`, wilds included.
    #[must_use]
    pub fn count(&self, face: Dice) -> usize {
        self.0.iter().filter(|die| die.matches(face)).count()
    }

    /// Draw a new face for every die. The hand size doesn't change.
    pub fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for die in &mut self.0 {
            *die = rng.random();
        }
    }

    /// Remove up to `n` dice. Losing more dice than the hand holds empties it.
    pub fn lose(&mut self, n: usize) {
        let keep = self.0.len().saturating_sub(n);
        self.0.truncate(keep);
    }
}

impl From<Vec<Dice>> for Hand {
    fn from(value: Vec<Dice>) -> Self {
        Self(value)
    }
}

impl FromIterator<Dice> for Hand {
    fn from_iter<T: IntoIterator<Item = Dice>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for die in &self.0 {
            write!(f, "{die}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub(crate) info: PlayerInfo,
    pub(crate) hand: Hand,
}

impl Player {
    /// A player who hasn't been dealt in yet.
    #[must_use]
    pub fn new(info: PlayerInfo) -> Self {
        Self {
            info,
            hand: Hand::default(),
        }
    }

    #[must_use]
    pub fn with_hand(info: PlayerInfo, hand: Hand) -> Self {
        Self { info, hand }
    }

    #[must_use]
    pub fn info(&self) -> &PlayerInfo {
        &self.info
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.info.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    #[must_use]
    pub fn has_dice(&self) -> bool {
        !self.hand.is_empty()
    }
}

/// How many dice of a face (wilds included) a bid says exist across every
/// hand. A count of zero means no claim.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Claim {
    pub dice: Dice,
    pub count: u32,
}

impl Claim {
    pub const NONE: Self = Self {
        dice: Dice::One,
        count: 0,
    };

    #[must_use]
    pub const fn new(dice: Dice, count: u32) -> Self {
        Self { dice, count }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.count == 0
    }
}

impl Default for Claim {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.dice)
    }
}

/// A claim made by a specific player.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Bid {
    pub player_id: PlayerId,
    pub claim: Claim,
}

impl Bid {
    #[must_use]
    pub const fn new(player_id: PlayerId, dice: Dice, count: u32) -> Self {
        Self {
            player_id,
            claim: Claim::new(dice, count),
        }
    }
}

/// How a challenged bid compared to the dice actually on the table.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BidClass {
    /// Fewer dice claimed than exist, the challenger loses.
    LowBid,
    /// Exactly right, everyone except the bidder loses one die.
    ExactBid,
    /// More dice claimed than exist, the bidder loses.
    HighBid,
}

impl fmt::Display for BidClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::LowBid => "low bid",
            Self::ExactBid => "exact bid",
            Self::HighBid => "high bid",
        };
        write!(f, "{repr}")
    }
}

/// Everything the presentation layer needs to narrate a challenge.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChallengeResult {
    pub result: BidClass,
    /// Dice each losing player was charged. This is the difference between
    /// the claim and the actual count, not capped at anyone's hand size.
    pub lost_dice_count: usize,
    pub challenged_bid: Bid,
    pub bidder: PlayerInfo,
    pub challenger: PlayerInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    // === Dice Tests ===

    #[test]
    fn test_dice_ordinals_are_stable() {
        assert_eq!(Dice::Wild.ordinal(), 0);
        assert_eq!(Dice::One.ordinal(), 1);
        assert_eq!(Dice::Five.ordinal(), 5);
        for ordinal in 0..NUM_FACES {
            let face = Dice::from_ordinal(ordinal).unwrap();
            assert_eq!(face.ordinal(), ordinal);
        }
        assert_eq!(Dice::from_ordinal(6), None);
    }

    #[test]
    fn test_wild_matches_everything() {
        for face in NUMBERED_FACES {
            assert!(Dice::Wild.matches(face));
            assert!(face.matches(face));
        }
        assert!(Dice::Wild.matches(Dice::Wild));
        assert!(!Dice::Two.matches(Dice::Three));
        assert!(!Dice::Two.matches(Dice::Wild));
    }

    #[test]
    fn test_dice_from_str() {
        assert_eq!("*".parse::<Dice>(), Ok(Dice::Wild));
        assert_eq!("3".parse::<Dice>(), Ok(Dice::Three));
        assert_eq!(Dice::Four.to_string().parse::<Dice>(), Ok(Dice::Four));
        assert_eq!("6".parse::<Dice>(), Err(ParseDiceError("6".to_string())));
    }

    #[test]
    fn test_random_dice_cover_all_faces() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; NUM_FACES as usize];
        for _ in 0..600 {
            let die: Dice = rng.random();
            seen[die.ordinal() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    // === Hand Tests ===

    #[test]
    fn test_count_includes_wilds_once() {
        let hand = Hand::new(vec![Dice::Wild, Dice::Two, Dice::Two, Dice::Five]);
        assert_eq!(hand.count(Dice::Two), 3);
        assert_eq!(hand.count(Dice::Five), 2);
        assert_eq!(hand.count(Dice::One), 1);
        assert_eq!(hand.count(Dice::Wild), 1);
    }

    #[test]
    fn test_lose_caps_at_hand_size() {
        let mut hand = Hand::new(vec![Dice::One, Dice::Two, Dice::Three]);
        hand.lose(1);
        assert_eq!(hand.len(), 2);
        hand.lose(5);
        assert!(hand.is_empty());
        hand.lose(1);
        assert!(hand.is_empty());
    }

    #[test]
    fn test_reroll_keeps_size() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut hand = Hand::deal(5, &mut rng);
        assert_eq!(hand.len(), 5);
        hand.reroll(&mut rng);
        assert_eq!(hand.len(), 5);

        let mut empty = Hand::default();
        empty.reroll(&mut rng);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_hand_display() {
        let hand = Hand::new(vec![Dice::Wild, Dice::One]);
        assert_eq!(hand.to_string(), "*️⃣1️⃣");
    }

    // === Player Tests ===

    #[test]
    fn test_new_player_has_no_dice() {
        let player = Player::new(PlayerInfo::new(42, "Alice"));
        assert_eq!(player.id(), 42);
        assert_eq!(player.name(), "Alice");
        assert!(!player.has_dice());
    }

    #[test]
    fn test_claim_none() {
        assert!(Claim::NONE.is_none());
        assert_eq!(Claim::default(), Claim::new(Dice::One, 0));
        assert!(!Claim::new(Dice::Wild, 1).is_none());
    }
}
