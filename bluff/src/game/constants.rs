/// Number of dice every player is dealt when a game starts.
pub const DEFAULT_DICE_PER_PLAYER: usize = 5;

/// A game can't start with fewer players than this.
pub const MIN_PLAYERS: usize = 2;

/// Number of distinct die faces, wild included.
pub const NUM_FACES: u8 = 6;
