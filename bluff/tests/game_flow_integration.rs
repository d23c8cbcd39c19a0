//! Integration tests for game flow scenarios
//!
//! These tests verify admission, start, bidding and challenge resolution
//! through the public API, including that rejected moves change nothing.

use bluff::{
    DEFAULT_DICE_PER_PLAYER, Game, GameError, GameSettings, GameState,
    entities::{Bid, BidClass, Claim, Dice, Hand, Player, PlayerInfo},
};
use rand::{SeedableRng, rngs::StdRng};

fn alice() -> PlayerInfo {
    PlayerInfo::new(42, "Alice")
}

fn bob() -> PlayerInfo {
    PlayerInfo::new(43, "Bob")
}

fn carl() -> PlayerInfo {
    PlayerInfo::new(44, "Carl")
}

fn seated(id: i64, name: &str, dice: &[Dice]) -> Player {
    Player::with_hand(PlayerInfo::new(id, name), Hand::new(dice.to_vec()))
}

/// Everything a failed operation must leave alone.
fn snapshot(game: &Game) -> (GameState, usize, Option<Bid>, Vec<Player>) {
    (
        game.state(),
        game.turn_idx(),
        game.current_bid().copied(),
        game.players().to_vec(),
    )
}

#[test]
fn test_admission_and_start() {
    let mut game = Game::seeded(3);
    game.add_player(alice()).unwrap();
    assert_eq!(game.add_player(alice()), Err(GameError::DuplicatePlayer));
    assert_eq!(game.players().len(), 1);

    assert_eq!(game.start_game(), Err(GameError::NotEnoughPlayers));
    assert_eq!(game.state(), GameState::NotStarted);

    game.add_player(bob()).unwrap();
    game.start_game().unwrap();
    assert_eq!(game.state(), GameState::Started);
    assert_eq!(game.turn_idx(), 0);
    assert_eq!(game.current_claim().count, 0);
    for player in game.players() {
        assert_eq!(player.hand().len(), DEFAULT_DICE_PER_PLAYER);
    }
}

#[test]
fn test_bidding_flow_and_rejections() {
    let mut game = Game::seeded(4);
    game.add_player(alice()).unwrap();
    game.add_player(bob()).unwrap();
    game.add_player(carl()).unwrap();
    game.start_game().unwrap();

    game.bid(Bid::new(alice().id, Dice::Three, 3)).unwrap();
    assert_eq!(game.turn_idx(), 1);
    assert_eq!(game.current_claim(), Claim::new(Dice::Three, 3));

    game.bid(Bid::new(bob().id, Dice::Three, 4)).unwrap();
    assert_eq!(game.turn_idx(), 2);
    assert_eq!(game.current_claim(), Claim::new(Dice::Three, 4));

    let before = snapshot(&game);
    let rejected = [
        game.bid(Bid::new(alice().id, Dice::Five, 9)),
        game.bid(Bid::new(carl().id, Dice::Two, 0)),
        game.bid(Bid::new(carl().id, Dice::Three, 4)),
        game.bid(Bid::new(carl().id, Dice::Two, 4)),
        game.challenge_current_bid(bob().id).map(|_| ()),
    ];
    assert_eq!(
        rejected,
        [
            Err(GameError::WrongTurn {
                name: "Carl".to_string()
            }),
            Err(GameError::InvalidCount),
            Err(GameError::BidTooLow),
            Err(GameError::BidTooLow),
            Err(GameError::WrongTurn {
                name: "Carl".to_string()
            }),
        ]
    );
    assert_eq!(snapshot(&game), before);
}

#[test]
fn test_low_bid_eliminates_challenger() {
    let players = vec![
        seated(1, "A", &[Dice::Five]),
        seated(2, "B", &[Dice::Four, Dice::Four, Dice::Four]),
    ];
    let mut game = Game::resume(
        GameSettings::default(),
        players,
        0,
        Some(Bid::new(2, Dice::Four, 1)),
        StdRng::seed_from_u64(1),
    )
    .unwrap();

    let result = game.challenge_current_bid(1).unwrap();
    assert_eq!(result.result, BidClass::LowBid);
    assert_eq!(result.lost_dice_count, 2);
    assert_eq!(result.bidder, PlayerInfo::new(2, "B"));
    assert_eq!(result.challenger, PlayerInfo::new(1, "A"));
    assert_eq!(game.turn_idx(), 1);
    assert_eq!(game.state(), GameState::Finished);
    assert_eq!(game.winner().unwrap().name(), "B");
    assert!(!game.players()[0].has_dice());
}

#[test]
fn test_exact_wild_bid_costs_everyone_else_a_die() {
    let players = vec![
        seated(1, "A", &[Dice::Wild, Dice::Two, Dice::Three]),
        seated(2, "B", &[Dice::One, Dice::One, Dice::One]),
        seated(3, "C", &[Dice::Wild, Dice::Four, Dice::Five]),
    ];
    let mut game = Game::resume(
        GameSettings::default(),
        players,
        0,
        Some(Bid::new(3, Dice::Wild, 2)),
        StdRng::seed_from_u64(2),
    )
    .unwrap();

    let result = game.challenge_current_bid(1).unwrap();
    assert_eq!(result.result, BidClass::ExactBid);
    assert_eq!(result.lost_dice_count, 1);
    let sizes: Vec<usize> = game.players().iter().map(|p| p.hand().len()).collect();
    assert_eq!(sizes, vec![2, 2, 3]);
    assert_eq!(game.turn_idx(), 2);
    assert_eq!(game.state(), GameState::Started);
    assert!(game.current_bid().is_none());
}

#[test]
fn test_high_bid_keeps_turn_with_challenger() {
    let players = vec![
        seated(1, "A", &[Dice::Two, Dice::Two]),
        seated(2, "B", &[Dice::Three, Dice::Four]),
        seated(3, "C", &[Dice::One, Dice::Five]),
    ];
    let mut game = Game::resume(
        GameSettings::default(),
        players,
        2,
        Some(Bid::new(2, Dice::Two, 5)),
        StdRng::seed_from_u64(3),
    )
    .unwrap();

    let result = game.challenge_current_bid(3).unwrap();
    assert_eq!(result.result, BidClass::HighBid);
    // Charged 3 but only had 2 to give.
    assert_eq!(result.lost_dice_count, 3);
    assert!(!game.players()[1].has_dice());
    assert_eq!(game.turn_idx(), 2);
    assert_eq!(game.state(), GameState::Started);

    // B is skipped from now on.
    game.bid(Bid::new(3, Dice::One, 1)).unwrap();
    assert_eq!(game.turn_idx(), 0);
    game.bid(Bid::new(1, Dice::One, 2)).unwrap();
    assert_eq!(game.turn_idx(), 2);
}

#[test]
fn test_view_serializes_without_faces() {
    let mut game = Game::seeded(5);
    game.add_player(alice()).unwrap();
    game.add_player(bob()).unwrap();
    game.start_game().unwrap();
    game.bid(Bid::new(alice().id, Dice::Wild, 2)).unwrap();

    let json = serde_json::to_value(game.view()).unwrap();
    assert_eq!(json["state"], "Started");
    assert_eq!(json["turn_idx"], 1);
    assert_eq!(json["total_dice"], 10);
    assert_eq!(json["players"][0]["info"]["name"], "Alice");
    assert_eq!(json["players"][0]["dice_count"], 5);
    assert!(json["players"][0].get("hand").is_none());
    assert_eq!(json["current_bid"]["claim"]["dice"], "Wild");
    assert_eq!(json["current_bid"]["claim"]["count"], 2);
}
