use pairmatch_core::*;
use std::collections::BTreeMap;
use std::time::Duration;

fn driver(config: GameConfig, seed: u64) -> ManualDriver {
    ManualDriver::new(Session::new(config, ImagePool::default(), seed).unwrap())
}

/// Positions of both cards of every pair, ordered by image.
fn pairs(session: &Session) -> Vec<(Coord2, Coord2)> {
    let mut by_image: BTreeMap<ImageId, Vec<Coord2>> = BTreeMap::new();
    for (coords, card) in session.board().iter_with_coords() {
        by_image.entry(card.image).or_default().push(coords);
    }
    by_image
        .into_values()
        .map(|coords| (coords[0], coords[1]))
        .collect()
}

fn millis(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn ten_moves_in_forty_five_seconds() {
    let mut driver = driver(GameConfig::with_dimension(2), 3);
    let pairs = pairs(driver.session());
    let (a1, a2) = pairs[0];
    let (b1, b2) = pairs[1];

    for _ in 0..3 {
        driver.flip(a1).unwrap();
        assert_eq!(driver.flip(b1).unwrap(), FlipOutcome::Mismatched);
        assert_eq!(driver.advance(millis(10_000)), [TaskOutcome::FlippedBack(2)]);
    }

    driver.flip(a1).unwrap();
    assert_eq!(driver.flip(a2).unwrap(), FlipOutcome::Matched);
    driver.advance(millis(14_500));

    driver.flip(b1).unwrap();
    assert_eq!(driver.flip(b2).unwrap(), FlipOutcome::Completed);
    assert_eq!(driver.session().state(), SessionState::Running);

    let outcomes = driver.advance(millis(1_000));
    let score = Score::new(10, 45);
    assert_eq!(outcomes, [TaskOutcome::Won(score)]);
    assert_eq!(driver.session().summary(), Some(score));
    assert!(score.win_text().contains("10 moves"));
    assert!(score.win_text().contains("45 seconds"));

    // ticker stopped with the win
    assert!(!driver.is_ticking());
    driver.advance(millis(10_000));
    assert_eq!(driver.session().elapsed_secs(), 45);
}

#[test]
fn perfect_game_on_four_by_four() {
    let mut driver = driver(GameConfig::default(), 99);
    let pairs = pairs(driver.session());
    assert_eq!(pairs.len(), 8);
    assert_eq!(driver.session().board().total_cards(), 16);

    let (last, rest) = pairs.split_last().unwrap();
    for &(first, second) in rest {
        driver.flip(first).unwrap();
        assert_eq!(driver.flip(second).unwrap(), FlipOutcome::Matched);
        assert_eq!(driver.session().flipped_count(), 0);
        driver.advance(millis(2_000));
    }
    driver.flip(last.0).unwrap();
    assert_eq!(driver.flip(last.1).unwrap(), FlipOutcome::Completed);

    // nothing left to flip while the win is pending
    assert_eq!(driver.flip(last.0).unwrap(), FlipOutcome::NoChange);

    let outcomes = driver.advance(millis(1_000));
    assert_eq!(outcomes, [TaskOutcome::Won(Score::new(16, 15))]);
    assert_eq!(driver.session().board().matched_count(), 16);
}

#[test]
fn mismatch_and_win_delays_are_independent() {
    let config = GameConfig {
        dimension: 2,
        mismatch_delay: millis(250),
        win_delay: millis(3_000),
        ..Default::default()
    };
    let mut driver = driver(config, 8);
    let pairs = pairs(driver.session());
    let (a1, a2) = pairs[0];
    let (b1, b2) = pairs[1];

    driver.flip(a1).unwrap();
    driver.flip(b1).unwrap();
    assert!(driver.advance(millis(200)).is_empty());
    assert_eq!(driver.advance(millis(100)), [TaskOutcome::FlippedBack(2)]);

    for (first, second) in [(a1, a2), (b1, b2)] {
        driver.flip(first).unwrap();
        driver.flip(second).unwrap();
    }
    assert!(driver.advance(millis(2_900)).is_empty());
    assert_eq!(driver.session().state(), SessionState::Running);
    assert!(matches!(
        driver.advance(millis(200)).as_slice(),
        [TaskOutcome::Won(_)]
    ));
    assert_eq!(driver.session().state(), SessionState::Won);
}

#[test]
fn reset_mid_mismatch_protects_new_board() {
    let mut driver = driver(GameConfig::with_dimension(4), 21);
    let old_pairs = pairs(driver.session());
    driver.flip(old_pairs[0].0).unwrap();
    driver.flip(old_pairs[1].0).unwrap();
    driver.advance(millis(500));

    driver.reset().unwrap();
    assert_eq!(driver.session().state(), SessionState::Idle);
    assert_eq!(driver.session().score(), Score::default());

    // two new cards up before the old flip back comes due
    let new_pairs = pairs(driver.session());
    driver.flip(new_pairs[0].0).unwrap();
    assert_eq!(driver.advance(millis(600)), [TaskOutcome::Stale]);

    let board = driver.session().board();
    assert!(board[new_pairs[0].0].is_flipped());
    assert_eq!(driver.session().flipped_count(), 1);
    assert_eq!(driver.session().total_moves(), 1);
}

#[test]
fn start_after_win_deals_a_new_game() {
    let mut driver = driver(GameConfig::with_dimension(2), 1);
    for (first, second) in pairs(driver.session()) {
        driver.flip(first).unwrap();
        driver.flip(second).unwrap();
    }
    driver.advance(millis(1_500));
    assert_eq!(driver.session().state(), SessionState::Won);
    assert!(driver.session().can_start());

    assert_eq!(driver.start().unwrap(), StartOutcome::Started);
    assert_eq!(driver.session().state(), SessionState::Running);
    assert_eq!(driver.session().score(), Score::default());
    assert!(driver.session().board().cards().all(Card::is_hidden));
    assert_eq!(driver.start().unwrap(), StartOutcome::Ignored);

    driver.advance(millis(2_000));
    assert_eq!(driver.session().elapsed_secs(), 2);
}

#[test]
fn every_reset_reshuffles() {
    let mut driver = driver(GameConfig::default(), 4);
    let mut deals = vec![driver.session().board().clone()];
    for _ in 0..5 {
        driver.reset().unwrap();
        let board = driver.session().board().clone();
        assert!(!deals.contains(&board));
        deals.push(board);
    }
}

#[test]
fn reset_during_win_delay_cancels_the_win() {
    let mut driver = driver(GameConfig::with_dimension(2), 8);
    for (first, second) in pairs(driver.session()) {
        driver.flip(first).unwrap();
        driver.flip(second).unwrap();
    }
    driver.advance(millis(500));

    driver.reset().unwrap();
    let (card, _) = pairs(driver.session())[0];
    assert_eq!(driver.flip(card).unwrap(), FlipOutcome::Flipped);

    assert_eq!(driver.advance(millis(600)), [TaskOutcome::Stale]);
    assert_eq!(driver.session().state(), SessionState::Running);
    assert_eq!(driver.session().total_moves(), 1);
    assert_eq!(driver.session().summary(), None);
}

#[test]
fn reset_after_win_stops_everything() {
    let mut driver = driver(GameConfig::with_dimension(2), 9);
    for (first, second) in pairs(driver.session()) {
        driver.flip(first).unwrap();
        driver.flip(second).unwrap();
    }
    driver.advance(millis(1_000));
    assert_eq!(driver.session().state(), SessionState::Won);

    driver.reset().unwrap();
    assert_eq!(driver.session().state(), SessionState::Idle);
    assert_eq!(driver.session().score(), Score::default());
    assert!(!driver.is_ticking());

    driver.advance(millis(3_000));
    assert_eq!(driver.session().elapsed_secs(), 0);
}
