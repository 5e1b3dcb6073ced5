use cards_api::action::{Action, ActionOutcome};
use cards_api::config::GameConfig;
use cards_api::session::Session;
use cards_api::state::{Game, GameError};
use cards_api::types::{PromptCard, ResponseCard, Stage, HAND_LIMIT};
use cards_api::view::PlayerView;
use std::collections::HashSet;

fn prompts(n: usize) -> Vec<PromptCard> {
    (0..n)
        .map(|i| PromptCard::new(format!("Prompt {}: <x>", i)))
        .collect()
}

fn responses(n: usize) -> Vec<ResponseCard> {
    (0..n)
        .map(|i| ResponseCard::new([("x", format!("answer {}", i))]))
        .collect()
}

fn joined(outcome: ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Joined { player_id } => player_id,
        other => panic!("Expected Joined outcome, got {:?}", other),
    }
}

/// End-to-end flow of a two-round game through the session handle
#[tokio::test]
async fn test_full_game_flow() {
    let config = GameConfig {
        rounds_total: 2,
        seed: Some(2024),
        ..GameConfig::default()
    };
    let deck = responses(12);
    let deck_ids: HashSet<String> = deck.iter().map(|c| c.id().to_string()).collect();
    let session = Session::new(Game::with_config(&config, prompts(3), deck));

    // 1. Players join
    let alice = joined(session.apply(Action::join("alice")).await.unwrap());
    let bob = joined(session.apply(Action::join("bob")).await.unwrap());
    let carol = joined(session.apply(Action::join("carol")).await.unwrap());

    let result = session.apply(Action::join("  BOB ")).await;
    assert_eq!(result, Err(GameError::DuplicateName("BOB".to_string())));

    // 2. Only the first joiner may start the first round
    let result = session.apply(Action::start_round(&bob)).await;
    assert_eq!(result, Err(GameError::NotHost(bob.clone())));

    let outcome = session.apply(Action::start_round(&alice)).await.unwrap();
    assert!(matches!(
        outcome,
        ActionOutcome::RoundStarted { round_no: 1, .. }
    ));

    let game = session.snapshot().await;
    assert_eq!(game.stage(), Stage::AwaitingResponses);
    assert_eq!(game.host(), Some(alice.as_str()));

    // Dealt cards plus the remaining deck are exactly the original deck
    let mut seen: Vec<String> = game
        .players()
        .iter()
        .flat_map(|p| p.hand().iter().map(|c| c.id().to_string()))
        .chain(game.response_deck().iter().map(|c| c.id().to_string()))
        .collect();
    assert_eq!(seen.len(), deck_ids.len());
    seen.sort();
    seen.dedup();
    assert_eq!(seen.into_iter().collect::<HashSet<_>>(), deck_ids);

    // 3. Answers come in; bob changes his mind
    let bob_hand = session.view(&bob).await.unwrap().hand;
    assert_eq!(bob_hand.len(), HAND_LIMIT);
    let carol_hand = session.view(&carol).await.unwrap().hand;

    let outcome = session
        .apply(Action::answer(&bob, bob_hand[0].id()))
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Answered { all_answered: false });
    session
        .apply(Action::answer(&bob, bob_hand[2].id()))
        .await
        .unwrap();

    let result = session.apply(Action::answer(&alice, bob_hand[0].id())).await;
    assert_eq!(result, Err(GameError::HostCannotAnswer));

    let outcome = session
        .apply(Action::answer(&carol, carol_hand[1].id()))
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Answered { all_answered: true });

    // 4. Host sees both answers, picks bob
    let view = session.view(&alice).await.unwrap();
    assert_eq!(view.stage, Stage::AwaitingWinner);
    let revealed: Vec<_> = view.answers.iter().map(|a| a.card.id()).collect();
    assert_eq!(revealed, vec![bob_hand[2].id(), carol_hand[1].id()]);

    let result = session.apply(Action::announce_winner(&alice, &alice)).await;
    assert_eq!(result, Err(GameError::HostCannotWin));

    let outcome = session
        .apply(Action::announce_winner(&alice, &bob))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::WinnerAnnounced {
            winner_id: bob.clone(),
            game_over: false,
        }
    );

    // 5. Bob hosts round two
    let view = session.view(&carol).await.unwrap();
    assert_eq!(view.host.as_deref(), Some(bob.as_str()));
    assert_eq!(view.rounds_played, 1);
    assert!(view.answers.is_empty());
    assert!(view.players.iter().all(|p| !p.has_answered));
    assert!(view.players.iter().any(|p| p.id == bob && p.is_host));

    session.apply(Action::start_round(&bob)).await.unwrap();
    let alice_hand = session.view(&alice).await.unwrap().hand;
    assert_eq!(alice_hand.len(), HAND_LIMIT);

    session
        .apply(Action::answer(&alice, alice_hand[0].id()))
        .await
        .unwrap();
    session
        .apply(Action::answer(&carol, carol_hand[0].id()))
        .await
        .unwrap();

    let outcome = session
        .apply(Action::announce_winner(&bob, &carol))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::WinnerAnnounced {
            winner_id: carol.clone(),
            game_over: true,
        }
    );

    // 6. Final standings
    let game = session.snapshot().await;
    assert_eq!(game.stage(), Stage::Final);
    assert_eq!(game.rounds_played(), 2);
    let scores: Vec<_> = game.players().iter().map(|p| p.score()).collect();
    assert_eq!(scores, vec![0, 1, 1]);
}

/// A rejected action never changes the game, whatever the stage
#[test]
fn test_rejections_never_mutate() {
    let config = GameConfig {
        rounds_total: 1,
        seed: Some(11),
        ..GameConfig::default()
    };
    let mut game = Game::with_config(&config, prompts(1), responses(6));
    let alice = game.join("alice").unwrap();
    let bob = game.join("bob").unwrap();

    let bad_actions = |alice: &str, bob: &str| {
        vec![
            Action::join("Alice"),
            Action::join(""),
            Action::start_round(bob),
            Action::start_round("ghost"),
            Action::answer(alice, "no-such-card"),
            Action::answer(bob, "no-such-card"),
            Action::answer("ghost", "no-such-card"),
            Action::announce_winner(alice, alice),
            Action::announce_winner(bob, alice),
            Action::announce_winner(alice, "ghost"),
        ]
    };

    let step = |game: &mut Game| {
        for action in bad_actions(alice.as_str(), bob.as_str()) {
            let before = game.clone();
            if action.apply(game).is_err() {
                assert_eq!(*game, before, "{:?} mutated the game", action);
            }
        }
    };

    // NEW
    step(&mut game);
    assert_eq!(game.stage(), Stage::New);

    // AWAITING_RESPONSES
    game.start_round(&alice).unwrap();
    step(&mut game);
    assert_eq!(game.stage(), Stage::AwaitingResponses);

    // AWAITING_WINNER
    let card = game.find_player(&bob).unwrap().hand()[0].id().to_string();
    game.answer(&bob, &card).unwrap();
    step(&mut game);
    assert_eq!(game.stage(), Stage::AwaitingWinner);

    // FINAL (prompt deck is empty now, so starting again fails too)
    game.announce_winner(&alice, &bob).unwrap();
    let before = game.clone();
    assert_eq!(game.start_round(&alice), Err(GameError::DeckExhausted));
    assert_eq!(game, before);
    step(&mut game);
    assert_eq!(game.stage(), Stage::Final);
}

#[test]
fn test_view_requires_membership() {
    let mut game = Game::new(1, prompts(1), responses(3));
    let alice = game.join("alice").unwrap();

    assert!(PlayerView::new(&game, &alice).is_ok());
    assert_eq!(
        PlayerView::new(&game, "stranger"),
        Err(GameError::UnknownPlayer("stranger".to_string()))
    );
}
