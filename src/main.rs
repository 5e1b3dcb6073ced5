use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cards_api::{
    action::{Action, ActionOutcome},
    config::GameConfig,
    session::Session,
    state::{Game, GameResult},
    types::{PromptCard, ResponseCard},
};

#[tokio::main]
async fn main() {
    // .env may carry ROUNDS_TOTAL, HAND_LIMIT and GAME_SEED for GameConfig::from_env
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env is fine
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cards_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GameConfig::from_env();
    let game = Game::with_config(&config, demo_prompts(), demo_responses());
    let session = Session::new(game);

    if let Err(e) = play(&session, &["alice", "bob", "carol"]).await {
        tracing::error!("Demo game aborted [{}]: {}", e.code(), e);
        std::process::exit(1);
    }

    tracing::info!("{}", *session.game.read().await);
}

/// Play every configured round, with each host picking the first answer
async fn play(session: &Session, names: &[&str]) -> GameResult<()> {
    let mut ids = Vec::new();
    for name in names {
        if let ActionOutcome::Joined { player_id } = session.apply(Action::join(*name)).await? {
            ids.push(player_id);
        }
    }

    loop {
        let host = match session.view(&ids[0]).await?.host {
            Some(host) => host,
            None => return Ok(()),
        };
        session.apply(Action::start_round(&host)).await?;

        for id in ids.iter().filter(|id| **id != host) {
            let view = session.view(id).await?;
            if let Some(card) = view.hand.first() {
                session.apply(Action::answer(id, card.id())).await?;
            }
        }

        let view = session.view(&host).await?;
        let Some(pick) = view.answers.first() else {
            tracing::warn!("Nobody could answer, stopping");
            return Ok(());
        };
        if let Some(rendered) = &pick.rendered {
            tracing::info!("Host picks: {}", rendered);
        }

        let outcome = session
            .apply(Action::announce_winner(&host, &pick.player_id))
            .await?;
        if let ActionOutcome::WinnerAnnounced { game_over: true, .. } = outcome {
            break;
        }
    }

    for player in session.snapshot().await.players() {
        tracing::info!("{}: {} points", player.name(), player.score());
    }

    let view = session.view(&ids[0]).await?;
    match serde_json::to_string(&view) {
        Ok(json) => tracing::debug!("Final view for {}: {}", ids[0], json),
        Err(e) => tracing::warn!("Failed to serialize view: {}", e),
    }
    Ok(())
}

fn demo_prompts() -> Vec<PromptCard> {
    [
        "black card <x>",
        "What's that smell? <x>.",
        "My therapist says <x> is a coping mechanism.",
        "Next on the news: <x> declared a national treasure.",
    ]
    .into_iter()
    .map(PromptCard::new)
    .collect()
}

fn demo_responses() -> Vec<ResponseCard> {
    [
        "Value",
        "A disappointing birthday party",
        "Forgetting the password again",
        "An unreasonable amount of cheese",
        "The heat death of the universe",
        "Dancing like nobody is watching",
        "A very small horse",
        "Grandma's secret recipe",
        "Tax season",
        "Yelling at clouds",
        "A suspiciously quiet toddler",
        "Soup",
    ]
    .into_iter()
    .map(|value| ResponseCard::new([("x", value)]))
    .collect()
}
