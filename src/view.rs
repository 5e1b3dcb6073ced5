//! Player-scoped read-only snapshot of a game.
//!
//! A view only ever carries the requesting player's own hand. Other players'
//! hands and the remaining decks stay private to the game.

use crate::state::{Game, GameError, GameResult};
use crate::types::*;
use serde::Serialize;

/// Public roster entry (no hand)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub is_host: bool,
    pub has_answered: bool,
}

/// An answer revealed to the table once every answer is in
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RevealedAnswer {
    pub player_id: PlayerId,
    pub card: ResponseCard,
    /// The prompt filled in with this card's values
    pub rendered: Option<String>,
}

/// A player's view of the game
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerView {
    pub id: GameId,
    pub host: Option<PlayerId>,
    pub stage: Stage,
    pub rounds_played: u32,
    pub rounds_total: u32,
    pub prompt: Option<PromptCard>,
    pub hand: Vec<ResponseCard>,
    pub players: Vec<PlayerSummary>,
    /// Filled only while waiting for the host to pick a winner
    pub answers: Vec<RevealedAnswer>,
}

impl PlayerView {
    /// Create a view of the game for a particular player
    pub fn new(game: &Game, player_id: &str) -> GameResult<Self> {
        let me = game
            .find_player(player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))?;

        let host = game.current_host().map(|h| h.id().to_string());

        let players = game
            .players()
            .iter()
            .map(|p| PlayerSummary {
                id: p.id().to_string(),
                name: p.name().to_string(),
                score: p.score(),
                is_host: host.as_deref() == Some(p.id()),
                has_answered: game.answers().contains_key(p.id()),
            })
            .collect();

        // Answers are revealed in join order so their position gives nothing away
        let answers = if game.stage() == Stage::AwaitingWinner {
            game.players()
                .iter()
                .filter_map(|p| {
                    game.answers().get(p.id()).map(|card| RevealedAnswer {
                        player_id: p.id().to_string(),
                        card: card.clone(),
                        rendered: game.current_prompt().map(|prompt| prompt.fill(card)),
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            id: game.id().to_string(),
            host,
            stage: game.stage(),
            rounds_played: game.rounds_played(),
            rounds_total: game.rounds_total(),
            prompt: game.current_prompt().cloned(),
            hand: me.hand().to_vec(),
            players,
            answers,
        })
    }
}
