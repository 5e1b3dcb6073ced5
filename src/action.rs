//! Actions are the only way to change a [`Game`].
//!
//! Each action either applies completely or is rejected with a [`GameError`]
//! and leaves the game exactly as it was.

use crate::state::{Game, GameError, GameResult};
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum Action {
    Join {
        name: String,
    },
    StartRound {
        caller_id: PlayerId,
    },
    Answer {
        caller_id: PlayerId,
        card_id: CardId,
    },
    AnnounceWinner {
        caller_id: PlayerId,
        winner_id: PlayerId,
    },
}

/// What a successful action did
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ActionOutcome {
    Joined {
        player_id: PlayerId,
    },
    RoundStarted {
        round_no: u32,
        prompt_id: CardId,
    },
    Answered {
        all_answered: bool,
    },
    WinnerAnnounced {
        winner_id: PlayerId,
        game_over: bool,
    },
}

impl Action {
    pub fn join(name: impl Into<String>) -> Self {
        Action::Join { name: name.into() }
    }

    pub fn start_round(caller_id: impl Into<String>) -> Self {
        Action::StartRound {
            caller_id: caller_id.into(),
        }
    }

    pub fn answer(caller_id: impl Into<String>, card_id: impl Into<String>) -> Self {
        Action::Answer {
            caller_id: caller_id.into(),
            card_id: card_id.into(),
        }
    }

    pub fn announce_winner(caller_id: impl Into<String>, winner_id: impl Into<String>) -> Self {
        Action::AnnounceWinner {
            caller_id: caller_id.into(),
            winner_id: winner_id.into(),
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::Join { .. } => "join",
            Action::StartRound { .. } => "start_round",
            Action::Answer { .. } => "answer",
            Action::AnnounceWinner { .. } => "announce_winner",
        }
    }

    /// Apply this action to the game
    pub fn apply(&self, game: &mut Game) -> GameResult<ActionOutcome> {
        let result = match self {
            Action::Join { name } => game
                .join(name)
                .map(|player_id| ActionOutcome::Joined { player_id }),
            Action::StartRound { caller_id } => {
                game.start_round(caller_id).map(|()| ActionOutcome::RoundStarted {
                    round_no: game.rounds_played() + 1,
                    prompt_id: game
                        .current_prompt()
                        .map(|p| p.id().to_string())
                        .unwrap_or_default(),
                })
            }
            Action::Answer { caller_id, card_id } => game
                .answer(caller_id, card_id)
                .map(|all_answered| ActionOutcome::Answered { all_answered }),
            Action::AnnounceWinner {
                caller_id,
                winner_id,
            } => game
                .announce_winner(caller_id, winner_id)
                .map(|game_over| ActionOutcome::WinnerAnnounced {
                    winner_id: winner_id.clone(),
                    game_over,
                }),
        };

        if let Err(e) = &result {
            log_rejection(self, e);
        }
        result
    }
}

fn log_rejection(action: &Action, error: &GameError) {
    tracing::warn!(
        "Rejected {} action [{}]: {}",
        action.name(),
        error.code(),
        error
    );
}
