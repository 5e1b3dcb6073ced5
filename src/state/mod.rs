mod deck;
mod player;
mod round;

use crate::config::GameConfig;
use crate::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

/// Result type for game actions
pub type GameResult<T> = Result<T, GameError>;

/// Reasons an action is rejected. The game is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("can't {action} @ {stage}")]
    BadStage { action: &'static str, stage: Stage },

    #[error("player \"{0}\" is not participating the game")]
    PlayerNotFound(PlayerId),

    #[error("unknown player \"{0}\"")]
    UnknownPlayer(PlayerId),

    #[error("user with name \"{0}\" already exists")]
    DuplicateName(String),

    #[error("player name can't be empty")]
    EmptyName,

    #[error("player \"{0}\" is not the host")]
    NotHost(PlayerId),

    #[error("host is not allowed to answer")]
    HostCannotAnswer,

    #[error("host can't be a winner")]
    HostCannotWin,

    #[error("player \"{player_id}\" doesn't have card \"{card_id}\"")]
    CardNotHeld { player_id: PlayerId, card_id: CardId },

    #[error("out of prompt cards")]
    DeckExhausted,

    #[error("game has no players")]
    NoPlayers,

    #[error("game host is unsynced with players list")]
    HostDesync,
}

impl GameError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            GameError::BadStage { .. } => "BAD_STAGE",
            GameError::PlayerNotFound(_) => "PLAYER_NOT_FOUND",
            GameError::UnknownPlayer(_) => "UNKNOWN_PLAYER",
            GameError::DuplicateName(_) => "DUPLICATE_NAME",
            GameError::EmptyName => "EMPTY_NAME",
            GameError::NotHost(_) => "NOT_HOST",
            GameError::HostCannotAnswer => "HOST_CANNOT_ANSWER",
            GameError::HostCannotWin => "HOST_CANNOT_WIN",
            GameError::CardNotHeld { .. } => "CARD_NOT_HELD",
            GameError::DeckExhausted => "DECK_EXHAUSTED",
            GameError::NoPlayers => "NO_PLAYERS",
            GameError::HostDesync => "HOST_DESYNC",
        }
    }
}

/// State of a single game session.
///
/// All mutation goes through the action methods (`join`, `start_round`,
/// `answer`, `announce_winner`). Each one validates every precondition before
/// touching anything, so a rejected action leaves the game as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub(crate) id: GameId,
    pub(crate) stage: Stage,
    pub(crate) rounds_total: u32,
    pub(crate) rounds_played: u32,
    pub(crate) hand_limit: usize,
    pub(crate) current_prompt: Option<PromptCard>,
    pub(crate) answers: HashMap<PlayerId, ResponseCard>,
    pub(crate) host: Option<PlayerId>,
    pub(crate) players: Vec<Player>,
    pub(crate) prompt_deck: Vec<PromptCard>,
    pub(crate) response_deck: Vec<ResponseCard>,
    pub(crate) rng: StdRng,
}

impl Game {
    /// Create a game with the default hand limit and OS-seeded draws
    pub fn new(
        rounds_total: u32,
        prompt_deck: Vec<PromptCard>,
        response_deck: Vec<ResponseCard>,
    ) -> Self {
        let config = GameConfig {
            rounds_total,
            ..GameConfig::default()
        };
        Self::with_config(&config, prompt_deck, response_deck)
    }

    /// Create a game from config, seeding draws from `config.seed` if set
    pub fn with_config(
        config: &GameConfig,
        prompt_deck: Vec<PromptCard>,
        response_deck: Vec<ResponseCard>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, prompt_deck, response_deck, rng)
    }

    /// Create a game drawing cards with the given random source
    pub fn with_rng(
        config: &GameConfig,
        prompt_deck: Vec<PromptCard>,
        response_deck: Vec<ResponseCard>,
        rng: StdRng,
    ) -> Self {
        let game = Self {
            id: ulid::Ulid::new().to_string(),
            stage: Stage::New,
            rounds_total: config.rounds_total,
            rounds_played: 0,
            hand_limit: config.hand_limit,
            current_prompt: None,
            answers: HashMap::new(),
            host: None,
            players: Vec::new(),
            prompt_deck,
            response_deck,
            rng,
        };

        tracing::debug!(
            "Created game {} ({} rounds, {} prompt cards, {} response cards)",
            game.id,
            game.rounds_total,
            game.prompt_deck.len(),
            game.response_deck.len()
        );
        game
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn rounds_total(&self) -> u32 {
        self.rounds_total
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn hand_limit(&self) -> usize {
        self.hand_limit
    }

    pub fn current_prompt(&self) -> Option<&PromptCard> {
        self.current_prompt.as_ref()
    }

    /// Answers submitted this round, keyed by player ID
    pub fn answers(&self) -> &HashMap<PlayerId, ResponseCard> {
        &self.answers
    }

    /// ID of the established host (None until the first round starts)
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Players in join order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Undrawn prompt cards
    pub fn prompt_deck(&self) -> &[PromptCard] {
        &self.prompt_deck
    }

    /// Undrawn response cards
    pub fn response_deck(&self) -> &[ResponseCard] {
        &self.response_deck
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<game @ {}, round {}/{}, {} players>",
            self.stage,
            self.rounds_played + 1,
            self.rounds_total,
            self.players.len()
        )
    }
}
