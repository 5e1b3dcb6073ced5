use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque ID types for type safety
pub type GameId = String;
pub type PlayerId = String;
pub type CardId = String;

/// Maximum count of response cards a player may hold
pub const HAND_LIMIT: usize = 3;

/// The game's blocking state, waiting for some action to be performed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Game created, no round started yet
    New,
    /// Round started, waiting for every non-host player to answer
    AwaitingResponses,
    /// All answers received, waiting for the host to pick the winner
    AwaitingWinner,
    /// Desired count of rounds has been played
    Final,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::New => "new-game",
            Stage::AwaitingResponses => "awaiting-responses",
            Stage::AwaitingWinner => "awaiting-winner",
            Stage::Final => "final",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phrase with `<form>` placeholders, filled by a [`ResponseCard`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptCard {
    id: CardId,
    text: String,
}

impl PromptCard {
    /// Create a prompt card with a fresh unique ID
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholder names in template order (`"a <x> and <y>"` gives `["x", "y"]`)
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.text.as_str();
        while let Some(start) = rest.find('<') {
            let after = &rest[start + 1..];
            match after.find('>') {
                Some(end) => {
                    let name = &after[..end];
                    if !name.is_empty() && !name.contains('<') {
                        names.push(name);
                    }
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        names
    }

    /// Render the template with the values of a response card.
    /// Placeholders the card has no value for are left untouched.
    pub fn fill(&self, card: &ResponseCard) -> String {
        let mut rendered = self.text.clone();
        for name in self.placeholders() {
            if let Some(value) = card.value(name) {
                rendered = rendered.replace(&format!("<{}>", name), value);
            }
        }
        rendered
    }
}

/// A set of `form -> value` pairs filling the placeholders of a [`PromptCard`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseCard {
    id: CardId,
    fill_ins: BTreeMap<String, String>,
}

impl ResponseCard {
    /// Create a response card with a fresh unique ID
    pub fn new<K, V>(fill_ins: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: ulid::Ulid::new().to_string(),
            fill_ins: fill_ins
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fill_ins(&self) -> &BTreeMap<String, String> {
        &self.fill_ins
    }

    /// Fill-in value for a placeholder name
    pub fn value(&self, form: &str) -> Option<&str> {
        self.fill_ins.get(form).map(String::as_str)
    }
}

/// A game participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) score: u32,
    pub(crate) hand: Vec<ResponseCard>,
}

impl Player {
    /// Create a player with the given name and a fresh unique ID
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            name: name.into(),
            score: 0,
            hand: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hand(&self) -> &[ResponseCard] {
        &self.hand
    }

    /// Held card with the given ID, if the player has it
    pub fn find_card(&self, card_id: &str) -> Option<&ResponseCard> {
        self.hand.iter().find(|card| card.id == card_id)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<player:{}:{}>", self.name, self.id)
    }
}
