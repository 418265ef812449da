use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Suit {
    /// Spades suit (♠)
    Spades,
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
}

impl Suit {
    pub fn key(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }

    /// Palette name the table UI uses for this suit.
    pub fn color(self) -> &'static str {
        match self {
            Suit::Spades => "slate",
            Suit::Hearts => "rose",
            Suit::Diamonds => "cyan",
            Suit::Clubs => "emerald",
        }
    }

    pub fn from_key(key: char) -> Option<Suit> {
        match key.to_ascii_uppercase() {
            'S' => Some(Suit::Spades),
            'H' => Some(Suit::Hearts),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn key(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_key(key: char) -> Option<Rank> {
        match key.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A single playing card. Immutable value used in hole cards, the board and the deck.
///
/// On the wire a card is its [`CardFace`]; deserialization parses the face's `code`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "CardFace", try_from = "CardFace")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// Two-character code such as `"AS"` or `"TD"`.
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.rank.key());
        code.push(self.suit.key());
        code
    }

    pub fn face(&self) -> CardFace {
        CardFace::from(*self)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.key(), self.suit.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card code: {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError(s.to_string()));
        };
        match (Rank::from_key(r), Suit::from_key(su)) {
            (Some(rank), Some(suit)) => Ok(Card::new(rank, suit)),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

/// Display form of a card as the table client renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub code: String,
    pub label: String,
    pub suit: String,
    pub symbol: String,
    pub color: String,
}

impl CardFace {
    /// Face-down placeholder shown in place of an opponent's hole card.
    pub fn hidden() -> Self {
        Self {
            code: "??".into(),
            label: "?".into(),
            suit: String::new(),
            symbol: "?".into(),
            color: "slate".into(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.code == "??"
    }
}

impl From<Card> for CardFace {
    fn from(card: Card) -> Self {
        Self {
            code: card.code(),
            label: card.rank.key().to_string(),
            suit: card.suit.name().to_string(),
            symbol: card.suit.symbol().to_string(),
            color: card.suit.color().to_string(),
        }
    }
}

impl TryFrom<CardFace> for Card {
    type Error = ParseCardError;

    fn try_from(face: CardFace) -> Result<Self, Self::Error> {
        face.code.parse()
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

/// Ranks from Ace down to Two, the order a fresh deck is laid out in.
pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
