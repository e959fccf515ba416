//! Card values: suits, ranks, and the wild-aware current rank.
//!
//! ## Wire format
//!
//! Cards travel as compact two-character codes: a rank token followed by a
//! suit letter (`"7S"`, `"TH"`, `"8C"`). Suits serialize as lowercase names,
//! and the current rank serializes as a rank token or `"wild"`.
//!
//! ```
//! use crazy_eights::cards::{Card, Rank, Suit};
//!
//! let card: Card = "TH".parse().unwrap();
//! assert_eq!(card, Card::new(Rank::Ten, Suit::Hearts));
//! assert_eq!(card.to_string(), "TH");
//! assert_eq!(card.name(), "Ten of Hearts");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseCardError;

/// One of the four card categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Single-letter code used in card codes.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    /// Parse a suit letter (case-insensitive).
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    /// Display name ("Hearts").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a full suit name or its letter, in any case.
///
/// Suit declarations for wild cards come in as free text, so this is the
/// single gate that turns player input into one of the four suits.
impl FromStr for Suit {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            return Suit::from_letter(letter).ok_or_else(|| ParseCardError::Suit(s.to_string()));
        }
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCardError::Suit(s.to_string()))
    }
}

/// Card face value. `Eight` is the wild rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Nine,
    Ten,
    Ace,
    Jack,
    Queen,
    King,
    Eight,
}

impl Rank {
    /// Every rank, Eight last.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Nine,
        Rank::Ten,
        Rank::Ace,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Eight,
    ];

    /// Is this the wild rank?
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Rank::Eight)
    }

    /// Single-character token used in card codes.
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Ace => 'A',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Eight => '8',
        }
    }

    /// Parse a rank token (case-insensitive).
    #[must_use]
    pub fn from_token(token: char) -> Option<Self> {
        let upper = token.to_ascii_uppercase();
        Rank::ALL.into_iter().find(|rank| rank.token() == upper)
    }

    /// Display name ("Ten").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Ace => "Ace",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Eight => "Eight",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        rank.token().to_string()
    }
}

impl TryFrom<String> for Rank {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(token), None) => {
                Rank::from_token(token).ok_or_else(|| ParseCardError::Rank(value.clone()))
            }
            _ => Err(ParseCardError::Rank(value)),
        }
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Is this card wild (an Eight)?
    #[must_use]
    pub const fn is_wild(self) -> bool {
        self.rank.is_wild()
    }

    /// Does this card match the current suit or rank requirement?
    ///
    /// Wild cards are not special-cased here: callers decide whether an
    /// Eight bypasses matching (it does for plays and draws alike).
    #[must_use]
    pub fn matches(self, suit: Suit, rank: CurrentRank) -> bool {
        self.suit == suit || rank.matches(self.rank)
    }

    /// Human-readable name, e.g. "Ten of Hearts".
    #[must_use]
    pub fn name(self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.token(), self.suit.letter())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseCardError::Card(s.to_string()));
        };
        let rank = Rank::from_token(rank_ch).ok_or_else(|| ParseCardError::Card(s.to_string()))?;
        let suit = Suit::from_letter(suit_ch).ok_or_else(|| ParseCardError::Card(s.to_string()))?;
        Ok(Card { rank, suit })
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The rank requirement currently in force.
///
/// After a wild play the requirement is `Wild`: no real rank matches it, so
/// only the declared suit (or another Eight) can follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CurrentRank {
    Rank(Rank),
    Wild,
}

impl CurrentRank {
    /// Does a card of `rank` satisfy this requirement by rank equality?
    #[must_use]
    pub fn matches(self, rank: Rank) -> bool {
        match self {
            CurrentRank::Rank(current) => current == rank,
            CurrentRank::Wild => false,
        }
    }
}

impl From<Rank> for CurrentRank {
    fn from(rank: Rank) -> Self {
        CurrentRank::Rank(rank)
    }
}

impl fmt::Display for CurrentRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentRank::Rank(rank) => write!(f, "{rank}"),
            CurrentRank::Wild => f.write_str("wild"),
        }
    }
}

impl From<CurrentRank> for String {
    fn from(rank: CurrentRank) -> Self {
        rank.to_string()
    }
}

impl TryFrom<String> for CurrentRank {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("wild") {
            Ok(CurrentRank::Wild)
        } else {
            Rank::try_from(value).map(CurrentRank::Rank)
        }
    }
}
