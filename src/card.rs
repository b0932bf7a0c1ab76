//! Play-card record
//!
//! A four-field record stored as one table:
//!
//! ```text
//! <Card> = [S<id>, S<suit>, S<rank>, S<is_played>]
//! ```
//! `suit` and `rank` are integer bodies, `is_played` is a one-byte boolean body.

use crate::codec::{TableBuilder, TableView};
use crate::error::{Result, SegError};
use crate::store::key_path;

/// Key path element under which cards are stored
pub const CARD_PREFIX: &[u8] = b"c";

/// Card suit, numbered as bit flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Suit {
    Spades = 1 << 0,
    Hearts = 1 << 1,
    Diamonds = 1 << 2,
    Clubs = 1 << 3,
}

impl TryFrom<i64> for Suit {
    type Error = SegError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Suit::Spades),
            2 => Ok(Suit::Hearts),
            4 => Ok(Suit::Diamonds),
            8 => Ok(Suit::Clubs),
            _ => Err(SegError::InvalidField(format!("unknown suit: {}", value))),
        }
    }
}

/// Card rank, Ace through King
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl TryFrom<i64> for Rank {
    type Error = SegError;

    fn try_from(value: i64) -> Result<Self> {
        const RANKS: [Rank; 13] = [
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
        ];
        usize::try_from(value)
            .ok()
            .and_then(|v| v.checked_sub(1))
            .and_then(|i| RANKS.get(i).copied())
            .ok_or_else(|| SegError::InvalidField(format!("unknown rank: {}", value)))
    }
}

/// A playing card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: Vec<u8>,
    pub suit: Suit,
    pub rank: Rank,
    pub is_played: bool,
}

impl Card {
    /// Number of fields in the card table
    pub const FIELD_COUNT: usize = 4;

    pub fn new(id: impl Into<Vec<u8>>, suit: Suit, rank: Rank, is_played: bool) -> Self {
        Self {
            id: id.into(),
            suit,
            rank,
            is_played,
        }
    }

    /// Encode as a card table
    pub fn to_table(&self) -> Vec<u8> {
        TableBuilder::new()
            .segment(&self.id)
            .segment_int(self.suit as i64)
            .segment_int(self.rank as i64)
            .segment_bool(self.is_played)
            .into_vec()
    }

    /// Decode a card table; empty data means no card
    pub fn from_table(data: &[u8]) -> Result<Option<Self>> {
        if data.is_empty() {
            return Ok(None);
        }

        let view = TableView::new(data);
        Ok(Some(Self {
            id: view.get(0)?.to_vec(),
            suit: Suit::try_from(view.int(1)?)?,
            rank: Rank::try_from(view.int(2)?)?,
            is_played: view.boolean(3)?,
        }))
    }

    /// Store key of the card with `id`: `c<separator><id>`
    pub fn storage_key(separator: &[u8], id: &[u8]) -> Vec<u8> {
        key_path(separator, &[CARD_PREFIX, id])
    }
}
