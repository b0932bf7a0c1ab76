//! Card contract
//!
//! Routes named operations to card handlers over a [`StoreAdapter`].
//!
//! ## Operations
//! - `create`: args `[id, suit, rank, is_played]`, stores the card
//! - `get`: args `[id]`, loads the card
//!
//! Arguments arrive as raw bodies and go through the primitive conversions:
//! `suit`/`rank` are integer bodies, `is_played` a boolean body.

use crate::card::{Card, Rank, Suit};
use crate::codec::primitive::{bytes_to_bool, bytes_to_int};
use crate::error::{Result, SegError};
use crate::store::{ChangeState, Store, StoreAdapter};

/// A parsed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Store a card
    Create(Card),

    /// Load a card by id
    Get { id: Vec<u8> },
}

impl Invocation {
    /// Parse an operation name and its raw arguments
    ///
    /// Returns `Ok(None)` for an unknown operation or when no arguments are given.
    pub fn parse(operation: &str, args: &[Vec<u8>]) -> Result<Option<Self>> {
        if args.is_empty() {
            return Ok(None);
        }

        match operation {
            "create" => {
                if args.len() < Card::FIELD_COUNT {
                    return Err(SegError::InvalidArgument(format!(
                        "create expects {} arguments, got {}",
                        Card::FIELD_COUNT,
                        args.len()
                    )));
                }
                let card = Card {
                    id: args[0].clone(),
                    suit: Suit::try_from(bytes_to_int(&args[1])?)?,
                    rank: Rank::try_from(bytes_to_int(&args[2])?)?,
                    is_played: bytes_to_bool(&args[3]),
                };
                Ok(Some(Invocation::Create(card)))
            }
            "get" => Ok(Some(Invocation::Get {
                id: args[0].clone(),
            })),
            _ => Ok(None),
        }
    }
}

/// Result of executing an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The card was written (or found unchanged)
    Created { card: Card, state: ChangeState },

    /// The card lookup result
    Found(Option<Card>),

    /// The operation was not recognised
    Rejected,
}

/// Card handlers bound to one store handle
pub struct CardContract<S> {
    adapter: StoreAdapter<S>,
}

impl<S: Store> CardContract<S> {
    pub fn new(adapter: StoreAdapter<S>) -> Self {
        Self { adapter }
    }

    /// Store a card under `c/<id>`
    pub fn create(&self, card: &Card) -> Result<ChangeState> {
        let key = Card::storage_key(self.adapter.separator(), &card.id);
        self.adapter.put(&key, &card.to_table())
    }

    /// Load the card with `id`
    pub fn get(&self, id: &[u8]) -> Result<Option<Card>> {
        let key = Card::storage_key(self.adapter.separator(), id);
        Card::from_table(&self.adapter.get(&key)?)
    }

    /// Delete the card with `id`
    pub fn remove(&self, id: &[u8]) -> Result<ChangeState> {
        let key = Card::storage_key(self.adapter.separator(), id);
        self.adapter.put(&key, &[])
    }

    /// Run a parsed invocation
    pub fn execute(&self, invocation: Invocation) -> Result<Outcome> {
        match invocation {
            Invocation::Create(card) => {
                let state = self.create(&card)?;
                Ok(Outcome::Created { card, state })
            }
            Invocation::Get { id } => Ok(Outcome::Found(self.get(&id)?)),
        }
    }

    /// Parse and run a named operation
    pub fn call(&self, operation: &str, args: &[Vec<u8>]) -> Result<Outcome> {
        match Invocation::parse(operation, args)? {
            Some(invocation) => self.execute(invocation),
            None => {
                tracing::debug!(operation, args = args.len(), "operation rejected");
                Ok(Outcome::Rejected)
            }
        }
    }

    pub fn adapter(&self) -> &StoreAdapter<S> {
        &self.adapter
    }
}
