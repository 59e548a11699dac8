//! Seed pair lifecycle: commit, draw, reveal.
//!
//! A session owns one server seed. Its SHA-256 commitment is public from the
//! start; the seed itself only leaves the session through [`SeedSession::rotate`],
//! after which no further bets can use it.

use crate::errors::{FairdrawResult, SeedError};
use crate::games::seed_engine::{
    generate_client_seed, generate_server_seed, server_seed_commitment, GameSeed,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// A server seed after rotation, safe to publish
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealedSeed {
    pub server_seed: String,
    pub commitment: String,
    pub client_seed: String,
    /// Highest nonce issued under this pair, `None` if no bet was drawn
    pub last_nonce: Option<u64>,
}

impl RevealedSeed {
    pub fn seed_for(&self, nonce: u64) -> GameSeed {
        GameSeed::new(self.server_seed.clone(), self.client_seed.clone(), nonce)
    }
}

pub struct SeedSession {
    server_seed: String,
    commitment: String,
    client_seed: String,
    next_nonce: u64,
    exhausted: bool,
    max_client_seed_len: usize,
}

impl SeedSession {
    /// Start a session with a fresh OS-random server seed
    pub fn new(client_seed: Option<String>, max_client_seed_len: usize) -> Result<Self, SeedError> {
        Self::with_server_seed(generate_server_seed(), client_seed, max_client_seed_len)
    }

    /// Start a session from a known server seed. A missing client seed is generated.
    pub fn with_server_seed(
        server_seed: String,
        client_seed: Option<String>,
        max_client_seed_len: usize,
    ) -> Result<Self, SeedError> {
        if server_seed.is_empty() {
            return Err(SeedError::EmptyServerSeed);
        }
        let client_seed = client_seed.unwrap_or_else(generate_client_seed);
        check_client_seed(&client_seed, max_client_seed_len)?;

        Ok(Self {
            commitment: server_seed_commitment(&server_seed),
            server_seed,
            client_seed,
            next_nonce: 0,
            exhausted: false,
            max_client_seed_len,
        })
    }

    pub fn commitment(&self) -> &str {
        &self.commitment
    }

    pub fn client_seed(&self) -> &str {
        &self.client_seed
    }

    /// Nonce the next bet will use
    pub fn next_nonce(&self) -> u64 {
        self.next_nonce
    }

    /// Seed the next bet will use, without advancing the nonce. Crate-internal
    /// so the server seed only leaves through bets and rotation.
    pub(crate) fn peek_seed(&self) -> FairdrawResult<GameSeed> {
        if self.exhausted {
            return Err(SeedError::NonceExhausted.into());
        }
        Ok(GameSeed::new(self.server_seed.clone(), self.client_seed.clone(), self.next_nonce))
    }

    /// Hand out the seed for one bet and advance the nonce
    pub fn next_seed(&mut self) -> FairdrawResult<GameSeed> {
        if self.exhausted {
            return Err(SeedError::NonceExhausted.into());
        }
        let seed = GameSeed::new(self.server_seed.clone(), self.client_seed.clone(), self.next_nonce);
        match self.next_nonce.checked_add(1) {
            Some(n) => self.next_nonce = n,
            None => self.exhausted = true,
        }
        Ok(seed)
    }

    /// Reveal the current server seed and continue with a fresh one.
    pub fn rotate(&mut self, new_client_seed: Option<String>) -> FairdrawResult<RevealedSeed> {
        let client_seed = new_client_seed.unwrap_or_else(generate_client_seed);
        check_client_seed(&client_seed, self.max_client_seed_len)?;

        let last_nonce = if self.exhausted {
            Some(u64::MAX)
        } else {
            self.next_nonce.checked_sub(1)
        };
        let server_seed = std::mem::replace(&mut self.server_seed, generate_server_seed());
        let revealed = RevealedSeed {
            commitment: std::mem::replace(&mut self.commitment, server_seed_commitment(&self.server_seed)),
            server_seed,
            client_seed: std::mem::replace(&mut self.client_seed, client_seed),
            last_nonce,
        };
        self.next_nonce = 0;
        self.exhausted = false;

        info!(
            "Rotated seed pair {} after {} bets, next commitment {}",
            revealed.commitment,
            last_nonce.map_or(0, |n| n as u128 + 1),
            self.commitment
        );
        Ok(revealed)
    }
}

impl fmt::Debug for SeedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedSession")
            .field("commitment", &self.commitment)
            .field("client_seed", &self.client_seed)
            .field("next_nonce", &self.next_nonce)
            .finish_non_exhaustive()
    }
}

fn check_client_seed(client_seed: &str, max_len: usize) -> Result<(), SeedError> {
    if client_seed.is_empty() {
        return Err(SeedError::EmptyClientSeed);
    }
    if client_seed.len() > max_len {
        return Err(SeedError::ClientSeedTooLong {
            len: client_seed.len(),
            max: max_len,
        });
    }
    Ok(())
}
