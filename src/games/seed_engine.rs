use crate::errors::{FairdrawResult, SeedError};
use crate::games::types::Roll;
use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, Rng};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

const BLOCK_LEN: usize = 32;
const CLIENT_SEED_LEN: usize = 16;

/// Seed triple a roll is derived from
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSeed {
    pub server_seed: String,
    pub client_seed: String,
    pub nonce: u64,
}

impl GameSeed {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
        }
    }
}

// The server seed stays out of logs until it is revealed.
impl fmt::Debug for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSeed")
            .field("server_seed", &"<redacted>")
            .field("client_seed", &self.client_seed)
            .field("nonce", &self.nonce)
            .finish()
    }
}

/// Hash and first roll for a seed triple, for after-the-fact verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvablyFairResult {
    #[serde(flatten)]
    pub seed: GameSeed,
    /// Hex HMAC-SHA256 of round 0
    pub hash: String,
    pub roll: Roll,
    /// `roll` mapped into `[0, 1)`
    pub result: f64,
}

/// Deterministic stream of bounded integers derived from a seed triple.
///
/// Round `r` is `HMAC-SHA256(key = server_seed, msg = "{client_seed}:{nonce}:{r}")`.
/// Values are read four bytes at a time, big-endian, moving to the next round
/// when a block is used up.
pub struct RollStream {
    mac: HmacSha256,
    client_seed: String,
    nonce: u64,
    round: u64,
    block: [u8; BLOCK_LEN],
    offset: usize,
}

impl RollStream {
    pub fn new(seed: &GameSeed) -> Result<Self, SeedError> {
        if seed.server_seed.is_empty() {
            return Err(SeedError::EmptyServerSeed);
        }
        if seed.client_seed.is_empty() {
            return Err(SeedError::EmptyClientSeed);
        }

        let mac = HmacSha256::new_from_slice(seed.server_seed.as_bytes())
            .map_err(|_| SeedError::EmptyServerSeed)?;

        let mut stream = Self {
            mac,
            client_seed: seed.client_seed.clone(),
            nonce: seed.nonce,
            round: 0,
            block: [0; BLOCK_LEN],
            offset: 0,
        };
        stream.block = stream.block(0);
        Ok(stream)
    }

    /// Raw digest for `round`
    pub fn block(&self, round: u64) -> [u8; BLOCK_LEN] {
        let mut mac = self.mac.clone();
        mac.update(format!("{}:{}:{}", self.client_seed, self.nonce, round).as_bytes());
        let digest = mac.finalize().into_bytes();

        let mut out = [0u8; BLOCK_LEN];
        out.copy_from_slice(&digest);
        out
    }

    pub fn next_u32(&mut self) -> u32 {
        if self.offset + 4 > BLOCK_LEN {
            self.round += 1;
            self.block = self.block(self.round);
            self.offset = 0;
        }
        let bytes = [
            self.block[self.offset],
            self.block[self.offset + 1],
            self.block[self.offset + 2],
            self.block[self.offset + 3],
        ];
        self.offset += 4;
        u32::from_be_bytes(bytes)
    }

    /// Uniform integer in `0..n` by rejection sampling. `n <= 1` yields 0.
    pub fn next_below(&mut self, n: u32) -> u32 {
        if n <= 1 {
            return 0;
        }
        let zone = (1u64 << 32) / n as u64 * n as u64;
        loop {
            let x = self.next_u32() as u64;
            if x < zone {
                return (x % n as u64) as u32;
            }
        }
    }

    /// Uniform roll in `0.00..=99.99`
    pub fn next_roll(&mut self) -> Roll {
        Roll::from_hundredths(self.next_below(Roll::RANGE))
    }
}

/// Derive the hash and first roll for a seed triple
pub fn hash_roll(seed: &GameSeed) -> FairdrawResult<ProvablyFairResult> {
    let mut stream = RollStream::new(seed)?;
    let hash = hex::encode(stream.block(0));
    let roll = stream.next_roll();

    Ok(ProvablyFairResult {
        seed: seed.clone(),
        hash,
        roll,
        result: roll.hundredths() as f64 / Roll::RANGE as f64,
    })
}

/// Hex SHA-256 of the server seed, published before any bet uses it
pub fn server_seed_commitment(server_seed: &str) -> String {
    hex::encode(Sha256::digest(server_seed.as_bytes()))
}

/// 32 random bytes from the OS, hex encoded
pub fn generate_server_seed() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn generate_client_seed() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CLIENT_SEED_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> GameSeed {
        GameSeed::new("server-secret", "lucky-client", 7)
    }

    #[test]
    fn test_hash_roll_deterministic() {
        let a = hash_roll(&seed()).unwrap();
        let b = hash_roll(&seed()).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.hash.len(), 64);
        assert!(a.roll.hundredths() < Roll::RANGE);
        assert!((0.0..1.0).contains(&a.result));
    }

    #[test]
    fn test_hash_is_hmac_sha256() {
        let mut mac = HmacSha256::new_from_slice(b"server-secret").unwrap();
        mac.update(b"lucky-client:7:0");
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(hash_roll(&seed()).unwrap().hash, expected);
    }

    #[test]
    fn test_inputs_change_hash() {
        let base = hash_roll(&seed()).unwrap().hash;
        let other_nonce = hash_roll(&GameSeed::new("server-secret", "lucky-client", 8)).unwrap().hash;
        let other_client = hash_roll(&GameSeed::new("server-secret", "lucky-clienT", 7)).unwrap().hash;
        let other_server = hash_roll(&GameSeed::new("server-secreT", "lucky-client", 7)).unwrap().hash;

        assert_ne!(base, other_nonce);
        assert_ne!(base, other_client);
        assert_ne!(base, other_server);
    }

    #[test]
    fn test_empty_seeds_rejected() {
        assert_eq!(
            RollStream::new(&GameSeed::new("", "c", 0)).err(),
            Some(SeedError::EmptyServerSeed)
        );
        assert_eq!(
            RollStream::new(&GameSeed::new("s", "", 0)).err(),
            Some(SeedError::EmptyClientSeed)
        );
    }

    #[test]
    fn test_stream_crosses_rounds() {
        let mut stream = RollStream::new(&seed()).unwrap();
        let round0 = stream.block(0);
        let round1 = stream.block(1);

        let first: Vec<u32> = (0..8).map(|_| stream.next_u32()).collect();
        let ninth = stream.next_u32();

        assert_eq!(first[0], u32::from_be_bytes([round0[0], round0[1], round0[2], round0[3]]));
        assert_eq!(ninth, u32::from_be_bytes([round1[0], round1[1], round1[2], round1[3]]));
    }

    #[test]
    fn test_next_below_bounds() {
        let mut stream = RollStream::new(&seed()).unwrap();
        for n in [2u32, 3, 25, 37, 52, 10_000] {
            for _ in 0..50 {
                assert!(stream.next_below(n) < n);
            }
        }
        assert_eq!(stream.next_below(1), 0);
        assert_eq!(stream.next_below(0), 0);
    }

    #[test]
    fn test_commitment() {
        assert_eq!(
            server_seed_commitment("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_generated_seeds() {
        let server = generate_server_seed();
        assert_eq!(server.len(), 64);
        assert_ne!(server, generate_server_seed());

        let client = generate_client_seed();
        assert_eq!(client.len(), CLIENT_SEED_LEN);
        assert!(client.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_debug_redacts_server_seed() {
        let rendered = format!("{:?}", seed());
        assert!(!rendered.contains("server-secret"));
        assert!(rendered.contains("lucky-client"));
    }
}
