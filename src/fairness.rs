//! Audit of settled bets once their server seed is revealed.
//!
//! Anyone holding a [`GameRecord`] and the matching [`RevealedSeed`] can check
//! that the seed was committed to before play, that the published hash came
//! from it, and that replaying the bet gives the recorded result. Any mismatch
//! is reported as a [`VerificationError`] and logged; nothing here recovers.

use crate::config::HouseConfig;
use crate::errors::{FairdrawResult, VerificationError};
use crate::games::{evaluate, hash_roll, server_seed_commitment, FairnessProof, GameRecord, RevealedSeed};
use tracing::warn;

/// Check that `server_seed` hashes to the published commitment
pub fn verify_commitment(server_seed: &str, commitment: &str) -> Result<(), VerificationError> {
    if server_seed_commitment(server_seed).eq_ignore_ascii_case(commitment) {
        Ok(())
    } else {
        warn!("Server seed does not match commitment {}", commitment);
        Err(VerificationError::CommitmentMismatch {
            commitment: commitment.to_string(),
        })
    }
}

/// Check a pre-reveal proof against the revealed seed pair.
pub fn verify_proof(proof: &FairnessProof, revealed: &RevealedSeed) -> FairdrawResult<()> {
    if !proof
        .server_seed_commitment
        .eq_ignore_ascii_case(&revealed.commitment)
    {
        warn!(
            "Proof commits to {} but reveal is for {}",
            proof.server_seed_commitment, revealed.commitment
        );
        return Err(VerificationError::CommitmentMismatch {
            commitment: proof.server_seed_commitment.clone(),
        }
        .into());
    }
    verify_commitment(&revealed.server_seed, &revealed.commitment)?;

    if proof.client_seed != revealed.client_seed {
        warn!("Client seed mismatch for nonce {}", proof.nonce);
        return Err(VerificationError::ClientSeedMismatch {
            record: proof.client_seed.clone(),
            revealed: revealed.client_seed.clone(),
        }
        .into());
    }

    if revealed.last_nonce.map_or(true, |last| proof.nonce > last) {
        warn!(
            "Nonce {} outside issued range (last {:?})",
            proof.nonce, revealed.last_nonce
        );
        return Err(VerificationError::NonceNotIssued {
            nonce: proof.nonce,
            last_issued: revealed.last_nonce,
        }
        .into());
    }

    let recomputed = hash_roll(&revealed.seed_for(proof.nonce))?;
    if !recomputed.hash.eq_ignore_ascii_case(&proof.hash) {
        warn!(
            "Seed integrity failure at nonce {}: expected {}, computed {}",
            proof.nonce, proof.hash, recomputed.hash
        );
        return Err(VerificationError::SeedIntegrity {
            expected: proof.hash.clone(),
            actual: recomputed.hash,
        }
        .into());
    }

    Ok(())
}

/// Full audit of a settled bet: proof checks, then a replay of the outcome
/// with the same house configuration.
pub fn verify_record(record: &GameRecord, revealed: &RevealedSeed, house: &HouseConfig) -> FairdrawResult<()> {
    verify_proof(&record.proof, revealed)?;

    if record.game_type != record.params.game_type() {
        warn!(
            "Game {} is labelled {} but its parameters are for {}",
            record.game_id,
            record.game_type,
            record.params.game_type()
        );
        return Err(VerificationError::OutcomeMismatch {
            game_id: record.game_id.clone(),
        }
        .into());
    }

    let replayed = evaluate(
        &revealed.seed_for(record.proof.nonce),
        record.payment.bet_amount,
        &record.params,
        house,
    )?;

    if replayed != record.result || replayed.payout != record.payment.payout_amount {
        warn!("Replay of game {} does not match its record", record.game_id);
        return Err(VerificationError::OutcomeMismatch {
            game_id: record.game_id.clone(),
        }
        .into());
    }

    Ok(())
}
