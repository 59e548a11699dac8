use crate::config::FairdrawConfig;
use crate::errors::{BetError, FairdrawResult};
use crate::games::seed_engine::hash_roll;
use crate::games::seed_session::SeedSession;
use crate::games::types::{BetRequest, FairnessProof, GameRecord, PaymentInfo, PlayerInfo};
use crate::games::validation::validate_bet;
use crate::games::video_poker::{deal_preview, Card, HAND_SIZE};
use crate::money::Amount;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Validates bets, draws seeds and turns outcomes into auditable records
#[derive(Clone)]
pub struct GameProcessor {
    config: Arc<FairdrawConfig>,
}

impl GameProcessor {
    /// Create a new game processor
    pub fn new(config: Arc<FairdrawConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FairdrawConfig {
        &self.config
    }

    /// Initial video poker hand for the session's next bet. Does not advance
    /// the nonce, so the following `play` draws from this same deal.
    pub fn deal(&self, session: &SeedSession) -> FairdrawResult<[Card; HAND_SIZE]> {
        let seed = session.peek_seed()?;
        debug!(nonce = seed.nonce, "Dealt video poker preview");
        deal_preview(&seed)
    }

    /// Play one bet. The balance is only checked here, debiting and crediting
    /// it stays with the caller.
    ///
    /// Bet amount failures leave the session untouched. Once the amount is
    /// accepted a nonce is drawn, so a bet rejected for its game parameters
    /// still consumes one.
    pub fn play(
        &self,
        session: &mut SeedSession,
        request: BetRequest,
        balance: Amount,
    ) -> FairdrawResult<GameRecord> {
        let limits = self
            .config
            .limits_for(&request.token.symbol)
            .ok_or_else(|| BetError::UnsupportedToken(request.token.symbol.clone()))?;
        validate_bet(request.bet_amount, balance, &limits)?;

        let seed = session.next_seed()?;
        let result = super::evaluate(&seed, request.bet_amount, &request.params, &self.config.house)?;
        let fair = hash_roll(&seed)?;

        let game_id = Uuid::new_v4().to_string();
        debug!(
            game_id = %game_id,
            game = %request.params.game_type(),
            nonce = seed.nonce,
            bet = request.bet_amount.minor_units(),
            payout = result.payout.minor_units(),
            payout_display = result.payout.to_display(request.token.decimals),
            win = result.win,
            "Bet settled"
        );

        Ok(GameRecord {
            game_id,
            game_type: request.params.game_type(),
            player: PlayerInfo {
                player_id: request.player_id,
            },
            payment: PaymentInfo {
                token: request.token,
                bet_amount: request.bet_amount,
                payout_amount: result.payout,
            },
            params: request.params,
            result,
            proof: FairnessProof {
                server_seed_commitment: session.commitment().to_string(),
                client_seed: seed.client_seed.clone(),
                nonce: seed.nonce,
                hash: fair.hash,
            },
            timestamp: chrono::Utc::now(),
        })
    }
}
