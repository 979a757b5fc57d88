//! [`RaydiumPoolClient`] — normalized pool-state queries against the chain.

use std::str::FromStr;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use tracing::debug;

use crate::error::{Error, Result};
use crate::state::{
    parse_amm_pool, parse_clmm_pool, parse_cpmm_pool, parse_token_amount, AmmPoolLayout,
    ClmmPoolLayout, CpmmPoolLayout,
};
use crate::types::{
    ConcentratedState, ConstantProductState, PoolModel, PoolSnapshot, PoolStateRecord,
};

// ─── Constants ───────────────────────────────────────────────────────────────

const AMM_V4_PROGRAM_ID: &str = "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8";
const CPMM_PROGRAM_ID:   &str = "CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C";
const CLMM_PROGRAM_ID:   &str = "CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK";

const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

/// Q64.64 scale factor, 2^64.
const Q64: f64 = 18_446_744_073_709_551_616.0;

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async pool-state client.
///
/// Holds no connection or cache; each query opens a fresh RPC handle, issues
/// one logical read, and returns. Queries for distinct pools are fully
/// independent and may run concurrently from any number of tasks.
///
/// ```rust,no_run
/// # use raydium_pool_sdk::{PoolModel, RaydiumPoolClient};
/// # use solana_sdk::pubkey::Pubkey;
/// # use std::str::FromStr;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RaydiumPoolClient::mainnet();
/// let pool = Pubkey::from_str("3nMFwZXwY1s1M5s8vYAHqd4wGs4iSxXE4LRoUMMYqEgF")?;
/// let snapshot = client.pool_snapshot(&pool, PoolModel::Clmm).await?;
/// println!("slot {}: {:?}", snapshot.slot, snapshot.state);
/// # Ok(())
/// # }
/// ```
pub struct RaydiumPoolClient {
    rpc_url:      String,
    amm_program:  Pubkey,
    cpmm_program: Pubkey,
    clmm_program: Pubkey,
}

impl RaydiumPoolClient {
    /// Create a client pointing at any RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url:      rpc_url.into(),
            amm_program:  Pubkey::from_str(AMM_V4_PROGRAM_ID).unwrap(),
            cpmm_program: Pubkey::from_str(CPMM_PROGRAM_ID).unwrap(),
            clmm_program: Pubkey::from_str(CLMM_PROGRAM_ID).unwrap(),
        }
    }

    /// Pre-configured client for Solana devnet.
    pub fn devnet() -> Self {
        Self::new(DEVNET_RPC)
    }

    /// Pre-configured client for Solana mainnet-beta.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC)
    }

    /// Override the AMM V4 program id (devnet or forked deployments).
    pub fn with_amm_program(mut self, program_id: Pubkey) -> Self {
        self.amm_program = program_id;
        self
    }

    /// Override the CP-Swap program id.
    pub fn with_cpmm_program(mut self, program_id: Pubkey) -> Self {
        self.cpmm_program = program_id;
        self
    }

    /// Override the CLMM program id.
    pub fn with_clmm_program(mut self, program_id: Pubkey) -> Self {
        self.clmm_program = program_id;
        self
    }

    // ── Query ─────────────────────────────────────────────────────────────────

    /// Fetch and normalize the current state of one pool.
    ///
    /// The snapshot slot is the response-context slot of the pool-account
    /// read, for every model. No retries; a failed read surfaces immediately.
    pub async fn pool_snapshot(&self, pool_id: &Pubkey, model: PoolModel) -> Result<PoolSnapshot> {
        let rpc = self.rpc();

        // One-element batched read; the response context carries the slot the
        // read was observed at.
        let response = rpc
            .get_multiple_accounts_with_commitment(&[*pool_id], CommitmentConfig::confirmed())
            .await?;
        let slot = response.context.slot;
        let account = response
            .value
            .into_iter()
            .next()
            .flatten()
            .ok_or(Error::PoolNotFound(*pool_id))?;

        let expected_owner = self.program_for(model);
        if account.owner != expected_owner {
            return Err(Error::AccountParse {
                offset: 0,
                reason: format!(
                    "pool account owned by {}, expected {} program {}",
                    account.owner, model, expected_owner
                ),
            });
        }

        let state = match model {
            PoolModel::Amm => {
                let pool = parse_amm_pool(&account.data)?;
                let (coin, pc) =
                    self.vault_amounts(&rpc, &pool.coin_vault, &pool.pc_vault).await?;
                PoolStateRecord::ConstantProduct(normalize_amm(&pool, coin, pc)?)
            }
            PoolModel::Cpmm => {
                let pool = parse_cpmm_pool(&account.data)?;
                let (vault_0, vault_1) =
                    self.vault_amounts(&rpc, &pool.token_0_vault, &pool.token_1_vault).await?;
                PoolStateRecord::ConstantProduct(normalize_cpmm(&pool, vault_0, vault_1)?)
            }
            PoolModel::Clmm => {
                let pool = parse_clmm_pool(&account.data)?;
                PoolStateRecord::Concentrated(normalize_clmm(&pool)?)
            }
        };

        debug!(pool = %pool_id, %model, slot, "pool snapshot");
        Ok(PoolSnapshot { state, slot })
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), CommitmentConfig::confirmed())
    }

    fn program_for(&self, model: PoolModel) -> Pubkey {
        match model {
            PoolModel::Amm => self.amm_program,
            PoolModel::Cpmm => self.cpmm_program,
            PoolModel::Clmm => self.clmm_program,
        }
    }

    /// Read both vault token balances in one batched call.
    async fn vault_amounts(
        &self,
        rpc:     &RpcClient,
        vault_a: &Pubkey,
        vault_b: &Pubkey,
    ) -> Result<(u64, u64)> {
        let mut accounts = rpc
            .get_multiple_accounts(&[*vault_a, *vault_b])
            .await?
            .into_iter();
        let mut next = |key: &Pubkey| -> Result<u64> {
            let account = accounts.next().flatten().ok_or_else(|| Error::AccountParse {
                offset: 0,
                reason: format!("pool vault account {key} missing"),
            })?;
            parse_token_amount(&account.data)
        };
        let amount_a = next(vault_a)?;
        let amount_b = next(vault_b)?;
        Ok((amount_a, amount_b))
    }
}

// ─── Normalization (pure, no RPC) ────────────────────────────────────────────

fn normalize_amm(
    pool:              &AmmPoolLayout,
    coin_vault_amount: u64,
    pc_vault_amount:   u64,
) -> Result<ConstantProductState> {
    let base_reserve = live_reserve(coin_vault_amount, pool.need_take_pnl_coin, "base_reserve")?;
    let quote_reserve = live_reserve(pc_vault_amount, pool.need_take_pnl_pc, "quote_reserve")?;
    Ok(ConstantProductState {
        base_reserve,
        quote_reserve,
        pool_price: decimal_price(
            base_reserve,
            quote_reserve,
            pool.coin_decimals as i32,
            pool.pc_decimals as i32,
        ),
    })
}

fn normalize_cpmm(
    pool:           &CpmmPoolLayout,
    vault_0_amount: u64,
    vault_1_amount: u64,
) -> Result<ConstantProductState> {
    let fees_0 = pool
        .protocol_fees_token_0
        .checked_add(pool.fund_fees_token_0)
        .ok_or(Error::MagnitudeOverflow { field: "base_reserve" })?;
    let fees_1 = pool
        .protocol_fees_token_1
        .checked_add(pool.fund_fees_token_1)
        .ok_or(Error::MagnitudeOverflow { field: "quote_reserve" })?;
    let base_reserve = live_reserve(vault_0_amount, fees_0, "base_reserve")?;
    let quote_reserve = live_reserve(vault_1_amount, fees_1, "quote_reserve")?;
    Ok(ConstantProductState {
        base_reserve,
        quote_reserve,
        pool_price: decimal_price(
            base_reserve,
            quote_reserve,
            i32::from(pool.mint_0_decimals),
            i32::from(pool.mint_1_decimals),
        ),
    })
}

fn normalize_clmm(pool: &ClmmPoolLayout) -> Result<ConcentratedState> {
    let liquidity = u64::try_from(pool.liquidity)
        .map_err(|_| Error::MagnitudeOverflow { field: "liquidity" })?;
    Ok(ConcentratedState {
        tick_current: pool.tick_current,
        liquidity,
        sqrt_price_x64: pool.sqrt_price_x64,
        tick_array_bitmap: pool.tick_array_bitmap,
        current_price: sqrt_price_x64_to_price(
            pool.sqrt_price_x64,
            i32::from(pool.mint_decimals_0),
            i32::from(pool.mint_decimals_1),
        ),
    })
}

/// The live reserve is the vault balance minus fee balances parked in the
/// vault. A fee counter exceeding the balance is corrupt on-chain state and
/// surfaces as an error instead of wrapping.
fn live_reserve(vault_amount: u64, fees: u64, field: &'static str) -> Result<u64> {
    vault_amount
        .checked_sub(fees)
        .ok_or(Error::MagnitudeOverflow { field })
}

/// Spot price quote-per-base, adjusted for the two mints' decimal counts.
fn decimal_price(base_reserve: u64, quote_reserve: u64, base_decimals: i32, quote_decimals: i32) -> f64 {
    if base_reserve == 0 {
        return 0.0;
    }
    (quote_reserve as f64 / base_reserve as f64) * 10f64.powi(base_decimals - quote_decimals)
}

/// Convert a Q64.64 sqrt price to a decimal price adjusted for mint decimals.
fn sqrt_price_x64_to_price(sqrt_price_x64: u128, decimals_0: i32, decimals_1: i32) -> f64 {
    let sqrt = sqrt_price_x64 as f64 / Q64;
    sqrt * sqrt * 10f64.powi(decimals_0 - decimals_1)
}
