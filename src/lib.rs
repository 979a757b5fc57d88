//! Raydium pool SDK
//!
//! Instruction builders and normalized pool-state queries for the Raydium
//! pool programs on Solana: the legacy constant-product AMM (Liquidity Pool
//! V4), the CP-Swap constant-product pools, and the concentrated-liquidity
//! CLMM pools. Instructions are built byte-exact against the on-chain
//! programs; transaction assembly and signing stay with the caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use raydium_pool_sdk::{instructions, PoolModel, RaydiumPoolClient};
//! use solana_sdk::pubkey::Pubkey;
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Read normalized pool state for routing.
//!     let client = RaydiumPoolClient::mainnet();
//!     let pool = Pubkey::from_str("3nMFwZXwY1s1M5s8vYAHqd4wGs4iSxXE4LRoUMMYqEgF")?;
//!     let snapshot = client.pool_snapshot(&pool, PoolModel::Clmm).await?;
//!     println!("slot {}: {:?}", snapshot.slot, snapshot.state);
//!
//!     // 2. Build a swap instruction for submission elsewhere.
//!     let program_id = Pubkey::from_str("CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C")?;
//!     let payer = Pubkey::new_unique();
//!     # let (config, pool, user_in, user_out, vault_in, vault_out) =
//!     #     (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(),
//!     #      Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
//!     # let (token_prog_in, token_prog_out, mint_in, mint_out, observation) =
//!     #     (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(),
//!     #      Pubkey::new_unique(), Pubkey::new_unique());
//!     let ix = instructions::swap_base_input_ix(
//!         &program_id, &payer, None, &config, &pool,
//!         &user_in, &user_out, &vault_in, &vault_out,
//!         &token_prog_in, &token_prog_out, &mint_in, &mint_out, &observation,
//!         1_000_000, 995_000,
//!     )?;
//!     assert_eq!(ix.program_id, program_id);
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`instructions`] | The five CP-Swap pool-lifecycle instruction builders |
//! | [`pda`] | Deterministic program-derived addresses (pool, authority, vaults) |
//! | [`RaydiumPoolClient::pool_snapshot`] | Reserves / price / tick data at a slot |
//! | [`state`] | Raw on-chain account layouts for all three pool models |

pub mod client;
pub mod error;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod types;

pub use client::RaydiumPoolClient;
pub use error::{Error, Result};
pub use types::*;
