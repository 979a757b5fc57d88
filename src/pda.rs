//! Program-derived addresses for the CP-Swap program.
//!
//! Seed byte strings mirror the on-chain program's constants exactly. Every
//! helper is pure: identical program id + seeds always yield the identical
//! address and bump, and the address is guaranteed off-curve.

use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};

// ─── PDA seeds (mirror the on-chain CP-Swap constants) ───────────────────────

pub const AUTH_SEED:         &[u8] = b"vault_and_lp_mint_auth_seed";
pub const POOL_SEED:         &[u8] = b"pool";
pub const POOL_VAULT_SEED:   &[u8] = b"pool_vault";
pub const POOL_LP_MINT_SEED: &[u8] = b"pool_lp_mint";
pub const OBSERVATION_SEED:  &[u8] = b"observation";

// ─── Derivation helpers ──────────────────────────────────────────────────────

fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or(Error::DerivationExhausted)
}

/// Derive the vault-and-lp-mint authority PDA that signs for pool transfers.
pub fn derive_authority(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[AUTH_SEED], program_id)
}

/// Derive the pool PDA for an AMM config + mint pair.
pub fn derive_pool(
    program_id: &Pubkey,
    amm_config: &Pubkey,
    mint_a:     &Pubkey,
    mint_b:     &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive(
        &[POOL_SEED, amm_config.as_ref(), mint_a.as_ref(), mint_b.as_ref()],
        program_id,
    )
}

/// Derive a pool token-vault PDA for one of the pool's mints.
pub fn derive_vault(program_id: &Pubkey, pool: &Pubkey, mint: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[POOL_VAULT_SEED, pool.as_ref(), mint.as_ref()], program_id)
}

/// Derive the pool LP mint PDA.
pub fn derive_lp_mint(program_id: &Pubkey, pool: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[POOL_LP_MINT_SEED, pool.as_ref()], program_id)
}

/// Derive the pool observation (TWAP) PDA.
pub fn derive_observation(program_id: &Pubkey, pool: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[OBSERVATION_SEED, pool.as_ref()], program_id)
}
