//! Low-level CP-Swap instruction builders.
//!
//! Each function constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission. Account order mirrors the on-chain program's
//! expected argument order exactly; the builders never reorder or deduplicate.
//!
//! Instruction payload = 8-byte Anchor discriminator ++ little-endian u64
//! argument fields. The payload length depends only on the field list, never
//! on the argument values.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::pda::{derive_authority, derive_pool};

// ─── Well-known program IDs ──────────────────────────────────────────────────

pub(crate) fn spl_token_id() -> Pubkey {
    Pubkey::from_str("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap()
}

pub(crate) fn spl_token_2022_id() -> Pubkey {
    Pubkey::from_str("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb").unwrap()
}

pub(crate) fn ata_program_id() -> Pubkey {
    Pubkey::from_str("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL").unwrap()
}

pub(crate) fn memo_program_id() -> Pubkey {
    Pubkey::from_str("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr").unwrap()
}

// ─── Discriminators ──────────────────────────────────────────────────────────

/// Anchor instruction discriminators for the CP-Swap program, one constant
/// per pool-lifecycle operation. Protocol data, never recomputed.
pub mod discriminator {
    pub const INITIALIZE:       [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];
    pub const DEPOSIT:          [u8; 8] = [242, 35, 198, 137, 82, 225, 242, 182];
    pub const WITHDRAW:         [u8; 8] = [183, 18, 70, 156, 148, 109, 161, 34];
    pub const SWAP_BASE_INPUT:  [u8; 8] = [143, 190, 90, 218, 196, 30, 51, 222];
    pub const SWAP_BASE_OUTPUT: [u8; 8] = [55, 217, 98, 86, 163, 74, 180, 173];
}

// ─── Argument encoding ───────────────────────────────────────────────────────

fn check_u64(field: &'static str, value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::ArgumentOutOfRange { field, value })
}

/// Encode `fields` little-endian after `disc`. Every field is range-checked
/// into the u64 wire width before any byte is written; a failed check leaves
/// no partial buffer behind.
fn encode_args(disc: [u8; 8], fields: &[(&'static str, u128)]) -> Result<Vec<u8>> {
    let mut checked = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        checked.push(check_u64(name, *value)?);
    }
    let mut data = Vec::with_capacity(8 + 8 * checked.len());
    data.extend_from_slice(&disc);
    for value in &checked {
        data.extend_from_slice(&value.to_le_bytes());
    }
    Ok(data)
}

// ─── initialize ──────────────────────────────────────────────────────────────

/// Build the CP-Swap `initialize` instruction.
///
/// Pass `None` for `authority` or `pool` to have the canonical PDA derived
/// from `program_id` (and, for the pool, `amm_config` + the mint pair). A
/// caller-supplied pool id is marked as a signer exactly when it differs from
/// the derived pool PDA, since a non-PDA pool account must sign its own
/// creation; the derived PDA itself can never sign.
#[allow(clippy::too_many_arguments)]
pub fn initialize_pool_ix(
    program_id:              &Pubkey,
    creator:                 &Pubkey,
    amm_config:              &Pubkey,
    authority:               Option<&Pubkey>,
    pool:                    Option<&Pubkey>,
    mint_a:                  &Pubkey,
    mint_b:                  &Pubkey,
    lp_mint:                 &Pubkey,
    user_vault_a:            &Pubkey,
    user_vault_b:            &Pubkey,
    user_lp_account:         &Pubkey,
    vault_a:                 &Pubkey,
    vault_b:                 &Pubkey,
    create_pool_fee_account: &Pubkey,
    mint_program_a:          &Pubkey,
    mint_program_b:          &Pubkey,
    observation:             &Pubkey,
    amount_max_a:            u128,
    amount_max_b:            u128,
    open_time:               u128,
) -> Result<Instruction> {
    let data = encode_args(
        discriminator::INITIALIZE,
        &[
            ("amount_max_a", amount_max_a),
            ("amount_max_b", amount_max_b),
            ("open_time", open_time),
        ],
    )?;

    let (derived_pool, _) = derive_pool(program_id, amm_config, mint_a, mint_b)?;
    let pool_id = pool.copied().unwrap_or(derived_pool);
    let pool_is_signer = pool_id != derived_pool;
    let authority = resolve_authority(program_id, authority)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*creator, true),
            AccountMeta::new_readonly(*amm_config, false),
            AccountMeta::new_readonly(authority, false),
            AccountMeta::new(pool_id, pool_is_signer),
            AccountMeta::new_readonly(*mint_a, false),
            AccountMeta::new_readonly(*mint_b, false),
            AccountMeta::new(*lp_mint, false),
            AccountMeta::new(*user_vault_a, false),
            AccountMeta::new(*user_vault_b, false),
            AccountMeta::new(*user_lp_account, false),
            AccountMeta::new(*vault_a, false),
            AccountMeta::new(*vault_b, false),
            AccountMeta::new(*create_pool_fee_account, false),
            AccountMeta::new(*observation, false),
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(*mint_program_a, false),
            AccountMeta::new_readonly(*mint_program_b, false),
            AccountMeta::new_readonly(ata_program_id(), false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    })
}

// ─── deposit ─────────────────────────────────────────────────────────────────

/// Build the CP-Swap `deposit` instruction.
///
/// Both token-program variants are listed because either pool mint may be
/// owned by the legacy token program or by token-2022.
#[allow(clippy::too_many_arguments)]
pub fn deposit_ix(
    program_id:      &Pubkey,
    owner:           &Pubkey,
    authority:       Option<&Pubkey>,
    pool:            &Pubkey,
    user_lp_account: &Pubkey,
    user_vault_a:    &Pubkey,
    user_vault_b:    &Pubkey,
    vault_a:         &Pubkey,
    vault_b:         &Pubkey,
    mint_a:          &Pubkey,
    mint_b:          &Pubkey,
    lp_mint:         &Pubkey,
    lp_amount:       u128,
    amount_max_a:    u128,
    amount_max_b:    u128,
) -> Result<Instruction> {
    let data = encode_args(
        discriminator::DEPOSIT,
        &[
            ("lp_amount", lp_amount),
            ("amount_max_a", amount_max_a),
            ("amount_max_b", amount_max_b),
        ],
    )?;
    debug!(%lp_amount, %amount_max_a, %amount_max_b, "cpmm deposit args encoded");

    let authority = resolve_authority(program_id, authority)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new_readonly(authority, false),
            AccountMeta::new(*pool, false),
            AccountMeta::new(*user_lp_account, false),
            AccountMeta::new(*user_vault_a, false),
            AccountMeta::new(*user_vault_b, false),
            AccountMeta::new(*vault_a, false),
            AccountMeta::new(*vault_b, false),
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(spl_token_2022_id(), false),
            AccountMeta::new_readonly(*mint_a, false),
            AccountMeta::new_readonly(*mint_b, false),
            AccountMeta::new(*lp_mint, false),
        ],
        data,
    })
}

// ─── withdraw ────────────────────────────────────────────────────────────────

/// Build the CP-Swap `withdraw` instruction.
///
/// Account list matches `deposit` with the memo program appended; the program
/// emits a transfer memo for token-2022 mints.
#[allow(clippy::too_many_arguments)]
pub fn withdraw_ix(
    program_id:      &Pubkey,
    owner:           &Pubkey,
    authority:       Option<&Pubkey>,
    pool:            &Pubkey,
    user_lp_account: &Pubkey,
    user_vault_a:    &Pubkey,
    user_vault_b:    &Pubkey,
    vault_a:         &Pubkey,
    vault_b:         &Pubkey,
    mint_a:          &Pubkey,
    mint_b:          &Pubkey,
    lp_mint:         &Pubkey,
    lp_amount:       u128,
    amount_min_a:    u128,
    amount_min_b:    u128,
) -> Result<Instruction> {
    let data = encode_args(
        discriminator::WITHDRAW,
        &[
            ("lp_amount", lp_amount),
            ("amount_min_a", amount_min_a),
            ("amount_min_b", amount_min_b),
        ],
    )?;

    let authority = resolve_authority(program_id, authority)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new_readonly(authority, false),
            AccountMeta::new(*pool, false),
            AccountMeta::new(*user_lp_account, false),
            AccountMeta::new(*user_vault_a, false),
            AccountMeta::new(*user_vault_b, false),
            AccountMeta::new(*vault_a, false),
            AccountMeta::new(*vault_b, false),
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(spl_token_2022_id(), false),
            AccountMeta::new_readonly(*mint_a, false),
            AccountMeta::new_readonly(*mint_b, false),
            AccountMeta::new(*lp_mint, false),
            AccountMeta::new_readonly(memo_program_id(), false),
        ],
        data,
    })
}

// ─── swap (exact input / exact output) ───────────────────────────────────────

/// Build the CP-Swap `swap_base_input` instruction (exact input amount).
///
/// The input and output sides carry separate token-program references since
/// the two mints may live under different token-program variants.
#[allow(clippy::too_many_arguments)]
pub fn swap_base_input_ix(
    program_id:           &Pubkey,
    payer:                &Pubkey,
    authority:            Option<&Pubkey>,
    amm_config:           &Pubkey,
    pool:                 &Pubkey,
    user_input_account:   &Pubkey,
    user_output_account:  &Pubkey,
    input_vault:          &Pubkey,
    output_vault:         &Pubkey,
    input_token_program:  &Pubkey,
    output_token_program: &Pubkey,
    input_mint:           &Pubkey,
    output_mint:          &Pubkey,
    observation:          &Pubkey,
    amount_in:            u128,
    amount_out_min:       u128,
) -> Result<Instruction> {
    let data = encode_args(
        discriminator::SWAP_BASE_INPUT,
        &[("amount_in", amount_in), ("amount_out_min", amount_out_min)],
    )?;
    swap_instruction(
        program_id,
        payer,
        authority,
        amm_config,
        pool,
        user_input_account,
        user_output_account,
        input_vault,
        output_vault,
        input_token_program,
        output_token_program,
        input_mint,
        output_mint,
        observation,
        data,
    )
}

/// Build the CP-Swap `swap_base_output` instruction (exact output amount).
#[allow(clippy::too_many_arguments)]
pub fn swap_base_output_ix(
    program_id:           &Pubkey,
    payer:                &Pubkey,
    authority:            Option<&Pubkey>,
    amm_config:           &Pubkey,
    pool:                 &Pubkey,
    user_input_account:   &Pubkey,
    user_output_account:  &Pubkey,
    input_vault:          &Pubkey,
    output_vault:         &Pubkey,
    input_token_program:  &Pubkey,
    output_token_program: &Pubkey,
    input_mint:           &Pubkey,
    output_mint:          &Pubkey,
    observation:          &Pubkey,
    amount_in_max:        u128,
    amount_out:           u128,
) -> Result<Instruction> {
    let data = encode_args(
        discriminator::SWAP_BASE_OUTPUT,
        &[("amount_in_max", amount_in_max), ("amount_out", amount_out)],
    )?;
    swap_instruction(
        program_id,
        payer,
        authority,
        amm_config,
        pool,
        user_input_account,
        user_output_account,
        input_vault,
        output_vault,
        input_token_program,
        output_token_program,
        input_mint,
        output_mint,
        observation,
        data,
    )
}

// Both swap variants share one account schema; only the payload differs.
#[allow(clippy::too_many_arguments)]
fn swap_instruction(
    program_id:           &Pubkey,
    payer:                &Pubkey,
    authority:            Option<&Pubkey>,
    amm_config:           &Pubkey,
    pool:                 &Pubkey,
    user_input_account:   &Pubkey,
    user_output_account:  &Pubkey,
    input_vault:          &Pubkey,
    output_vault:         &Pubkey,
    input_token_program:  &Pubkey,
    output_token_program: &Pubkey,
    input_mint:           &Pubkey,
    output_mint:          &Pubkey,
    observation:          &Pubkey,
    data:                 Vec<u8>,
) -> Result<Instruction> {
    let authority = resolve_authority(program_id, authority)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*payer, true),
            AccountMeta::new_readonly(authority, false),
            AccountMeta::new_readonly(*amm_config, false),
            AccountMeta::new(*pool, false),
            AccountMeta::new(*user_input_account, false),
            AccountMeta::new(*user_output_account, false),
            AccountMeta::new(*input_vault, false),
            AccountMeta::new(*output_vault, false),
            AccountMeta::new_readonly(*input_token_program, false),
            AccountMeta::new_readonly(*output_token_program, false),
            AccountMeta::new_readonly(*input_mint, false),
            AccountMeta::new_readonly(*output_mint, false),
            AccountMeta::new(*observation, false),
        ],
        data,
    })
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

fn resolve_authority(program_id: &Pubkey, authority: Option<&Pubkey>) -> Result<Pubkey> {
    match authority {
        Some(key) => Ok(*key),
        None => Ok(derive_authority(program_id)?.0),
    }
}
