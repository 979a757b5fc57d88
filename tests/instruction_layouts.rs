//! Wire-contract tests for the CP-Swap instruction builders: discriminator
//! prefixes, argument round-trips, and the full account schema (order,
//! signer flags, writable flags) for every operation.

use std::str::FromStr;

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program, sysvar};

use raydium_pool_sdk::instructions::{
    deposit_ix, initialize_pool_ix, swap_base_input_ix, swap_base_output_ix, withdraw_ix,
};
use raydium_pool_sdk::instructions::discriminator;
use raydium_pool_sdk::pda::{derive_authority, derive_pool};
use raydium_pool_sdk::state::read_u64;
use raydium_pool_sdk::Error;

const TOO_BIG: u128 = u64::MAX as u128 + 1;

fn key() -> Pubkey {
    Pubkey::new_unique()
}

fn spl_token() -> Pubkey {
    Pubkey::from_str("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap()
}

fn spl_token_2022() -> Pubkey {
    Pubkey::from_str("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb").unwrap()
}

fn ata_program() -> Pubkey {
    Pubkey::from_str("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL").unwrap()
}

fn memo_program() -> Pubkey {
    Pubkey::from_str("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr").unwrap()
}

/// Assert length, order, and both flags of every account slot.
fn assert_metas(ix: &Instruction, expected: &[(Pubkey, bool, bool)]) {
    assert_eq!(ix.accounts.len(), expected.len(), "account list length");
    for (i, (meta, (pubkey, signer, writable))) in ix.accounts.iter().zip(expected).enumerate() {
        assert_eq!(meta.pubkey, *pubkey, "account {i} pubkey");
        assert_eq!(meta.is_signer, *signer, "account {i} signer flag");
        assert_eq!(meta.is_writable, *writable, "account {i} writable flag");
    }
}

fn assert_args(ix: &Instruction, disc: [u8; 8], args: &[u64]) {
    assert_eq!(&ix.data[..8], &disc, "discriminator prefix");
    assert_eq!(ix.data.len(), 8 + 8 * args.len(), "payload length");
    for (i, expected) in args.iter().enumerate() {
        assert_eq!(read_u64(&ix.data, 8 + 8 * i).unwrap(), *expected, "arg {i}");
    }
}

// ─── initialize ──────────────────────────────────────────────────────────────

struct InitKeys {
    program: Pubkey,
    creator: Pubkey,
    config: Pubkey,
    mint_a: Pubkey,
    mint_b: Pubkey,
    lp_mint: Pubkey,
    user_vault_a: Pubkey,
    user_vault_b: Pubkey,
    user_lp: Pubkey,
    vault_a: Pubkey,
    vault_b: Pubkey,
    fee_account: Pubkey,
    mint_program_a: Pubkey,
    mint_program_b: Pubkey,
    observation: Pubkey,
}

impl InitKeys {
    fn fresh() -> Self {
        Self {
            program: key(),
            creator: key(),
            config: key(),
            mint_a: key(),
            mint_b: key(),
            lp_mint: key(),
            user_vault_a: key(),
            user_vault_b: key(),
            user_lp: key(),
            vault_a: key(),
            vault_b: key(),
            fee_account: key(),
            mint_program_a: key(),
            mint_program_b: key(),
            observation: key(),
        }
    }

    fn build(&self, pool: Option<&Pubkey>, open_time: u128) -> Result<Instruction, Error> {
        initialize_pool_ix(
            &self.program,
            &self.creator,
            &self.config,
            None,
            pool,
            &self.mint_a,
            &self.mint_b,
            &self.lp_mint,
            &self.user_vault_a,
            &self.user_vault_b,
            &self.user_lp,
            &self.vault_a,
            &self.vault_b,
            &self.fee_account,
            &self.mint_program_a,
            &self.mint_program_b,
            &self.observation,
            111,
            222,
            open_time,
        )
    }
}

#[test]
fn initialize_schema_with_derived_pool_and_authority() {
    let k = InitKeys::fresh();
    let ix = k.build(None, 333).unwrap();

    let (derived_pool, _) = derive_pool(&k.program, &k.config, &k.mint_a, &k.mint_b).unwrap();
    let (derived_authority, _) = derive_authority(&k.program).unwrap();

    assert_args(&ix, discriminator::INITIALIZE, &[111, 222, 333]);
    assert_eq!(ix.program_id, k.program);
    assert_metas(
        &ix,
        &[
            (k.creator, true, false),
            (k.config, false, false),
            (derived_authority, false, false),
            // The derived pool PDA can never be an external signer.
            (derived_pool, false, true),
            (k.mint_a, false, false),
            (k.mint_b, false, false),
            (k.lp_mint, false, true),
            (k.user_vault_a, false, true),
            (k.user_vault_b, false, true),
            (k.user_lp, false, true),
            (k.vault_a, false, true),
            (k.vault_b, false, true),
            (k.fee_account, false, true),
            (k.observation, false, true),
            (spl_token(), false, false),
            (k.mint_program_a, false, false),
            (k.mint_program_b, false, false),
            (ata_program(), false, false),
            (system_program::ID, false, false),
            (sysvar::rent::ID, false, false),
        ],
    );
}

#[test]
fn initialize_marks_non_pda_pool_as_signer() {
    let k = InitKeys::fresh();
    let custom_pool = key();
    let ix = k.build(Some(&custom_pool), 0).unwrap();
    assert_eq!(ix.accounts[3].pubkey, custom_pool);
    assert!(ix.accounts[3].is_signer);
    assert!(ix.accounts[3].is_writable);

    let (derived_pool, _) = derive_pool(&k.program, &k.config, &k.mint_a, &k.mint_b).unwrap();
    let ix = k.build(Some(&derived_pool), 0).unwrap();
    assert!(!ix.accounts[3].is_signer);
}

#[test]
fn initialize_rejects_out_of_range_open_time() {
    let k = InitKeys::fresh();
    let err = k.build(None, TOO_BIG).unwrap_err();
    assert!(matches!(err, Error::ArgumentOutOfRange { field: "open_time", value } if value == TOO_BIG));
}

// ─── deposit / withdraw ──────────────────────────────────────────────────────

fn liquidity_keys() -> (Pubkey, [Pubkey; 10]) {
    (key(), [key(), key(), key(), key(), key(), key(), key(), key(), key(), key()])
}

#[test]
fn deposit_schema_and_round_trip() {
    let (program, [owner, authority, pool, user_lp, user_a, user_b, vault_a, vault_b, mint_a, mint_b]) =
        liquidity_keys();
    let lp_mint = key();

    let ix = deposit_ix(
        &program, &owner, Some(&authority), &pool, &user_lp, &user_a, &user_b, &vault_a,
        &vault_b, &mint_a, &mint_b, &lp_mint, 5_000, 1_000_000, 2_000_000,
    )
    .unwrap();

    assert_args(&ix, discriminator::DEPOSIT, &[5_000, 1_000_000, 2_000_000]);
    assert_metas(
        &ix,
        &[
            (owner, true, false),
            (authority, false, false),
            (pool, false, true),
            (user_lp, false, true),
            (user_a, false, true),
            (user_b, false, true),
            (vault_a, false, true),
            (vault_b, false, true),
            (spl_token(), false, false),
            (spl_token_2022(), false, false),
            (mint_a, false, false),
            (mint_b, false, false),
            (lp_mint, false, true),
        ],
    );
}

#[test]
fn withdraw_schema_appends_memo_program() {
    let (program, [owner, authority, pool, user_lp, user_a, user_b, vault_a, vault_b, mint_a, mint_b]) =
        liquidity_keys();
    let lp_mint = key();

    let ix = withdraw_ix(
        &program, &owner, Some(&authority), &pool, &user_lp, &user_a, &user_b, &vault_a,
        &vault_b, &mint_a, &mint_b, &lp_mint, 5_000, 900_000, 1_900_000,
    )
    .unwrap();

    assert_args(&ix, discriminator::WITHDRAW, &[5_000, 900_000, 1_900_000]);
    assert_metas(
        &ix,
        &[
            (owner, true, false),
            (authority, false, false),
            (pool, false, true),
            (user_lp, false, true),
            (user_a, false, true),
            (user_b, false, true),
            (vault_a, false, true),
            (vault_b, false, true),
            (spl_token(), false, false),
            (spl_token_2022(), false, false),
            (mint_a, false, false),
            (mint_b, false, false),
            (lp_mint, false, true),
            (memo_program(), false, false),
        ],
    );
}

#[test]
fn withdraw_rejects_out_of_range_amount() {
    let (program, [owner, authority, pool, user_lp, user_a, user_b, vault_a, vault_b, mint_a, mint_b]) =
        liquidity_keys();
    let lp_mint = key();

    let err = withdraw_ix(
        &program, &owner, Some(&authority), &pool, &user_lp, &user_a, &user_b, &vault_a,
        &vault_b, &mint_a, &mint_b, &lp_mint, 1, 2, TOO_BIG,
    )
    .unwrap_err();
    assert!(matches!(err, Error::ArgumentOutOfRange { field: "amount_min_b", .. }));
}

// ─── swap ────────────────────────────────────────────────────────────────────

struct SwapKeys {
    program: Pubkey,
    payer: Pubkey,
    config: Pubkey,
    pool: Pubkey,
    user_in: Pubkey,
    user_out: Pubkey,
    vault_in: Pubkey,
    vault_out: Pubkey,
    token_program_in: Pubkey,
    token_program_out: Pubkey,
    mint_in: Pubkey,
    mint_out: Pubkey,
    observation: Pubkey,
}

impl SwapKeys {
    fn fresh() -> Self {
        Self {
            program: key(),
            payer: key(),
            config: key(),
            pool: key(),
            user_in: key(),
            user_out: key(),
            vault_in: key(),
            vault_out: key(),
            token_program_in: key(),
            token_program_out: key(),
            mint_in: key(),
            mint_out: key(),
            observation: key(),
        }
    }

    fn expected_metas(&self, authority: Pubkey) -> Vec<(Pubkey, bool, bool)> {
        vec![
            (self.payer, true, false),
            (authority, false, false),
            (self.config, false, false),
            (self.pool, false, true),
            (self.user_in, false, true),
            (self.user_out, false, true),
            (self.vault_in, false, true),
            (self.vault_out, false, true),
            (self.token_program_in, false, false),
            (self.token_program_out, false, false),
            (self.mint_in, false, false),
            (self.mint_out, false, false),
            (self.observation, false, true),
        ]
    }
}

#[test]
fn swap_base_input_schema_and_round_trip() {
    let k = SwapKeys::fresh();
    let ix = swap_base_input_ix(
        &k.program, &k.payer, None, &k.config, &k.pool, &k.user_in, &k.user_out,
        &k.vault_in, &k.vault_out, &k.token_program_in, &k.token_program_out,
        &k.mint_in, &k.mint_out, &k.observation, 1_000_000, 995_000,
    )
    .unwrap();

    let (derived_authority, _) = derive_authority(&k.program).unwrap();
    assert_args(&ix, discriminator::SWAP_BASE_INPUT, &[1_000_000, 995_000]);
    assert_metas(&ix, &k.expected_metas(derived_authority));
}

#[test]
fn swap_base_output_shares_the_account_schema() {
    let k = SwapKeys::fresh();
    let authority = key();
    let input = swap_base_input_ix(
        &k.program, &k.payer, Some(&authority), &k.config, &k.pool, &k.user_in, &k.user_out,
        &k.vault_in, &k.vault_out, &k.token_program_in, &k.token_program_out,
        &k.mint_in, &k.mint_out, &k.observation, 7, 8,
    )
    .unwrap();
    let output = swap_base_output_ix(
        &k.program, &k.payer, Some(&authority), &k.config, &k.pool, &k.user_in, &k.user_out,
        &k.vault_in, &k.vault_out, &k.token_program_in, &k.token_program_out,
        &k.mint_in, &k.mint_out, &k.observation, 7, 8,
    )
    .unwrap();

    assert_eq!(input.accounts, output.accounts);
    assert_args(&output, discriminator::SWAP_BASE_OUTPUT, &[7, 8]);
    assert_ne!(input.data, output.data);
}

#[test]
fn swap_rejects_out_of_range_amount() {
    let k = SwapKeys::fresh();
    let err = swap_base_output_ix(
        &k.program, &k.payer, None, &k.config, &k.pool, &k.user_in, &k.user_out,
        &k.vault_in, &k.vault_out, &k.token_program_in, &k.token_program_out,
        &k.mint_in, &k.mint_out, &k.observation, 1, TOO_BIG,
    )
    .unwrap_err();
    assert!(matches!(err, Error::ArgumentOutOfRange { field: "amount_out", .. }));
}

// ─── discriminator table ─────────────────────────────────────────────────────

#[test]
fn discriminators_are_pairwise_distinct() {
    let table = [
        discriminator::INITIALIZE,
        discriminator::DEPOSIT,
        discriminator::WITHDRAW,
        discriminator::SWAP_BASE_INPUT,
        discriminator::SWAP_BASE_OUTPUT,
    ];
    for (i, a) in table.iter().enumerate() {
        for b in table.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}
