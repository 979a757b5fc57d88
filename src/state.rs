//! Raw on-chain account deserialization.
//!
//! Byte offsets mirror the published account layouts of the three Raydium
//! pool programs. Only the fields the normalizer consumes are decoded; the
//! rest of each account is left untouched.

use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};

// ─── AMM V4 pool (legacy constant product) ───────────────────────────────────

/// Fields of the 752-byte `AmmInfo` account used for reserve computation.
///
/// Layout (no discriminator; native program):
/// ```text
/// status(8) nonce(8) order_num(8) depth(8) coin_decimals(8) pc_decimals(8)
/// … fees(64) @128 … need_take_pnl_coin(8) @192 need_take_pnl_pc(8) @200
/// … coin_vault(32) @336 pc_vault(32) @368 … = 752 bytes
/// ```
#[derive(Debug, Clone)]
pub struct AmmPoolLayout {
    pub coin_decimals:      u64,
    pub pc_decimals:        u64,
    /// Accrued PnL earmarked for withdrawal; not part of the live reserve.
    pub need_take_pnl_coin: u64,
    pub need_take_pnl_pc:   u64,
    pub coin_vault:         Pubkey,
    pub pc_vault:           Pubkey,
}

/// Size of the V4 `AmmInfo` account.
pub const AMM_POOL_LEN: usize = 752;

/// Deserialize a V4 `AmmInfo` account from raw bytes.
pub fn parse_amm_pool(data: &[u8]) -> Result<AmmPoolLayout> {
    if data.len() < AMM_POOL_LEN {
        return Err(Error::AccountParse {
            offset: 0,
            reason: format!("AMM pool account is {} bytes; expected {}", data.len(), AMM_POOL_LEN),
        });
    }
    Ok(AmmPoolLayout {
        coin_decimals:      read_u64(data, 32)?,
        pc_decimals:        read_u64(data, 40)?,
        need_take_pnl_coin: read_u64(data, 192)?,
        need_take_pnl_pc:   read_u64(data, 200)?,
        coin_vault:         read_pubkey(data, 336)?,
        pc_vault:           read_pubkey(data, 368)?,
    })
}

// ─── CP-Swap pool ────────────────────────────────────────────────────────────

/// Fields of the CP-Swap `PoolState` account used for reserve computation.
///
/// Layout (after the 8-byte Anchor discriminator):
/// ```text
/// amm_config(32) pool_creator(32) token_0_vault(32) @72 token_1_vault(32) @104
/// lp_mint(32) token_0_mint(32) token_1_mint(32) token_0_program(32)
/// token_1_program(32) observation_key(32) auth_bump(1) status(1)
/// lp_mint_decimals(1) mint_0_decimals(1) @331 mint_1_decimals(1) @332
/// lp_supply(8) protocol_fees_token_0(8) @341 protocol_fees_token_1(8) @349
/// fund_fees_token_0(8) @357 fund_fees_token_1(8) @365 open_time(8) …
/// ```
#[derive(Debug, Clone)]
pub struct CpmmPoolLayout {
    pub token_0_vault:         Pubkey,
    pub token_1_vault:         Pubkey,
    pub mint_0_decimals:       u8,
    pub mint_1_decimals:       u8,
    /// Fee balances held inside the vaults; excluded from the live reserve.
    pub protocol_fees_token_0: u64,
    pub protocol_fees_token_1: u64,
    pub fund_fees_token_0:     u64,
    pub fund_fees_token_1:     u64,
}

/// Minimum decodable length of a CP-Swap `PoolState` account.
pub const CPMM_POOL_MIN_LEN: usize = 381;

/// Deserialize a CP-Swap `PoolState` account from raw bytes.
pub fn parse_cpmm_pool(data: &[u8]) -> Result<CpmmPoolLayout> {
    if data.len() < CPMM_POOL_MIN_LEN {
        return Err(Error::AccountParse {
            offset: 0,
            reason: format!(
                "CPMM pool account is {} bytes; expected at least {}",
                data.len(),
                CPMM_POOL_MIN_LEN
            ),
        });
    }
    Ok(CpmmPoolLayout {
        token_0_vault:         read_pubkey(data, 72)?,
        token_1_vault:         read_pubkey(data, 104)?,
        mint_0_decimals:       data[331],
        mint_1_decimals:       data[332],
        protocol_fees_token_0: read_u64(data, 341)?,
        protocol_fees_token_1: read_u64(data, 349)?,
        fund_fees_token_0:     read_u64(data, 357)?,
        fund_fees_token_1:     read_u64(data, 365)?,
    })
}

// ─── CLMM pool (concentrated liquidity) ──────────────────────────────────────

/// Fields of the CLMM `PoolState` account used for normalization.
///
/// Layout (after the 8-byte Anchor discriminator):
/// ```text
/// bump(1) amm_config(32) owner(32) token_mint_0(32) token_mint_1(32)
/// token_vault_0(32) token_vault_1(32) observation_key(32)
/// mint_decimals_0(1) @233 mint_decimals_1(1) @234 tick_spacing(2)
/// liquidity(16) @237 sqrt_price_x64(16) @253 tick_current(4) @269
/// … reward_infos(169 × 3) … tick_array_bitmap(8 × 16) @904
/// ```
#[derive(Debug, Clone)]
pub struct ClmmPoolLayout {
    pub mint_decimals_0:   u8,
    pub mint_decimals_1:   u8,
    pub tick_current:      i32,
    pub liquidity:         u128,
    pub sqrt_price_x64:    u128,
    /// One bit per tick array around the current tick; raw words.
    pub tick_array_bitmap: [u64; 16],
}

/// Minimum decodable length of a CLMM `PoolState` account.
pub const CLMM_POOL_MIN_LEN: usize = 1032;

/// Deserialize a CLMM `PoolState` account from raw bytes.
pub fn parse_clmm_pool(data: &[u8]) -> Result<ClmmPoolLayout> {
    if data.len() < CLMM_POOL_MIN_LEN {
        return Err(Error::AccountParse {
            offset: 0,
            reason: format!(
                "CLMM pool account is {} bytes; expected at least {}",
                data.len(),
                CLMM_POOL_MIN_LEN
            ),
        });
    }
    let mut tick_array_bitmap = [0u64; 16];
    for (i, word) in tick_array_bitmap.iter_mut().enumerate() {
        *word = read_u64(data, 904 + i * 8)?;
    }
    Ok(ClmmPoolLayout {
        mint_decimals_0: data[233],
        mint_decimals_1: data[234],
        tick_current:    read_i32(data, 269)?,
        liquidity:       read_u128(data, 237)?,
        sqrt_price_x64:  read_u128(data, 253)?,
        tick_array_bitmap,
    })
}

// ─── SPL token account ───────────────────────────────────────────────────────

/// Read the `amount` field from a packed SPL token account.
///
/// Token account layout: `mint(32) owner(32) amount(8) …`
pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    if data.len() < 72 {
        return Err(Error::AccountParse {
            offset: 64,
            reason: format!("token account is {} bytes; need at least 72", data.len()),
        });
    }
    read_u64(data, 64)
}

// ─── Byte-slice primitives ───────────────────────────────────────────────────

pub fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    let b: [u8; 32] = data
        .get(offset..offset + 32)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::AccountParse {
            offset,
            reason: "slice too short for Pubkey (32 bytes)".into(),
        })?;
    Ok(Pubkey::from(b))
}

pub fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    let b: [u8; 8] = data
        .get(offset..offset + 8)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::AccountParse { offset, reason: "slice too short for u64".into() })?;
    Ok(u64::from_le_bytes(b))
}

pub fn read_u128(data: &[u8], offset: usize) -> Result<u128> {
    let b: [u8; 16] = data
        .get(offset..offset + 16)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::AccountParse { offset, reason: "slice too short for u128".into() })?;
    Ok(u128::from_le_bytes(b))
}

pub fn read_i32(data: &[u8], offset: usize) -> Result<i32> {
    let b: [u8; 4] = data
        .get(offset..offset + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::AccountParse { offset, reason: "slice too short for i32".into() })?;
    Ok(i32::from_le_bytes(b))
}
