//! Normalized pool-state records exposed to routing and pricing consumers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

// ─── Pool model ──────────────────────────────────────────────────────────────

/// The three recognized pool models. Dispatch is closed; tags outside this
/// set are rejected at parse time rather than falling through to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolModel {
    /// Legacy constant-product pool (Raydium Liquidity Pool V4).
    Amm,
    /// Constant-product pool with the fee variant (CP-Swap).
    Cpmm,
    /// Concentrated-liquidity pool.
    Clmm,
}

impl FromStr for PoolModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "amm" => Ok(Self::Amm),
            "cpmm" => Ok(Self::Cpmm),
            "clmm" => Ok(Self::Clmm),
            other => Err(Error::UnknownPoolModel(other.to_string())),
        }
    }
}

impl fmt::Display for PoolModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Amm => "amm",
            Self::Cpmm => "cpmm",
            Self::Clmm => "clmm",
        })
    }
}

// ─── Normalized state records ────────────────────────────────────────────────

/// Reserves and spot price of a constant-product pool (AMM or CPMM).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantProductState {
    pub base_reserve:  u64,
    pub quote_reserve: u64,
    pub pool_price:    f64,
}

/// Tick, liquidity, and price data of a concentrated-liquidity pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentratedState {
    pub tick_current:   i32,
    pub liquidity:      u64,
    /// Current sqrt price in Q64.64 fixed point.
    pub sqrt_price_x64: u128,
    /// One bit per initialized tick array; raw words, not interpreted here.
    pub tick_array_bitmap: [u64; 16],
    pub current_price:  f64,
}

/// Model-specific state. The variant is fully determined by the requested
/// [`PoolModel`]; fields from other models never appear together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PoolStateRecord {
    ConstantProduct(ConstantProductState),
    Concentrated(ConcentratedState),
}

/// A pool-state read observed at a specific ledger slot.
///
/// `slot` is the response-context slot of the pool-account read and is
/// monotonically non-decreasing across successful queries against a
/// non-rewinding RPC node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSnapshot {
    pub state: PoolStateRecord,
    pub slot:  u64,
}
