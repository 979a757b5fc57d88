//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// All errors returned by the Raydium pool SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Instruction encoding ─────────────────────────────────────────────────
    /// A caller-supplied numeric argument does not fit the u64 wire field it
    /// encodes into. Never clamped; the argument buffer is not produced.
    #[error("Argument `{field}` = {value} exceeds the u64 wire width")]
    ArgumentOutOfRange { field: &'static str, value: u128 },

    // ── Address derivation ───────────────────────────────────────────────────
    /// No valid off-curve bump within the 256-attempt search range. This is a
    /// configuration or programming defect, not a transient failure.
    #[error("Program address derivation exhausted the bump search space")]
    DerivationExhausted,

    // ── State normalization ──────────────────────────────────────────────────
    /// An on-chain magnitude does not fit the normalized output type.
    /// Distinct from a zero or missing value.
    #[error("On-chain magnitude `{field}` exceeds the representable output range")]
    MagnitudeOverflow { field: &'static str },

    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    AccountParse { offset: usize, reason: String },

    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed; propagated unchanged, never retried.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    /// The query returned no account for the requested pool id.
    #[error("Pool not found: {0}")]
    PoolNotFound(Pubkey),

    // ── Model dispatch ───────────────────────────────────────────────────────
    /// A pool model tag outside `amm` / `cpmm` / `clmm`.
    #[error("Unknown pool model tag: {0:?}")]
    UnknownPoolModel(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
