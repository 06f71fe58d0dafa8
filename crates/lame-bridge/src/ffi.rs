//! C-compatible API over process-wide encoder and decoder sessions.
//!
//! Each exported function drives one of two global slots, an encoder slot
//! and a decoder slot, each holding at most one live session. Statuses are
//! plain `int`s: non-negative on success, `-1` for state conflicts and
//! retryable conditions, the codec's own negative value for codec errors,
//! and `LMB_STATUS_*` codes at `-100` and below for bridge errors.
//!
//! # Symbol prefix
//!
//! - Functions: `lmb_*`
//! - Types: `Lmb*`
//!
//! # Buffers
//!
//! Buffers are borrowed for the duration of a call only. Inputs are used in
//! place; outputs are written only when the call succeeds.
//!
//! # Thread safety
//!
//! Calls on the same slot are serialized internally, but the slots model a
//! single logical caller per session: interleaving two callers' streams on
//! one slot produces interleaved codec state.

pub mod types;

#[cfg_attr(not(feature = "lame"), allow(dead_code))]
mod conversions;
#[cfg(feature = "lame")]
pub mod functions;
#[cfg_attr(not(feature = "lame"), allow(unused))]
mod panic_guard;
#[cfg_attr(not(feature = "lame"), allow(dead_code))]
mod sessions;
