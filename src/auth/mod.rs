// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! # Authentication Module
//!
//! Credential validation, session-token lifecycle and the orchestration of
//! directory calls.
//!
//! ## Auth Flow
//!
//! 1. Caller posts credentials to `/api/auth/login`
//! 2. The orchestrator checks them against the user directory
//! 3. The directory's claims are folded into a signed HS256 session token
//! 4. The token and user id are cached under the new session's keys
//! 5. Later calls present the token; the `Session` extractor verifies it and
//!    recovers the session id that keys the cached credentials
//!
//! ## Security
//!
//! - Tokens are pinned to HS256; other algorithms are rejected
//! - Expiry is enforced with zero clock-skew tolerance
//! - Verification failures never leak details beyond a short reason string

pub mod claim;
pub mod service;
pub mod session;
pub mod token;

pub use claim::Claim;
pub use service::AuthService;
pub use session::{Session, SessionContext};
pub use token::TokenService;
