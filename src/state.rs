// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

use std::sync::Arc;

use crate::auth::AuthService;
use crate::directory::DirectoryClient;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    /// Kept alongside the orchestrator for readiness probes.
    pub directory: DirectoryClient,
}

impl AppState {
    pub fn new(auth: AuthService, directory: DirectoryClient) -> Self {
        Self {
            auth: Arc::new(auth),
            directory,
        }
    }
}
