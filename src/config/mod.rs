// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod settings;
mod validation;

pub use loader::{load_and_validate_config, load_config, TracingConfig};
pub use settings::TracingSettings;
pub use validation::validate_config;
