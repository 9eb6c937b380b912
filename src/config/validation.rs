// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation of tracing configuration.
//!
//! Every check runs and every problem is reported, so a broken config can be
//! fixed in one pass.

use super::TracingConfig;
use crate::errors::ValidationError;

pub fn validate_config(cfg: &TracingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if cfg.endpoint_name.trim().is_empty() {
        errors.push(ValidationError::EmptyEndpointName);
    }

    let mut message_types: Vec<&String> = cfg.routes.keys().collect();
    message_types.sort();

    for message_type in message_types {
        if message_type.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteMessageType);
            continue;
        }

        let destinations = &cfg.routes[message_type];
        if destinations.is_empty() || destinations.iter().any(|d| d.trim().is_empty()) {
            errors.push(ValidationError::EmptyRouteDestination {
                message_type: message_type.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
