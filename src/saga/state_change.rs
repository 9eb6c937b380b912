// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt::{Display, Formatter};

use crate::message::headers::{Headers, SAGA_STATE_CHANGE};

/// What one handler invocation did to a saga instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SagaStateChange {
    New,
    Updated,
    Completed,
}

impl SagaStateChange {
    /// Completion wins over creation, creation over update.
    pub fn resolve(is_new: bool, is_completed: bool) -> Self {
        if is_completed {
            SagaStateChange::Completed
        } else if is_new {
            SagaStateChange::New
        } else {
            SagaStateChange::Updated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SagaStateChange::New => "New",
            SagaStateChange::Updated => "Updated",
            SagaStateChange::Completed => "Completed",
        }
    }
}

impl Display for SagaStateChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appends `<saga_id>:<change>` to the lineage header and returns the new value.
pub fn append_saga_state_change(
    headers: &mut Headers,
    saga_id: &str,
    change: SagaStateChange,
) -> String {
    let marker = format!("{}:{}", saga_id, change);
    let value = match headers.get(SAGA_STATE_CHANGE) {
        Some(existing) if !existing.is_empty() => format!("{};{}", existing, marker),
        _ => marker,
    };
    headers.insert(SAGA_STATE_CHANGE.to_string(), value.clone());
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table_driven() {
        let test_cases = vec![
            (false, false, SagaStateChange::Updated),
            (true, false, SagaStateChange::New),
            (false, true, SagaStateChange::Completed),
            (true, true, SagaStateChange::Completed),
        ];

        for (is_new, is_completed, expected) in test_cases {
            assert_eq!(
                SagaStateChange::resolve(is_new, is_completed),
                expected,
                "is_new={} is_completed={}",
                is_new,
                is_completed
            );
        }
    }

    #[test]
    fn markers_accumulate_across_touches() {
        let mut headers = Headers::new();

        assert_eq!(
            append_saga_state_change(&mut headers, "s1", SagaStateChange::New),
            "s1:New"
        );
        assert_eq!(
            append_saga_state_change(&mut headers, "s1", SagaStateChange::Completed),
            "s1:New;s1:Completed"
        );
        assert_eq!(headers[SAGA_STATE_CHANGE], "s1:New;s1:Completed");
    }

    #[test]
    fn empty_header_is_treated_as_absent() {
        let mut headers = Headers::new();
        headers.insert(SAGA_STATE_CHANGE.to_string(), String::new());

        assert_eq!(
            append_saga_state_change(&mut headers, "s9", SagaStateChange::Updated),
            "s9:Updated"
        );
    }
}
