// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod handler;
pub mod sink;
pub mod stage;

pub use handler::MessageHandler;
pub use sink::LogSink;
pub use stage::{Stage, Terminal};
