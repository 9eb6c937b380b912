// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Two endpoints exchanging messages with message and saga auditing on.
//!
//! Audit events go through the `tracing` sink, so run with e.g.
//! `RUST_LOG=bus_tracing::audit=info` to see them. An optional YAML config
//! path configures the Sales endpoint.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bus_tracing::config::{load_and_validate_config, TracingSettings};
use bus_tracing::context::InvokeHandlerContext;
use bus_tracing::endpoint::Endpoint;
use bus_tracing::errors::HandlerError;
use bus_tracing::logging::sinks::TracingSink;
use bus_tracing::message::headers::{ENCLOSED_MESSAGE_TYPES, MESSAGE_ID, SAGA_STATE_CHANGE};
use bus_tracing::message::{Headers, LogicalMessage, TransportMessage};
use bus_tracing::saga::ActiveSagaInstance;
use bus_tracing::traits::MessageHandler;

#[derive(Debug, Serialize, Deserialize)]
struct CreateUser {
    user_name: String,
    family_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Confirm {
    user_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OrderSagaData {
    user_name: String,
    confirmed: bool,
}

/// Started by `CreateUser`, completed by `Confirmed`.
struct OrderSaga;

#[async_trait]
impl MessageHandler for OrderSaga {
    fn name(&self) -> &str {
        "OrderSaga"
    }

    fn activate_saga(&self, message: &LogicalMessage, _headers: &Headers) -> Option<ActiveSagaInstance> {
        let user_name = message.body()["user_name"].as_str()?.to_string();
        let entity = json!({ "user_name": user_name, "confirmed": false });
        let saga_id = format!("order-{}", user_name);

        match message.message_type() {
            "CreateUser" => Some(ActiveSagaInstance::started("OrderSaga", saga_id, entity)),
            "Confirmed" => Some(ActiveSagaInstance::new("OrderSaga", saga_id, entity)),
            _ => None,
        }
    }

    async fn handle(&self, ctx: &mut InvokeHandlerContext) -> Result<(), HandlerError> {
        match ctx.message.message_type() {
            "CreateUser" => {
                let command: CreateUser = ctx
                    .message
                    .deserialize()
                    .map_err(|e| HandlerError::failed(self.name(), e.to_string()))?;
                ctx.send("Confirm", &Confirm { user_name: command.user_name }).await
            }
            _ => {
                let Some(saga) = ctx.saga_mut() else {
                    return Ok(());
                };
                let mut data: OrderSagaData = saga
                    .entity_as()
                    .map_err(|e| HandlerError::failed("OrderSaga", e.to_string()))?;
                data.confirmed = true;
                saga.set_entity(&data)
                    .map_err(|e| HandlerError::failed("OrderSaga", e.to_string()))?;
                saga.mark_as_complete();
                Ok(())
            }
        }
    }
}

/// Replies `Confirmed` to every `Confirm`.
struct ConfirmHandler;

#[async_trait]
impl MessageHandler for ConfirmHandler {
    fn name(&self) -> &str {
        "ConfirmHandler"
    }

    async fn handle(&self, ctx: &mut InvokeHandlerContext) -> Result<(), HandlerError> {
        let user_name = ctx.message.body()["user_name"].clone();
        ctx.reply("Confirmed", &json!({ "user_name": user_name })).await
    }
}

fn sales_settings(config_path: Option<&str>) -> Result<TracingSettings> {
    let sink = Arc::new(TracingSink::default());
    match config_path {
        Some(path) => {
            let cfg = load_and_validate_config(path)
                .with_context(|| format!("loading tracing config from {}", path))?;
            Ok(TracingSettings::from_config(&cfg, sink))
        }
        None => Ok(TracingSettings::new("Sales", sink)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bus_tracing=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = env::args().nth(1);

    let sales = Endpoint::builder(sales_settings(config_path.as_deref())?)
        .handler("CreateUser", Arc::new(OrderSaga))
        .handler("Confirmed", Arc::new(OrderSaga))
        .route("Confirm", "Billing")
        .build()?;

    let billing = Endpoint::builder(TracingSettings::new("Billing", Arc::new(TracingSink::default())))
        .handler("Confirm", Arc::new(ConfirmHandler))
        .build()?;

    tracing::info!(steps = ?sales.incoming_steps(), "sales incoming pipeline");
    tracing::info!(steps = ?sales.handler_steps(), "sales handler pipeline");
    tracing::info!(steps = ?sales.outgoing_steps(), "sales outgoing pipeline");

    let mut headers = Headers::new();
    headers.insert(MESSAGE_ID.to_string(), "m1".to_string());
    headers.insert(ENCLOSED_MESSAGE_TYPES.to_string(), "CreateUser".to_string());
    let create_user = TransportMessage::new(
        "m1",
        headers,
        serde_json::to_value(CreateUser {
            user_name: "jsmith".to_string(),
            family_name: "Smith".to_string(),
        })?,
    );

    let mut in_flight = sales.process(create_user).await?.dispatched;
    let mut hops = 0;

    while let Some(outgoing) = in_flight.pop() {
        hops += 1;
        if hops > 10 {
            bail!("message exchange did not settle");
        }

        let destination = outgoing.destinations().first().map(|d| d.to_string());
        let endpoint = match destination.as_deref() {
            Some("Sales") => &sales,
            Some("Billing") => &billing,
            other => bail!("no endpoint listening at {:?}", other),
        };

        let result = endpoint.process(outgoing.message).await?;
        println!(
            "{} handled a message; saga lineage: {}",
            endpoint.name(),
            result
                .headers
                .get(SAGA_STATE_CHANGE)
                .map(String::as_str)
                .unwrap_or("<none>")
        );
        in_flight.extend(result.dispatched);
    }

    Ok(())
}
