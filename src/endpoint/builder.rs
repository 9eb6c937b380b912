// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;

use super::terminals::{DispatchToTransport, HandlerMap, InvokeHandler, InvokeHandlers};
use super::OutgoingDispatcher;
use crate::config::TracingSettings;
use crate::context::{IncomingContext, InvokeHandlerContext, OutgoingContext};
use crate::errors::{EndpointError, HandlerError, OrderingError};
use crate::logging::LoggerRegistry;
use crate::message::headers::ENCLOSED_MESSAGE_TYPES;
use crate::message::{DispatchedMessage, Headers, LogicalMessage, MessageIntent, RoutingStrategy, TransportMessage};
use crate::observability::messages::endpoint::{MessageProcessingFailed, MessageProcessingStarted};
use crate::observability::messages::StructuredLog;
use crate::pipeline::well_known::{DISPATCH_MESSAGE_TO_TRANSPORT, INVOKE_SAGA, MUTATE_INCOMING_MESSAGES};
use crate::pipeline::{Pipeline, PipelineBuilder, StepRegistration};
use crate::stages::{
    CaptureSagaResultingMessagesStage, CaptureSagaStateStage, ReceiveMessageStage, SendMessageStage,
};
use crate::traits::MessageHandler;

const DEFAULT_MACHINE: &str = "localhost";

/// Outcome of processing one received message.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Messages released by the handlers, in send order.
    pub dispatched: Vec<DispatchedMessage>,
    /// Incoming headers as left by the last handler invocation.
    pub headers: Headers,
}

/// Configures handlers, routes, and extra host steps for an [`Endpoint`].
pub struct EndpointBuilder {
    settings: TracingSettings,
    handlers: HandlerMap,
    routes: HashMap<String, Vec<String>>,
    incoming_steps: Vec<StepRegistration<IncomingContext>>,
    invoke_steps: Vec<StepRegistration<InvokeHandlerContext>>,
    outgoing_steps: Vec<StepRegistration<OutgoingContext>>,
}

impl EndpointBuilder {
    pub fn new(settings: TracingSettings) -> Self {
        let routes = settings.routes().clone();
        Self {
            settings,
            handlers: HashMap::new(),
            routes,
            incoming_steps: Vec::new(),
            invoke_steps: Vec::new(),
            outgoing_steps: Vec::new(),
        }
    }

    pub fn handler(mut self, message_type: impl Into<String>, handler: Arc<dyn MessageHandler>) -> Self {
        self.handlers.entry(message_type.into()).or_default().push(handler);
        self
    }

    /// Adds a destination for `send` of `message_type`.
    pub fn route(mut self, message_type: impl Into<String>, destination: impl Into<String>) -> Self {
        self.routes
            .entry(message_type.into())
            .or_default()
            .push(destination.into());
        self
    }

    pub fn incoming_step(mut self, registration: StepRegistration<IncomingContext>) -> Self {
        self.incoming_steps.push(registration);
        self
    }

    pub fn invoke_step(mut self, registration: StepRegistration<InvokeHandlerContext>) -> Self {
        self.invoke_steps.push(registration);
        self
    }

    pub fn outgoing_step(mut self, registration: StepRegistration<OutgoingContext>) -> Self {
        self.outgoing_steps.push(registration);
        self
    }

    /// Composes all three pipelines. Fails if any step constraints conflict.
    pub fn build(self) -> Result<Endpoint, EndpointError> {
        let settings = self.settings;
        let registry = Arc::new(
            LoggerRegistry::new(settings.effective_sink(), settings.endpoint_name())
                .with_minimum_level(settings.minimum_level()),
        );

        let mut outgoing = PipelineBuilder::new("outgoing").anchor(DISPATCH_MESSAGE_TO_TRANSPORT);
        if settings.message_audit() {
            outgoing.add(SendMessageStage::registration(Arc::clone(&registry)));
        }
        if settings.saga_audit() {
            outgoing.add(if settings.message_audit() {
                CaptureSagaResultingMessagesStage::registration()
            } else {
                CaptureSagaResultingMessagesStage::standalone_registration()
            });
        }
        for registration in self.outgoing_steps {
            outgoing.add(registration);
        }
        let outgoing = outgoing
            .build(Arc::new(DispatchToTransport))
            .map_err(|errors| composition_error("outgoing", errors))?;

        let machine = settings
            .originating_machine()
            .map(str::to_string)
            .or_else(|| std::env::var("HOSTNAME").ok())
            .unwrap_or_else(|| DEFAULT_MACHINE.to_string());

        let dispatcher = Arc::new(OutgoingDispatcher::new(
            outgoing,
            settings.endpoint_name(),
            machine,
            self.routes,
        ));

        let mut invoke = PipelineBuilder::new("handler").anchor(INVOKE_SAGA);
        if settings.saga_audit() {
            invoke.add(CaptureSagaStateStage::registration(&registry));
        }
        for registration in self.invoke_steps {
            invoke.add(registration);
        }
        let invoke = invoke
            .build(Arc::new(InvokeHandler))
            .map_err(|errors| composition_error("handler", errors))?;

        let handlers = Arc::new(self.handlers);

        let mut incoming = PipelineBuilder::new("incoming").anchor(MUTATE_INCOMING_MESSAGES);
        if settings.message_audit() {
            incoming.add(ReceiveMessageStage::registration(Arc::clone(&registry)));
        }
        for registration in self.incoming_steps {
            incoming.add(registration);
        }
        let invoke_handlers = Arc::new(InvokeHandlers::new(
            Arc::clone(&handlers),
            invoke,
            Arc::clone(&dispatcher),
        ));
        let incoming = incoming
            .build(invoke_handlers.clone())
            .map_err(|errors| composition_error("incoming", errors))?;

        Ok(Endpoint {
            name: settings.endpoint_name().to_string(),
            handlers,
            incoming,
            invoke_handlers,
            dispatcher,
        })
    }
}

fn composition_error(pipeline: &'static str, errors: Vec<OrderingError>) -> EndpointError {
    EndpointError::Composition { pipeline, errors }
}

/// An endpoint with its pipelines composed and ready to process messages.
pub struct Endpoint {
    name: String,
    handlers: Arc<HandlerMap>,
    incoming: Pipeline<IncomingContext>,
    invoke_handlers: Arc<InvokeHandlers>,
    dispatcher: Arc<OutgoingDispatcher>,
}

impl Endpoint {
    pub fn builder(settings: TracingSettings) -> EndpointBuilder {
        EndpointBuilder::new(settings)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn incoming_steps(&self) -> &[String] {
        self.incoming.step_ids()
    }

    pub fn handler_steps(&self) -> &[String] {
        self.invoke_handlers.pipeline().step_ids()
    }

    pub fn outgoing_steps(&self) -> &[String] {
        self.dispatcher.pipeline().step_ids()
    }

    /// Runs one received message through every registered handler.
    ///
    /// Handler errors come back unchanged inside [`EndpointError::Handler`];
    /// nothing sent by a failed message is released.
    pub async fn process(&self, transport: TransportMessage) -> Result<ProcessingResult, EndpointError> {
        let message_type = transport
            .message_type()
            .ok_or_else(|| EndpointError::MissingHeader {
                message_id: transport.message_id.clone(),
                header: ENCLOSED_MESSAGE_TYPES.to_string(),
            })?
            .to_string();

        let handler_count = self.handlers.get(&message_type).map_or(0, Vec::len);
        if handler_count == 0 {
            return Err(EndpointError::NoHandlers { message_type });
        }

        let started = MessageProcessingStarted {
            endpoint: &self.name,
            message_type: &message_type,
            message_id: &transport.message_id,
            handler_count,
        };
        let span = started.span("process_message");
        span.in_scope(|| started.log());

        let TransportMessage {
            message_id,
            headers,
            body,
        } = transport;
        let mut ctx = IncomingContext::new(message_id, headers, LogicalMessage::new(message_type, body));

        let outcome = self.incoming.invoke(&mut ctx).instrument(span.clone()).await;
        if let Err(error) = outcome {
            span.in_scope(|| {
                MessageProcessingFailed {
                    endpoint: &self.name,
                    message_id: &ctx.message_id,
                    error: &error,
                }
                .log()
            });
            return Err(error.into());
        }

        Ok(ProcessingResult {
            dispatched: ctx.dispatched,
            headers: ctx.headers,
        })
    }

    /// Sends a message from outside any handler, using the configured routes.
    pub async fn send<T: Serialize + ?Sized + Sync>(
        &self,
        message_type: &str,
        message: &T,
    ) -> Result<Option<DispatchedMessage>, EndpointError> {
        let routing: Vec<RoutingStrategy> = self
            .dispatcher
            .routes_for(message_type)
            .iter()
            .map(RoutingStrategy::unicast)
            .collect();

        if routing.is_empty() {
            return Err(HandlerError::NoRoute {
                message_type: message_type.to_string(),
            }
            .into());
        }

        self.dispatch_outside_handler(message_type, message, routing).await
    }

    /// Sends a message to this endpoint's own queue.
    pub async fn send_local<T: Serialize + ?Sized + Sync>(
        &self,
        message_type: &str,
        message: &T,
    ) -> Result<Option<DispatchedMessage>, EndpointError> {
        let routing = vec![RoutingStrategy::unicast(self.name.as_str())];
        self.dispatch_outside_handler(message_type, message, routing).await
    }

    async fn dispatch_outside_handler<T: Serialize + ?Sized + Sync>(
        &self,
        message_type: &str,
        message: &T,
        routing: Vec<RoutingStrategy>,
    ) -> Result<Option<DispatchedMessage>, EndpointError> {
        let logical = LogicalMessage::from_serializable(message_type, message).map_err(|source| {
            HandlerError::Serialization {
                message_type: message_type.to_string(),
                source,
            }
        })?;

        let dispatched = self
            .dispatcher
            .dispatch(logical, MessageIntent::Send, routing, &mut None)
            .await?;
        Ok(dispatched)
    }
}
