//! /history_agent の 1 リクエストを処理するユースケース

use crate::domain::{A2ARequest, A2AResponse, JsonRpcError};
use crate::domain::a2a::JSONRPC_VERSION;
use crate::ports::inbound::{A2AReply, HandleA2ARequest, ReplyStatus};
use crate::usecase::message_adapter::{decode_message, encode_reply};
use crate::usecase::tool_dispatch::ToolDispatch;
use common::ports::outbound::IdGenerator;
use serde_json::Value;
use std::sync::Arc;

pub struct HistoryAgentUseCase {
    dispatch: Arc<ToolDispatch>,
    ids: Arc<dyn IdGenerator>,
}

impl HistoryAgentUseCase {
    pub fn new(dispatch: Arc<ToolDispatch>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { dispatch, ids }
    }
}

fn reject(status: ReplyStatus, id: Value, error: JsonRpcError) -> A2AReply {
    A2AReply {
        status,
        body: A2AResponse::error(id, error),
    }
}

impl HandleA2ARequest for HistoryAgentUseCase {
    fn handle(&self, request: A2ARequest) -> A2AReply {
        let id = request.id.clone();

        if request.jsonrpc != JSONRPC_VERSION {
            tracing::warn!(jsonrpc = %request.jsonrpc, "rejected request with wrong protocol version");
            return reject(ReplyStatus::BadRequest, id, JsonRpcError::invalid_version());
        }

        let decoded = match decode_message(&request.params.message) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(error = %e, "rejected request without a usable first part");
                return reject(ReplyStatus::BadRequest, id, JsonRpcError::missing_part());
            }
        };

        tracing::debug!(history = decoded.history.len(), "handling history_agent request");
        match self
            .dispatch
            .generate(&decoded.prompt, &decoded.history.to_llm_messages())
        {
            Ok(text) => A2AReply {
                status: ReplyStatus::Ok,
                body: A2AResponse::success(id, encode_reply(self.ids.as_ref(), text)),
            },
            Err(e) => {
                tracing::error!(error = %e, "generation failed");
                reject(ReplyStatus::InternalError, id, JsonRpcError::internal())
            }
        }
    }
}
