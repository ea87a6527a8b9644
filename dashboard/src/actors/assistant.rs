//! AssistantActor - the scripted compliance chat widget.
//!
//! The assistant's natural-language logic is an external collaborator; this
//! actor owns only the transcript and the single-turn `ask` contract over
//! the [`ReplyScript`] seam. The shipped script answers every question with
//! the demo text after a simulated thinking delay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use shared_types::ChatMessage;

const GREETING: &str = "Hi! Ask me any compliance question for your MSME.";
const CANNED_REPLY: &str = "(Demo) I'd analyze latest rules (GST/Labour/Safety) for your \
                            sector and summarize what applies to you.";

// ============================================================================
// Reply Seam
// ============================================================================

/// Single-turn reply provider. No conversation-state dependency: the input
/// is one user question, the output one assistant answer.
#[async_trait]
pub trait ReplyScript: Send + Sync {
    async fn reply(&self, question: &str) -> Result<String, AssistantError>;
}

/// The demo script: fixed answer, fixed thinking delay.
#[derive(Debug, Clone)]
pub struct CannedScript {
    pub latency: Duration,
}

impl Default for CannedScript {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(400),
        }
    }
}

#[async_trait]
impl ReplyScript for CannedScript {
    async fn reply(&self, _question: &str) -> Result<String, AssistantError> {
        tokio::time::sleep(self.latency).await;
        Ok(CANNED_REPLY.to_string())
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Messages handled by AssistantActor
#[derive(Debug)]
pub enum AssistantMsg {
    /// One user question; replies with the assistant's turn
    Ask {
        text: String,
        reply: RpcReplyPort<Result<ChatMessage, AssistantError>>,
    },
    /// The transcript for display, oldest first
    GetTranscript {
        reply: RpcReplyPort<Vec<ChatMessage>>,
    },
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistantError {
    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error("assistant backend error: {0}")]
    Backend(String),
}

// ============================================================================
// Actor Implementation
// ============================================================================

/// Actor owning the chat transcript
#[derive(Debug, Default)]
pub struct AssistantActor;

/// Arguments for spawning AssistantActor
pub struct AssistantArguments {
    pub script: Arc<dyn ReplyScript>,
}

pub struct AssistantState {
    script: Arc<dyn ReplyScript>,
    transcript: Vec<ChatMessage>,
}

#[async_trait]
impl Actor for AssistantActor {
    type Msg = AssistantMsg;
    type State = AssistantState;
    type Arguments = AssistantArguments;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(actor_id = %myself.get_id(), "AssistantActor starting");

        Ok(AssistantState {
            script: args.script,
            transcript: vec![ChatMessage::assistant(GREETING)],
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            AssistantMsg::Ask { text, reply } => {
                let _ = reply.send(self.ask(text, state).await);
            }
            AssistantMsg::GetTranscript { reply } => {
                let _ = reply.send(state.transcript.clone());
            }
        }
        Ok(())
    }
}

impl AssistantActor {
    async fn ask(
        &self,
        text: String,
        state: &mut AssistantState,
    ) -> Result<ChatMessage, AssistantError> {
        let question = text.trim();
        if question.is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }

        state.transcript.push(ChatMessage::user(question));

        let answer = state.script.reply(question).await?;
        let message = ChatMessage::assistant(answer);
        state.transcript.push(message.clone());
        Ok(message)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convenience function to ask one question
pub async fn ask(
    assistant: &ActorRef<AssistantMsg>,
    text: impl Into<String>,
) -> Result<Result<ChatMessage, AssistantError>, ractor::RactorErr<AssistantMsg>> {
    let text = text.into();
    ractor::call!(assistant, |reply| AssistantMsg::Ask { text, reply })
}

/// Convenience function to read the transcript
pub async fn transcript(
    assistant: &ActorRef<AssistantMsg>,
) -> Result<Vec<ChatMessage>, ractor::RactorErr<AssistantMsg>> {
    ractor::call!(assistant, |reply| AssistantMsg::GetTranscript { reply })
}

// ============================================================================
// Tests
// ============================================================================
