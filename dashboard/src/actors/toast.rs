//! ToastActor - ephemeral status message with supersession-safe expiry.
//!
//! Every notification bumps a generation counter and schedules its own
//! expiry. An expiry carrying an older generation is ignored, so a newer
//! toast is never cleared by the timer of the message it replaced.

use std::time::Duration;

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};

// ============================================================================
// Messages
// ============================================================================

/// Messages handled by ToastActor
#[derive(Debug)]
pub enum ToastMsg {
    /// Show a message, replacing whatever is currently visible
    Notify { message: String, duration: Duration },
    /// Scheduled expiry for the notification of a given generation
    Expire { generation: u64 },
    /// The currently visible message, if any
    Current {
        reply: RpcReplyPort<Option<String>>,
    },
}

// ============================================================================
// Actor Implementation
// ============================================================================

/// Actor owning the toast slot
#[derive(Debug, Default)]
pub struct ToastActor;

#[derive(Default)]
pub struct ToastState {
    current: Option<String>,
    generation: u64,
}

#[async_trait]
impl Actor for ToastActor {
    type Msg = ToastMsg;
    type State = ToastState;
    type Arguments = ();

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        _args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        Ok(ToastState::default())
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            ToastMsg::Notify { message, duration } => {
                state.generation += 1;
                let generation = state.generation;
                tracing::debug!(generation, %message, "Toast shown");
                state.current = Some(message);

                let toast = myself.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    let _ = toast.cast(ToastMsg::Expire { generation });
                });
            }
            ToastMsg::Expire { generation } => {
                if generation == state.generation {
                    state.current = None;
                } else {
                    // Timer of a superseded toast; the newer one stays up.
                    tracing::debug!(
                        generation,
                        current = state.generation,
                        "Ignoring expired toast timer"
                    );
                }
            }
            ToastMsg::Current { reply } => {
                let _ = reply.send(state.current.clone());
            }
        }
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convenience function to show a toast
pub fn notify(
    toast: &ActorRef<ToastMsg>,
    message: impl Into<String>,
    duration: Duration,
) -> Result<(), ractor::RactorErr<ToastMsg>> {
    toast
        .cast(ToastMsg::Notify {
            message: message.into(),
            duration,
        })
        .map_err(ractor::RactorErr::from)
}

/// Convenience function to read the visible toast
pub async fn current(
    toast: &ActorRef<ToastMsg>,
) -> Result<Option<String>, ractor::RactorErr<ToastMsg>> {
    ractor::call!(toast, |reply| ToastMsg::Current { reply })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_toast() -> ActorRef<ToastMsg> {
        let (toast, _handle) = Actor::spawn(None, ToastActor, ()).await.unwrap();
        toast
    }

    // ========================================================================
    // Test 1: A toast auto-clears after its duration
    // ========================================================================

    #[tokio::test]
    async fn test_toast_expires() {
        let toast = spawn_toast().await;

        notify(&toast, "Profile saved ✔", Duration::from_millis(40)).unwrap();
        assert_eq!(
            current(&toast).await.unwrap(),
            Some("Profile saved ✔".to_string())
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(current(&toast).await.unwrap(), None);

        toast.stop(None);
    }

    // ========================================================================
    // Test 2: A superseded toast's timer never clears the newer toast
    // ========================================================================

    #[tokio::test]
    async fn test_supersession_invalidates_old_timer() {
        let toast = spawn_toast().await;

        notify(&toast, "first", Duration::from_millis(40)).unwrap();
        notify(&toast, "second", Duration::from_millis(300)).unwrap();

        // Past the first toast's expiry, well before the second's
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(current(&toast).await.unwrap(), Some("second".to_string()));

        // And the second still expires on its own schedule
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(current(&toast).await.unwrap(), None);

        toast.stop(None);
    }
}
