//! # Billing Engine
//!
//! Async front door for a billing session. Owns the [`Session`] inside a
//! single spawned task and serializes every command through one mpsc queue,
//! so keyboard handlers, click handlers and lookup callbacks can all talk to
//! the same cart without locking.
//!
//! ## Engine Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      BillingEngine Architecture                         │
//! │                                                                         │
//! │   EngineHandle (Clone)      EngineHandle (Clone)                        │
//! │   keyboard handler          search-result click                         │
//! │         │                         │                                     │
//! │         └───────────┬─────────────┘                                     │
//! │                     ▼  mpsc (single consumer)                           │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                       engine task                                │  │
//! │  │                                                                  │  │
//! │  │   Session (cart, held bills, view state)                        │  │
//! │  │      │                                                           │  │
//! │  │      ├── Effect::IssueSearch ──► spawned lookup task ──┐        │  │
//! │  │      │      (bounded by lookup_timeout)                │        │  │
//! │  │      │                                                 │        │  │
//! │  │      │   completions (seq-tagged) ◄────────────────────┘        │  │
//! │  │      │      stale seq → dropped (last write wins)               │  │
//! │  │      │                                                           │  │
//! │  │      └── Effect::SubmitBill ──► awaited INLINE, so no other     │  │
//! │  │          command interleaves with a save                        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Dropping every handle closes the queue and stops the task.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, warn};

use billdesk_core::{CatalogItem, SEARCH_RESULT_LIMIT};

use crate::command::Command;
use crate::error::{EngineError, EngineResult};
use crate::gateway::{BillSubmitter, GatewayError, ItemLookup};
use crate::session::{Effect, Session, SessionView};

// =============================================================================
// Configuration
// =============================================================================

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deadline for one item lookup call. A timeout is treated exactly like
    /// a gateway failure: empty results, session keeps running.
    pub lookup_timeout: Duration,

    /// Ask the gateway for in-stock items only.
    pub in_stock_only: bool,

    /// Command queue depth.
    pub command_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            lookup_timeout: Duration::from_secs(3),
            in_stock_only: true,
            command_buffer: 32,
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

enum Msg {
    Dispatch {
        command: Command,
        reply: oneshot::Sender<EngineResult<SessionView>>,
    },
    View {
        reply: oneshot::Sender<SessionView>,
    },
}

type LookupDone = (u64, Result<Vec<CatalogItem>, GatewayError>);

// =============================================================================
// Handle
// =============================================================================

/// Cloneable handle to a running billing engine.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Msg>,
}

impl EngineHandle {
    /// Sends one command and awaits the resulting session snapshot.
    pub async fn dispatch(&self, command: Command) -> EngineResult<SessionView> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Msg::Dispatch { command, reply })
            .await
            .map_err(|_| EngineError::Closed)?;
        rx.await.map_err(|_| EngineError::Closed)?
    }

    /// Reads the current session snapshot without mutating anything.
    pub async fn view(&self) -> EngineResult<SessionView> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Msg::View { reply })
            .await
            .map_err(|_| EngineError::Closed)?;
        rx.await.map_err(|_| EngineError::Closed)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Spawns the engine task and returns a handle to it.
pub struct BillingEngine;

impl BillingEngine {
    pub fn spawn(
        lookup: Arc<dyn ItemLookup>,
        submitter: Arc<dyn BillSubmitter>,
        config: EngineConfig,
    ) -> EngineHandle {
        let (tx, rx) = mpsc::channel(config.command_buffer);
        tokio::spawn(run(rx, lookup, submitter, config));
        EngineHandle { tx }
    }
}

async fn run(
    mut rx: mpsc::Receiver<Msg>,
    lookup: Arc<dyn ItemLookup>,
    submitter: Arc<dyn BillSubmitter>,
    config: EngineConfig,
) {
    let mut session = Session::new(Utc::now());

    // Lookup completions come back through their own channel so the command
    // queue can still close (and stop the task) while lookups are in flight.
    let (done_tx, mut done_rx) = mpsc::channel::<LookupDone>(config.command_buffer);

    debug!("billing engine started");

    loop {
        tokio::select! {
            msg = rx.recv() => {
                let Some(msg) = msg else { break };
                match msg {
                    Msg::Dispatch { command, reply } => {
                        let response = handle_command(
                            &mut session,
                            command,
                            &lookup,
                            &submitter,
                            &done_tx,
                            &config,
                        )
                        .await;
                        let _ = reply.send(response);
                    }
                    Msg::View { reply } => {
                        let _ = reply.send(session.view());
                    }
                }
            }

            Some((seq, result)) = done_rx.recv() => {
                session.search_completed(seq, result);
            }
        }
    }

    debug!("billing engine stopped");
}

async fn handle_command(
    session: &mut Session,
    command: Command,
    lookup: &Arc<dyn ItemLookup>,
    submitter: &Arc<dyn BillSubmitter>,
    done_tx: &mpsc::Sender<LookupDone>,
    config: &EngineConfig,
) -> EngineResult<SessionView> {
    match session.dispatch(command, Utc::now())? {
        Effect::None => Ok(session.view()),

        Effect::IssueSearch { seq, query } => {
            let lookup = Arc::clone(lookup);
            let done_tx = done_tx.clone();
            let deadline = config.lookup_timeout;
            let in_stock_only = config.in_stock_only;

            tokio::spawn(async move {
                let result = match timeout(
                    deadline,
                    lookup.search(&query, SEARCH_RESULT_LIMIT, in_stock_only),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(GatewayError::Timeout),
                };
                // Receiver gone means the engine stopped; nothing to do.
                let _ = done_tx.send((seq, result)).await;
            });

            Ok(session.view())
        }

        Effect::SubmitBill(payload) => match submitter.submit(&payload).await {
            Ok(confirmation) => {
                session.save_succeeded(&confirmation.reference, Utc::now());
                Ok(session.view())
            }
            Err(err) => {
                warn!(error = %err, "bill submission failed; cart left intact for retry");
                Err(EngineError::Gateway(err))
            }
        },
    }
}

// =============================================================================
// Integration Tests
// =============================================================================
