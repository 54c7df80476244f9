#![allow(clippy::redundant_pub_crate)]

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::database::SessionDatabase;
use crate::error::EngineResult;

pub(crate) const COMMAND_CAPACITY: usize = 16;

pub(crate) enum WorkerCommand {
    Flush {
        reply: oneshot::Sender<EngineResult<()>>,
    },
    Shutdown {
        reply: oneshot::Sender<EngineResult<()>>,
    },
}

/// Run the resume writer until a shutdown command arrives or every sender is dropped.
pub(crate) fn spawn(
    mut database: SessionDatabase,
    mut commands: mpsc::Receiver<WorkerCommand>,
    resume_write_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut resume = time::interval_at(
            Instant::now() + resume_write_interval,
            resume_write_interval,
        );
        resume.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(WorkerCommand::Flush { reply }) => {
                            let result = database.flush().await;
                            let _ = reply.send(result);
                        }
                        Some(WorkerCommand::Shutdown { reply }) => {
                            let result = database.flush().await;
                            let _ = reply.send(result);
                            return;
                        }
                        None => break,
                    }
                }
                _ = resume.tick() => {
                    match database.flush().await {
                        Ok(()) => debug!(path = %database.path().display(), "resume data written"),
                        Err(err) => warn!(error = %err, "periodic resume write failed"),
                    }
                }
            }
        }

        if let Err(err) = database.flush().await {
            warn!(error = %err, "resume write failed after session handle was dropped");
        }
    })
}
