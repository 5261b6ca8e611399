// Command interface: one variant per user action

use super::JobService;
use crate::domain::{JobId, JobUpdate, NewJob};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single user action forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum JobCommand {
    Add(NewJob),
    Edit { id: JobId, update: JobUpdate },
    Delete { id: JobId },
    Save { path: PathBuf },
    Load { path: PathBuf },
}

/// Result of a dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(JobId),
    Edited(JobId),
    Deleted(JobId),
    Saved { count: usize },
    Loaded { count: usize },
}

impl CommandOutcome {
    /// Whether the register changed and the view must be rebuilt
    pub fn mutates(&self) -> bool {
        !matches!(self, CommandOutcome::Saved { .. })
    }
}

pub(super) fn execute(service: &mut JobService, command: JobCommand) -> Result<CommandOutcome> {
    match command {
        JobCommand::Add(new) => Ok(CommandOutcome::Added(service.add(new)?)),
        JobCommand::Edit { id, update } => {
            service.edit(id, &update)?;
            Ok(CommandOutcome::Edited(id))
        }
        JobCommand::Delete { id } => {
            service.delete(id)?;
            Ok(CommandOutcome::Deleted(id))
        }
        JobCommand::Save { path } => {
            service.save(&path)?;
            Ok(CommandOutcome::Saved {
                count: service.list().len(),
            })
        }
        JobCommand::Load { path } => {
            let count = service.load(&path)?;
            Ok(CommandOutcome::Loaded { count })
        }
    }
}
