//! Errors reported by simulation validation.

use thiserror::Error;

use crate::{cloudlet::CloudletId, vm::VmId};

/// Failures detected before any timing is computed.
///
/// All of these abort the run as a whole; a cloudlet whose assigned VM does
/// not exist is instead reported per-cloudlet with
/// [CloudletStatus::Failed](crate::report::CloudletStatus::Failed).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// No valid assignment exists for a non-empty workload without VMs.
    #[error("cannot schedule {cloudlets} cloudlets: VM pool is empty")]
    EmptyVmPool { cloudlets: usize },
    /// Cloudlet lengths must be positive.
    #[error("cloudlet {id} has zero length")]
    ZeroLengthCloudlet { id: CloudletId },
    /// VM capacity must be positive.
    #[error("VM {id} has no processing capacity")]
    ZeroCapacityVm { id: VmId },
    /// PE capacity must be positive.
    #[error("PE {pe} of host {host} has no processing capacity")]
    ZeroCapacityPe { host: u32, pe: u32 },
    /// The economic policy needs a cost entry for every cloudlet.
    #[error("cloudlet {id} has no cost entry")]
    MissingCost { id: CloudletId },
}
