//! Model of a virtual machine.

use serde::{Deserialize, Serialize};

pub type VmId = u64;

/// Discipline used by a VM to apportion its capacity among cloudlets.
///
/// Only time-shared execution is modeled; the enum is the hook for adding
/// space-shared or priority-aware disciplines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharingDiscipline {
    /// Capacity is divided equally among all cloudlets active on the VM.
    TimeShared,
}

/// A virtual compute unit bound to one datacenter for its whole lifetime.
#[derive(Clone, Debug)]
pub struct Vm {
    /// Id of the VM, unique within the pool.
    pub id: VmId,
    /// Id of the broker owning this VM.
    pub owner_id: u32,
    /// Instruction throughput per PE in MIPS.
    pub mips: f64,
    /// Number of requested PEs.
    pub pe_count: u32,
    /// RAM capacity.
    pub ram: u64,
    /// Network bandwidth capacity.
    pub bandwidth: u64,
    /// Storage capacity.
    pub storage: u64,
    /// How the VM shares its capacity among cloudlets.
    pub discipline: SharingDiscipline,
}

impl Vm {
    /// Creates a new VM.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: VmId,
        owner_id: u32,
        mips: f64,
        pe_count: u32,
        ram: u64,
        bandwidth: u64,
        storage: u64,
        discipline: SharingDiscipline,
    ) -> Self {
        Vm {
            id,
            owner_id,
            mips,
            pe_count,
            ram,
            bandwidth,
            storage,
            discipline,
        }
    }

    /// Total instruction throughput of the VM across all its PEs.
    pub fn capacity(&self) -> f64 {
        self.mips * self.pe_count as f64
    }
}
