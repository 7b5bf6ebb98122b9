//! Model of a cloudlet, one unit of batch compute work.

pub type CloudletId = u64;

/// Resource demand of a cloudlet over time, as a fraction of its fair share.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UtilizationModel {
    /// The cloudlet always wants its full share.
    Full,
}

impl UtilizationModel {
    /// Fraction of the cloudlet's share demanded at the given time.
    pub fn utilization(&self, _time: f64) -> f64 {
        match self {
            UtilizationModel::Full => 1.0,
        }
    }
}

/// A compute job with a fixed instruction length, submitted for execution on a VM.
///
/// The length is fixed at submission and never changes; ordering and VM
/// assignment are derived by the scheduling policy and kept outside the
/// cloudlet itself.
#[derive(Clone, Debug)]
pub struct Cloudlet {
    /// Id of the cloudlet, unique within the workload.
    pub id: CloudletId,
    /// Total instructions to execute, in millions.
    pub length: u64,
    /// Number of PEs the cloudlet needs. Fixed at 1 in this model.
    pub pe_count: u32,
    /// Id of the broker owning this cloudlet.
    pub owner_id: u32,
    /// Size of the input file. Not used in timing.
    pub input_size: u64,
    /// Size of the output file. Not used in timing.
    pub output_size: u64,
    /// CPU demand profile.
    pub cpu_utilization: UtilizationModel,
    /// RAM demand profile.
    pub ram_utilization: UtilizationModel,
    /// Bandwidth demand profile.
    pub bandwidth_utilization: UtilizationModel,
}

impl Cloudlet {
    /// Creates a new cloudlet with full utilization profiles.
    pub fn new(
        id: CloudletId,
        length: u64,
        pe_count: u32,
        owner_id: u32,
        input_size: u64,
        output_size: u64,
    ) -> Self {
        Cloudlet {
            id,
            length,
            pe_count,
            owner_id,
            input_size,
            output_size,
            cpu_utilization: UtilizationModel::Full,
            ram_utilization: UtilizationModel::Full,
            bandwidth_utilization: UtilizationModel::Full,
        }
    }
}
