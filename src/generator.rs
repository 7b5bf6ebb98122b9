//! Randomized workload generation with an explicit seed.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::cloudlet::{Cloudlet, CloudletId};

/// Uniform range for per-cloudlet run costs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

/// Parameters for random workload generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub cloudlet_count: u32,
    /// Lower bound of the uniform cloudlet length range, inclusive.
    pub length_min: u64,
    /// Upper bound of the uniform cloudlet length range, inclusive.
    pub length_max: u64,
    pub input_size: u64,
    pub output_size: u64,
    /// Cost range, needed only for workloads run under the economic policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostRange>,
}

/// Generates workloads from a seeded generator so runs are reproducible.
pub struct WorkloadGenerator {
    rng: Pcg64,
}

impl WorkloadGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Generates cloudlets with ids `0..cloudlet_count` and, if a cost range
    /// is configured, a cost entry for every cloudlet.
    pub fn generate(
        &mut self,
        config: &WorkloadConfig,
        owner_id: u32,
    ) -> (Vec<Cloudlet>, Option<BTreeMap<CloudletId, f64>>) {
        let mut cloudlets = Vec::with_capacity(config.cloudlet_count as usize);
        let mut costs = config.cost.map(|_| BTreeMap::new());
        for cloudlet_id in 0..config.cloudlet_count as u64 {
            let length = self.rng.gen_range(config.length_min..=config.length_max);
            cloudlets.push(Cloudlet::new(
                cloudlet_id,
                length,
                1,
                owner_id,
                config.input_size,
                config.output_size,
            ));
            if let (Some(costs), Some(range)) = (costs.as_mut(), config.cost) {
                costs.insert(cloudlet_id, self.rng.gen_range(range.min..=range.max));
            }
        }
        (cloudlets, costs)
    }
}
