//! Run parameters published by the swarm controller.

use crate::core::error::{WorldError, WorldResult};
use serde::{Deserialize, Serialize};

/// Number of scalars in one parameter vector.
pub const PARAMETER_COUNT: usize = 9;

/// Foraging parameters in the order the controller sends them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub pherom_decay: f32,
    pub uninformed_corr: f32,
    pub informed_corr: f32,
    pub travel_give_up: f32,
    pub search_give_up: f32,
    pub pherom_laying: f32,
    pub charge_leave: f32,
    pub charge_return: f32,
    pub site_fidelity: f32,
}

impl ParameterSet {
    /// Column names written above the parameter row of every run log.
    /// Downstream analysis scripts key on these exact spellings.
    pub const CSV_HEADER: &'static str = "pheromDecay,uniformedCorr,infomredCorr,travelGiveUp,searchGiveUp,pheromLaying,chargeLeave,chargeReturn,siteFidelity";

    pub fn from_slice(values: &[f32]) -> WorldResult<Self> {
        let v: &[f32; PARAMETER_COUNT] =
            values
                .try_into()
                .map_err(|_| WorldError::MalformedParameterVector {
                    expected: PARAMETER_COUNT,
                    actual: values.len(),
                })?;
        Ok(ParameterSet {
            pherom_decay: v[0],
            uninformed_corr: v[1],
            informed_corr: v[2],
            travel_give_up: v[3],
            search_give_up: v[4],
            pherom_laying: v[5],
            charge_leave: v[6],
            charge_return: v[7],
            site_fidelity: v[8],
        })
    }

    pub fn values(&self) -> [f32; PARAMETER_COUNT] {
        [
            self.pherom_decay,
            self.uninformed_corr,
            self.informed_corr,
            self.travel_give_up,
            self.search_give_up,
            self.pherom_laying,
            self.charge_leave,
            self.charge_return,
            self.site_fidelity,
        ]
    }

    pub fn csv_row(&self) -> String {
        self.values()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl TryFrom<&[f32]> for ParameterSet {
    type Error = WorldError;

    fn try_from(values: &[f32]) -> WorldResult<Self> {
        Self::from_slice(values)
    }
}
