//! Lumped compressor and turbine nodes.

use crate::error::{CycleError, CycleResult};
use crate::state::StagnationState;
use sf_gas::Gas;

const CP_LOOP_TOL: f64 = 1e-9;
const CP_LOOP_CAP: usize = 30;

/// Read capability of a processed cycle node, as consumed by the staged
/// machine fit: the two reference aggregates plus the inlet state the
/// staged machine starts from.
///
/// `pressure_ratio` is always above one; for turbines it is the expansion
/// ratio `p_in / p_out`, never the heat drop.
pub trait ReferenceNode {
    fn is_processed(&self) -> bool;
    fn inlet(&self) -> StagnationState;
    fn pressure_ratio(&self) -> f64;
    fn efficiency(&self) -> f64;
}

#[derive(Clone, Copy, Debug)]
struct NodeSolution {
    outlet: StagnationState,
    /// Specific work absorbed (compressor) or released (turbine), J/kg
    specific_energy: f64,
}

/// One spool's compression as a single lumped element.
#[derive(Clone, Debug)]
pub struct CompressorNode {
    inlet: StagnationState,
    pi: f64,
    eta: f64,
    solution: Option<NodeSolution>,
}

impl CompressorNode {
    pub fn new(inlet: StagnationState, pi: f64, eta: f64) -> CycleResult<Self> {
        if pi <= 1.0 {
            return Err(CycleError::InvalidSpec {
                what: "compressor pressure ratio must exceed 1",
            });
        }
        if eta <= 0.0 || eta > 1.0 {
            return Err(CycleError::InvalidSpec {
                what: "compressor efficiency must be in (0, 1]",
            });
        }
        Ok(Self {
            inlet,
            pi,
            eta,
            solution: None,
        })
    }

    /// Compute the outlet state and the specific work.
    ///
    /// ```text
    /// dT = T_in * (pi^((k-1)/k) - 1) / eta
    /// l  = cp_mean(T_in, T_in + dT) * dT
    /// ```
    ///
    /// `k` is evaluated over the (initially unknown) temperature interval,
    /// so the temperature rise is iterated to a fixed point.
    pub fn process(&mut self) -> CycleResult<()> {
        let gas = self.inlet.gas;
        let t_in = self.inlet.t.value;

        let mut dt = t_in * (self.pi.powf((gas.k(t_in) - 1.0) / gas.k(t_in)) - 1.0) / self.eta;
        for _ in 0..CP_LOOP_CAP {
            let k = gas.k_mean(t_in, t_in + dt);
            let dt_new = t_in * (self.pi.powf((k - 1.0) / k) - 1.0) / self.eta;
            let done = (dt_new - dt).abs() < CP_LOOP_TOL;
            dt = dt_new;
            if done {
                break;
            }
        }

        let work = gas.cp_mean(t_in, t_in + dt) * dt;
        self.solution = Some(NodeSolution {
            outlet: StagnationState::from_si(t_in + dt, self.inlet.p.value * self.pi, gas),
            specific_energy: work,
        });
        Ok(())
    }

    pub fn outlet(&self) -> CycleResult<StagnationState> {
        self.solution
            .map(|s| s.outlet)
            .ok_or(CycleError::NotProcessed {
                what: "compressor outlet",
            })
    }

    /// Specific compression work, J/kg.
    pub fn specific_work(&self) -> CycleResult<f64> {
        self.solution
            .map(|s| s.specific_energy)
            .ok_or(CycleError::NotProcessed {
                what: "compressor work",
            })
    }
}

impl ReferenceNode for CompressorNode {
    fn is_processed(&self) -> bool {
        self.solution.is_some()
    }

    fn inlet(&self) -> StagnationState {
        self.inlet
    }

    fn pressure_ratio(&self) -> f64 {
        self.pi
    }

    fn efficiency(&self) -> f64 {
        self.eta
    }
}

/// One spool's expansion as a single lumped element.
///
/// The expansion ratio is stagnation `p_in / p_out`, above one.
#[derive(Clone, Debug)]
pub struct TurbineNode {
    inlet: StagnationState,
    pi: f64,
    eta: f64,
    solution: Option<NodeSolution>,
}

impl TurbineNode {
    pub fn new(inlet: StagnationState, pi: f64, eta: f64) -> CycleResult<Self> {
        if pi <= 1.0 {
            return Err(CycleError::InvalidSpec {
                what: "turbine expansion ratio must exceed 1",
            });
        }
        if eta <= 0.0 || eta > 1.0 {
            return Err(CycleError::InvalidSpec {
                what: "turbine efficiency must be in (0, 1]",
            });
        }
        Ok(Self {
            inlet,
            pi,
            eta,
            solution: None,
        })
    }

    /// Build a node that releases the given specific heat drop (J/kg),
    /// deriving the expansion ratio from the isentropic relation. Used when
    /// a turbine is sized by a shaft work balance rather than by a known
    /// back-pressure.
    pub fn from_heat_drop(inlet: StagnationState, heat_drop: f64, eta: f64) -> CycleResult<Self> {
        if heat_drop <= 0.0 {
            return Err(CycleError::InvalidSpec {
                what: "turbine heat drop must be positive",
            });
        }
        let gas = inlet.gas;
        let t_in = inlet.t.value;

        let mut t_out = t_in - heat_drop / gas.cp(t_in);
        let mut pi = 1.0;
        for _ in 0..CP_LOOP_CAP {
            let cp = gas.cp_mean(t_in, t_out);
            let k = gas.k_mean(t_in, t_out);
            let base = 1.0 - heat_drop / (eta * cp * t_in);
            if base <= 0.0 {
                return Err(CycleError::NonPhysical {
                    what: format!(
                        "heat drop {heat_drop:.0} J/kg exceeds the available enthalpy at {t_in:.0} K"
                    ),
                });
            }
            pi = base.powf(-k / (k - 1.0));
            let t_out_new = t_in - heat_drop / cp;
            let done = (t_out_new - t_out).abs() < CP_LOOP_TOL;
            t_out = t_out_new;
            if done {
                break;
            }
        }
        Self::new(inlet, pi, eta)
    }

    /// Compute the outlet state and the specific heat drop.
    ///
    /// ```text
    /// h = eta * cp_mean * T_in * (1 - pi^(-(k-1)/k))
    /// ```
    pub fn process(&mut self) -> CycleResult<()> {
        let gas = self.inlet.gas;
        let t_in = self.inlet.t.value;

        let mut t_out = t_in;
        let mut hd = 0.0;
        for _ in 0..CP_LOOP_CAP {
            let cp = gas.cp_mean(t_in, t_out);
            let k = gas.k_mean(t_in, t_out);
            hd = self.eta * cp * t_in * (1.0 - self.pi.powf(-(k - 1.0) / k));
            let t_out_new = t_in - hd / cp;
            let done = (t_out_new - t_out).abs() < CP_LOOP_TOL;
            t_out = t_out_new;
            if done {
                break;
            }
        }

        self.solution = Some(NodeSolution {
            outlet: StagnationState::from_si(t_out, self.inlet.p.value / self.pi, gas),
            specific_energy: hd,
        });
        Ok(())
    }

    pub fn outlet(&self) -> CycleResult<StagnationState> {
        self.solution
            .map(|s| s.outlet)
            .ok_or(CycleError::NotProcessed {
                what: "turbine outlet",
            })
    }

    /// Specific heat drop, J/kg.
    pub fn heat_drop(&self) -> CycleResult<f64> {
        self.solution
            .map(|s| s.specific_energy)
            .ok_or(CycleError::NotProcessed {
                what: "turbine heat drop",
            })
    }
}

impl ReferenceNode for TurbineNode {
    fn is_processed(&self) -> bool {
        self.solution.is_some()
    }

    fn inlet(&self) -> StagnationState {
        self.inlet
    }

    fn pressure_ratio(&self) -> f64 {
        self.pi
    }

    fn efficiency(&self) -> f64 {
        self.eta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_gas::GasModel;

    fn ambient_air() -> StagnationState {
        StagnationState::from_si(288.0, 1e5, GasModel::Air)
    }

    #[test]
    fn compressor_heats_and_pressurizes() {
        let mut node = CompressorNode::new(ambient_air(), 11.0, 0.86).unwrap();
        node.process().unwrap();
        let out = node.outlet().unwrap();
        assert!((out.p.value - 11e5).abs() < 1.0);
        assert!(out.t.value > 550.0 && out.t.value < 650.0);
        assert!(node.specific_work().unwrap() > 2e5);
    }

    #[test]
    fn unprocessed_reads_fail() {
        let node = CompressorNode::new(ambient_air(), 4.0, 0.85).unwrap();
        assert!(!node.is_processed());
        assert!(matches!(
            node.specific_work(),
            Err(CycleError::NotProcessed { .. })
        ));
    }

    #[test]
    fn turbine_from_heat_drop_reproduces_heat_drop() {
        let inlet = StagnationState::from_si(1450.0, 15e5, GasModel::CombustionProducts);
        let hd = 3.0e5;
        let mut node = TurbineNode::from_heat_drop(inlet, hd, 0.88).unwrap();
        node.process().unwrap();
        assert!((node.heat_drop().unwrap() - hd).abs() / hd < 1e-6);
        assert!(node.pressure_ratio() > 1.0);
    }

    #[test]
    fn excessive_heat_drop_rejected() {
        let inlet = StagnationState::from_si(600.0, 5e5, GasModel::Air);
        let err = TurbineNode::from_heat_drop(inlet, 1e6, 0.9).unwrap_err();
        assert!(matches!(err, CycleError::NonPhysical { .. }));
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(CompressorNode::new(ambient_air(), 0.9, 0.85).is_err());
        assert!(CompressorNode::new(ambient_air(), 4.0, 1.5).is_err());
        assert!(TurbineNode::new(ambient_air(), 1.0, 0.9).is_err());
    }
}
