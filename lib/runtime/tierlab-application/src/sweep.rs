//! Parameter sweeps: evaluate one knob across a range of values.

use rayon::prelude::*;
use serde::Serialize;

use tierlab_domain::{Knob, SimConfig, SystemStatus, Tier};

use crate::model::Evaluator;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub status: SystemStatus,
    pub worst: f64,
    pub bottleneck: Tier,
    pub p50: f64,
    pub p95: f64,
    pub error_rate: f64,
    pub monthly_total: f64,
}

/// Evaluates `config` once per value, in parallel, preserving input order.
/// Values are written raw so the sweep can step past the control ranges.
pub fn sweep(
    evaluator: &Evaluator,
    config: &SimConfig,
    knob: Knob,
    values: &[f64],
) -> Vec<SweepPoint> {
    values
        .par_iter()
        .map(|&value| {
            let mut config = config.clone();
            knob.write(&mut config, value);
            let result = evaluator.evaluate(&config);
            SweepPoint {
                value,
                status: result.status,
                worst: result.saturation.worst,
                bottleneck: result.saturation.bottleneck,
                p50: result.latency.p50,
                p95: result.latency.p95,
                error_rate: result.errors.rate,
                monthly_total: result.cost.monthly_total,
            }
        })
        .collect()
}

/// `steps` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let stride = (end - start) / (steps - 1) as f64;
            (0..steps)
                .map(|index| {
                    if index == steps - 1 {
                        end
                    } else {
                        start + stride * index as f64
                    }
                })
                .collect()
        }
    }
}

pub fn first_overload(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points
        .iter()
        .find(|point| point.status == SystemStatus::Overloaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 100.0, 5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_sweep_preserves_order_and_finds_overload() {
        let values = linspace(100.0, 2000.0, 20);
        let points = sweep(
            &Evaluator::default(),
            &SimConfig::baseline(),
            Knob::Rps,
            &values,
        );
        let swept: Vec<_> = points.iter().map(|point| point.value).collect();
        assert_eq!(swept, values);

        let overload = first_overload(&points).unwrap();
        assert!(overload.worst >= 1.0);
        assert!(
            points
                .iter()
                .take_while(|point| point.value < overload.value)
                .all(|point| point.status != SystemStatus::Overloaded)
        );
    }

    #[test]
    fn test_more_instances_cost_more_and_never_raise_worst() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 1500.0;
        let values = linspace(1.0, 30.0, 30);
        let points = sweep(&Evaluator::default(), &config, Knob::AppInstances, &values);
        let costs: Vec<_> = points.iter().map(|point| point.monthly_total).collect();
        assert!(costs.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(points.windows(2).all(|pair| pair[0].worst >= pair[1].worst));
    }
}
