// ============================================================================
// TVM Broadcast Library
// Broadcasting time-value-of-money evaluator over float and decimal domains
// ============================================================================

//! # TVM Broadcast
//!
//! Net present value and future value over scalars and n-dimensional
//! arrays, with identical semantics in binary64 and exact decimal
//! arithmetic.
//!
//! ## Features
//!
//! - **Standard broadcasting** of operands with different shapes
//!   (right-aligned, size-1 axes stretch, no values copied)
//! - **Two numeric domains** (`f64` and `rust_decimal::Decimal`) served
//!   by one generic kernel per formula, never mixed within a call
//! - **Explicit errors** for every undefined case instead of NaN/infinity
//! - **Interchangeable iteration strategies** (strided cursor vs.
//!   per-coordinate loop) that produce identical results
//! - **Stateless and re-entrant**: one evaluator can serve many threads
//!
//! ## Example
//!
//! ```rust
//! use tvm_broadcast::prelude::*;
//! use rust_decimal::Decimal;
//!
//! // Three rates, three cash-flow series of five periods each
//! let rates = NdArray::from_vec(vec![0.05, 0.10, 0.15]);
//! let flows = NdArray::from_shape_vec([3, 5], vec![100.0; 15]).unwrap();
//!
//! let out = tvm_broadcast::npv(&rates.into(), &flows.into()).unwrap();
//! assert_eq!(out.shape(), &Shape::from([3]));
//!
//! // The same call in the decimal domain
//! let out = tvm_broadcast::fv(
//!     &Decimal::new(1, 1).into(),   // rate 0.1
//!     &Decimal::from(2).into(),     // periods
//!     &Decimal::from(-100).into(),  // payment
//!     &Decimal::ZERO.into(),        // present value
//! )
//! .unwrap();
//! assert_eq!(out.as_decimal().unwrap().as_slice(), &[Decimal::from(210)]);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod strategy;
pub mod utils;

use domain::Operand;
use engine::Evaluator;
use numeric::TvmResult;

/// Net present value with the default evaluator.
///
/// See [`Evaluator::npv`].
pub fn npv(rate: &Operand, cashflows: &Operand) -> TvmResult<Operand> {
    Evaluator::default().npv(rate, cashflows)
}

/// Future value with the default evaluator (payments at period end).
///
/// See [`Evaluator::fv`].
pub fn fv(
    rate: &Operand,
    periods: &Operand,
    payment: &Operand,
    present_value: &Operand,
) -> TvmResult<Operand> {
    Evaluator::default().fv(rate, periods, payment, present_value)
}

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        EvaluationId, EvaluatorConfig, NdArray, Operand, OperandRole, Operation, PaymentTiming,
        Shape,
    };
    pub use crate::engine::{
        broadcast_shapes, create_from_config, fv_kernel, npv_kernel, BroadcastPlan, Evaluator,
        EvaluatorBuilder,
    };
    pub use crate::interfaces::{
        EvaluationEvent, EvaluationObserver, LoggingObserver, NoOpObserver,
    };
    pub use crate::numeric::{FractionalPowerPolicy, NumericDomain, TvmError, TvmResult, TvmScalar};
    pub use crate::strategy::{create_strategy, IterationStrategy, StrategyKind};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use proptest::prelude::*;
    use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    /// `a` and `b` agree to `tol` relative to the magnitude of the terms
    /// that produced them.
    fn close(a: f64, b: f64, scale: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * (1.0 + scale)
    }

    fn evaluators() -> [Evaluator; 2] {
        [
            EvaluatorBuilder::new().strided().build().unwrap(),
            EvaluatorBuilder::new().coordinate_loop().build().unwrap(),
        ]
    }

    #[test]
    fn test_npv_shape_contract() {
        let rate = Operand::from(vec![0.01, 0.02, 0.03]);
        let flows = Operand::from(NdArray::from_shape_vec([3, 5], vec![10.0; 15]).unwrap());
        let out = crate::npv(&rate, &flows).unwrap();
        assert_eq!(out.shape(), &Shape::from([3]));

        let rate = Operand::from(vec![0.01, 0.02]);
        assert!(matches!(
            crate::npv(&rate, &flows),
            Err(TvmError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_npv_rate_minus_one_fails() {
        let err = crate::npv(&Operand::from(-1.0), &Operand::from(vec![100.0, 100.0])).unwrap_err();
        assert!(matches!(err, TvmError::InvalidRate { .. }));

        let err = crate::npv(&Operand::from(dec!(-1)), &Operand::from(vec![dec!(100), dec!(100)]))
            .unwrap_err();
        assert!(matches!(err, TvmError::InvalidRate { .. }));
    }

    #[test]
    fn test_fv_zero_rate_exact() {
        let out = crate::fv(
            &Operand::from(vec![0.0, 0.0]),
            &Operand::from(0.1),
            &Operand::from(0.2),
            &Operand::from(0.3),
        )
        .unwrap();
        // Exactly the zero-rate formula, no detour through the general one
        let expected = -(0.3 + 0.2 * 0.1);
        assert_eq!(out.as_float().unwrap().as_slice(), &[expected, expected]);
    }

    #[test]
    fn test_benchmark_grid_loop_equivalence() {
        // Npv2D: for rate in rates: for series in cashflows: npv(rate, series)
        let rates = NdArray::from_vec(vec![0.03, -0.2, 0.7, 1.5]);
        let flows = NdArray::from_shape_vec(
            [3, 4],
            vec![
                -1.0, 0.5, 0.25, 2.0, //
                0.3, -0.7, 1.1, -0.1, //
                5.0, 0.0, 0.0, -5.0,
            ],
        )
        .unwrap();

        for evaluator in evaluators() {
            let grid = evaluator.npv_grid(&rates, &flows).unwrap();
            assert_eq!(grid.shape(), &Shape::from([4, 3]));
            for (ri, &rate) in rates.as_slice().iter().enumerate() {
                for si in 0..3 {
                    let series = &flows.as_slice()[si * 4..si * 4 + 4];
                    let looped = npv_kernel(rate, series).unwrap();
                    assert_eq!(grid.get(&[ri, si]), Some(&looped));
                }
            }
        }
    }

    #[test]
    fn test_concurrent_calls_share_one_evaluator() {
        let evaluator = Arc::new(Evaluator::default());
        let rates = NdArray::from_vec((0..50).map(|i| Decimal::new(i, 3)).collect());
        let flows = NdArray::from_vec(vec![dec!(-100), dec!(30), dec!(40), dec!(50)]);
        let expected = evaluator.npv_grid(&rates, &flows).unwrap();

        crossbeam::scope(|scope| {
            for _ in 0..8 {
                let evaluator = Arc::clone(&evaluator);
                let (rates, flows, expected) = (&rates, &flows, &expected);
                scope.spawn(move |_| {
                    for _ in 0..20 {
                        assert_eq!(&evaluator.npv_grid(rates, flows).unwrap(), expected);
                    }
                });
            }
        })
        .unwrap();
    }

    fn finite_rate() -> impl Strategy<Value = f64> {
        // 1 + rate stays away from zero
        -0.9f64..3.0
    }

    proptest! {
        #[test]
        fn prop_npv_matches_closed_form(
            rate in finite_rate(),
            flows in prop::collection::vec(-1000.0f64..1000.0, 1..20),
        ) {
            let value = npv_kernel(rate, &flows).unwrap();
            let terms: Vec<f64> = flows
                .iter()
                .enumerate()
                .map(|(t, c)| c / (1.0 + rate).powi(t as i32))
                .collect();
            let closed: f64 = terms.iter().sum();
            let scale: f64 = terms.iter().map(|t| t.abs()).sum();
            prop_assert!(close(value, closed, scale, 1e-9), "{} vs {}", value, closed);
        }

        #[test]
        fn prop_npv_single_period_is_exact(rate in -5.0f64..5.0, c in -1e6f64..1e6) {
            prop_assert_eq!(npv_kernel(rate, &[c]).unwrap(), c);
            let d = Decimal::from_f64(c).unwrap();
            let r = Decimal::from_f64(rate).unwrap();
            prop_assert_eq!(npv_kernel(r, &[d]).unwrap(), d);
        }

        #[test]
        fn prop_npv_broadcast_equals_loop(
            n_rates in 1usize..5,
            n_series in 1usize..5,
            length in 1usize..6,
            seed in prop::collection::vec(-1.0f64..1.0, 64),
        ) {
            let rates: Vec<f64> = (0..n_rates).map(|i| seed[i] * 0.5).collect();
            let flows: Vec<f64> = (0..n_series * length).map(|i| seed[(i + 7) % 64] * 100.0).collect();
            let rates = NdArray::from_vec(rates).insert_axis(1);
            let flows = NdArray::from_shape_vec([n_series, length], flows).unwrap();

            for evaluator in evaluators() {
                let out = evaluator.npv_typed(&rates, &flows).unwrap();
                prop_assert_eq!(out.shape(), &Shape::from([n_rates, n_series]));
                for ri in 0..n_rates {
                    for si in 0..n_series {
                        let series = &flows.as_slice()[si * length..(si + 1) * length];
                        let looped = npv_kernel(rates.as_slice()[ri], series).unwrap();
                        prop_assert_eq!(out.get(&[ri, si]), Some(&looped));
                    }
                }
            }
        }

        #[test]
        fn prop_fv_broadcast_equals_loop(
            rates in prop::collection::vec(-0.5f64..0.5, 1..4),
            periods in prop::collection::vec(0.0f64..30.0, 1..4),
            payments in prop::collection::vec(-100.0f64..100.0, 1..4),
            present_values in prop::collection::vec(-1000.0f64..1000.0, 1..4),
        ) {
            let (nr, nn, np, nv) = (rates.len(), periods.len(), payments.len(), present_values.len());
            let r = NdArray::from_shape_vec([nr, 1, 1, 1], rates.clone()).unwrap();
            let n = NdArray::from_shape_vec([nn, 1, 1], periods.clone()).unwrap();
            let p = NdArray::from_shape_vec([np, 1], payments.clone()).unwrap();
            let v = NdArray::from_vec(present_values.clone());

            for evaluator in evaluators() {
                let out = evaluator.fv_typed(&r, &n, &p, &v).unwrap();
                prop_assert_eq!(out.shape(), &Shape::from([nr, nn, np, nv]));
                for (a, &rate) in rates.iter().enumerate() {
                    for (b, &nper) in periods.iter().enumerate() {
                        for (c, &pmt) in payments.iter().enumerate() {
                            for (d, &pv) in present_values.iter().enumerate() {
                                let looped = fv_kernel(
                                    rate,
                                    nper,
                                    pmt,
                                    pv,
                                    PaymentTiming::End,
                                    FractionalPowerPolicy::default(),
                                )
                                .unwrap();
                                prop_assert_eq!(out.get(&[a, b, c, d]), Some(&looped));
                            }
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_decimal_agrees_with_float(
            rate in -0.2f64..0.2,
            nper in 0u32..20,
            pmt in -100.0f64..100.0,
            pv in -1000.0f64..1000.0,
            flows in prop::collection::vec(-1000.0f64..1000.0, 1..12),
        ) {
            // Represent the same logical inputs in both domains
            let to_dec = |x: f64| Decimal::from_f64(x).unwrap().round_dp(6);
            let back = |x: Decimal| x.to_f64().unwrap();
            let (rate_d, pmt_d, pv_d) = (to_dec(rate), to_dec(pmt), to_dec(pv));
            let flows_d: Vec<Decimal> = flows.iter().map(|&c| to_dec(c)).collect();
            let flows_f: Vec<f64> = flows_d.iter().map(|&c| back(c)).collect();

            let npv_f = crate::npv(&back(rate_d).into(), &flows_f.clone().into()).unwrap();
            let npv_d = crate::npv(&rate_d.into(), &flows_d.into()).unwrap();
            let npv_f = npv_f.as_float().unwrap().as_slice()[0];
            let npv_d = back(npv_d.as_decimal().unwrap().as_slice()[0]);
            let growth = 1.0 + back(rate_d);
            let stretch = growth.max(1.0 / growth).powi(nper as i32 + 12);
            let npv_scale = flows_f.iter().map(|c| c.abs()).sum::<f64>() * stretch;
            prop_assert!(close(npv_f, npv_d, npv_scale, 1e-9), "npv {} vs {}", npv_f, npv_d);

            let fv_f = crate::fv(
                &back(rate_d).into(),
                &f64::from(nper).into(),
                &back(pmt_d).into(),
                &back(pv_d).into(),
            )
            .unwrap();
            let fv_d = crate::fv(
                &rate_d.into(),
                &Decimal::from(nper).into(),
                &pmt_d.into(),
                &pv_d.into(),
            )
            .unwrap();
            let fv_f = fv_f.as_float().unwrap().as_slice()[0];
            let fv_d = back(fv_d.as_decimal().unwrap().as_slice()[0]);
            let fv_scale = (pv.abs() + pmt.abs() * f64::from(nper)) * stretch;
            prop_assert!(close(fv_f, fv_d, fv_scale, 1e-9), "fv {} vs {}", fv_f, fv_d);
        }

        #[test]
        fn prop_long_horizon_npv_agrees_across_domains(
            rate in -0.9f64..3.0,
            flows in prop::collection::vec(-1000.0f64..1000.0, 1..=100),
        ) {
            let rate_d = Decimal::from_f64(rate).unwrap().round_dp(6);
            let flows_d: Vec<Decimal> = flows
                .iter()
                .map(|&c| Decimal::from_f64(c).unwrap().round_dp(6))
                .collect();
            let rate_f = rate_d.to_f64().unwrap();
            let flows_f: Vec<f64> = flows_d.iter().map(|c| c.to_f64().unwrap()).collect();

            let float = npv_kernel(rate_f, &flows_f).unwrap();
            let growth = 1.0 + rate_f;
            let scale: f64 = flows_f
                .iter()
                .enumerate()
                .map(|(t, c)| (c / growth.powi(t as i32)).abs())
                .sum();

            match npv_kernel(rate_d, &flows_d) {
                Ok(decimal) => {
                    let decimal = decimal.to_f64().unwrap();
                    prop_assert!(
                        close(float, decimal, scale, 1e-9),
                        "{} vs {}",
                        float,
                        decimal
                    );
                },
                Err(error) => {
                    // Only a discount factor beyond the decimal range may fail
                    prop_assert_eq!(error, TvmError::Overflow);
                    let peak = (1.0 / growth.abs()).powi(flows_f.len() as i32 - 1);
                    prop_assert!(peak > 1e27 || scale > 1e27, "peak {} scale {}", peak, scale);
                },
            }
        }

        #[test]
        fn prop_fv_zero_rate_is_closed_form(
            nper in -50.0f64..50.0,
            pmt in -1e4f64..1e4,
            pv in -1e6f64..1e6,
        ) {
            let value = fv_kernel(
                0.0,
                nper,
                pmt,
                pv,
                PaymentTiming::Begin,
                FractionalPowerPolicy::default(),
            )
            .unwrap();
            prop_assert_eq!(value, -(pv + pmt * nper));
        }
    }
}
