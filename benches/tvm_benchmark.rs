// ============================================================================
// TVM Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Npv2D - rates x cash-flow series, broadcast vs. per-element loop
// 2. Fv2D - four independently sized operands, broadcast vs. loop
// 3. Strategy Comparison - strided cursor vs. coordinate loop
//
// Every grid runs in both numeric domains. Inputs are drawn from a seeded
// generator so runs are comparable.
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::hint::black_box;
use std::sync::Arc;
use tvm_broadcast::prelude::*;

const SIZES: [usize; 3] = [1, 10, 100];

fn random_values(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.random_range(-1.0..1.0)).collect()
}

fn to_decimal(values: &[f64]) -> Vec<Decimal> {
    values
        .iter()
        .map(|&v| Decimal::from_f64(v).unwrap_or_default())
        .collect()
}

// ============================================================================
// Npv2D
// ============================================================================

struct NpvInputs<T> {
    rates: NdArray<T>,
    cashflows: NdArray<T>,
}

fn npv_inputs(n_series: usize, length: usize, n_rates: usize) -> (NpvInputs<f64>, NpvInputs<Decimal>) {
    let mut rng = StdRng::seed_from_u64(0);
    let flows = random_values(&mut rng, n_series * length);
    // Rates in (-0.5, 0.5) keep 1 + rate well away from zero
    let rates: Vec<f64> = random_values(&mut rng, n_rates)
        .into_iter()
        .map(|r| r * 0.5)
        .collect();

    let float = NpvInputs {
        rates: NdArray::from_vec(rates.clone()),
        cashflows: NdArray::from_shape_vec([n_series, length], flows.clone())
            .unwrap_or_else(|_| NdArray::from_vec(flows.clone())),
    };
    let decimal = NpvInputs {
        rates: NdArray::from_vec(to_decimal(&rates)),
        cashflows: NdArray::from_shape_vec([n_series, length], to_decimal(&flows))
            .unwrap_or_else(|_| NdArray::from_vec(to_decimal(&flows))),
    };
    (float, decimal)
}

fn npv_loop<T: TvmScalar>(inputs: &NpvInputs<T>, length: usize) -> Vec<T> {
    let flows = inputs.cashflows.as_slice();
    let mut out = Vec::with_capacity(inputs.rates.len() * flows.len() / length);
    for &rate in inputs.rates.as_slice() {
        for series in flows.chunks(length) {
            if let Ok(v) = npv_kernel(rate, series) {
                out.push(v);
            }
        }
    }
    out
}

fn benchmark_npv_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("npv_2d");
    let evaluator = Evaluator::default();

    for &n_series in &SIZES {
        for &length in &SIZES {
            for &n_rates in &SIZES {
                let label = format!("{}x{}x{}", n_series, length, n_rates);
                let (float, decimal) = npv_inputs(n_series, length, n_rates);

                group.bench_with_input(
                    BenchmarkId::new("broadcast_f64", &label),
                    &float,
                    |b, inputs| b.iter(|| black_box(evaluator.npv_grid(&inputs.rates, &inputs.cashflows))),
                );
                group.bench_with_input(
                    BenchmarkId::new("loop_f64", &label),
                    &float,
                    |b, inputs| b.iter(|| black_box(npv_loop(inputs, length))),
                );
                group.bench_with_input(
                    BenchmarkId::new("broadcast_decimal", &label),
                    &decimal,
                    |b, inputs| b.iter(|| black_box(evaluator.npv_grid(&inputs.rates, &inputs.cashflows))),
                );
                group.bench_with_input(
                    BenchmarkId::new("loop_decimal", &label),
                    &decimal,
                    |b, inputs| b.iter(|| black_box(npv_loop(inputs, length))),
                );
            }
        }
    }

    group.finish();
}

// ============================================================================
// Fv2D
// ============================================================================

struct FvInputs<T> {
    rates: NdArray<T>,
    periods: NdArray<T>,
    payments: NdArray<T>,
    present_values: NdArray<T>,
}

fn fv_inputs(sizes: [usize; 4]) -> (FvInputs<f64>, FvInputs<Decimal>) {
    let mut rng = StdRng::seed_from_u64(42);
    let rates: Vec<f64> = random_values(&mut rng, sizes[0]).iter().map(|r| r * 0.1).collect();
    // Whole periods so the decimal domain stays on the exact power path
    let periods: Vec<f64> = (0..sizes[1]).map(|_| f64::from(rng.random_range(0u32..60))).collect();
    let payments = random_values(&mut rng, sizes[2]);
    let present_values = random_values(&mut rng, sizes[3]);

    // Lay each operand on its own axis so the result is the full grid
    let column = |values: Vec<f64>, axis: usize| {
        let mut shape = vec![1; 4 - axis];
        shape[0] = values.len();
        NdArray::from_shape_vec(shape, values).unwrap_or_else(|_| NdArray::scalar(0.0))
    };

    let float = FvInputs {
        rates: column(rates, 0),
        periods: column(periods, 1),
        payments: column(payments, 2),
        present_values: column(present_values, 3),
    };
    let decimal = FvInputs {
        rates: float.rates.map(|v| Decimal::from_f64(v).unwrap_or_default()),
        periods: float.periods.map(|v| Decimal::from_f64(v).unwrap_or_default()),
        payments: float.payments.map(|v| Decimal::from_f64(v).unwrap_or_default()),
        present_values: float.present_values.map(|v| Decimal::from_f64(v).unwrap_or_default()),
    };
    (float, decimal)
}

fn fv_loop<T: TvmScalar>(inputs: &FvInputs<T>) -> Vec<T> {
    let mut out = Vec::new();
    for &rate in inputs.rates.as_slice() {
        for &nper in inputs.periods.as_slice() {
            for &pmt in inputs.payments.as_slice() {
                for &pv in inputs.present_values.as_slice() {
                    if let Ok(v) = fv_kernel(
                        rate,
                        nper,
                        pmt,
                        pv,
                        PaymentTiming::End,
                        FractionalPowerPolicy::default(),
                    ) {
                        out.push(v);
                    }
                }
            }
        }
    }
    out
}

fn fv_broadcast<T: TvmScalar>(evaluator: &Evaluator, inputs: &FvInputs<T>) -> TvmResult<NdArray<T>> {
    evaluator.fv_typed(
        &inputs.rates,
        &inputs.periods,
        &inputs.payments,
        &inputs.present_values,
    )
}

fn benchmark_fv_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("fv_2d");
    let evaluator = Evaluator::default();

    for &n_rates in &SIZES {
        for &n_periods in &SIZES {
            for &n_payments in &SIZES {
                for &n_pv in &SIZES {
                    // The 100^4 grid is a 100M-element output; skip it
                    if n_rates * n_periods * n_payments * n_pv > 1_000_000 {
                        continue;
                    }
                    let label = format!("{}x{}x{}x{}", n_rates, n_periods, n_payments, n_pv);
                    let (float, decimal) = fv_inputs([n_rates, n_periods, n_payments, n_pv]);

                    group.bench_with_input(
                        BenchmarkId::new("broadcast_f64", &label),
                        &float,
                        |b, inputs| b.iter(|| black_box(fv_broadcast(&evaluator, inputs))),
                    );
                    group.bench_with_input(
                        BenchmarkId::new("loop_f64", &label),
                        &float,
                        |b, inputs| b.iter(|| black_box(fv_loop(inputs))),
                    );
                    group.bench_with_input(
                        BenchmarkId::new("broadcast_decimal", &label),
                        &decimal,
                        |b, inputs| b.iter(|| black_box(fv_broadcast(&evaluator, inputs))),
                    );
                    group.bench_with_input(
                        BenchmarkId::new("loop_decimal", &label),
                        &decimal,
                        |b, inputs| b.iter(|| black_box(fv_loop(inputs))),
                    );
                }
            }
        }
    }

    group.finish();
}

// ============================================================================
// Strategy Comparison
// ============================================================================

fn benchmark_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration_strategy");
    let (float, _) = fv_inputs([100, 10, 10, 10]);

    for kind in [StrategyKind::Strided, StrategyKind::CoordinateLoop] {
        let config = EvaluatorConfig::new().with_strategy(kind);
        let evaluator = match create_from_config(config, Arc::new(NoOpObserver)) {
            Ok(evaluator) => evaluator,
            Err(_) => continue,
        };

        group.bench_function(BenchmarkId::new("fv", kind), |b| {
            b.iter(|| black_box(fv_broadcast(&evaluator, &float)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_npv_2d,
    benchmark_fv_2d,
    benchmark_strategies,
);

criterion_main!(benches);
