// ============================================================================
// Basic Usage Example
// ============================================================================

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tvm_broadcast::prelude::*;

fn main() -> TvmResult<()> {
    #[cfg(feature = "logging")]
    tvm_broadcast::utils::init_logging();

    println!("=== TVM Broadcast Example ===\n");

    // One project, one rate
    let flows = vec![-100.0, 39.0, 59.0, 55.0, 20.0];
    let value = tvm_broadcast::npv(&0.281.into(), &flows.into())?;
    println!("NPV at 28.1%: {:?}", value.as_float().map(|a| a.as_slice().to_vec()));

    // Three rates against three projects, one rate per project
    let rates = NdArray::from_vec(vec![0.05, 0.08, 0.12]);
    let projects = NdArray::from_rows(vec![
        vec![-1000.0, 300.0, 400.0, 500.0],
        vec![-500.0, 100.0, 200.0, 300.0],
        vec![-250.0, 90.0, 90.0, 90.0],
    ])?;
    let evaluator = EvaluatorBuilder::new()
        .observer(Arc::new(LoggingObserver))
        .build()?;
    let paired = evaluator.npv_typed(&rates, &projects)?;
    println!("\nPaired NPV {}: {:?}", paired.shape(), paired.as_slice());

    // Every rate against every project
    let grid = evaluator.npv_grid(&rates, &projects)?;
    println!("Grid NPV {}:", grid.shape());
    for (i, rate) in rates.as_slice().iter().enumerate() {
        let row: Vec<String> = (0..3)
            .filter_map(|j| grid.get(&[i, j]))
            .map(|v| format!("{:>9.2}", v))
            .collect();
        println!("  {:>5.2}%  {}", rate * 100.0, row.join(" "));
    }

    // Exact decimal savings plan: 10 years of monthly deposits
    let rate = Operand::from(dec!(0.05) / dec!(12));
    let periods = Operand::from(dec!(120));
    let deposit = Operand::from(dec!(-100));
    let opening = Operand::from(dec!(-100));
    let balance = tvm_broadcast::fv(&rate, &periods, &deposit, &opening)?;
    if let Some(balance) = balance.as_decimal() {
        println!("\nSavings after 10 years: {}", balance.as_slice()[0].round_dp(2));
    }

    // Payments at the start of each period
    let due = EvaluatorBuilder::new().annuity_due().build()?;
    let value = due.fv(
        &Decimal::new(1, 1).into(),
        &Decimal::from(2).into(),
        &Decimal::from(-100).into(),
        &Decimal::ZERO.into(),
    )?;
    println!("Annuity due FV: {:?}", value.as_decimal().map(|a| a.as_slice().to_vec()));

    // Errors are values, not NaN
    println!("\nExpected failures:");
    let mismatch = tvm_broadcast::npv(&vec![0.1, 0.2].into(), &NdArray::from_shape_vec([3, 5], vec![1.0; 15])?.into());
    if let Err(e) = mismatch {
        println!("  {}", e);
    }
    if let Err(e) = tvm_broadcast::npv(&(-1.0).into(), &vec![100.0, 100.0].into()) {
        println!("  {}", e);
    }
    if let Err(e) = tvm_broadcast::npv(&dec!(0.1).into(), &vec![1.0, 2.0].into()) {
        println!("  {}", e);
    }

    Ok(())
}
