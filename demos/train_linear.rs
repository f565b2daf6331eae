// cargo run --example train_linear
use descent_rs::{config::RegressionOptions, regression::LinearRegression, CpuBackend};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // y = 2x + 1 with a small deterministic wobble
    let x: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64 / 4.0]).collect();
    let y: Vec<Vec<f64>> = x
        .iter()
        .enumerate()
        .map(|(i, r)| vec![2.0 * r[0] + 1.0 + if i % 2 == 0 { 0.1 } else { -0.1 }])
        .collect();

    let options = RegressionOptions::new().with_iterations(300);
    let mut model = LinearRegression::<CpuBackend>::new(&x, &y, options)?;
    model.train()?;

    println!("slope (standardized x): {:.4}", model.slope());
    println!("intercept: {:.4}", model.intercept());
    println!("R²: {:.5}", model.test(&x, &y)?);
    println!("prediction at x = 20: {:?}", model.predict(&[vec![20.0]])?);
    Ok(())
}
