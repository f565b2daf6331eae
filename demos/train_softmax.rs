// cargo run --example train_softmax
use descent_rs::{config::RegressionOptions, regression::SoftmaxRegression, CpuBackend};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // three blobs around (0, 0), (5, 0) and (0, 5)
    let centers = [(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)];
    let mut features = Vec::new();
    let mut labels = Vec::new();
    for i in 0..60 {
        let class = i % 3;
        let (cx, cy) = centers[class];
        let jitter = ((i * 13) % 10) as f64 / 10.0 - 0.5;
        features.push(vec![cx + jitter, cy - jitter]);
        let mut one_hot = vec![0.0; 3];
        one_hot[class] = 1.0;
        labels.push(one_hot);
    }

    let options = RegressionOptions::from_json(
        r#"{ "learningRate": 0.2, "iterations": 60, "batchSize": 12 }"#,
    )?;
    let mut model = SoftmaxRegression::<CpuBackend>::new(&features, &labels, options)?;
    model.train()?;

    println!("Training accuracy: {:.3}", model.test(&features, &labels)?);
    println!(
        "Predicted classes: {:?}",
        model.predict(&[vec![0.2, 0.1], vec![4.8, -0.3], vec![0.4, 5.2]])?
    );
    println!("Weights ((F + 1) x L): {:?}", model.weights().to_rows());
    Ok(())
}
