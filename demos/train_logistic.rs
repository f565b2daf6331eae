// cargo run --example train_logistic
use descent_rs::{config::RegressionOptions, regression::LogisticRegression, CpuBackend};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // y = 1 when x1 + x2 > 10
    let mut features = Vec::new();
    let mut labels = Vec::new();
    for i in 0..120 {
        let x1 = ((i * 37) % 100) as f64 / 10.0;
        let x2 = ((i * 59 + 13) % 100) as f64 / 10.0;
        if (x1 + x2 - 10.0).abs() < 0.5 {
            continue;
        }
        features.push(vec![x1, x2]);
        labels.push(vec![if x1 + x2 > 10.0 { 1.0 } else { 0.0 }]);
    }
    let split = features.len() * 4 / 5;
    let (train_x, test_x) = features.split_at(split);
    let (train_y, test_y) = labels.split_at(split);

    let options = RegressionOptions::new()
        .with_learning_rate(0.5)
        .with_iterations(100)
        .with_batch_size(25)
        .with_verbose(true);

    let mut model = LogisticRegression::<CpuBackend>::new(train_x, train_y, options)?;
    model.train()?;

    println!("Held-out accuracy: {:.3}", model.test(test_x, test_y)?);
    println!("Final learning rate: {:.4}", model.learning_rate());
    println!("P(y=1 | [8, 7]): {:?}", model.predict_proba(&[vec![8.0, 7.0]])?);
    println!("Loss curve: {}", model.loss_history().plot_payload());
    Ok(())
}
