// cargo run --example train_softmax_ndarray --features ndarray
use descent_rs::{backend::NdarrayBackend, config::RegressionOptions, regression::SoftmaxRegression};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("debug".parse()?))
        .init();

    let features = vec![
        vec![0.1, 0.0],
        vec![0.0, 0.3],
        vec![4.9, 0.2],
        vec![5.2, -0.1],
        vec![0.2, 5.1],
        vec![-0.3, 4.8],
    ];
    let labels = vec![
        vec![1.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.0, 0.0, 1.0],
    ];

    let options = RegressionOptions::new().with_iterations(40).with_batch_size(2);
    let mut model = SoftmaxRegression::<NdarrayBackend>::new(&features, &labels, options)?;
    model.train()?;

    println!("Accuracy: {:.3}", model.test(&features, &labels)?);
    println!("Latest loss: {:?}", model.loss_history().latest());
    Ok(())
}
