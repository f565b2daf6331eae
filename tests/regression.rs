use descent_rs::backend::CpuBackend;
use descent_rs::config::RegressionOptions;
use descent_rs::error::RegressionError;
use descent_rs::regression::{LinearRegression, LogisticRegression, SoftmaxRegression};
use serde_json::json;

type Cpu = CpuBackend;

/// Deterministic uniform samples in `[0, 1)`.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Points in `[0, 10]²` labelled by the side of `x1 + x2 = 10`, with a gap of 1
/// around the line.
fn separable(n: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let mut rng = Lcg(seed);
    let mut features = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    while features.len() < n {
        let x1 = rng.next() * 10.0;
        let x2 = rng.next() * 10.0;
        let side = x1 + x2 - 10.0;
        if side.abs() < 1.0 {
            continue;
        }
        features.push(vec![x1, x2]);
        labels.push(vec![if side > 0.0 { 1.0 } else { 0.0 }]);
    }
    (features, labels)
}

/// Three noisy clusters with one-hot labels.
fn three_clusters(per_class: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let centers = [(0.0, 0.0), (6.0, 0.0), (0.0, 6.0)];
    let mut rng = Lcg(seed);
    let mut features = Vec::new();
    let mut labels = Vec::new();
    for _ in 0..per_class {
        for (class, &(cx, cy)) in centers.iter().enumerate() {
            features.push(vec![cx + rng.next() * 2.0 - 1.0, cy + rng.next() * 2.0 - 1.0]);
            let mut one_hot = vec![0.0; 3];
            one_hot[class] = 1.0;
            labels.push(one_hot);
        }
    }
    (features, labels)
}

#[test]
fn logistic_regression_separates_linear_data() {
    let (train_x, train_y) = separable(100, 7);
    let (test_x, test_y) = separable(50, 99);
    let options = RegressionOptions::new()
        .with_iterations(100)
        .with_learning_rate(0.5)
        .with_batch_size(50);

    let mut model = LogisticRegression::<Cpu>::new(&train_x, &train_y, options).unwrap();
    model.train().unwrap();

    assert_eq!(model.batches_per_epoch(), 2);
    assert_eq!(model.loss_history().len(), 100);
    let accuracy = model.test(&test_x, &test_y).unwrap();
    assert!(accuracy >= 0.9, "held-out accuracy {}", accuracy);
}

#[test]
fn softmax_regression_learns_three_classes() {
    let (train_x, train_y) = three_clusters(30, 3);
    let (test_x, test_y) = three_clusters(10, 11);
    let options = RegressionOptions::new()
        .with_iterations(50)
        .with_batch_size(10);

    let mut model = SoftmaxRegression::<Cpu>::new(&train_x, &train_y, options).unwrap();
    model.train().unwrap();

    assert!(model.test(&test_x, &test_y).unwrap() >= 0.95);
    assert_eq!(
        model.predict(&[vec![0.0, 0.0], vec![6.0, 0.0], vec![0.0, 6.0]]).unwrap(),
        vec![0, 1, 2]
    );
    let history = model.loss_history();
    assert!(history.latest().unwrap() < history.chronological()[0]);
}

#[test]
fn linear_regression_fits_noiseless_line() {
    let x: Vec<Vec<f64>> = (0..50).map(|i| vec![i as f64 / 5.0 - 3.0]).collect();
    let y: Vec<Vec<f64>> = x.iter().map(|r| vec![0.7 * r[0] - 2.0]).collect();

    let mut model = LinearRegression::<Cpu>::new(&x, &y, RegressionOptions::new()).unwrap();
    model.train().unwrap();

    assert!(model.test(&x, &y).unwrap() > 0.99);
    let predicted = model.predict(&[vec![10.0]]).unwrap();
    assert!((predicted[0] - 5.0).abs() < 1e-3);
}

#[test]
fn weights_have_one_row_per_feature_plus_bias() {
    let x = vec![
        vec![1.0, 2.0, 3.0],
        vec![2.0, 0.0, 1.0],
        vec![5.0, 5.0, 5.0],
    ];
    let y = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]];
    let model = SoftmaxRegression::<Cpu>::new(&x, &y, RegressionOptions::new()).unwrap();

    assert_eq!(model.processed_features().shape(), (3, 4));
    assert_eq!(model.weights().shape(), (4, 2));
    // bias column of ones
    for row in model.processed_features().to_rows() {
        assert_eq!(row[0], 1.0);
    }
}

#[test]
fn remainder_rows_do_not_drive_gradient_steps() {
    let (x, mut y) = separable(47, 5);
    let options = RegressionOptions::new()
        .with_iterations(1)
        .with_batch_size(10);

    let mut model = LogisticRegression::<Cpu>::new(&x, &y, options.clone()).unwrap();
    model.train().unwrap();
    assert_eq!(model.batches_per_epoch(), 4);

    // flipping the labels of rows 40..47 leaves the first epoch's weights unchanged
    for label in y.iter_mut().skip(40) {
        label[0] = 1.0 - label[0];
    }
    let mut flipped = LogisticRegression::<Cpu>::new(&x, &y, options).unwrap();
    flipped.train().unwrap();

    assert_eq!(model.weights().to_vec(), flipped.weights().to_vec());
}

#[test]
fn loss_history_is_newest_first() {
    let (x, y) = separable(40, 21);
    let options = RegressionOptions::new()
        .with_iterations(5)
        .with_batch_size(40);
    let mut model = LogisticRegression::<Cpu>::new(&x, &y, options).unwrap();
    model.train().unwrap();

    let history = model.loss_history();
    assert_eq!(history.len(), 5);
    assert_eq!(history.latest(), history.get(0));
    assert_eq!(history.chronological().last().copied(), history.latest());

    let plot = history.plot_payload();
    let expected: Vec<f64> = history.chronological();
    assert_eq!(plot, json!({ "x": expected }));
}

#[test]
fn learning_rate_ceiling_caps_growth() {
    let (x, y) = separable(40, 13);
    let base = RegressionOptions::new()
        .with_iterations(30)
        .with_batch_size(40)
        .with_learning_rate(0.01);

    let mut free = LogisticRegression::<Cpu>::new(&x, &y, base.clone()).unwrap();
    free.train().unwrap();
    assert!(free.learning_rate() > 0.012);

    let mut capped =
        LogisticRegression::<Cpu>::new(&x, &y, base.with_learning_rate_ceiling(0.012)).unwrap();
    capped.train().unwrap();
    assert!(capped.learning_rate() <= 0.012);
}

#[test]
fn options_parse_from_json() {
    let options = RegressionOptions::from_json(
        r#"{ "learningRate": 0.5, "iterations": 100, "batchSize": 50, "decisionBoundary": 0.7 }"#,
    )
    .unwrap();
    assert_eq!(options.learning_rate, 0.5);
    assert_eq!(options.iterations, 100);
    assert_eq!(options.batch_size, 50);
    assert_eq!(options.decision_boundary, 0.7);
    assert!(options.learning_rate_ceiling.is_none());

    assert!(matches!(
        RegressionOptions::from_json(r#"{ "batchSize": 0 }"#),
        Err(RegressionError::InvalidOption(_))
    ));
    assert!(matches!(
        RegressionOptions::from_json("{ not json"),
        Err(RegressionError::Options(_))
    ));
}

#[test]
fn prediction_rejects_wrong_feature_count() {
    let (x, y) = separable(20, 1);
    let model = LogisticRegression::<Cpu>::new(&x, &y, RegressionOptions::new()).unwrap();
    assert!(matches!(
        model.test(&[vec![1.0, 2.0, 3.0]], &[vec![1.0]]),
        Err(RegressionError::FeatureMismatch {
            expected_features: 2,
            got_features: 3
        })
    ));
}
