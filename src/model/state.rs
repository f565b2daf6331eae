/// Marker type for a model that is still being trained.
///
/// `Trainer::fit` accepts `Model<Unfitted>`; prediction methods are not available
/// in this state.
#[derive(Clone, Copy, Debug)]
pub struct Unfitted;

/// Marker type for a trained model.
///
/// A `Fitted` model holds only its weights: no optimizer state, loss function or
/// training options.
#[derive(Clone, Copy, Debug)]
pub struct Fitted;
