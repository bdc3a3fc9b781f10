// Forecast model abstraction and its load-once holder

pub mod forecast_model;
pub mod model_slot;

// Re-export key types for convenience
pub use forecast_model::{Activation, DenseForecastModel, DenseLayer, ForecastModel, ModelArtifact};
pub use model_slot::ModelSlot;
