use std::fmt;

/// Errors surfaced to the user as inline warnings.
///
/// None of these are fatal to the process: they are caught at the point of the
/// user-triggered action and rendered by the view that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The ticker field was blank when a trigger was pressed
    EmptyTicker,
    /// The provider answered, but had no rows for this ticker/range
    NoData { ticker: String },
    /// The provider call could not complete (network, decoding, ...)
    FetchFailed(String),
    /// A date field could not be parsed
    InvalidDate(String),
    /// Start date is after end date
    InvalidRange,
    /// Too few observations to build a single forecast window
    InsufficientData { available: usize, required: usize },
    /// Training closes have zero variance, so min-max scaling is undefined
    DegenerateScale { price: f64 },
    /// Forecast artifact missing, corrupt or mis-shaped
    ModelUnavailable(String),
    /// The model produced an unusable batch (wrong length, NaN, ...)
    ModelOutput(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::EmptyTicker => write!(f, "Please enter a stock ticker."),
            AppError::NoData { ticker } => {
                write!(f, "No data available for the given stock ticker: {}", ticker)
            }
            AppError::FetchFailed(msg) => write!(f, "Could not fetch price data: {}", msg),
            AppError::InvalidDate(input) => {
                write!(f, "Invalid date '{}' (expected YYYY-MM-DD)", input)
            }
            AppError::InvalidRange => write!(f, "Start date must not be after end date"),
            AppError::InsufficientData {
                available,
                required,
            } => write!(
                f,
                "Not enough history to forecast: {} observations, need at least {}",
                available, required
            ),
            AppError::DegenerateScale { price } => write!(
                f,
                "Training prices never move (constant at {:.4}), cannot scale for the model",
                price
            ),
            AppError::ModelUnavailable(msg) => write!(f, "Forecast model unavailable: {}", msg),
            AppError::ModelOutput(msg) => write!(f, "Forecast model output rejected: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Errors that only disable the prediction chart; the price charts still render.
    pub fn is_forecast_only(&self) -> bool {
        matches!(
            self,
            AppError::InsufficientData { .. }
                | AppError::DegenerateScale { .. }
                | AppError::ModelUnavailable(_)
                | AppError::ModelOutput(_)
        )
    }
}
