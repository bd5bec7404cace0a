use thiserror::Error;

/// Top-level error type for the Simplis kernel.
#[derive(Debug, Error)]
pub enum SimplisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Simplify(#[from] SimplifyError),
}

/// Errors related to geometric parameters and computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors related to ring simplification.
#[derive(Debug, Error)]
pub enum SimplifyError {
    /// The ring collapsed below 3 points. For an exterior ring this rejects
    /// the whole polygon; rejected holes are dropped by the facade.
    #[error("ring collapsed below 3 points during simplification")]
    DegenerateRing,

    #[error("ring must have at least 3 distinct coordinates, got {0}")]
    TooFewCoordinates(usize),

    #[error("non-finite coordinate at index {0}")]
    NonFiniteCoordinate(usize),
}

/// Convenience type alias for results using [`SimplisError`].
pub type Result<T> = std::result::Result<T, SimplisError>;
