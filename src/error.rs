//! Errors returned by the few fallible constructors in the layout engine.
//!
//! Query paths (collision, snapping, gestures) never fail; they degrade to a
//! no-op result instead. Only inputs that would poison every later query are
//! rejected up front: zero-length walls, non-finite coordinates, and
//! malformed catalog or config JSON.

/// Error type for wall creation, registry edits, and config loading.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Both wall endpoints are the same point.
    #[error("wall endpoints coincide at ({x}, {y})")]
    ZeroLengthWall { x: f64, y: f64 },
    /// A coordinate or thickness was NaN or infinite.
    #[error("non-finite {field}: {value}")]
    NonFiniteCoordinate { field: &'static str, value: f64 },
    /// No wall with this number exists in the registry.
    #[error("unknown wall number {0}")]
    UnknownWall(u32),
    /// Wall numbers below 5 belong to the room boundary.
    #[error("wall number {0} is reserved for a boundary wall")]
    ReservedWallNumber(u32),
    /// Two custom walls share a number.
    #[error("wall number {0} is already in use")]
    DuplicateWallNumber(u32),
    /// No wall number is left to assign.
    #[error("wall numbers exhausted")]
    WallNumbersExhausted,
    /// Boundary walls are derived from the room and cannot be edited directly.
    #[error("wall {0} is a room boundary wall")]
    BoundaryWall(u32),
    /// The element catalog JSON could not be parsed.
    #[error("failed to parse element catalog: {0}")]
    CatalogParse(#[source] serde_json::Error),
    /// The layout config JSON could not be parsed.
    #[error("failed to parse layout config: {0}")]
    ConfigParse(#[source] serde_json::Error),
}
