/// Errors raised while loading a level or building the engine.
///
/// These are only produced before the first frame renders; the per-frame
/// movement and render path never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Map side is below the minimum the caller needs.
    MapTooSmall { size: usize, min: usize },
    /// A per-cell buffer does not hold `size * size` entries.
    GridSizeMismatch { expected: usize, found: usize },
    /// A border cell is open, so rays could escape the grid.
    OpenBorder { x: usize, y: usize },
    /// Exit cell lies outside the grid.
    ExitOutOfBounds { x: usize, y: usize },
    /// Exit cell is a wall and can never be reached.
    ExitOccupied { x: usize, y: usize },
    /// Texture with zero width or height.
    EmptyTexture(&'static str),
    /// Texture texel count does not match its dimensions.
    TextureSizeMismatch { expected: usize, found: usize },
    /// Render or movement settings out of range.
    InvalidSetting(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MapTooSmall { size, min } => {
                write!(f, "map side {size} is too small (minimum is {min})")
            }
            ConfigError::GridSizeMismatch { expected, found } => {
                write!(f, "grid holds {found} cells, expected {expected}")
            }
            ConfigError::OpenBorder { x, y } => {
                write!(f, "border cell ({x}, {y}) is not solid")
            }
            ConfigError::ExitOutOfBounds { x, y } => {
                write!(f, "exit cell ({x}, {y}) is outside the map")
            }
            ConfigError::ExitOccupied { x, y } => write!(f, "exit cell ({x}, {y}) is a wall"),
            ConfigError::EmptyTexture(name) => write!(f, "texture '{name}' has no texels"),
            ConfigError::TextureSizeMismatch { expected, found } => {
                write!(f, "texture holds {found} texels, expected {expected}")
            }
            ConfigError::InvalidSetting(what) => write!(f, "invalid setting: {what}"),
        }
    }
}

impl std::error::Error for ConfigError {}
