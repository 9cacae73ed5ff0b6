pub use pretty::DocAllocator;
pub use pretty::termcolor;
pub use pretty::termcolor::Color;
pub use pretty::termcolor::ColorChoice;
pub use pretty::termcolor::ColorSpec;
pub use pretty::termcolor::WriteColor;

pub mod theme;
pub mod tokens;
mod types;

pub use types::*;

pub const DEFAULT_WIDTH: usize = 100;
