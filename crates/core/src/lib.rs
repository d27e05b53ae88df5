pub mod config;
pub mod host;
pub mod scale;
pub mod text;

pub use config::{ConfigError, InvalidConfig};
pub use host::{FixedWindow, WindowMetrics};
pub use scale::{ScaleConfig, ScaleFactors, ScaleRange, Scalable, Scaler, compute_factors};
pub use text::ScaledText;
