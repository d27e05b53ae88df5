pub mod element;
pub mod style;
pub mod types;

pub use element::{EllipsizeMode, TextElement, TextProps};
pub use style::{FontStyle, FontWeight, StyleProp, TextAlign, TextStyle};
pub use types::ViewportSize;
