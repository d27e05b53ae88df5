use super::ScaleFactors;

/// Scaling helpers on plain numbers.
///
/// ```
/// use scaled_core::scale::{Scalable, ScaleFactors};
///
/// let factors = ScaleFactors { dimen_scale: 1.5, font_scale: 1.3, ..ScaleFactors::IDENTITY };
/// assert_eq!(16_i32.font_scaled(&factors), 21.0);
/// assert_eq!(8_u32.d(&factors), 12.0);
/// ```
pub trait Scalable: Copy {
    fn to_scale_input(self) -> f64;

    /// Layout measurement scaled by the dimension factor, rounded up.
    fn scaled(self, factors: &ScaleFactors) -> f64 {
        factors.scaled(self.to_scale_input())
    }

    /// Text size scaled by the font factor, rounded up.
    fn font_scaled(self, factors: &ScaleFactors) -> f64 {
        factors.font_scaled(self.to_scale_input())
    }

    /// Short for [`Scalable::scaled`].
    fn d(self, factors: &ScaleFactors) -> f64 {
        self.scaled(factors)
    }

    /// Short for [`Scalable::font_scaled`].
    fn f(self, factors: &ScaleFactors) -> f64 {
        self.font_scaled(factors)
    }
}

macro_rules! impl_scalable_lossless {
    ($($t:ty),*) => {
        $(
            impl Scalable for $t {
                #[inline]
                fn to_scale_input(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_scalable_lossless!(f64, f32, i32, u32, i16, u16, u8);

impl Scalable for usize {
    #[inline]
    fn to_scale_input(self) -> f64 {
        self as f64
    }
}
