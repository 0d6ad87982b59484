//! Small geometric types shared by all other modules.

/// Implement `$Op` between two `$Type` values, for all combinations of values
/// and references.
macro_rules! impl_vector_arithmetic {
    ($Type:ty, $Op:ident, $op:ident, $sel:ident, $other:ident, $res:expr) => (
        impl $Op<$Type> for $Type {
            type Output = $Type;
            #[inline] fn $op($sel, $other: $Type) -> $Type {
                $res
            }
        }

        impl<'a> $Op<&'a $Type> for $Type {
            type Output = $Type;
            #[inline] fn $op($sel, $other: &'a $Type) -> $Type {
                $res
            }
        }

        impl<'a> $Op<$Type> for &'a $Type {
            type Output = $Type;
            #[inline] fn $op($sel, $other: $Type) -> $Type {
                $res
            }
        }

        impl<'a, 'b> $Op<&'a $Type> for &'b $Type {
            type Output = $Type;
            #[inline] fn $op($sel, $other: &'a $Type) -> $Type {
                $res
            }
        }
    );
}

/// Implement `$Op` between a `$Type` value (or reference) and a scalar.
macro_rules! impl_scalar_arithmetic {
    ($Type:ty, $Op:ident, $op:ident, $sel:ident, $other:ident, $res:expr) => (
        impl $Op<f64> for $Type {
            type Output = $Type;
            #[inline] fn $op($sel, $other: f64) -> $Type {
                $res
            }
        }

        impl<'a> $Op<f64> for &'a $Type {
            type Output = $Type;
            #[inline] fn $op($sel, $other: f64) -> $Type {
                $res
            }
        }
    );
}

mod vectors;
pub use self::vectors::Vector3D;
