//! Operator plumbing for `NarrowInt`.
//!
//! Every macro here expects to be invoked from inside the module that defines
//! `NarrowInt`, as they reach directly into the private `v` field.

/// Allows fallible conversions into a narrow integer from a primitive type.
///
/// The primitive is widened first, so the policy sees the untruncated value.
macro_rules! narrow_tryconv_impl {
    ($($from_type:ty),*) => {
        $(
            impl<const N: u32, P: Policy> TryFrom<$from_type> for NarrowInt<N, P> {
                type Error = NarrowError;

                fn try_from(t: $from_type) -> Result<Self> {
                    Self::try_new_wide(t as u128)
                }
            }
        )*
    };
}

/// Allows fallible conversions out of a narrow integer into primitives which
/// may be narrower than the integer's width.
macro_rules! narrow_unwrap_impl {
    ($($into_type:ty),*) => {
        $(
            impl<const N: u32, P> TryFrom<NarrowInt<N, P>> for $into_type {
                type Error = TryFromIntError;

                fn try_from(t: NarrowInt<N, P>) -> result::Result<Self, Self::Error> {
                    <$into_type>::try_from(t.v)
                }
            }
        )*
    };
}

/// Implements a policy-resolved arithmetic operator.
///
/// `$wide` names an associated function on `NarrowInt` which takes both
/// operands as `u128` and returns a `Result`; the operator panics on error,
/// the same way primitive division by zero does.
///
/// The operator is implemented between two identical narrow integers, and
/// between a narrow integer and every listed primitive in both orders. The
/// narrow type is always the output.
macro_rules! arith_op_impl {
    ($trait_name:ident, $method_name:ident, $assign_trait:ident, $assign_method:ident, $wide:ident; $($prim:ty),*) => {
        impl<const N: u32, P: Policy> $trait_name for NarrowInt<N, P> {
            type Output = Self;

            #[track_caller]
            fn $method_name(self, rhs: Self) -> Self {
                or_panic(Self::$wide(self.v as u128, rhs.v as u128))
            }
        }

        impl<const N: u32, P: Policy> $assign_trait for NarrowInt<N, P> {
            #[track_caller]
            fn $assign_method(&mut self, rhs: Self) {
                *self = or_panic(Self::$wide(self.v as u128, rhs.v as u128));
            }
        }

        $(
            impl<const N: u32, P: Policy> $trait_name<$prim> for NarrowInt<N, P> {
                type Output = Self;

                #[track_caller]
                fn $method_name(self, rhs: $prim) -> Self {
                    or_panic(Self::$wide(self.v as u128, rhs as u128))
                }
            }

            impl<const N: u32, P: Policy> $assign_trait<$prim> for NarrowInt<N, P> {
                #[track_caller]
                fn $assign_method(&mut self, rhs: $prim) {
                    *self = or_panic(Self::$wide(self.v as u128, rhs as u128));
                }
            }

            impl<const N: u32, P: Policy> $trait_name<NarrowInt<N, P>> for $prim {
                type Output = NarrowInt<N, P>;

                #[track_caller]
                fn $method_name(self, rhs: NarrowInt<N, P>) -> NarrowInt<N, P> {
                    or_panic(NarrowInt::<N, P>::$wide(self as u128, rhs.v as u128))
                }
            }
        )*
    };
}

/// Implements a bitwise operator, re-masking the result to the integer's
/// width. Never consults the overflow policy.
macro_rules! bitwise_op_impl {
    ($trait_name:ident, $method_name:ident, $assign_trait:ident, $assign_method:ident; $($prim:ty),*) => {
        impl<const N: u32, P> $trait_name for NarrowInt<N, P> {
            type Output = Self;

            fn $method_name(self, rhs: Self) -> Self {
                Self::from_masked(self.v.$method_name(rhs.v))
            }
        }

        impl<const N: u32, P> $assign_trait for NarrowInt<N, P> {
            fn $assign_method(&mut self, rhs: Self) {
                *self = Self::from_masked(self.v.$method_name(rhs.v));
            }
        }

        $(
            impl<const N: u32, P> $trait_name<$prim> for NarrowInt<N, P> {
                type Output = Self;

                fn $method_name(self, rhs: $prim) -> Self {
                    Self::from_masked(self.v.$method_name(rhs as u64))
                }
            }

            impl<const N: u32, P> $assign_trait<$prim> for NarrowInt<N, P> {
                fn $assign_method(&mut self, rhs: $prim) {
                    *self = Self::from_masked(self.v.$method_name(rhs as u64));
                }
            }

            impl<const N: u32, P> $trait_name<NarrowInt<N, P>> for $prim {
                type Output = NarrowInt<N, P>;

                fn $method_name(self, rhs: NarrowInt<N, P>) -> NarrowInt<N, P> {
                    NarrowInt::from_masked((self as u64).$method_name(rhs.v))
                }
            }
        )*
    };
}

/// Implements a truncating shift by any primitive amount, or by another
/// narrow integer.
macro_rules! shift_op_impl {
    ($trait_name:ident, $method_name:ident, $assign_trait:ident, $assign_method:ident, $shift:ident; $($prim:ty),*) => {
        impl<const N: u32, P, const M: u32, Q> $trait_name<NarrowInt<M, Q>> for NarrowInt<N, P> {
            type Output = Self;

            fn $method_name(self, rhs: NarrowInt<M, Q>) -> Self {
                self.$shift(rhs.v as u128)
            }
        }

        impl<const N: u32, P, const M: u32, Q> $assign_trait<NarrowInt<M, Q>> for NarrowInt<N, P> {
            fn $assign_method(&mut self, rhs: NarrowInt<M, Q>) {
                *self = self.$shift(rhs.v as u128);
            }
        }

        $(
            impl<const N: u32, P> $trait_name<$prim> for NarrowInt<N, P> {
                type Output = Self;

                fn $method_name(self, rhs: $prim) -> Self {
                    self.$shift(rhs as u128)
                }
            }

            impl<const N: u32, P> $assign_trait<$prim> for NarrowInt<N, P> {
                fn $assign_method(&mut self, rhs: $prim) {
                    *self = self.$shift(rhs as u128);
                }
            }
        )*
    };
}

/// Implements magnitude comparisons against primitives, in both orders.
macro_rules! cmp_prim_impl {
    ($($prim:ty),*) => {
        $(
            impl<const N: u32, P> PartialEq<$prim> for NarrowInt<N, P> {
                fn eq(&self, other: &$prim) -> bool {
                    self.v as u128 == *other as u128
                }
            }

            impl<const N: u32, P> PartialEq<NarrowInt<N, P>> for $prim {
                fn eq(&self, other: &NarrowInt<N, P>) -> bool {
                    *self as u128 == other.v as u128
                }
            }

            impl<const N: u32, P> PartialOrd<$prim> for NarrowInt<N, P> {
                fn partial_cmp(&self, other: &$prim) -> Option<Ordering> {
                    Some((self.v as u128).cmp(&(*other as u128)))
                }
            }

            impl<const N: u32, P> PartialOrd<NarrowInt<N, P>> for $prim {
                fn partial_cmp(&self, other: &NarrowInt<N, P>) -> Option<Ordering> {
                    Some((*self as u128).cmp(&(other.v as u128)))
                }
            }
        )*
    };
}

/// Forwards a formatting trait to the underlying storage.
macro_rules! fmt_forward_impl {
    ($($fmt_trait:ident),*) => {
        $(
            impl<const N: u32, P> fmt::$fmt_trait for NarrowInt<N, P> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::$fmt_trait::fmt(&self.v, f)
                }
            }
        )*
    };
}

/// Wraps a fixed-policy arithmetic helper in a num-traits trait.
macro_rules! fixed_policy_impl {
    ($trait_name:ident, $method_name:ident, $policy:ty, $wide:ident) => {
        impl<const N: u32, P: Policy> $trait_name for NarrowInt<N, P> {
            fn $method_name(&self, v: &Self) -> Self {
                match Self::$wide::<$policy>(self.v as u128, v.v as u128) {
                    Ok(r) => Self::from_masked(r),
                    Err(_) => unreachable!("{} never fails", <$policy as Policy>::KIND),
                }
            }
        }
    };
}

/// Wraps an exact arithmetic helper in a num-traits checked trait.
macro_rules! checked_impl {
    ($trait_name:ident, $method_name:ident, $wide:ident) => {
        impl<const N: u32, P: Policy> $trait_name for NarrowInt<N, P> {
            fn $method_name(&self, v: &Self) -> Option<Self> {
                Self::$wide::<Fail>(self.v as u128, v.v as u128)
                    .ok()
                    .map(Self::from_masked)
            }
        }
    };
}
