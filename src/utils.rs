/// Compute the greatest common divisor of two native unsigned integers.
pub fn gcd_unsigned(mut a: u128, mut b: u128) -> u128 {
    let mut c;
    while a != 0 {
        c = a;
        a = b % a;
        b = c;
    }
    b
}

/// Forward all owned/borrowed combinations of a binary operator to a single
/// implementation that takes two references.
macro_rules! forward_binop {
    ($t:ty, $tr:ident, $method:ident, $imp:ident) => {
        impl<'a, 'b> std::ops::$tr<&'b $t> for &'a $t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: &'b $t) -> $t {
                self.$imp(rhs)
            }
        }

        impl<'b> std::ops::$tr<&'b $t> for $t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: &'b $t) -> $t {
                (&self).$imp(rhs)
            }
        }

        impl<'a> std::ops::$tr<$t> for &'a $t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: $t) -> $t {
                self.$imp(&rhs)
            }
        }

        impl std::ops::$tr<$t> for $t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: $t) -> $t {
                (&self).$imp(&rhs)
            }
        }
    };
}

/// Implement the assigning variant of a binary operator in terms of
/// the reference implementation.
macro_rules! forward_assign_op {
    ($t:ty, $tr:ident, $method:ident, $imp:ident) => {
        impl<'b> std::ops::$tr<&'b $t> for $t {
            #[inline]
            fn $method(&mut self, rhs: &'b $t) {
                *self = (&*self).$imp(rhs);
            }
        }

        impl std::ops::$tr<$t> for $t {
            #[inline]
            fn $method(&mut self, rhs: $t) {
                *self = (&*self).$imp(&rhs);
            }
        }
    };
}

pub(crate) use forward_assign_op;
pub(crate) use forward_binop;
