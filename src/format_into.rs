//! In-place formatting for the types generated code writes without
//! allocating.

/// Formats a value directly into a byte slice.
///
/// # Safety
///
/// When `try_format_into` returns `Some(n)`, `buf[..n]` must hold valid
/// UTF-8. Generated code may turn the buffer into a `String` without
/// re-checking it.
pub unsafe trait FormatInto {
    /// Upper bound on the bytes `try_format_into` writes for this value.
    fn max_len(&self) -> usize;

    /// Write the value at the start of `buf` and return the byte count, or
    /// `None` if `buf` is too short. Nothing is promised about `buf` after
    /// `None`.
    fn try_format_into(&self, buf: &mut [u8]) -> Option<usize>;
}

macro_rules! decimal_writer {
    ($name:ident, $t:ty, $digits:expr) => {
        fn $name(mut n: $t, negative: bool, buf: &mut [u8]) -> Option<usize> {
            let mut digits = [0u8; $digits + 1];
            let mut start = digits.len();
            loop {
                start -= 1;
                digits[start] = b'0' + (n % 10) as u8;
                n /= 10;
                if n == 0 {
                    break;
                }
            }
            if negative {
                start -= 1;
                digits[start] = b'-';
            }

            let text = &digits[start..];
            buf.get_mut(..text.len())?.copy_from_slice(text);
            Some(text.len())
        }
    };
}

decimal_writer!(write_u64, u64, 20);
decimal_writer!(write_u128, u128, 39);

macro_rules! impl_unsigned {
    ($($t:ty => $max:expr),* $(,)?) => {$(
        unsafe impl FormatInto for $t {
            #[inline]
            fn max_len(&self) -> usize {
                $max
            }

            #[inline]
            fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
                write_u64(*self as u64, false, buf)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty => $max:expr),* $(,)?) => {$(
        unsafe impl FormatInto for $t {
            #[inline]
            fn max_len(&self) -> usize {
                $max
            }

            #[inline]
            fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
                write_u64(self.unsigned_abs() as u64, *self < 0, buf)
            }
        }
    )*};
}

impl_unsigned!(u8 => 3, u16 => 5, u32 => 10, u64 => 20, usize => 20);
impl_signed!(i8 => 4, i16 => 6, i32 => 11, i64 => 20, isize => 20);

unsafe impl FormatInto for u128 {
    #[inline]
    fn max_len(&self) -> usize {
        39
    }

    fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
        write_u128(*self, false, buf)
    }
}

unsafe impl FormatInto for i128 {
    #[inline]
    fn max_len(&self) -> usize {
        40
    }

    fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
        write_u128(self.unsigned_abs(), *self < 0, buf)
    }
}

unsafe impl FormatInto for bool {
    #[inline]
    fn max_len(&self) -> usize {
        5
    }

    #[inline]
    fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
        let text: &[u8] = if *self { b"true" } else { b"false" };
        buf.get_mut(..text.len())?.copy_from_slice(text);
        Some(text.len())
    }
}

unsafe impl FormatInto for char {
    #[inline]
    fn max_len(&self) -> usize {
        self.len_utf8()
    }

    #[inline]
    fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
        let len = self.len_utf8();
        let out = buf.get_mut(..len)?;
        self.encode_utf8(out);
        Some(len)
    }
}

unsafe impl<T: FormatInto + ?Sized> FormatInto for &T {
    #[inline]
    fn max_len(&self) -> usize {
        (**self).max_len()
    }

    #[inline]
    fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
        (**self).try_format_into(buf)
    }
}

unsafe impl<T: FormatInto + ?Sized> FormatInto for &mut T {
    #[inline]
    fn max_len(&self) -> usize {
        (**self).max_len()
    }

    #[inline]
    fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
        (**self).try_format_into(buf)
    }
}
