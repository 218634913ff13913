use std::{fmt, str};

use fstr::FStr;

use crate::codec::decode_fixed_width;
use crate::timestamp::DEFAULT_WIDTH;

/// Represents a Universally Unique IDentifier.
///
/// The type is a plain 16-byte container. An absent identifier is expressed as `Option<Uuid>`
/// rather than as [`Uuid::NIL`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns `true` if all the bits are zero.
    pub const fn is_nil(&self) -> bool {
        u128::from_be_bytes(self.0) == 0
    }

    /// Reads the timestamp stored in the trailing six bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use comb::Uuid;
    ///
    /// let x = "00000000-0000-0000-0000-ffffffffffff".parse::<Uuid>()?;
    /// assert_eq!(x.timestamp(), 0xffff_ffff_ffff);
    /// # Ok::<(), comb::ParseError>(())
    /// ```
    pub fn timestamp(&self) -> u64 {
        self.timestamp_with_width(DEFAULT_WIDTH)
    }

    /// Reads the timestamp stored in the trailing `n_bytes` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `n_bytes` is not between 1 and 8.
    pub fn timestamp_with_width(&self, n_bytes: usize) -> u64 {
        decode_fixed_width(&self.0, self.0.len().saturating_sub(n_bytes), n_bytes)
    }

    /// Returns the 4-bit version field value.
    ///
    /// Identifiers generated with the format marker report `6`.
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns the variant indicated by the most significant bits of the eighth byte.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 5 {
            0b000..=0b011 => Variant::Var0,
            0b100..=0b101 => Variant::Var10,
            0b110 => Variant::Var110,
            _ => Variant::Var111,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use comb::Uuid;
    ///
    /// let x = "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f");
    /// assert_eq!(format!("{}", y), "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f");
    /// # Ok::<(), comb::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut r = 0;
        let mut w = 0;
        while r < 16 {
            let e = self.0[r] as usize;
            buffer[w] = DIGITS[e >> 4];
            buffer[w + 1] = DIGITS[e & 15];
            if r == 3 || r == 5 || r == 7 || r == 9 {
                buffer[w + 2] = b'-';
                w += 1;
            }
            r += 1;
            w += 2;
        }
        debug_assert!(buffer.is_ascii());
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

/// The variant field values of [`Uuid`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xx`, reserved for NCS backward compatibility.
    Var0,
    /// `10x`, the variant specified by RFC 4122.
    Var10,
    /// `110`, reserved for Microsoft backward compatibility.
    Var110,
    /// `111`, reserved for future definition. Set by the format marker.
    Var111,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ParseError)?.to_digit(16).ok_or(ParseError)? as u8;
            let lo = iter.next().ok_or(ParseError)?.to_digit(16).ok_or(ParseError)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ParseError)? != '-' {
                return Err(ParseError);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ParseError)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError;

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [([u8; 16], &'static str)] {
        &[
            ([0u8; 16], "00000000-0000-0000-0000-000000000000"),
            (
                [
                    63, 154, 28, 46, 119, 208, 107, 65, 229, 195, 3, 145, 226, 29, 122, 95,
                ],
                "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f",
            ),
            (
                [
                    192, 75, 136, 241, 10, 110, 109, 44, 247, 157, 3, 145, 226, 29, 122, 96,
                ],
                "c04b88f1-0a6e-6d2c-f79d-0391e21d7a60",
            ),
            (
                [
                    255, 255, 255, 255, 255, 255, 111, 255, 255, 255, 255, 255, 255, 255, 255, 255,
                ],
                "ffffffff-ffff-6fff-ffff-ffffffffffff",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (bytes, text) in prepare_cases() {
            let from_bytes = Uuid::from(*bytes);
            assert_eq!(Ok(from_bytes), text.parse());
            assert_eq!(Ok(from_bytes), text.to_uppercase().parse());
            assert_eq!(&from_bytes.encode() as &str, *text);
            assert_eq!(&from_bytes.to_string(), text);
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(from_bytes).to_string(), text);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f",
            "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f ",
            "+3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f",
            "3f9a1c2e77d06b41e5c30391e21d7a5f",
            "3f9a1c2e-77d06b41-e5c3-0391e21d7a5f",
            "{3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f}",
            "3f9a1c2e-77d0-6b 1-e5c3-0391e21d7a5f",
            "3f9a1c2g-77d0-6b41-e5c3-0391e21d7a5f",
            "3f9a1c2e-77d0-6b41-e5c3_0391e21d7a5f",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(
            &Uuid::NIL.encode() as &str,
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            &Uuid::MAX.encode() as &str,
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
        assert!(Uuid::NIL.is_nil());
        assert!(!Uuid::MAX.is_nil());
    }

    /// Reads the trailing six bytes as the default timestamp
    #[test]
    fn reads_the_trailing_six_bytes_as_the_default_timestamp() {
        let e: Uuid = "00000000-0000-0000-0000-ffffffffffff".parse().unwrap();
        assert_eq!(e.timestamp(), 0xffff_ffff_ffff);
        assert_eq!(e.timestamp(), 281_474_976_710_655);
        assert_eq!(e.timestamp_with_width(8), 0xffff_ffff_ffff);
        assert_eq!(e.timestamp_with_width(1), 0xff);

        let e: Uuid = "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f".parse().unwrap();
        assert_eq!(e.timestamp(), 0x0391_e21d_7a5f);
    }

    /// Panics on a timestamp width beyond eight bytes
    #[test]
    #[should_panic(expected = "`width` must be between 1 and 8 bytes")]
    fn panics_on_a_timestamp_width_beyond_eight_bytes() {
        Uuid::MAX.timestamp_with_width(9);
    }

    /// Reports version and variant fields
    #[test]
    fn reports_version_and_variant_fields() {
        let e: Uuid = "3f9a1c2e-77d0-6b41-e5c3-0391e21d7a5f".parse().unwrap();
        assert_eq!(e.version(), 6);
        assert_eq!(e.variant(), Variant::Var111);

        let e: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse().unwrap();
        assert_eq!(e.version(), 7);
        assert_eq!(e.variant(), Variant::Var10);

        assert_eq!(Uuid::NIL.variant(), Variant::Var0);
        assert_eq!(Uuid::from([0xc0; 16]).variant(), Variant::Var110);
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (bytes, _) in prepare_cases() {
            let e = Uuid::from(*bytes);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(e.encode().to_uppercase().parse(), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string().to_uppercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_bytes(), &<[u8; 16]>::from(e));
        }
    }
}
