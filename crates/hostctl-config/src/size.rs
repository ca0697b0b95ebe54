//! Byte sizes written as `"50MiB"` in config files

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

const UNITS: [(&str, u64); 4] = [
    ("GiB", 1 << 30),
    ("MiB", 1 << 20),
    ("KiB", 1 << 10),
    ("B", 1),
];

/// A size in bytes.
///
/// Parses plain integers and unit-suffixed strings. Both decimal-looking
/// (`MB`) and binary (`MiB`) suffixes are treated as powers of 1024, matching
/// how the platform interprets storage limits. Renders using the largest
/// binary unit that divides the value exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SizeInBytes(pub u64);

impl SizeInBytes {
    pub fn bytes(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SizeInBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0B");
        }
        for (suffix, factor) in UNITS {
            if self.0 % factor == 0 {
                return write!(f, "{}{}", self.0 / factor, suffix);
            }
        }
        write!(f, "{}B", self.0)
    }
}

impl FromStr for SizeInBytes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, suffix) = trimmed.split_at(split);
        let invalid = || Error::InvalidSize {
            value: s.to_string(),
        };

        let count: u64 = digits.parse().map_err(|_| invalid())?;
        let factor: u64 = match suffix.trim().to_ascii_lowercase().as_str() {
            "" | "b" => 1,
            "k" | "kb" | "kib" => 1 << 10,
            "m" | "mb" | "mib" => 1 << 20,
            "g" | "gb" | "gib" => 1 << 30,
            _ => return Err(invalid()),
        };

        count
            .checked_mul(factor)
            .map(SizeInBytes)
            .ok_or_else(invalid)
    }
}

impl Serialize for SizeInBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SizeInBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SizeVisitor;

        impl Visitor<'_> for SizeVisitor {
            type Value = SizeInBytes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a byte count or a size such as \"50MiB\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(SizeInBytes)
                    .map_err(|_| E::custom(format!("size must not be negative: {}", v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(SizeInBytes(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(SizeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("50MiB".parse::<SizeInBytes>().unwrap(), SizeInBytes(50 << 20));
        assert_eq!("50MB".parse::<SizeInBytes>().unwrap(), SizeInBytes(50 << 20));
        assert_eq!("1GB".parse::<SizeInBytes>().unwrap(), SizeInBytes(1 << 30));
        assert_eq!("512".parse::<SizeInBytes>().unwrap(), SizeInBytes(512));
        assert_eq!("8 KiB".parse::<SizeInBytes>().unwrap(), SizeInBytes(8 << 10));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("MiB".parse::<SizeInBytes>().is_err());
        assert!("12XB".parse::<SizeInBytes>().is_err());
        assert!("-5MiB".parse::<SizeInBytes>().is_err());
    }

    #[test]
    fn test_display_uses_largest_exact_unit() {
        assert_eq!(SizeInBytes(50 << 20).to_string(), "50MiB");
        assert_eq!(SizeInBytes(1536).to_string(), "1536B");
        assert_eq!(SizeInBytes(2048).to_string(), "2KiB");
        assert_eq!(SizeInBytes(0).to_string(), "0B");
    }

    #[test]
    fn test_display_round_trips() {
        let sizes = [SizeInBytes(1), SizeInBytes(5 << 20), SizeInBytes(3 << 30), SizeInBytes(1000)];
        for size in sizes {
            assert_eq!(size.to_string().parse::<SizeInBytes>().unwrap(), size);
        }
    }
}
