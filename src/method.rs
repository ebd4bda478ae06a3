//! HTTP method bitmask used by routes and match requests.
//!
//! Routes may accept more than one verb, so methods are stored as a small
//! bitset rather than a single `http::Method`:
//!
//! | Verb   | Bit |
//! |--------|-----|
//! | GET    | 1   |
//! | POST   | 2   |
//! | PUT    | 4   |
//! | DELETE | 8   |
//!
//! `ALL` (15) is the union of the four.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use http::Method;

use crate::error::RouterError;

/// A non-empty set of HTTP verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodMask(u8);

impl MethodMask {
    pub const GET: MethodMask = MethodMask(1);
    pub const POST: MethodMask = MethodMask(2);
    pub const PUT: MethodMask = MethodMask(4);
    pub const DELETE: MethodMask = MethodMask(8);
    pub const ALL: MethodMask = MethodMask(15);

    /// Single-bit masks in bit order.
    pub const VERBS: [MethodMask; 4] = [
        MethodMask::GET,
        MethodMask::POST,
        MethodMask::PUT,
        MethodMask::DELETE,
    ];

    /// Build a mask from raw bits, rejecting anything outside `[1, ALL]`.
    pub fn new(bits: u8) -> Result<Self, RouterError> {
        if bits == 0 || bits > Self::ALL.0 {
            return Err(RouterError::InvalidMethodMask(bits));
        }
        Ok(MethodMask(bits))
    }

    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// True when the two masks share at least one verb.
    #[must_use]
    pub fn intersects(self, other: MethodMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Position of a single-bit mask in [`MethodMask::VERBS`].
    ///
    /// Returns `None` for masks with more than one bit set.
    #[must_use]
    pub fn verb_index(self) -> Option<usize> {
        if self.0.count_ones() != 1 {
            return None;
        }
        Some(self.0.trailing_zeros() as usize)
    }

    /// Iterate the single-bit masks contained in this mask.
    #[must_use]
    pub fn verbs(self) -> impl Iterator<Item = MethodMask> {
        Self::VERBS.into_iter().filter(move |v| self.intersects(*v))
    }
}

impl BitOr for MethodMask {
    type Output = MethodMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        MethodMask(self.0 | rhs.0)
    }
}

impl TryFrom<&Method> for MethodMask {
    type Error = RouterError;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        match *method {
            Method::GET | Method::HEAD => Ok(MethodMask::GET),
            Method::POST => Ok(MethodMask::POST),
            Method::PUT => Ok(MethodMask::PUT),
            Method::DELETE => Ok(MethodMask::DELETE),
            _ => Err(RouterError::UnsupportedMethod(method.to_string())),
        }
    }
}

impl TryFrom<Method> for MethodMask {
    type Error = RouterError;

    fn try_from(method: Method) -> Result<Self, Self::Error> {
        MethodMask::try_from(&method)
    }
}

impl FromStr for MethodMask {
    type Err = RouterError;

    /// Parses `GET`, `get|post`, `PUT,DELETE` or `ANY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = 0u8;
        for verb in s.split(['|', ',']).map(str::trim).filter(|v| !v.is_empty()) {
            bits |= match verb.to_ascii_uppercase().as_str() {
                "GET" | "HEAD" => MethodMask::GET.0,
                "POST" => MethodMask::POST.0,
                "PUT" => MethodMask::PUT.0,
                "DELETE" => MethodMask::DELETE.0,
                "ANY" | "ALL" | "*" => MethodMask::ALL.0,
                _ => return Err(RouterError::UnsupportedMethod(verb.to_string())),
            };
        }
        MethodMask::new(bits)
    }
}

impl fmt::Display for MethodMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == MethodMask::ALL {
            return write!(f, "ANY");
        }
        let names: Vec<&str> = self
            .verbs()
            .map(|v| match v.0 {
                1 => "GET",
                2 => "POST",
                4 => "PUT",
                _ => "DELETE",
            })
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_range() {
        assert!(MethodMask::new(0).is_err());
        assert!(MethodMask::new(16).is_err());
        assert_eq!(MethodMask::new(15).unwrap(), MethodMask::ALL);
        assert_eq!(MethodMask::new(5).unwrap(), MethodMask::GET | MethodMask::PUT);
    }

    #[test]
    fn test_parse_and_display() {
        let mask: MethodMask = "get|post".parse().unwrap();
        assert_eq!(mask, MethodMask::GET | MethodMask::POST);
        assert_eq!(mask.to_string(), "GET|POST");
        assert_eq!("ANY".parse::<MethodMask>().unwrap(), MethodMask::ALL);
        assert!("PATCH".parse::<MethodMask>().is_err());
        assert!("".parse::<MethodMask>().is_err());
    }

    #[test]
    fn test_from_http_method() {
        assert_eq!(MethodMask::try_from(&Method::HEAD).unwrap(), MethodMask::GET);
        assert_eq!(
            MethodMask::try_from(Method::DELETE).unwrap(),
            MethodMask::DELETE
        );
        assert!(MethodMask::try_from(&Method::OPTIONS).is_err());
    }

    #[test]
    fn test_verb_index() {
        assert_eq!(MethodMask::GET.verb_index(), Some(0));
        assert_eq!(MethodMask::DELETE.verb_index(), Some(3));
        assert_eq!(MethodMask::ALL.verb_index(), None);
        assert_eq!(MethodMask::ALL.verbs().count(), 4);
    }
}
