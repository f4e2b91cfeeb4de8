use std::error::Error;
use std::fmt;

/// The error returned by bounds-checked access to a key the map does not contain.
///
/// See [`FifoMap::at`](crate::FifoMap::at).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("key not found") }
}

impl Error for KeyNotFound {}
