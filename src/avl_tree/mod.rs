//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one. Nodes are stored in an arena and linked by handle, and each node
//! carries an explicit balance factor that is repaired by local rotations after every
//! insertion and deletion.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{AvlMap, AvlMapIntoIter, AvlMapIter};
pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};

use std::error;
use std::fmt;
use std::result;

/// The error type for checked lookups that require the key to be present.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    KeyNotFound,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key not found"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
