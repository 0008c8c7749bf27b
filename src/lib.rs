//! Arena-backed self-balancing collections.
//!
//! The centerpiece is an AVL ordered map that stores its nodes in a slab
//! arena and links them by handle, maintaining an explicit per-node balance
//! factor under insertion and deletion. A small generic binary tree with a
//! leaf-depth equality check rounds out the crate.

#![cfg_attr(feature = "clippy", feature(plugin))]
#![cfg_attr(feature = "clippy", plugin(clippy))]

extern crate serde;
#[macro_use]
extern crate serde_derive;

mod entry;
pub mod arena;
pub mod avl_tree;
pub mod binary_tree;
