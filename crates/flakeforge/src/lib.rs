#![doc = include_str!("../README.md")]

mod codec;
mod error;
mod forge;
mod grammar;
mod id;
mod rand;
mod time;

pub use crate::codec::*;
pub use crate::error::*;
pub use crate::forge::*;
pub use crate::grammar::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
