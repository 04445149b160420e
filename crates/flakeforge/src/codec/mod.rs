mod compact;

pub use compact::*;
