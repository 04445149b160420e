mod snowflake;
mod token;

pub use snowflake::*;
pub use token::*;
