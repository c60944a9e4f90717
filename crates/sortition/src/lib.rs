pub mod macros;
pub mod pool;
pub mod roster;
pub mod source;
