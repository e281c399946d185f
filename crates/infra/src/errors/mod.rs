//! Infrastructure error handling.

pub mod conversions;

pub use conversions::{
    is_unique_violation, map_init_error, map_join_error, map_read_error, map_write_error,
};
