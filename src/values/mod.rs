//! The built-in value kinds.
//!
//! Plain types implement [`Value`](crate::Value) directly. Containers which need extra state
//! (a list remembering whether it was already set, a map, an optional compiled regex) get a
//! wrapper which borrows the storage.

mod counter;
mod duration;
mod escape;
mod map;
mod net;
mod regexp;
mod scalar;
mod slice;

pub use counter::Counter;
pub use map::{MapStorage, MapValue};
pub use regexp::RegexpValue;
pub use slice::SliceValue;

use std::path::PathBuf;
use std::time::Duration;

crate::value_field!(
    String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Duration, PathBuf,
    Counter,
);
