//! RSS output: escaping of entry text and document rendering.

mod sanitize;
mod serializer;

pub use self::sanitize::escape;
pub use self::serializer::serialize;
