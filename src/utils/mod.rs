// Shared reading helpers

pub mod encoding;
pub mod io;

pub use io::ByteCursor;
