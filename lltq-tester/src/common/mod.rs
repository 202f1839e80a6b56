pub mod scenario;
mod util;

pub use util::split_csv;
