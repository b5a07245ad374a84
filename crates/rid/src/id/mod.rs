mod rid;
#[cfg(test)]
mod tests;

pub use rid::*;
