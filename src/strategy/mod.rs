pub mod comparison;
pub mod exhaustive;
pub mod memoized;
pub mod tabular;
pub mod traits;
