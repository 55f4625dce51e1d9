pub mod aggregation;
pub mod basic_foods;
pub mod classification;
pub mod entities;
pub mod extraction;
pub mod helpers;
pub mod nutrition_lookup;
pub mod ports;
pub mod prompts;
pub mod schema;
pub mod services;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod test_support;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
