//! Services that validate caller input and wire engine results into a
//! payment repository.

pub mod services;
