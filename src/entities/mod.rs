//! Entity module - Contains all SeaORM entity definitions for the store collections.
//! These entities mirror the three document collections of the reference data
//! store: cities, schools, and payments.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod city;
pub mod payment;
pub mod school;

// Re-export specific types to avoid conflicts
pub use city::{Column as CityColumn, Entity as City, Model as CityModel};
pub use school::{Language, Languages};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use school::{Column as SchoolColumn, Entity as School, Model as SchoolModel};
