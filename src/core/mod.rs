/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod address_range;
pub mod address_range_set;
pub mod checker;
pub mod datetime;
pub mod errors;
pub mod json;
pub mod range_store;
