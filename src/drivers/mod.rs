//! Hardware initialisation and peripheral helpers.

pub mod hw_init;
