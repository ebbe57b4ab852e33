//! Intersection Admission Library
//!
//! A four-way intersection gate that admits vehicles by travel path, plus a
//! headless simulation that drives it with concurrent vehicle threads.

pub mod simulation;
