//! Integration tests for the issuance schedule.
//!
//! Covers behavior that is too slow or too cross-cutting for the unit tests
//! next to the code: the multi-billion-layer horizon, agreement between
//! precisions, and a floating-point sanity check of the closed form.

pub mod helpers;
