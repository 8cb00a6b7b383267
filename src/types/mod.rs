//! This module defines the strongly-typed element tags used throughout the
//! proxy layer.
//!
//! It currently includes the canonical `ElementType` enum, which names the
//! Arrow type every registered proxy constructs.

pub mod element_type;

// Re-export the main type(s) for easier access.
pub use element_type::ElementType;
