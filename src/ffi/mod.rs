//! This module defines the Foreign Function Interface (FFI) for the arrow-host
//! core. It exposes the proxy factory and the proxy object protocol to Python.

pub mod python;
