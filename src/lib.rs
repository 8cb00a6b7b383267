//! This file is the root of the `arrow_host` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`proxy`, `null_handling`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Defining the `#[pymodule]` which acts as the main entry point when the
//!     compiled library is imported into Python (feature `python`).

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod config;
pub mod error;
pub mod host;
pub mod null_handling;
pub mod proxy;
pub mod traits;
pub mod types;

#[cfg(feature = "python")]
mod ffi;

pub use config::HostConfig;
pub use error::ArrowHostError;
pub use host::{FunctionArguments, HostArray, HostValue};
pub use observability::enable_verbose_logging;
pub use proxy::{make_proxy, Proxy, ProxyRef, ProxyRegistry};
pub use types::ElementType;

//==================================================================================
// 2. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `arrow_host` Python module, containing all exposed Rust functions.
#[cfg(feature = "python")]
#[pymodule]
fn arrow_host(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::python::make_proxy_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::python::class_names_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::python::install_config_py, m)?)?;

    m.add_class::<ffi::python::PyProxy>()?;

    // --- Expose the custom error type ---
    m.add("ArrowHostError", m.py().get_type_bound::<pyo3::exceptions::PyValueError>())?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    // --- Turn on logging for proxy construction and dispatch ---
    m.add_function(wrap_pyfunction!(ffi::python::enable_verbose_logging_py, m)?)?;

    Ok(())
}
