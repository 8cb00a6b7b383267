// In: src/ffi/python.rs

use arrow::pyarrow::ToPyArrow;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyList, PyString};

use crate::config::HostConfig;
use crate::host::{self, FunctionArguments, HostValue};
use crate::proxy::factory::{self, ArgumentKind};
use crate::proxy::ProxyRef;
use crate::types::ElementType;

//==================================================================================
// I. The Proxy Handle
//==================================================================================

/// A Python-facing handle to a constructed proxy.
#[pyclass(name = "Proxy", module = "arrow_host")]
pub struct PyProxy {
    inner: ProxyRef,
}

#[pymethods]
impl PyProxy {
    #[getter]
    fn class_name(&self) -> &'static str {
        self.inner.class_name()
    }

    /// Invokes a named proxy method (e.g. "toHost", "length", "valid").
    fn call(&self, py: Python<'_>, method: &str) -> PyResult<PyObject> {
        let value = self.inner.call(method, &FunctionArguments::new())?;
        host_value_to_py(py, value)
    }

    /// Copies the wrapped data out as a column (list of one-element rows).
    fn to_host(&self, py: Python<'_>) -> PyResult<PyObject> {
        let value = self.inner.to_host()?;
        host_value_to_py(py, value)
    }

    /// Exports the wrapped array to PyArrow through the C data interface.
    fn to_pyarrow(&self, py: Python<'_>) -> PyResult<PyObject> {
        match self.inner.array() {
            Some(array) => array.to_data().to_pyarrow(py),
            None => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "{} does not wrap a single array",
                self.inner.class_name()
            ))),
        }
    }

    fn __repr__(&self) -> String {
        format!("<arrow_host.Proxy {}>", self.inner.class_name())
    }
}

//==================================================================================
// II. Factory Functions
//==================================================================================

/// Constructs a proxy by class name from a dict of constructor arguments.
#[pyfunction]
#[pyo3(name = "make_proxy")]
pub fn make_proxy_py(py: Python<'_>, class_name: &str, args: &Bound<'_, PyDict>) -> PyResult<PyProxy> {
    let registry = factory::registry();

    let mut function_args = FunctionArguments::new();
    for (key, value) in args.iter() {
        let name: String = key.extract()?;
        let kind = registry.argument_kind(class_name, &name);
        let host_value = host_value_from_py(&value, kind)?;
        function_args.insert(name, host_value);
    }

    let class_name = class_name.to_string();
    let inner = py.allow_threads(move || registry.make_proxy(&class_name, &function_args))?;
    Ok(PyProxy { inner })
}

/// Lists every registered class name.
#[pyfunction]
#[pyo3(name = "class_names")]
pub fn class_names_py() -> Vec<&'static str> {
    factory::registry().class_names()
}

/// Installs a JSON configuration. Must be called before the first `make_proxy`.
#[pyfunction]
#[pyo3(name = "install_config")]
pub fn install_config_py(json: &str) -> PyResult<()> {
    factory::install(HostConfig::from_json_str(json)?)?;
    Ok(())
}

#[pyfunction]
#[pyo3(name = "enable_verbose_logging")]
#[pyo3(signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) -> PyResult<()> {
    crate::observability::enable_verbose_logging(log_file.as_deref())?;
    Ok(())
}

//==================================================================================
// III. Value Conversion
//==================================================================================

macro_rules! numeric_from_list {
    ($list:expr, $T:ty, $variant:ident) => {{
        let values: Vec<$T> = $list.extract()?;
        HostValue::$variant(host::column(values)?)
    }};
}

/// Converts a Python argument into a `HostValue`.
///
/// Lists are ambiguous in Python, so `kind` selects the element type and decides
/// what an empty list means. Without a kind, number lists become `double` arrays.
fn host_value_from_py(obj: &Bound<'_, PyAny>, kind: Option<ArgumentKind>) -> PyResult<HostValue> {
    if let Ok(proxy) = obj.downcast::<PyProxy>() {
        return Ok(HostValue::Proxies(vec![proxy.borrow().inner.clone()]));
    }
    if let Ok(text) = obj.downcast::<PyString>() {
        return Ok(HostValue::Text(text.to_str()?.to_string()));
    }

    let list = obj.downcast::<PyList>()?;
    if list.is_empty() {
        if let Some(kind) = kind {
            return Ok(kind.empty_value()?);
        }
    }
    if let Some(first) = list.iter().next() {
        if first.is_instance_of::<PyProxy>() {
            let proxies = list
                .iter()
                .map(|item| Ok(item.downcast::<PyProxy>()?.borrow().inner.clone()))
                .collect::<PyResult<Vec<ProxyRef>>>()?;
            return Ok(HostValue::Proxies(proxies));
        }
        // bool is a subclass of int, so it has to be checked first.
        if first.is_instance_of::<PyBool>() {
            return Ok(numeric_from_list!(list, bool, Bool));
        }
        if first.is_instance_of::<PyString>() {
            return Ok(numeric_from_list!(list, String, Str));
        }
    }

    let hint = match kind {
        Some(ArgumentKind::Elements(element_type)) => Some(element_type),
        Some(ArgumentKind::Proxies) | None => None,
    };
    let value = match hint {
        Some(ElementType::Int8) => numeric_from_list!(list, i8, Int8),
        Some(ElementType::Int16) => numeric_from_list!(list, i16, Int16),
        Some(ElementType::Int32) => numeric_from_list!(list, i32, Int32),
        Some(ElementType::Int64) | Some(ElementType::Timestamp) => numeric_from_list!(list, i64, Int64),
        Some(ElementType::UInt8) => numeric_from_list!(list, u8, UInt8),
        Some(ElementType::UInt16) => numeric_from_list!(list, u16, UInt16),
        Some(ElementType::UInt32) => numeric_from_list!(list, u32, UInt32),
        Some(ElementType::UInt64) => numeric_from_list!(list, u64, UInt64),
        Some(ElementType::Float32) => numeric_from_list!(list, f32, Float32),
        Some(ElementType::Boolean) => numeric_from_list!(list, bool, Bool),
        Some(ElementType::Utf8) => numeric_from_list!(list, String, Str),
        Some(ElementType::Float64) | None => numeric_from_list!(list, f64, Float64),
    };
    Ok(value)
}

macro_rules! rows_to_py {
    ($py:expr, $array:expr) => {
        $array
            .outer_iter()
            .map(|row| row.to_vec())
            .collect::<Vec<_>>()
            .into_py($py)
    };
}

/// Converts a `HostValue` into Python objects: arrays become lists of rows.
fn host_value_to_py(py: Python<'_>, value: HostValue) -> PyResult<PyObject> {
    let obj = match value {
        HostValue::Int8(a) => rows_to_py!(py, a),
        HostValue::Int16(a) => rows_to_py!(py, a),
        HostValue::Int32(a) => rows_to_py!(py, a),
        HostValue::Int64(a) => rows_to_py!(py, a),
        HostValue::UInt8(a) => rows_to_py!(py, a),
        HostValue::UInt16(a) => rows_to_py!(py, a),
        HostValue::UInt32(a) => rows_to_py!(py, a),
        HostValue::UInt64(a) => rows_to_py!(py, a),
        HostValue::Float32(a) => rows_to_py!(py, a),
        HostValue::Float64(a) => rows_to_py!(py, a),
        HostValue::Bool(a) => rows_to_py!(py, a),
        HostValue::Str(a) => rows_to_py!(py, a),
        HostValue::Text(s) => s.into_py(py),
        HostValue::Proxies(list) => {
            let handles = list
                .into_iter()
                .map(|inner| Py::new(py, PyProxy { inner }))
                .collect::<PyResult<Vec<_>>>()?;
            handles.into_py(py)
        }
        HostValue::Table(columns) => {
            let dict = PyDict::new_bound(py);
            for (name, column) in columns {
                dict.set_item(name, host_value_to_py(py, column)?)?;
            }
            dict.into_py(py)
        }
    };
    Ok(obj)
}
