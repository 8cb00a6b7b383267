// In: src/proxy/factory.rs

//! The proxy registry: the single entry point that turns a class name and a
//! bag of constructor arguments into a proxy.
//!
//! The table is explicit and enumerable. It is filled once, deterministically,
//! and never mutated afterwards, so lookups need no locking. Supporting a new
//! wrapped type means adding one `register_proxy!` line to
//! [`ProxyRegistry::with_defaults`].

use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;

use crate::config::HostConfig;
use crate::error::ArrowHostError;
use crate::host::{self, FunctionArguments, HostValue};
use crate::proxy::boolean_array::BooleanArrayProxy;
use crate::proxy::numeric_array::NumericArray;
use crate::proxy::record_batch::{RecordBatchProxy, ARRAYS_ARG, COLUMN_NAMES_ARG};
use crate::proxy::string_array::StringArrayProxy;
use crate::proxy::timestamp_array::TimestampArrayProxy;
use crate::proxy::{ProxyRef, DATA_ARG, VALID_ARG};
use crate::types::ElementType;

//==================================================================================
// 1. Registered Class Names
//==================================================================================

pub const FLOAT32_ARRAY: &str = "arrow.array.proxy.Float32Array";
pub const FLOAT64_ARRAY: &str = "arrow.array.proxy.Float64Array";
pub const UINT8_ARRAY: &str = "arrow.array.proxy.UInt8Array";
pub const UINT16_ARRAY: &str = "arrow.array.proxy.UInt16Array";
pub const UINT32_ARRAY: &str = "arrow.array.proxy.UInt32Array";
pub const UINT64_ARRAY: &str = "arrow.array.proxy.UInt64Array";
pub const INT8_ARRAY: &str = "arrow.array.proxy.Int8Array";
pub const INT16_ARRAY: &str = "arrow.array.proxy.Int16Array";
pub const INT32_ARRAY: &str = "arrow.array.proxy.Int32Array";
pub const INT64_ARRAY: &str = "arrow.array.proxy.Int64Array";
pub const BOOLEAN_ARRAY: &str = "arrow.array.proxy.BooleanArray";
pub const STRING_ARRAY: &str = "arrow.array.proxy.StringArray";
pub const TIMESTAMP_ARRAY: &str = "arrow.array.proxy.TimestampArray";
pub const RECORD_BATCH: &str = "arrow.tabular.proxy.RecordBatch";

/// The class name an array proxy of the given element type is registered under.
pub fn array_class_name(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::Float32 => FLOAT32_ARRAY,
        ElementType::Float64 => FLOAT64_ARRAY,
        ElementType::UInt8 => UINT8_ARRAY,
        ElementType::UInt16 => UINT16_ARRAY,
        ElementType::UInt32 => UINT32_ARRAY,
        ElementType::UInt64 => UINT64_ARRAY,
        ElementType::Int8 => INT8_ARRAY,
        ElementType::Int16 => INT16_ARRAY,
        ElementType::Int32 => INT32_ARRAY,
        ElementType::Int64 => INT64_ARRAY,
        ElementType::Boolean => BOOLEAN_ARRAY,
        ElementType::Utf8 => STRING_ARRAY,
        ElementType::Timestamp => TIMESTAMP_ARRAY,
    }
}

/// What a named constructor argument holds. Hosts with untyped lists (Python)
/// use this to decide how to convert an argument, including an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Elements(ElementType),
    Proxies,
}

impl ArgumentKind {
    /// The zero-length host value of this kind.
    pub fn empty_value(self) -> Result<HostValue, ArrowHostError> {
        let value = match self {
            Self::Proxies => HostValue::Proxies(Vec::new()),
            Self::Elements(ElementType::Int8) => HostValue::Int8(host::column(Vec::new())?),
            Self::Elements(ElementType::Int16) => HostValue::Int16(host::column(Vec::new())?),
            Self::Elements(ElementType::Int32) => HostValue::Int32(host::column(Vec::new())?),
            Self::Elements(ElementType::Int64 | ElementType::Timestamp) => {
                HostValue::Int64(host::column(Vec::new())?)
            }
            Self::Elements(ElementType::UInt8) => HostValue::UInt8(host::column(Vec::new())?),
            Self::Elements(ElementType::UInt16) => HostValue::UInt16(host::column(Vec::new())?),
            Self::Elements(ElementType::UInt32) => HostValue::UInt32(host::column(Vec::new())?),
            Self::Elements(ElementType::UInt64) => HostValue::UInt64(host::column(Vec::new())?),
            Self::Elements(ElementType::Float32) => HostValue::Float32(host::column(Vec::new())?),
            Self::Elements(ElementType::Float64) => HostValue::Float64(host::column(Vec::new())?),
            Self::Elements(ElementType::Boolean) => HostValue::Bool(host::column(Vec::new())?),
            Self::Elements(ElementType::Utf8) => HostValue::Str(host::column(Vec::new())?),
        };
        Ok(value)
    }
}

//==================================================================================
// 2. The Registry
//==================================================================================

/// A proxy constructor.
pub type MakeFn = fn(&FunctionArguments, &HostConfig) -> Result<ProxyRef, ArrowHostError>;

/// One registry row: the constructor and the element type it declares.
/// Tabular proxies declare no element type.
#[derive(Clone, Copy)]
pub struct ProxyEntry {
    pub make: MakeFn,
    pub element_type: Option<ElementType>,
}

/// Immutable mapping from class name to constructor.
pub struct ProxyRegistry {
    config: Arc<HostConfig>,
    entries: HashMap<&'static str, ProxyEntry>,
}

macro_rules! register_proxy {
    ($registry:expr, $name:expr, $make:expr, $element_type:expr) => {
        $registry.register($name, ProxyEntry {
            make: $make,
            element_type: $element_type,
        })
    };
}

impl ProxyRegistry {
    /// Builds the registry with every proxy type this crate can construct.
    pub fn with_defaults(config: Arc<HostConfig>) -> Self {
        let mut registry = Self {
            config,
            entries: HashMap::new(),
        };

        register_proxy!(registry, FLOAT32_ARRAY, NumericArray::<f32>::make, Some(ElementType::Float32));
        register_proxy!(registry, FLOAT64_ARRAY, NumericArray::<f64>::make, Some(ElementType::Float64));
        register_proxy!(registry, UINT8_ARRAY, NumericArray::<u8>::make, Some(ElementType::UInt8));
        register_proxy!(registry, UINT16_ARRAY, NumericArray::<u16>::make, Some(ElementType::UInt16));
        register_proxy!(registry, UINT32_ARRAY, NumericArray::<u32>::make, Some(ElementType::UInt32));
        register_proxy!(registry, UINT64_ARRAY, NumericArray::<u64>::make, Some(ElementType::UInt64));
        register_proxy!(registry, INT8_ARRAY, NumericArray::<i8>::make, Some(ElementType::Int8));
        register_proxy!(registry, INT16_ARRAY, NumericArray::<i16>::make, Some(ElementType::Int16));
        register_proxy!(registry, INT32_ARRAY, NumericArray::<i32>::make, Some(ElementType::Int32));
        register_proxy!(registry, INT64_ARRAY, NumericArray::<i64>::make, Some(ElementType::Int64));
        register_proxy!(registry, BOOLEAN_ARRAY, BooleanArrayProxy::make, Some(ElementType::Boolean));
        register_proxy!(registry, STRING_ARRAY, StringArrayProxy::make, Some(ElementType::Utf8));
        register_proxy!(registry, TIMESTAMP_ARRAY, TimestampArrayProxy::make, Some(ElementType::Timestamp));
        register_proxy!(registry, RECORD_BATCH, RecordBatchProxy::make, None);

        registry
    }

    fn register(&mut self, name: &'static str, entry: ProxyEntry) {
        self.entries.insert(name, entry);
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Looks up `class_name` and invokes its constructor.
    ///
    /// The constructor's result, success or failure, is returned unchanged.
    ///
    /// # Errors
    /// Returns `ArrowHostError::UnknownProxy` carrying `class_name` if no
    /// constructor is registered under that exact name.
    pub fn make_proxy(
        &self,
        class_name: &str,
        args: &FunctionArguments,
    ) -> Result<ProxyRef, ArrowHostError> {
        let entry = self
            .entries
            .get(class_name)
            .ok_or_else(|| ArrowHostError::UnknownProxy(class_name.to_string()))?;

        crate::log_event!("event" = "make_proxy", "class" = class_name, "args" = args.len());
        (entry.make)(args, &self.config)
    }

    /// The element type declared by `class_name`, if it is a registered array proxy.
    pub fn element_type(&self, class_name: &str) -> Option<ElementType> {
        self.entries.get(class_name).and_then(|e| e.element_type)
    }

    /// What `arg_name` holds when passed to `class_name`'s constructor.
    /// `None` for arguments no registered constructor reads.
    pub fn argument_kind(&self, class_name: &str, arg_name: &str) -> Option<ArgumentKind> {
        match arg_name {
            DATA_ARG => self.element_type(class_name).map(ArgumentKind::Elements),
            VALID_ARG => Some(ArgumentKind::Elements(ElementType::Boolean)),
            COLUMN_NAMES_ARG => Some(ArgumentKind::Elements(ElementType::Utf8)),
            ARRAYS_ARG => Some(ArgumentKind::Proxies),
            _ => None,
        }
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.entries.contains_key(class_name)
    }

    /// All registered class names, sorted.
    pub fn class_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

//==================================================================================
// 3. Process-wide Registry
//==================================================================================

static CONFIG: OnceLock<Arc<HostConfig>> = OnceLock::new();
static REGISTRY: OnceLock<ProxyRegistry> = OnceLock::new();

/// Installs the configuration the process-wide registry will be built with.
///
/// # Errors
/// Returns `ArrowHostError::Config` if a configuration was already installed,
/// or if the registry has already been built with the default one.
pub fn install(config: HostConfig) -> Result<(), ArrowHostError> {
    CONFIG.set(Arc::new(config)).map_err(|_| {
        ArrowHostError::Config("configuration must be installed before the first proxy is made".to_string())
    })
}

/// The process-wide registry, built on first use.
pub fn registry() -> &'static ProxyRegistry {
    REGISTRY.get_or_init(|| {
        let config = CONFIG.get_or_init(|| Arc::new(HostConfig::default())).clone();
        ProxyRegistry::with_defaults(config)
    })
}

/// Constructs a proxy through the process-wide registry.
pub fn make_proxy(class_name: &str, args: &FunctionArguments) -> Result<ProxyRef, ArrowHostError> {
    registry().make_proxy(class_name, args)
}
