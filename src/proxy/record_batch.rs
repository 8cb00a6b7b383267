// In: src/proxy/record_batch.rs

//! Proxy for an Arrow `RecordBatch` assembled from existing array proxies.

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::config::HostConfig;
use crate::error::ArrowHostError;
use crate::host::{self, FunctionArguments, HostValue};
use crate::proxy::{call_array_method, check_lengths, factory, host_elements, Proxy, ProxyRef};

/// Name of the constructor argument carrying the column proxies.
pub const ARRAYS_ARG: &str = "Arrays";
/// Name of the constructor argument carrying the column names.
pub const COLUMN_NAMES_ARG: &str = "ColumnNames";

#[derive(Debug)]
pub struct RecordBatchProxy {
    batch: RecordBatch,
    columns: Vec<ProxyRef>,
}

impl RecordBatchProxy {
    /// Builds a batch whose columns share the arrays of the given proxies.
    /// Every field is declared nullable.
    pub fn make(args: &FunctionArguments, _config: &HostConfig) -> Result<ProxyRef, ArrowHostError> {
        let columns = args.proxies(ARRAYS_ARG)?.to_vec();
        let names = host_elements(args.array::<String>(COLUMN_NAMES_ARG)?).into_owned();
        check_lengths(ARRAYS_ARG, columns.len(), COLUMN_NAMES_ARG, names.len())?;

        let arrays = columns
            .iter()
            .map(|proxy| {
                proxy.array().cloned().ok_or_else(|| ArrowHostError::ArgumentType {
                    name: ARRAYS_ARG.to_string(),
                    expected: "array proxy",
                    actual: proxy.class_name(),
                })
            })
            .collect::<Result<Vec<ArrayRef>, _>>()?;

        let fields: Vec<Field> = names
            .iter()
            .zip(&arrays)
            .map(|(name, array)| Field::new(name.as_str(), array.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));

        // A batch with no columns still needs an explicit row count.
        let batch = if arrays.is_empty() {
            let options = RecordBatchOptions::new().with_row_count(Some(0));
            RecordBatch::try_new_with_options(schema, arrays, &options)?
        } else {
            RecordBatch::try_new(schema, arrays)?
        };

        crate::log_event!(
            "event" = "make",
            "type" = "RecordBatch",
            "columns" = batch.num_columns(),
            "rows" = batch.num_rows()
        );
        Ok(Arc::new(Self { batch, columns }))
    }

    fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }
}

impl Proxy for RecordBatchProxy {
    fn class_name(&self) -> &'static str {
        factory::RECORD_BATCH
    }

    /// Exports every column through its own proxy, in schema order.
    fn to_host(&self) -> Result<HostValue, ArrowHostError> {
        let table = self
            .column_names()
            .into_iter()
            .zip(&self.columns)
            .map(|(name, proxy)| Ok((name, proxy.to_host()?)))
            .collect::<Result<Vec<_>, ArrowHostError>>()?;
        Ok(HostValue::Table(table))
    }

    fn call(&self, method: &str, args: &FunctionArguments) -> Result<HostValue, ArrowHostError> {
        match method {
            "numColumns" => HostValue::scalar_i64(self.batch.num_columns() as i64),
            "numRows" => HostValue::scalar_i64(self.batch.num_rows() as i64),
            "columnNames" => Ok(HostValue::Str(host::column(self.column_names())?)),
            _ => call_array_method(self, method, args),
        }
    }
}
