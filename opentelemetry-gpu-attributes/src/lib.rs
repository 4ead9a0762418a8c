//! Filter the attributes of GPU metrics in OTLP batches.
//!
//! GPU metrics reported by Container Insights carry a wide set of
//! resource-describing attributes, plus a `kubernetes` attribute holding a
//! JSON-encoded object of Kubernetes metadata. Depending on whether a metric
//! describes a container, a pod or a node, only some of those attributes are
//! meaningful. This crate strips every other attribute from the data points,
//! and prunes the keys of the `kubernetes` object the same way.
//!
//! The resource level is taken from the metric name: a metric is a GPU metric
//! when its name contains `_gpu_`, and its level is selected by the
//! `container_`, `pod_` or `node_` prefix.
//!
//! # Examples
//!
//! ```
//! use opentelemetry_gpu_attributes::{GpuAttributesProcessor, MetricsProcessor};
//! use opentelemetry_proto::tonic::common::v1::{any_value, AnyValue, KeyValue};
//! use opentelemetry_proto::tonic::metrics::v1::{
//!     metric::Data, Gauge, Metric, NumberDataPoint, ResourceMetrics, ScopeMetrics,
//! };
//!
//! let string_kv = |key: &str, value: &str| KeyValue {
//!     key: key.to_string(),
//!     value: Some(AnyValue {
//!         value: Some(any_value::Value::StringValue(value.to_string())),
//!     }),
//! };
//!
//! let mut batch = vec![ResourceMetrics {
//!     scope_metrics: vec![ScopeMetrics {
//!         metrics: vec![Metric {
//!             name: "node_gpu_utilization".to_string(),
//!             data: Some(Data::Gauge(Gauge {
//!                 data_points: vec![NumberDataPoint {
//!                     attributes: vec![
//!                         string_kv("ClusterName", "c1"),
//!                         string_kv("PodName", "p1"),
//!                     ],
//!                     ..Default::default()
//!                 }],
//!             })),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! }];
//!
//! GpuAttributesProcessor::new().process_metrics(&mut batch).unwrap();
//! // `PodName` is not part of the node schema.
//! # let metric = &batch[0].scope_metrics[0].metrics[0];
//! # let Some(Data::Gauge(gauge)) = &metric.data else { unreachable!() };
//! # assert_eq!(gauge.data_points[0].attributes, vec![string_kv("ClusterName", "c1")]);
//! ```
//!
//! # Crate Feature Flags
//!
//! * `internal-logs`: report blob decoding failures and unsupported metric
//!   types through the OpenTelemetry internal logs, emitted as `tracing`
//!   events. Enabled by default.
#![warn(missing_debug_implementations)]

pub mod attributes;
pub mod config;
pub mod error;
mod filter;
mod processor;
pub mod schema;

pub use config::{GpuAttributesConfig, GPU_ATTRIBUTES_PROCESSOR_TYPE};
pub use error::{BlobError, ConfigError};
pub use filter::filter_attributes;
pub use processor::{GpuAttributesProcessor, MetricsProcessor};
pub use schema::{is_gpu_metric, schema_for, ResourceLevel, SchemaDefinition};
