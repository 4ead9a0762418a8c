//! # GPU attributes processor
//!
//! Walks an OTLP metrics batch and filters the data point attributes of every
//! GPU metric against the schema of its resource level. Metrics that are not
//! GPU metrics, and GPU metrics whose name does not select a level, are left
//! untouched.
use std::fmt;

use opentelemetry::otel_debug;
use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use opentelemetry_proto::tonic::metrics::v1::{metric::Data, Metric, ResourceMetrics};
use opentelemetry_sdk::error::OTelSdkResult;

use crate::config::GpuAttributesConfig;
use crate::error::ConfigError;
use crate::filter::filter_attributes;
use crate::schema::ResourceLevel;

/// A pipeline stage editing metrics batches in place.
///
/// Implementations must not keep any reference to the batch once the call
/// returns, and must be safe to call concurrently on independent batches.
pub trait MetricsProcessor: Send + Sync + fmt::Debug {
    /// Processes the batch in place.
    fn process_metrics(&self, resource_metrics: &mut [ResourceMetrics]) -> OTelSdkResult;
}

/// Removes the attributes of GPU metrics that are not part of their schema.
///
/// The processor holds no mutable state; a single instance can be shared
/// between threads processing independent batches.
///
/// ```
/// use opentelemetry_gpu_attributes::{GpuAttributesProcessor, MetricsProcessor};
/// use opentelemetry_proto::tonic::metrics::v1::ResourceMetrics;
///
/// let processor = GpuAttributesProcessor::new();
/// let mut batch: Vec<ResourceMetrics> = Vec::new();
/// assert!(processor.process_metrics(&mut batch).is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GpuAttributesProcessor {
    config: GpuAttributesConfig,
}

impl GpuAttributesProcessor {
    /// Creates a processor with the default configuration.
    pub fn new() -> Self {
        GpuAttributesProcessor::default()
    }

    /// Creates a processor from a validated configuration.
    pub fn from_config(config: GpuAttributesConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GpuAttributesProcessor { config })
    }

    /// Returns the configuration this processor was built from.
    pub fn config(&self) -> &GpuAttributesConfig {
        &self.config
    }

    /// Processes every resource of an export request in place.
    pub fn process_request(&self, request: &mut ExportMetricsServiceRequest) -> OTelSdkResult {
        self.process_metrics(&mut request.resource_metrics)
    }

    /// Filters the data point attributes of a single metric.
    pub fn process_metric(&self, metric: &mut Metric) {
        let Some(level) = ResourceLevel::from_metric_name(&metric.name) else {
            return;
        };
        let schema = level.schema();

        let data_points = match metric.data.as_mut() {
            Some(Data::Gauge(gauge)) => &mut gauge.data_points,
            Some(Data::Sum(sum)) => &mut sum.data_points,
            other => {
                otel_debug!(
                    name: "GpuAttributesProcessor.UnsupportedMetricType",
                    metric_name = metric.name.as_str(),
                    metric_type = metric_type(other.as_deref())
                );
                return;
            }
        };

        for data_point in data_points.iter_mut() {
            filter_attributes(&mut data_point.attributes, schema);
        }
    }
}

impl MetricsProcessor for GpuAttributesProcessor {
    fn process_metrics(&self, resource_metrics: &mut [ResourceMetrics]) -> OTelSdkResult {
        for rm in resource_metrics.iter_mut() {
            for sm in rm.scope_metrics.iter_mut() {
                for metric in sm.metrics.iter_mut() {
                    self.process_metric(metric);
                }
            }
        }
        Ok(())
    }
}

fn metric_type(data: Option<&Data>) -> &'static str {
    match data {
        Some(Data::Gauge(_)) => "Gauge",
        Some(Data::Sum(_)) => "Sum",
        Some(Data::Histogram(_)) => "Histogram",
        Some(Data::ExponentialHistogram(_)) => "ExponentialHistogram",
        Some(Data::Summary(_)) => "Summary",
        None => "Empty",
    }
}
