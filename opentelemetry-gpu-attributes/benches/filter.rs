/*
    Filtering cost of a batch with a single GPU metric.

    Each data point carries 17 attributes, one of them the `kubernetes` blob.
    Most of the time is spent decoding and re-encoding the blob; flat filtering
    is a single pass over the attributes.
*/

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use opentelemetry_gpu_attributes::{
    filter_attributes, GpuAttributesProcessor, MetricsProcessor, ResourceLevel,
};
use opentelemetry_proto::tonic::common::v1::{any_value, AnyValue, KeyValue};
use opentelemetry_proto::tonic::metrics::v1::{
    metric::Data, Gauge, Metric, NumberDataPoint, ResourceMetrics, ScopeMetrics,
};

const KUBERNETES_BLOB: &str = r#"{"host":"ip-10-0-0-1.ec2.internal","labels":{"app":"trainer","team":"ml"},"pod_id":"0b5e4c1e","pod_name":"trainer-0","pod_owners":[{"owner_kind":"StatefulSet","owner_name":"trainer"}],"namespace":"ml","container_name":"trainer","containerd":{"container_id":"4f6a"},"docker":{"container_id":"4f6a"}}"#;

fn string_kv(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(any_value::Value::StringValue(value.to_string())),
        }),
    }
}

fn attributes() -> Vec<KeyValue> {
    vec![
        string_kv("ClusterName", "bench"),
        string_kv("InstanceId", "i-0123456789abcdef"),
        string_kv("InstanceType", "p4d.24xlarge"),
        string_kv("GpuDevice", "nvidia0"),
        string_kv("Type", "ContainerGPU"),
        string_kv("NodeName", "ip-10-0-0-1.ec2.internal"),
        string_kv("Version", "0"),
        string_kv("Sources", "[\"dcgm\"]"),
        string_kv("Timestamp", "1700000000000"),
        string_kv("Namespace", "ml"),
        string_kv("FullPodName", "trainer-0"),
        string_kv("PodName", "trainer"),
        string_kv("UUID", "GPU-5a6b"),
        string_kv("ContainerName", "trainer"),
        string_kv("AutoScalingGroupName", "gpu-nodes"),
        string_kv("NodeLabels", "{}"),
        string_kv("kubernetes", KUBERNETES_BLOB),
    ]
}

fn batch(data_points: usize) -> Vec<ResourceMetrics> {
    vec![ResourceMetrics {
        scope_metrics: vec![ScopeMetrics {
            metrics: vec![Metric {
                name: "container_gpu_utilization".to_string(),
                data: Some(Data::Gauge(Gauge {
                    data_points: (0..data_points)
                        .map(|_| NumberDataPoint {
                            attributes: attributes(),
                            ..Default::default()
                        })
                        .collect(),
                })),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }]
}

fn criterion_benchmark(c: &mut Criterion) {
    let schema = ResourceLevel::Container.schema();
    c.bench_function("filter_attributes_container", |b| {
        b.iter_batched(
            attributes,
            |mut attrs| filter_attributes(black_box(&mut attrs), schema),
            BatchSize::SmallInput,
        )
    });

    let processor = GpuAttributesProcessor::new();
    c.bench_function("process_metrics_1000_datapoints", |b| {
        b.iter_batched(
            || batch(1000),
            |mut metrics| processor.process_metrics(black_box(&mut metrics)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
