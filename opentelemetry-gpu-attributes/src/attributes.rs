//! # Container Insights attribute keys
//!
//! Well-known attribute names attached to GPU metrics produced by the
//! Container Insights receivers. These are the building blocks of the
//! per-level schemas in [`crate::schema`].

/// Name of the Kubernetes cluster.
pub const CLUSTER_NAME: &str = "ClusterName";

/// Cloud instance id of the node.
pub const INSTANCE_ID: &str = "InstanceId";

/// GPU device name on the node, e.g. `nvidia0`.
pub const GPU_DEVICE: &str = "GpuDevice";

/// Container Insights metric type.
pub const METRIC_TYPE: &str = "Type";

/// Kubernetes node name.
pub const NODE_NAME: &str = "NodeName";

/// Schema version of the record.
pub const VERSION: &str = "Version";

/// Sources that contributed to the record.
pub const SOURCES: &str = "Sources";

/// Collection timestamp of the record.
pub const TIMESTAMP: &str = "Timestamp";

/// Kubernetes namespace.
pub const NAMESPACE: &str = "Namespace";

/// Full pod name, including the generated suffix.
pub const FULL_POD_NAME: &str = "FullPodName";

/// Pod name, without the generated suffix.
pub const POD_NAME: &str = "PodName";

/// Kubernetes service the pod belongs to.
pub const SERVICE: &str = "Service";

/// Globally unique id of the GPU.
pub const GPU_UNIQUE_ID: &str = "UUID";

/// Container name.
pub const CONTAINER_NAME: &str = "ContainerName";

/// JSON-encoded object with Kubernetes metadata.
///
/// This is the only blob attribute: its value is filtered a second time,
/// at the level of the object's keys.
pub const KUBERNETES: &str = "kubernetes";

/// Keys of the JSON object stored under [`KUBERNETES`].
pub mod kubernetes {
    /// Host name of the node.
    pub const HOST: &str = "host";

    /// Pod labels.
    pub const LABELS: &str = "labels";

    /// Uid of the pod.
    pub const POD_ID: &str = "pod_id";

    /// Pod name.
    pub const POD_NAME: &str = "pod_name";

    /// Owner references of the pod (deployment, daemon set, ...).
    pub const POD_OWNERS: &str = "pod_owners";

    /// Namespace of the pod.
    pub const NAMESPACE: &str = "namespace";

    /// Container name.
    pub const CONTAINER_NAME: &str = "container_name";

    /// Container runtime metadata.
    pub const CONTAINERD: &str = "containerd";
}
