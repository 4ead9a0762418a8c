//! # Schema registry
//!
//! Every GPU metric describes a container, a pod or a node. The level is
//! encoded in the metric name (`container_gpu_utilization`,
//! `node_gpu_memory_used`, ...) and selects the [`SchemaDefinition`] that
//! decides which attributes survive filtering.
//!
//! The three built-in schemas nest: each level adds its identity attributes
//! on top of the level below it.
//!
//! ```
//! use opentelemetry_gpu_attributes::schema::{schema_for, ResourceLevel};
//!
//! let level = ResourceLevel::from_metric_name("pod_gpu_power_draw").unwrap();
//! assert_eq!(level, ResourceLevel::Pod);
//! assert!(schema_for(level).allows("PodName"));
//! assert!(!schema_for(level).allows("ContainerName"));
//! ```
use std::collections::{HashMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;

use crate::attributes::{self, kubernetes};

/// Substring marking a metric as GPU-related.
pub const GPU_METRIC_MARKER: &str = "_gpu_";

const CONTAINER_METRIC_PREFIX: &str = "container_";
const POD_METRIC_PREFIX: &str = "pod_";
const NODE_METRIC_PREFIX: &str = "node_";

const NODE_ATTRIBUTES: &[&str] = &[
    attributes::CLUSTER_NAME,
    attributes::INSTANCE_ID,
    attributes::GPU_DEVICE,
    attributes::METRIC_TYPE,
    attributes::NODE_NAME,
    attributes::VERSION,
    attributes::SOURCES,
    attributes::TIMESTAMP,
];

const POD_ATTRIBUTES: &[&str] = &[
    attributes::NAMESPACE,
    attributes::FULL_POD_NAME,
    attributes::POD_NAME,
    attributes::SERVICE,
    attributes::GPU_UNIQUE_ID,
];

const CONTAINER_ATTRIBUTES: &[&str] = &[attributes::CONTAINER_NAME];

const NODE_KUBERNETES_KEYS: &[&str] = &[kubernetes::HOST];

const POD_KUBERNETES_KEYS: &[&str] = &[
    kubernetes::LABELS,
    kubernetes::POD_ID,
    kubernetes::POD_NAME,
    kubernetes::POD_OWNERS,
    kubernetes::NAMESPACE,
];

const CONTAINER_KUBERNETES_KEYS: &[&str] = &[kubernetes::CONTAINER_NAME, kubernetes::CONTAINERD];

static NODE_SCHEMA: Lazy<SchemaDefinition> = Lazy::new(|| level_schema(ResourceLevel::Node));
static POD_SCHEMA: Lazy<SchemaDefinition> = Lazy::new(|| level_schema(ResourceLevel::Pod));
static CONTAINER_SCHEMA: Lazy<SchemaDefinition> =
    Lazy::new(|| level_schema(ResourceLevel::Container));

/// Granularity at which a GPU metric describes infrastructure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceLevel {
    /// A single container running on a GPU.
    Container,
    /// A pod, aggregating its containers.
    Pod,
    /// A node, aggregating all pods scheduled on it.
    Node,
}

impl ResourceLevel {
    /// All levels, from the most to the least specific.
    pub const ALL: [ResourceLevel; 3] = [
        ResourceLevel::Container,
        ResourceLevel::Pod,
        ResourceLevel::Node,
    ];

    /// Classifies a metric by name.
    ///
    /// Returns `None` when the name lacks the [`GPU_METRIC_MARKER`], or when
    /// it carries the marker but none of the `container_`, `pod_` or `node_`
    /// prefixes.
    pub fn from_metric_name(name: &str) -> Option<Self> {
        if !is_gpu_metric(name) {
            return None;
        }
        ResourceLevel::ALL
            .into_iter()
            .find(|level| name.starts_with(level.metric_prefix()))
    }

    /// Metric name prefix selecting this level.
    pub fn metric_prefix(&self) -> &'static str {
        match self {
            ResourceLevel::Container => CONTAINER_METRIC_PREFIX,
            ResourceLevel::Pod => POD_METRIC_PREFIX,
            ResourceLevel::Node => NODE_METRIC_PREFIX,
        }
    }

    /// The built-in schema of this level.
    pub fn schema(&self) -> &'static SchemaDefinition {
        schema_for(*self)
    }

    fn attribute_keys(&self) -> Vec<&'static str> {
        match self {
            ResourceLevel::Node => NODE_ATTRIBUTES.to_vec(),
            ResourceLevel::Pod => [POD_ATTRIBUTES, NODE_ATTRIBUTES].concat(),
            ResourceLevel::Container => {
                [CONTAINER_ATTRIBUTES, POD_ATTRIBUTES, NODE_ATTRIBUTES].concat()
            }
        }
    }

    fn kubernetes_keys(&self) -> Vec<&'static str> {
        match self {
            ResourceLevel::Node => NODE_KUBERNETES_KEYS.to_vec(),
            ResourceLevel::Pod => [POD_KUBERNETES_KEYS, NODE_KUBERNETES_KEYS].concat(),
            ResourceLevel::Container => [
                CONTAINER_KUBERNETES_KEYS,
                POD_KUBERNETES_KEYS,
                NODE_KUBERNETES_KEYS,
            ]
            .concat(),
        }
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceLevel::Container => "container",
            ResourceLevel::Pod => "pod",
            ResourceLevel::Node => "node",
        })
    }
}

/// Returns `true` if the metric name contains the [`GPU_METRIC_MARKER`].
pub fn is_gpu_metric(name: &str) -> bool {
    name.contains(GPU_METRIC_MARKER)
}

/// Returns the built-in schema for `level`.
///
/// The tables are built on first use and are read-only afterwards, so the
/// returned reference can be shared freely between threads.
pub fn schema_for(level: ResourceLevel) -> &'static SchemaDefinition {
    match level {
        ResourceLevel::Container => &CONTAINER_SCHEMA,
        ResourceLevel::Pod => &POD_SCHEMA,
        ResourceLevel::Node => &NODE_SCHEMA,
    }
}

fn level_schema(level: ResourceLevel) -> SchemaDefinition {
    SchemaDefinition::new(
        level.attribute_keys(),
        [(attributes::KUBERNETES, level.kubernetes_keys())],
    )
}

/// The attributes allowed on a data point.
///
/// A schema has two parts: the flat allow-list of attribute keys, and for
/// blob attributes (attributes holding a JSON-encoded object) the set of
/// object keys allowed inside the blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaDefinition {
    attributes: HashSet<String>,
    blobs: HashMap<String, HashSet<String>>,
}

impl SchemaDefinition {
    /// Builds a schema from its flat keys and its blob keys.
    ///
    /// Every blob key is also added to the flat allow-list, a blob attribute
    /// that is not allowed would be removed before its content is looked at.
    pub fn new<A, S, B, K, V>(attributes: A, blobs: B) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
        B: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let mut attributes: HashSet<String> = attributes.into_iter().map(Into::into).collect();
        let mut blob_map: HashMap<String, HashSet<String>> = HashMap::new();
        for (key, sub_keys) in blobs {
            let key: String = key.into();
            let sub_keys: HashSet<String> = sub_keys.into_iter().map(Into::into).collect();
            attributes.insert(key.clone());
            blob_map.entry(key).or_default().extend(sub_keys);
        }

        SchemaDefinition {
            attributes,
            blobs: blob_map,
        }
    }

    /// Returns `true` if `key` survives flat filtering.
    pub fn allows(&self, key: &str) -> bool {
        self.attributes.contains(key)
    }

    /// Allowed object keys for the blob attribute `key`, if it is one.
    pub fn blob_allow_list(&self, key: &str) -> Option<&HashSet<String>> {
        self.blobs.get(key)
    }

    /// Attribute keys holding JSON blobs with a non-empty allow-list.
    pub fn blob_keys(&self) -> impl Iterator<Item = &str> {
        self.blobs
            .iter()
            .filter(|(_, sub_keys)| !sub_keys.is_empty())
            .map(|(key, _)| key.as_str())
    }

    /// The flat allow-list.
    pub fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    /// Returns `true` if the flat allow-list is empty.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
