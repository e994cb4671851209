//! Built-in resource kinds addressable by name from list and delete.

use kube::api::{ApiResource, GroupVersionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Plural resource name, also the canonical lookup key.
    pub name: &'static str,
    /// Singular and short names accepted in place of `name`.
    pub aliases: &'static [&'static str],
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub namespaced: bool,
}

impl ResourceDescriptor {
    const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        group: &'static str,
        version: &'static str,
        kind: &'static str,
        namespaced: bool,
    ) -> Self {
        Self {
            name,
            aliases,
            group,
            version,
            kind,
            namespaced,
        }
    }

    fn matches(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }

    pub fn api_resource(&self) -> ApiResource {
        let gvk = GroupVersionKind::gvk(self.group, self.version, self.kind);
        ApiResource::from_gvk_with_plural(&gvk, self.name)
    }
}

static RESOURCES: &[ResourceDescriptor] = &[
    ResourceDescriptor::new("pods", &["pod", "po"], "", "v1", "Pod", true),
    ResourceDescriptor::new("services", &["service", "svc"], "", "v1", "Service", true),
    ResourceDescriptor::new("deployments", &["deployment", "deploy"], "apps", "v1", "Deployment", true),
    ResourceDescriptor::new("namespaces", &["namespace", "ns"], "", "v1", "Namespace", false),
    ResourceDescriptor::new("configmaps", &["configmap", "cm"], "", "v1", "ConfigMap", true),
    ResourceDescriptor::new("secrets", &["secret"], "", "v1", "Secret", true),
    ResourceDescriptor::new("serviceaccounts", &["serviceaccount", "sa"], "", "v1", "ServiceAccount", true),
    ResourceDescriptor::new(
        "persistentvolumeclaims",
        &["persistentvolumeclaim", "pvc"],
        "",
        "v1",
        "PersistentVolumeClaim",
        true,
    ),
    ResourceDescriptor::new(
        "persistentvolumes",
        &["persistentvolume", "pv"],
        "",
        "v1",
        "PersistentVolume",
        false,
    ),
    ResourceDescriptor::new("nodes", &["node", "no"], "", "v1", "Node", false),
    ResourceDescriptor::new("replicasets", &["replicaset", "rs"], "apps", "v1", "ReplicaSet", true),
    ResourceDescriptor::new("statefulsets", &["statefulset", "sts"], "apps", "v1", "StatefulSet", true),
    ResourceDescriptor::new("daemonsets", &["daemonset", "ds"], "apps", "v1", "DaemonSet", true),
    ResourceDescriptor::new("jobs", &["job"], "batch", "v1", "Job", true),
    ResourceDescriptor::new("cronjobs", &["cronjob", "cj"], "batch", "v1", "CronJob", true),
    ResourceDescriptor::new("ingresses", &["ingress", "ing"], "networking.k8s.io", "v1", "Ingress", true),
];

/// Look up a resource by plural, singular or short name.
///
/// The key is trimmed and lowercased first, so `Pods` and `pods` resolve
/// to the same entry. Unknown names return `None`.
pub fn lookup(resource: &str) -> Option<&'static ResourceDescriptor> {
    let key = resource.trim().to_lowercase();
    RESOURCES.iter().find(|r| r.matches(&key))
}
