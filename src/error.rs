use kube::api::GroupVersionKind;

use crate::llm::ModelError;
use crate::manifest::ManifestError;

/// Failure of a single dispatched request, or of cluster connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("unknown function {0}")]
    UnknownFunction(String),

    #[error("invalid arguments for {function}: {source}")]
    Arguments {
        function: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("resource {0} not supported")]
    UnsupportedResource(String),

    #[error("no resource mapping for {}: {source}", format_gvk(.gvk))]
    Resolution {
        gvk: GroupVersionKind,
        #[source]
        source: kube::Error,
    },

    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(String),

    #[error(transparent)]
    Cluster(#[from] kube::Error),

    #[error("console error: {0}")]
    Console(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub fn format_gvk(gvk: &GroupVersionKind) -> String {
    if gvk.group.is_empty() {
        format!("{}/{}", gvk.version, gvk.kind)
    } else {
        format!("{}/{}/{}", gvk.group, gvk.version, gvk.kind)
    }
}
