//! Decoding of model-generated manifests into unstructured objects.

use std::sync::LazyLock;

use kube::api::{DynamicObject, GroupVersionKind};
use regex::Regex;

pub const DEFAULT_NAMESPACE: &str = "default";

/// A whole document wrapped in a Markdown code fence.
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*[ \t]*\r?\n(.*?)\r?\n?```\s*$").expect("valid fence regex")
});

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("generated manifest is empty")]
    Empty,

    #[error("failed to decode manifest: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("manifest is missing {0}")]
    MissingField(&'static str),
}

/// An unstructured resource document with its type header resolved.
#[derive(Debug, Clone)]
pub struct Manifest {
    gvk: GroupVersionKind,
    object: DynamicObject,
}

impl Manifest {
    /// Parse YAML (or JSON) text into a manifest.
    ///
    /// A missing or empty `metadata.namespace` is set to `default`.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let body = strip_code_fence(text);
        if body.trim().is_empty() {
            return Err(ManifestError::Empty);
        }

        let mut object: DynamicObject = serde_yaml::from_str(body)?;

        let types = object
            .types
            .as_ref()
            .ok_or(ManifestError::MissingField("apiVersion and kind"))?;
        if types.api_version.is_empty() {
            return Err(ManifestError::MissingField("apiVersion"));
        }
        if types.kind.is_empty() {
            return Err(ManifestError::MissingField("kind"));
        }
        let (group, version) = match types.api_version.split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", types.api_version.as_str()),
        };
        let gvk = GroupVersionKind::gvk(group, version, &types.kind);

        if object.metadata.name.as_deref().is_none_or(str::is_empty) {
            return Err(ManifestError::MissingField("metadata.name"));
        }

        if object.metadata.namespace.as_deref().is_none_or(str::is_empty) {
            object.metadata.namespace = Some(DEFAULT_NAMESPACE.to_string());
        }

        Ok(Self { gvk, object })
    }

    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    pub fn name(&self) -> &str {
        self.object.metadata.name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.object
            .metadata
            .namespace
            .as_deref()
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn into_object(self) -> DynamicObject {
        self.object
    }
}

fn strip_code_fence(text: &str) -> &str {
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str())
}
