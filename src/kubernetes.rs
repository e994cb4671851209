use async_trait::async_trait;
use kube::api::{
    ApiResource, DeleteParams, DynamicObject, GroupVersionKind, ListParams, PostParams,
};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::discovery::{self, Scope};
use kube::{Api, Client, ResourceExt};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};

/// Cluster operations used by the dispatcher.
///
/// A `namespace` of `None` selects the cluster-scoped verb.
#[async_trait]
pub trait Cluster: Send + Sync {
    /// Map a manifest's kind onto its served resource and scope.
    async fn resolve_kind(&self, gvk: &GroupVersionKind) -> Result<(ApiResource, Scope)>;

    async fn create(
        &self,
        resource: &ApiResource,
        namespace: Option<&str>,
        object: &DynamicObject,
    ) -> Result<DynamicObject>;

    /// Names of all objects of `resource`.
    async fn list(&self, resource: &ApiResource, namespace: Option<&str>) -> Result<Vec<String>>;

    async fn delete(&self, resource: &ApiResource, namespace: Option<&str>, name: &str)
    -> Result<()>;
}

/// The session's single connection to the API server.
#[derive(Clone)]
pub struct ClusterHandle {
    client: Client,
}

impl ClusterHandle {
    pub async fn connect(config: &Config) -> Result<Self> {
        let options = KubeConfigOptions {
            context: config.context.clone(),
            ..Default::default()
        };

        let mut kube_config = match &config.kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path)
                    .map_err(|e| Error::Kubeconfig(format!("{}: {}", path.display(), e)))?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| Error::Kubeconfig(e.to_string()))?
            }
            None if config.context.is_some() => kube::Config::from_kubeconfig(&options)
                .await
                .map_err(|e| Error::Kubeconfig(e.to_string()))?,
            None => kube::Config::infer()
                .await
                .map_err(|e| Error::Kubeconfig(e.to_string()))?,
        };
        kube_config.connect_timeout = Some(config.timeout);
        kube_config.read_timeout = Some(config.timeout);

        info!(cluster_url = %kube_config.cluster_url, "Using cluster");
        let client = Client::try_from(kube_config)?;
        Ok(Self { client })
    }

    /// Log the server version; an unreachable server is only a warning here.
    pub async fn probe(&self) {
        match self.client.apiserver_version().await {
            Ok(version) => info!(version = %version.git_version, "Connected to API server"),
            Err(e) => warn!("Could not reach API server: {}", e),
        }
    }

    fn api(&self, resource: &ApiResource, namespace: Option<&str>) -> Api<DynamicObject> {
        match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, resource),
            None => Api::all_with(self.client.clone(), resource),
        }
    }
}

#[async_trait]
impl Cluster for ClusterHandle {
    async fn resolve_kind(&self, gvk: &GroupVersionKind) -> Result<(ApiResource, Scope)> {
        let (resource, capabilities) = discovery::pinned_kind(&self.client, gvk)
            .await
            .map_err(|source| Error::Resolution {
                gvk: gvk.clone(),
                source,
            })?;
        debug!(
            plural = %resource.plural,
            scope = ?capabilities.scope,
            "Resolved {}", resource.api_version
        );
        Ok((resource, capabilities.scope))
    }

    async fn create(
        &self,
        resource: &ApiResource,
        namespace: Option<&str>,
        object: &DynamicObject,
    ) -> Result<DynamicObject> {
        let created = self
            .api(resource, namespace)
            .create(&PostParams::default(), object)
            .await?;
        debug!("Created {}/{}", resource.plural, created.name_any());
        Ok(created)
    }

    async fn list(&self, resource: &ApiResource, namespace: Option<&str>) -> Result<Vec<String>> {
        let list = self
            .api(resource, namespace)
            .list(&ListParams::default())
            .await?;
        Ok(list.items.iter().map(|item| item.name_any()).collect())
    }

    async fn delete(
        &self,
        resource: &ApiResource,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<()> {
        let response = self
            .api(resource, namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        debug!(
            pending = response.is_left(),
            "Deleted {}/{}", resource.plural, name
        );
        Ok(())
    }
}
