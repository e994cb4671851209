//! Maps one line of user input onto one cluster operation.
//!
//! Each request makes exactly one tool-selection round trip to the model. A
//! reply with several tool calls is rejected rather than executed as a plan.

use async_trait::async_trait;
use kube::discovery::Scope;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::kubernetes::Cluster;
use crate::llm::ChatModel;
use crate::manifest::{DEFAULT_NAMESPACE, Manifest};
use crate::registry::{self, ResourceDescriptor};
use crate::tools::{Action, DeleteArgs, ListArgs, TOOLS, UPDATE_RESOURCE};

pub const MANIFEST_PROMPT: &str = "You're a K8s resource YAML manifest generator.
Please generate corresponding YAML manifest based on user input.
Don't include it into YAML code block.";

/// Interactive yes/no question asked before destructive actions.
#[async_trait]
pub trait Confirm: Send {
    /// `true` only when the operator answered exactly `yes`.
    async fn confirm(&mut self, question: &str) -> std::io::Result<bool>;
}

pub struct Dispatcher<'a> {
    model: &'a dyn ChatModel,
    cluster: &'a dyn Cluster,
}

impl<'a> Dispatcher<'a> {
    pub fn new(model: &'a dyn ChatModel, cluster: &'a dyn Cluster) -> Self {
        Self { model, cluster }
    }

    pub async fn handle(&self, input: &str, confirm: &mut dyn Confirm) -> Result<String> {
        let call = self.model.select_tool(input, &TOOLS).await?;
        info!("Function to call: {}, arg: {}", call.name, call.arguments);

        let action = Action::try_from(&call)?;
        self.execute(action, confirm).await
    }

    /// Run an already decoded action.
    pub async fn execute(&self, action: Action, confirm: &mut dyn Confirm) -> Result<String> {
        debug!("Dispatching {}", action.function_name());
        match action {
            Action::Create(args) => self.create_resource(&args.input).await,
            Action::List(args) => self.list_resource(&args).await,
            Action::Update(args) => {
                debug!(
                    namespace = %args.namespace,
                    resource = %args.resource,
                    name = %args.resource_name,
                    delta = %args.delta,
                    "Update requested"
                );
                Err(Error::UnknownFunction(UPDATE_RESOURCE.to_string()))
            }
            Action::Delete(args) => self.delete_resource(&args, confirm).await,
        }
    }

    async fn create_resource(&self, input: &str) -> Result<String> {
        let text = self.model.generate(Some(MANIFEST_PROMPT), input).await?;
        debug!("Generated manifest:\n{}", text);

        let manifest = Manifest::parse(&text)?;
        let (resource, scope) = self.cluster.resolve_kind(manifest.gvk()).await?;

        let name = manifest.name().to_string();
        let namespace = match scope {
            Scope::Namespaced => Some(manifest.namespace().to_string()),
            Scope::Cluster => None,
        };
        let mut object = manifest.into_object();
        if namespace.is_none() {
            object.metadata.namespace = None;
        }

        self.cluster
            .create(&resource, namespace.as_deref(), &object)
            .await?;
        Ok(format!("Resource [{}] created successfully", name))
    }

    async fn list_resource(&self, args: &ListArgs) -> Result<String> {
        let descriptor = lookup(&args.resource)?;
        // No namespace lists across all of them
        let namespace = if args.namespace.is_empty() {
            None
        } else {
            scoped_namespace(descriptor, &args.namespace)
        };

        let names = self
            .cluster
            .list(&descriptor.api_resource(), namespace)
            .await?;
        Ok(names.join("\n"))
    }

    async fn delete_resource(&self, args: &DeleteArgs, confirm: &mut dyn Confirm) -> Result<String> {
        let descriptor = lookup(&args.resource)?;
        let namespace = scoped_namespace(descriptor, &args.namespace);
        let name = &args.resource_name;

        let question = match namespace {
            Some(ns) => format!(
                "Are you sure you want to delete {} [{}] in namespace [{}]? (yes/no)",
                descriptor.name, name, ns
            ),
            None => format!(
                "Are you sure you want to delete {} [{}]? (yes/no)",
                descriptor.name, name
            ),
        };
        if !confirm.confirm(&question).await? {
            return Ok(format!("Deletion of {} [{}] aborted", descriptor.name, name));
        }

        self.cluster
            .delete(&descriptor.api_resource(), namespace, name)
            .await?;
        Ok(format!("Resource [{}] deleted successfully", name))
    }
}

fn lookup(resource: &str) -> Result<&'static ResourceDescriptor> {
    registry::lookup(resource).ok_or_else(|| Error::UnsupportedResource(resource.to_string()))
}

/// Namespace argument for a registry kind; cluster-scoped kinds ignore it
/// and an empty one means `default`.
fn scoped_namespace<'n>(descriptor: &ResourceDescriptor, namespace: &'n str) -> Option<&'n str> {
    if !descriptor.namespaced {
        None
    } else if namespace.is_empty() {
        Some(DEFAULT_NAMESPACE)
    } else {
        Some(namespace)
    }
}
