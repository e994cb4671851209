//! The four functions offered to the model and their decoded form.

use std::sync::LazyLock;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::Error;
use crate::llm::{ToolCall, ToolDefinition};

pub const CREATE_RESOURCE: &str = "createResource";
pub const LIST_RESOURCE: &str = "listResource";
pub const UPDATE_RESOURCE: &str = "updateResource";
pub const DELETE_RESOURCE: &str = "deleteResource";

const RESOURCE_DESCRIPTION: &str = "Kubernetes built-in resource, for example: pods, deployments, services, you can also use singular or short name (if had)";

/// Function schemas, built once for the whole session.
pub static TOOLS: LazyLock<Vec<ToolDefinition>> = LazyLock::new(|| {
    vec![
        ToolDefinition {
            name: CREATE_RESOURCE,
            description: "Create Kubernetes resource YAML manifest",
            parameters: json!({
                "type": "object",
                "properties": {
                    "input": {
                        "type": "string",
                        "description": "Extract verb, resource and necessary flags",
                    },
                },
                "required": ["input"],
            }),
        },
        ToolDefinition {
            name: LIST_RESOURCE,
            description: "List Kubernetes resources",
            parameters: json!({
                "type": "object",
                "properties": {
                    "namespace": {
                        "type": "string",
                        "description": "The namespace where resource is. For non-namespaced resources, such as namespaces, persistentvolumes, this field shall not be set.",
                    },
                    "resource": {
                        "type": "string",
                        "description": RESOURCE_DESCRIPTION,
                    },
                },
                "required": ["namespace", "resource"],
            }),
        },
        ToolDefinition {
            name: UPDATE_RESOURCE,
            description: "Update Kubernetes resources",
            parameters: json!({
                "type": "object",
                "properties": {
                    "namespace": {
                        "type": "string",
                        "description": "The namespace where resource is.",
                    },
                    "resource": {
                        "type": "string",
                        "description": RESOURCE_DESCRIPTION,
                    },
                    "resource_name": {
                        "type": "string",
                        "description": "Name of the resource to be updated",
                    },
                    "delta": {
                        "type": "string",
                        "description": "The delta to update the resource.",
                    },
                },
                "required": ["namespace", "resource", "resource_name", "delta"],
            }),
        },
        ToolDefinition {
            name: DELETE_RESOURCE,
            description: "Delete Kubernetes resources",
            parameters: json!({
                "type": "object",
                "properties": {
                    "namespace": {
                        "type": "string",
                        "description": "The namespace where resource is.",
                    },
                    "resource": {
                        "type": "string",
                        "description": RESOURCE_DESCRIPTION,
                    },
                    "resource_name": {
                        "type": "string",
                        "description": "Name of the resource to be deleted",
                    },
                },
                "required": ["namespace", "resource", "resource_name"],
            }),
        },
    ]
});

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateArgs {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListArgs {
    /// Absent for cluster-scoped kinds.
    #[serde(default)]
    pub namespace: String,
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateArgs {
    #[serde(default)]
    pub namespace: String,
    pub resource: String,
    pub resource_name: String,
    pub delta: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteArgs {
    #[serde(default)]
    pub namespace: String,
    pub resource: String,
    pub resource_name: String,
}

/// One decoded model selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create(CreateArgs),
    List(ListArgs),
    Update(UpdateArgs),
    Delete(DeleteArgs),
}

impl Action {
    pub fn function_name(&self) -> &'static str {
        match self {
            Action::Create(_) => CREATE_RESOURCE,
            Action::List(_) => LIST_RESOURCE,
            Action::Update(_) => UPDATE_RESOURCE,
            Action::Delete(_) => DELETE_RESOURCE,
        }
    }
}

impl TryFrom<&ToolCall> for Action {
    type Error = Error;

    fn try_from(call: &ToolCall) -> Result<Self, Self::Error> {
        match call.name.as_str() {
            CREATE_RESOURCE => decode(CREATE_RESOURCE, &call.arguments).map(Action::Create),
            LIST_RESOURCE => decode(LIST_RESOURCE, &call.arguments).map(Action::List),
            UPDATE_RESOURCE => decode(UPDATE_RESOURCE, &call.arguments).map(Action::Update),
            DELETE_RESOURCE => decode(DELETE_RESOURCE, &call.arguments).map(Action::Delete),
            other => Err(Error::UnknownFunction(other.to_string())),
        }
    }
}

fn decode<T: DeserializeOwned>(function: &'static str, arguments: &str) -> Result<T, Error> {
    serde_json::from_str(arguments).map_err(|source| Error::Arguments { function, source })
}
