use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::SystemError;
use crate::infrastructure::marshalers;

/// A `kustomize.config.k8s.io` Kustomization document.
///
/// The commonly used fields are typed and serialized in the order kustomize
/// declares them. Anything else is kept in `extra` in its original order, so a
/// load/store cycle never drops data it does not understand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_labels: Option<Mapping>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_annotations: Option<Mapping>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patches: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replicas: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config_map_generator: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secret_generator: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_options: Option<Value>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pairs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_selectors: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_templates: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Value>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Scalars are read through serde_yaml's string deserializer, which keeps
/// their source text: `newTag: 1.10` stays `"1.10"`, never a float.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single targeted mutation of a Kustomization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestPatch {
    /// Appends a new label-set holding only `key: value`. Existing entries
    /// are never merged into, even when they carry the same key.
    AppendLabel { key: String, value: String },
    /// Points the first image entry at a new reference, creating it when
    /// `images` is empty.
    SetPrimaryImage {
        image: String,
        name: String,
        tag: String,
        registry: Option<String>,
    },
}

impl ManifestPatch {
    pub fn build_label(version: impl Into<String>) -> Self {
        ManifestPatch::AppendLabel {
            key: "build".to_string(),
            value: version.into(),
        }
    }
}

impl Kustomization {
    pub fn from_yaml(content: &[u8]) -> Result<Self, SystemError> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Err(SystemError::format(
                "unable to unmarshal kustomization",
                "document is empty",
            ));
        }

        serde_yaml::from_slice(content)
            .map_err(|e| SystemError::format("unable to unmarshal kustomization", e))
    }

    pub fn to_yaml(&self) -> Result<Vec<u8>, SystemError> {
        marshalers::yaml(self)
    }

    pub fn apply(&mut self, patch: &ManifestPatch) {
        match patch {
            ManifestPatch::AppendLabel { key, value } => {
                self.labels.push(Label {
                    pairs: BTreeMap::from([(key.clone(), value.clone())]),
                    ..Label::default()
                });
            }
            ManifestPatch::SetPrimaryImage {
                image,
                name,
                tag,
                registry,
            } => {
                let new_name = match registry.as_deref().filter(|r| !r.is_empty()) {
                    Some(registry) => format!("{registry}/{name}"),
                    None => image.clone(),
                };

                match self.images.first_mut() {
                    Some(primary) => {
                        primary.name = image.clone();
                        primary.new_name = Some(new_name);
                        primary.new_tag = Some(tag.clone());
                    }
                    None => self.images.push(Image {
                        name: image.clone(),
                        new_name: Some(new_name),
                        new_tag: Some(tag.clone()),
                        ..Image::default()
                    }),
                }
            }
        }
    }
}

/// Loads `content`, applies `patch` and serializes the result. Pure.
pub fn patch(content: &[u8], patch: &ManifestPatch) -> Result<Vec<u8>, SystemError> {
    let mut kustomization = Kustomization::from_yaml(content)?;
    kustomization.apply(patch);
    kustomization.to_yaml()
}
