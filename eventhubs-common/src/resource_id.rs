// Copyright 2025 The Event Hubs Admin Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsing of Azure Resource Manager resource identifiers.

use std::fmt;
use std::str::FromStr;

use eventhubs_error::EventHubsError;
use eventhubs_error::EventHubsResult;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;

/// Characters escaped in a path segment; `/`, `?`, `#` and `%` keep a name inside its segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// ARM path built from fixed segments and caller supplied names.
///
/// Every name lands in exactly one encoded segment, so a name can never address a
/// resource outside the path it was appended to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fixed segment such as `resourceGroups`
    pub fn segment(mut self, segment: &str) -> Self {
        self.0.push('/');
        self.0.push_str(segment);
        self
    }

    /// Appends a resource name; `param` names the argument in the error for an unusable name
    pub fn name(mut self, param: &'static str, name: &str) -> EventHubsResult<Self> {
        if matches!(name.trim(), "" | "." | "..") {
            return Err(EventHubsError::invalid_argument(
                param,
                format!("'{name}' is not a valid resource name."),
            ));
        }
        self.0.push('/');
        self.0.extend(utf8_percent_encode(name, SEGMENT));
        Ok(self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.0
    }
}

/// Segments of an ARM id such as
/// `/subscriptions/{s}/resourceGroups/{rg}/providers/Microsoft.EventHub/namespaces/{ns}/eventhubs/{eh}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentifier {
    raw: String,
    subscription_id: Option<String>,
    resource_group_name: Option<String>,
    provider_namespace: Option<String>,
    /// `(type, name)` pairs following the provider, outermost first
    resources: Vec<(String, String)>,
}

impl ResourceIdentifier {
    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    pub fn resource_group_name(&self) -> Option<&str> {
        self.resource_group_name.as_deref()
    }

    pub fn provider_namespace(&self) -> Option<&str> {
        self.provider_namespace.as_deref()
    }

    /// Name of the innermost resource
    pub fn name(&self) -> Option<&str> {
        self.resources.last().map(|(_, name)| name.as_str())
    }

    /// Name of the first resource of the given type (case-insensitive)
    pub fn name_of(&self, resource_type: &str) -> Option<&str> {
        self.resources
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(resource_type))
            .map(|(_, name)| name.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ResourceIdentifier {
    type Err = EventHubsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !raw.starts_with('/') {
            return Err(EventHubsError::invalid_argument(
                "resourceId",
                format!("'{raw}' is not an absolute resource id"),
            ));
        }
        let segments: Vec<&str> = raw.trim_matches('/').split('/').collect();
        let mut id = ResourceIdentifier {
            raw: raw.to_string(),
            subscription_id: None,
            resource_group_name: None,
            provider_namespace: None,
            resources: Vec::new(),
        };

        let mut i = 0;
        while i < segments.len() {
            let key = segments[i];
            let value = segments.get(i + 1).copied().filter(|v| !v.is_empty());
            if key.eq_ignore_ascii_case("subscriptions") && id.provider_namespace.is_none() {
                id.subscription_id = value.map(str::to_string);
            } else if key.eq_ignore_ascii_case("resourceGroups") && id.provider_namespace.is_none() {
                id.resource_group_name = value.map(str::to_string);
            } else if key.eq_ignore_ascii_case("providers") {
                id.provider_namespace = value.map(str::to_string);
            } else if let Some(value) = value {
                id.resources.push((key.to_string(), value.to_string()));
            } else {
                return Err(EventHubsError::invalid_argument(
                    "resourceId",
                    format!("'{raw}' has a segment '{key}' without a value"),
                ));
            }
            i += 2;
        }
        Ok(id)
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
