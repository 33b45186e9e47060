// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use smol_str::SmolStr;

use super::ids::email_key;

/// The identity and metadata fields shared by tree nodes and flat records.
///
/// Directory payloads are loosely shaped: any field may be missing or `null`, in which case it
/// reads as empty/false/zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(alias = "displayName", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "mail", deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(alias = "jobTitle", deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(alias = "officeLocation", deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_license: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub ai_engagement: f64,
}

impl Person {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_license(mut self, has_license: bool) -> Self {
        self.has_license = has_license;
        self
    }

    pub fn with_engagement(mut self, ai_engagement: f64) -> Self {
        self.ai_engagement = ai_engagement;
        self
    }

    pub fn email_key(&self) -> SmolStr {
        email_key(&self.email)
    }
}

/// One entry of the flat directory list.
///
/// The flat list runs parallel to the tree and is what highlight predicates and summary
/// statistics are evaluated over.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(flatten)]
    pub person: Person,
    #[serde(default, alias = "managerMail", skip_serializing_if = "Option::is_none")]
    pub manager_email: Option<String>,
}

impl UserRecord {
    pub fn new(person: Person) -> Self {
        Self {
            person,
            manager_email: None,
        }
    }

    pub fn reporting_to(mut self, manager_email: impl Into<String>) -> Self {
        self.manager_email = Some(manager_email.into());
        self
    }

    pub fn email_key(&self) -> SmolStr {
        self.person.email_key()
    }

    pub fn manager_key(&self) -> Option<SmolStr> {
        self.manager_email
            .as_deref()
            .map(email_key)
            .filter(|key| !key.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
