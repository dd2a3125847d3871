//! The `Logifly` facade: client constructors and a name-keyed group registry.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::broadcast::BroadcastGroup;
use crate::clients::{DiscordClient, DiscordConfig, PlatformClient, WebhookClient, WebhookConfig};
use crate::config::LogiflyConfig;
use crate::{Error, Result};

/// SDK entry point.
///
/// Creates platform clients and keeps broadcast groups by name.
#[derive(Debug, Default)]
pub struct Logifly {
    groups: HashMap<String, BroadcastGroup>,
}

impl Logifly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with every group described in `config`.
    pub fn from_config(config: &LogiflyConfig) -> Result<Self> {
        let mut registry = Self::new();

        for group_config in &config.groups {
            let group = registry.create_group(&group_config.name, Vec::new())?;
            for entry in &group_config.clients {
                group.add_client(entry.client.build()?, entry.alias.as_deref())?;
            }
        }

        info!(
            "Logifly initialized with {} groups",
            registry.groups.len()
        );
        Ok(registry)
    }

    /// SDK version.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Create a Discord client.
    ///
    /// The concrete handle keeps the severity presets; coerce it to
    /// `Arc<dyn PlatformClient>` to register it in a group.
    pub fn new_discord_client(&self, config: DiscordConfig) -> Result<Arc<DiscordClient>> {
        Ok(Arc::new(DiscordClient::new(config)?))
    }

    /// Create a generic webhook client.
    pub fn new_webhook_client(&self, config: WebhookConfig) -> Result<Arc<WebhookClient>> {
        Ok(Arc::new(WebhookClient::new(config)?))
    }

    /// Create a group, replacing any existing group with the same name.
    pub fn create_group(
        &mut self,
        name: &str,
        clients: Vec<Arc<dyn PlatformClient>>,
    ) -> Result<&mut BroadcastGroup> {
        let group = BroadcastGroup::with_clients(name, clients)?;
        if self.groups.insert(name.to_string(), group).is_some() {
            debug!(group = %name, "Replaced existing group");
        }
        self.get_group_mut(name)
    }

    pub fn get_group(&self, name: &str) -> Result<&BroadcastGroup> {
        match self.groups.get(name) {
            Some(group) => Ok(group),
            None => Err(self.group_not_found(name)),
        }
    }

    pub fn get_group_mut(&mut self, name: &str) -> Result<&mut BroadcastGroup> {
        if !self.groups.contains_key(name) {
            return Err(self.group_not_found(name));
        }
        self.groups
            .get_mut(name)
            .ok_or_else(|| Error::Other(format!("Group '{}' not found", name)))
    }

    /// Group names, sorted.
    pub fn list_groups(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn delete_group(&mut self, name: &str) -> bool {
        self.groups.remove(name).is_some()
    }

    fn group_not_found(&self, name: &str) -> Error {
        let available = self.list_groups();
        Error::GroupNotFound {
            name: name.to_string(),
            available: if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            },
        }
    }
}
