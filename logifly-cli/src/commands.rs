use std::collections::BTreeMap;

use anyhow::Result;
use logifly::{BroadcastSummary, EmbedOptions, Logifly, Message, SendOptions, TestConnectionResult};
use serde::Serialize;
use tracing::info;

use crate::cli::Commands;

/// What a command produced, used to pick the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    PartialFailure,
}

pub struct CommandExecutor {
    registry: Logifly,
}

impl CommandExecutor {
    pub fn new(registry: Logifly) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, command: Commands) -> Result<Outcome> {
        match command {
            Commands::Send {
                group,
                message,
                username,
                avatar_url,
            } => {
                let options = SendOptions {
                    username,
                    avatar_url,
                };
                let summary = self
                    .registry
                    .get_group(&group)?
                    .broadcast(&Message::text(message), &options)
                    .await;
                report_summary(&summary)
            }
            Commands::Embed {
                group,
                title,
                description,
                color,
            } => {
                let mut embed = EmbedOptions::new(title, description);
                embed.color = color;
                let summary = self.registry.get_group(&group)?.broadcast_embed(&embed).await;
                report_summary(&summary)
            }
            Commands::Notify {
                group,
                severity,
                title,
                description,
            } => {
                let summary = self
                    .registry
                    .get_group(&group)?
                    .broadcast_severity(severity, &title, &description)
                    .await;
                report_summary(&summary)
            }
            Commands::Test { group } => {
                let names = match group {
                    Some(name) => vec![name],
                    None => self.registry.list_groups(),
                };

                let mut report: BTreeMap<String, BTreeMap<String, TestConnectionResult>> =
                    BTreeMap::new();
                for name in names {
                    let results = self.registry.get_group(&name)?.test_connections().await;
                    report.insert(name, results.into_iter().collect());
                }

                let all_connected = report
                    .values()
                    .flat_map(|results| results.values())
                    .all(|r| r.connected);
                print_json(&report)?;
                Ok(if all_connected {
                    Outcome::Ok
                } else {
                    Outcome::PartialFailure
                })
            }
            Commands::Groups => {
                let groups: BTreeMap<String, usize> = self
                    .registry
                    .list_groups()
                    .into_iter()
                    .map(|name| {
                        let size = self.registry.get_group(&name).map(|g| g.size()).unwrap_or(0);
                        (name, size)
                    })
                    .collect();
                print_json(&groups)?;
                Ok(Outcome::Ok)
            }
            Commands::Clients { group } => {
                print_json(&self.registry.get_group(&group)?.list_clients())?;
                Ok(Outcome::Ok)
            }
        }
    }
}

fn report_summary(summary: &BroadcastSummary) -> Result<Outcome> {
    info!(
        "Broadcast to '{}': {}/{} delivered",
        summary.group_name,
        summary.succeeded(),
        summary.total_clients
    );
    print_json(summary)?;
    Ok(if summary.all_succeeded() {
        Outcome::Ok
    } else {
        Outcome::PartialFailure
    })
}

/// Print `value` as pretty JSON with sorted keys.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let value = serde_json::to_value(value)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use logifly::{LogiflyConfig, PlatformClient, WebhookConfig};

    fn registry() -> Logifly {
        let mut registry = Logifly::from_config(&LogiflyConfig::default()).unwrap();
        let client: Arc<dyn PlatformClient> = registry
            .new_webhook_client(WebhookConfig {
                url: "https://hooks.example.com/notify".to_string(),
                ..Default::default()
            })
            .unwrap();
        registry.create_group("alerts", vec![client]).unwrap();
        registry
    }

    #[tokio::test]
    async fn test_unknown_group_is_an_error() {
        let executor = CommandExecutor::new(registry());
        let err = executor
            .execute(Commands::Clients {
                group: "missing".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Available groups: alerts"));
    }

    #[tokio::test]
    async fn test_listing_commands_succeed() {
        let executor = CommandExecutor::new(registry());
        assert_eq!(executor.execute(Commands::Groups).await.unwrap(), Outcome::Ok);
        assert_eq!(
            executor
                .execute(Commands::Clients {
                    group: "alerts".to_string()
                })
                .await
                .unwrap(),
            Outcome::Ok
        );
    }
}
