//! Digest orchestration
//!
//! Builds all configured clients, fetches their activity concurrently (one
//! task per client, no shared state between them), and renders the combined
//! report. One client's fetch failure is reported inline and never blocks
//! the other clients' digests.

use crate::config::ClientsConfig;
use crate::providers::{self, NamedClient};
use crate::render;
use crate::Result;
use chrono::Utc;
use tracing::warn;

/// Fetch from every configured client and render the full digest
pub async fn run(config: &ClientsConfig) -> Result<String> {
    let clients = providers::build_clients(config).await?;
    render_all(config, &clients).await
}

async fn render_all(config: &ClientsConfig, clients: &[NamedClient]) -> Result<String> {
    let now = Utc::now();

    let section_names: Vec<&str> = clients.iter().map(|c| c.section.as_str()).collect();
    let mut out = render::digest_header(&section_names, now);

    // Independent pipelines; failures are isolated per client
    let results = futures::future::join_all(clients.iter().map(|c| c.source.fetch())).await;

    for (client, result) in clients.iter().zip(results) {
        let display_name = config.display_name(&client.section);
        match result {
            Ok(activity) => {
                let body_limit = config.body_limit(&client.section);
                out.push_str(&render::render_client(display_name, &activity, body_limit, now));
            }
            Err(e) => {
                warn!(client = %client.section, error = %e, "Client fetch failed");
                out.push_str(&render::render_client_failure(display_name, &e.to_string()));
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{Activity, ActivitySource, IssueRecord, RepoActivity};
    use crate::TidingsError;
    use async_trait::async_trait;

    struct FixedSource(RepoActivity);

    #[async_trait]
    impl ActivitySource for FixedSource {
        async fn fetch(&self) -> Result<Activity> {
            Ok(Activity::Repo(self.0.clone()))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ActivitySource for FailingSource {
        async fn fetch(&self) -> Result<Activity> {
            Err(TidingsError::Fetch("connection refused".to_string()))
        }
    }

    fn record(number: u64, title: &str) -> IssueRecord {
        IssueRecord {
            number,
            title: title.to_string(),
            body: None,
            url: format!("https://github.com/o/r/issues/{}", number),
            author: Some("alice".to_string()),
            created_at: "2026-08-28T12:00:00Z".to_string(),
            updated_at: "2026-08-28T12:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_others() {
        let config = ClientsConfig::default();
        let clients = vec![
            NamedClient {
                section: "good".to_string(),
                source: Box::new(FixedSource(RepoActivity {
                    issues: vec![record(1, "An issue")],
                    pulls: vec![],
                })),
            },
            NamedClient {
                section: "bad".to_string(),
                source: Box::new(FailingSource),
            },
        ];

        let digest = render_all(&config, &clients).await.unwrap();
        assert!(digest.contains("# Initialized 2 clients"));
        assert!(digest.contains("## ISSUE: 1 - An issue"));
        assert!(digest.contains("> Fetch failed: Fetch error: connection refused"));
    }
}
