//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::cursor::{CursorOptions, PagedCursor};
use crate::error::{Result, ResultExt};
use crate::statement::Statement;
use crate::transport::{HttpTransport, Transport};
use serde_json::Value;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        self.run_to(&mut std::io::stdout()).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_to(&self, out: &mut (dyn Write + Send)) -> Result<()> {
        let config = self.client_config()?;
        let transport = HttpTransport::with_config(config.http_client_config())?;
        let options = config.cursor.clone();

        match &self.cli.command {
            Commands::Query {
                query,
                bind,
                batch_size,
                limit,
            } => {
                let statement = build_statement(query, bind.as_deref(), *batch_size)?;
                self.query(&transport, &statement, options, *limit, out).await
            }
            Commands::Count {
                query,
                bind,
                batch_size,
            } => {
                let statement = build_statement(query, bind.as_deref(), *batch_size)?;
                self.count(&transport, &statement, options, out).await
            }
        }
    }

    /// Resolve configuration from the config file and command-line overrides
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ClientConfig::default(),
        };

        if let Some(url) = &self.cli.url {
            config.base_url.clone_from(url);
        }
        if self.cli.sanitize {
            config.cursor.sanitize = true;
        }

        config.validate()?;
        Ok(config)
    }

    async fn query(
        &self,
        transport: &dyn Transport,
        statement: &Statement,
        options: CursorOptions,
        limit: Option<usize>,
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        let mut cursor: PagedCursor<Value> = statement.execute(transport, options).await?;

        let mut written = 0;
        while limit.map_or(true, |limit| written < limit) && cursor.valid().await? {
            writeln!(out, "{}", serde_json::to_string(cursor.current()?)?)?;
            cursor.advance();
            written += 1;
        }
        out.flush()?;

        if cursor.id().is_some() {
            let released = cursor.delete().await;
            debug!("Released cursor early: {}", released);
        }

        info!(
            "Wrote {} records in {} continuation requests",
            written,
            cursor.fetches()
        );
        Ok(())
    }

    async fn count(
        &self,
        transport: &dyn Transport,
        statement: &Statement,
        options: CursorOptions,
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        let mut cursor: PagedCursor<Value> = statement.execute(transport, options).await?;
        let total = cursor.count().await?;
        writeln!(out, "{total}")?;
        Ok(())
    }
}

fn build_statement(
    query: &str,
    bind: Option<&str>,
    batch_size: Option<u32>,
) -> Result<Statement> {
    let mut statement = Statement::new(query);
    if let Some(bind) = bind {
        let vars: Value = serde_json::from_str(bind).context("Invalid --bind JSON")?;
        statement = statement.bind_all(vars)?;
    }
    if let Some(size) = batch_size {
        statement = statement.batch_size(size);
    }
    Ok(statement)
}
