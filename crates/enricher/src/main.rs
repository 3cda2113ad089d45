//! `fn-enricher` — command-line host for the enrichment pipeline.
//!
//! Startup sequence:
//! 1. Load and validate [`EnricherConfig`] from environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Build the process-lifetime identity components and the pipeline.
//! 4. Enrich one JSON request per stdin line, writing one response per line
//!    to stdout, until stdin closes.

use std::sync::Arc;

use anyhow::{Context, Result};
use common::protocol::{EnrichRequest, EnrichResponse};
use enricher::env::ProcessEnvironment;
use enricher::{telemetry, Ambient, EnricherConfig, EnrichmentPipeline, NodeNameCache, RoleInstance};
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = EnricherConfig::from_env().map_err(|e| {
        // Logging is not yet up; write to stderr directly.
        eprintln!("ERROR: fn-enricher configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        placeholder_host = %cfg.placeholder_host,
        "fn-enricher starting"
    );

    // -----------------------------------------------------------------------
    // 3. Pipeline
    // -----------------------------------------------------------------------
    let pipeline = EnrichmentPipeline::standard(
        &cfg,
        Arc::new(ProcessEnvironment),
        Arc::new(RoleInstance::new()),
        NodeNameCache::new(&cfg.node_name_suffix),
    );

    // -----------------------------------------------------------------------
    // 4. Line loop
    // -----------------------------------------------------------------------
    let processed = run(&pipeline, BufReader::new(io::stdin()), io::stdout()).await?;
    info!(processed, "stdin closed; fn-enricher exiting");
    Ok(())
}

/// Answer every non-blank input line with exactly one response line.
///
/// Lines are read as raw bytes so that invalid UTF-8 is reported as a
/// `bad_request` response instead of ending the stream. Each response is
/// flushed before the next line is read. Returns the number of responses
/// written.
async fn run<R, W>(pipeline: &EnrichmentPipeline, mut reader: R, writer: W) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut out = BufWriter::new(writer);
    let mut buf = Vec::new();
    let mut processed: u64 = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("failed to read input")?;
        if read == 0 {
            break;
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = enrich_line(pipeline, &buf);
        let mut encoded = serde_json::to_vec(&response).context("failed to encode response")?;
        encoded.push(b'\n');
        out.write_all(&encoded)
            .await
            .context("failed to write output")?;
        out.flush().await.context("failed to flush output")?;
        processed += 1;
    }

    Ok(processed)
}

/// Decode, enrich and wrap a single input line.
fn enrich_line(pipeline: &EnrichmentPipeline, line: &[u8]) -> EnrichResponse {
    let request: EnrichRequest = match serde_json::from_slice(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "skipping undecodable input line");
            return EnrichResponse::error("bad_request", format!("invalid request: {e}"));
        }
    };

    let EnrichRequest {
        mut record,
        scope,
        activity,
    } = request;
    let ambient = Ambient::new(scope.as_ref(), activity.as_ref());
    pipeline.initialize(Some(&mut record), &ambient);
    EnrichResponse::ok(record)
}
