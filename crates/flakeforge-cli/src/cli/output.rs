use super::batch::Entropy;
use super::config::{GenerateConfig, OutputFormat};
use super::report::format_report;
use flakeforge::Forged;
use std::io::Write;

/// Writes the forged batch to `out` in the configured format.
///
/// Report picks draw from the seeded stream after the last worker's, so a
/// seeded run with a pinned clock renders the same report every time.
pub fn write_batch<W: Write>(
    out: &mut W,
    config: &GenerateConfig,
    tokens: &[Forged],
) -> anyhow::Result<()> {
    match config.format {
        OutputFormat::Plain => {
            for token in tokens {
                writeln!(out, "{token}")?;
            }
        }
        OutputFormat::Json => {
            for token in tokens {
                serde_json::to_writer(&mut *out, token)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Report => {
            let rand = Entropy::for_worker(config.seed, config.workers);
            let message = format_report(&rand, &config.apps, tokens, config.ping)?;
            writeln!(out, "{message}")?;
        }
    }
    Ok(())
}
