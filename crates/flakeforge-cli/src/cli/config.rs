use anyhow::bail;
use clap::{Parser, ValueEnum};
use flakeforge::{DEFAULT_MFA_PROBABILITY, DISCORD_EPOCH_MILLIS};

/// Runtime configuration for the `flakeforge` binary.
///
/// All values are parsed from CLI arguments or environment variables, with
/// defaults of 100 tokens and a 2.5% MFA share.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "flakeforge",
    version,
    about = "Forge structurally valid snowflake-based bearer tokens"
)]
pub struct CliArgs {
    /// Number of tokens to forge.
    ///
    /// Requests above `--max-count` are capped, not rejected.
    ///
    /// Environment variable: `FLAKEFORGE_COUNT`
    #[arg(short = 'n', long, env = "FLAKEFORGE_COUNT", default_value_t = 100)]
    pub count: usize,

    /// Upper bound applied to `--count`.
    ///
    /// Environment variable: `FLAKEFORGE_MAX_COUNT`
    #[arg(long, env = "FLAKEFORGE_MAX_COUNT", default_value_t = 100)]
    pub max_count: usize,

    /// Probability that any single token is MFA-style, in `[0, 1]`.
    ///
    /// Environment variable: `FLAKEFORGE_MFA_PROBABILITY`
    #[arg(long, env = "FLAKEFORGE_MFA_PROBABILITY", default_value_t = DEFAULT_MFA_PROBABILITY)]
    pub mfa_probability: f64,

    /// Forge attempts per token before giving up.
    ///
    /// A general token fails its structural check roughly one time in three,
    /// so the default leaves no realistic chance of exhaustion.
    ///
    /// Environment variable: `FLAKEFORGE_MAX_ATTEMPTS`
    #[arg(long, env = "FLAKEFORGE_MAX_ATTEMPTS", default_value_t = 64)]
    pub max_attempts: usize,

    /// Number of threads forging in parallel.
    ///
    /// Environment variable: `FLAKEFORGE_WORKERS`
    #[arg(short, long, env = "FLAKEFORGE_WORKERS", default_value_t = 1)]
    pub workers: usize,

    /// Seed for the random source. Worker `i` uses `seed + i`.
    ///
    /// Combine with `--now-ms` for byte-identical output across runs.
    ///
    /// Environment variable: `FLAKEFORGE_SEED`
    #[arg(long, env = "FLAKEFORGE_SEED")]
    pub seed: Option<u64>,

    /// Pin "now" to this Unix time in milliseconds instead of the wall clock.
    ///
    /// Must not be earlier than the Discord epoch (1420070400000).
    ///
    /// Environment variable: `FLAKEFORGE_NOW_MS`
    #[arg(long, env = "FLAKEFORGE_NOW_MS")]
    pub now_ms: Option<i64>,

    /// Output format.
    ///
    /// Environment variable: `FLAKEFORGE_FORMAT`
    #[arg(
        short,
        long,
        env = "FLAKEFORGE_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Plain
    )]
    pub format: OutputFormat,

    /// Application name for the report format. Repeatable.
    #[arg(long = "app", default_values_t = [String::from("Discord")])]
    pub apps: Vec<String>,

    /// Prefix the report with `@everyone`.
    #[arg(long, default_value_t = false)]
    pub ping: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One token per line.
    Plain,
    /// One JSON object per line: `{"kind":"general","token":"..."}`.
    Json,
    /// The webhook message template, one section per `--app`.
    Report,
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub count: usize,
    pub mfa_probability: f64,
    pub max_attempts: usize,
    pub workers: usize,
    pub seed: Option<u64>,
    pub now_ms: Option<i64>,
    pub format: OutputFormat,
    pub apps: Vec<String>,
    pub ping: bool,
}

impl TryFrom<CliArgs> for GenerateConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&args.mfa_probability) {
            bail!(
                "FLAKEFORGE_MFA_PROBABILITY ({}) must be within [0, 1]",
                args.mfa_probability
            );
        }

        if args.max_attempts == 0 {
            bail!("FLAKEFORGE_MAX_ATTEMPTS must be greater than 0");
        }

        if args.workers == 0 {
            bail!("FLAKEFORGE_WORKERS must be greater than 0");
        }

        if let Some(now_ms) = args.now_ms {
            if now_ms < DISCORD_EPOCH_MILLIS {
                bail!(
                    "FLAKEFORGE_NOW_MS ({}) is earlier than the Discord epoch ({})",
                    now_ms,
                    DISCORD_EPOCH_MILLIS
                );
            }
        }

        if args.format == OutputFormat::Report && args.apps.is_empty() {
            bail!("the report format needs at least one --app");
        }

        let count = if args.count > args.max_count {
            tracing::warn!(
                requested = args.count,
                max = args.max_count,
                "Capping token count"
            );
            args.max_count
        } else {
            args.count
        };

        Ok(Self {
            count,
            mfa_probability: args.mfa_probability,
            max_attempts: args.max_attempts,
            workers: args.workers,
            seed: args.seed,
            now_ms: args.now_ms,
            format: args.format,
            apps: args.apps,
            ping: args.ping,
        })
    }
}
