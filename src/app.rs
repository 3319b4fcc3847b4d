//! Main application orchestration
//!
//! Wires the client, resolver, providers, probe and formatter together and
//! implements the diagnostic flows. Probe failures are ordinary rows in the
//! speed test table; every other failure propagates to `main` where it is
//! reported and mapped to an exit code.

use crate::{
    cli::Command,
    client::HttpJsonClient,
    config::Config,
    error::Result,
    logging::Logger,
    output::ReportFormatter,
    probe::{LatencyProbe, ProbeResult},
    providers::AddressFamily,
    resolver::DomainResolver,
};
use tokio::sync::mpsc;

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    client: HttpJsonClient,
    resolver: DomainResolver,
    formatter: ReportFormatter,
    logger: Logger,
}

impl App {
    /// Create a new application instance from resolved configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpJsonClient::with_timeout(config.timeout)?;
        let resolver = DomainResolver::new();
        let formatter = ReportFormatter::new(config.enable_color);
        let logger = Logger::from_flags(config.verbose, config.debug, config.enable_color);

        Ok(Self {
            config,
            client,
            resolver,
            formatter,
            logger,
        })
    }

    /// Run the requested flow. No subcommand reproduces the startup
    /// behavior: speed test plus public-IP lookup plus geolocation.
    pub async fn run(&self, command: Option<Command>) -> Result<()> {
        let result = match command {
            Some(Command::Resolve { domain }) => self.run_resolve(&domain).await,
            Some(Command::Ip { family }) => match family.parse::<AddressFamily>() {
                Ok(family) => self.run_check_ip(family).await,
                Err(e) => Err(e),
            },
            Some(Command::Geo { ip }) => self.run_geolocate(&ip).await,
            Some(Command::Speedtest) => self.run_speedtest().await,
            None => self.run_startup().await,
        };

        if let Err(ref e) = result {
            self.logger
                .error("app", &format!("[{}] {}", e.category(), e));
        }
        result
    }

    /// Probe sharing the configured HTTP client, so `--timeout` bounds
    /// probe transfers too (a timed-out probe settles as failed)
    fn build_probe(&self) -> LatencyProbe {
        LatencyProbe::with_client(
            self.client.inner().clone(),
            self.config.probe_targets.clone(),
        )
    }

    /// Resolve a domain over DoH, then geolocate the resolved address
    async fn run_resolve(&self, domain: &str) -> Result<()> {
        self.logger
            .debug("resolver", &format!("resolving '{}' over DoH", domain));

        let ip = self.resolver.resolve(&self.client, domain).await?;
        println!("{}", self.formatter.format_resolved(domain, &ip));
        println!();

        self.run_geolocate(&ip).await
    }

    /// Look up the public IP from the configured provider, then geolocate it
    async fn run_check_ip(&self, family: AddressFamily) -> Result<()> {
        let provider = self.config.ip_provider;
        self.logger.debug(
            "providers",
            &format!("querying {} ({})", provider, provider.endpoint(family)),
        );

        let ip = provider.lookup(&self.client, family).await?;
        println!("{}", self.formatter.format_public_ip(provider.key(), &ip));
        println!();

        self.run_geolocate(&ip).await
    }

    /// Geolocate an address and render the provider's record verbatim
    async fn run_geolocate(&self, ip: &str) -> Result<()> {
        let provider = self.config.geo_provider;
        self.logger.debug(
            "providers",
            &format!("geolocating {} via {}", ip, provider),
        );

        let record = provider.locate(&self.client, ip).await?;
        if record.is_empty() {
            self.logger.warn(
                "providers",
                &format!("{} returned an empty record for {}", provider, ip),
            );
        }
        self.logger.info(
            "providers",
            &format!("{} returned {} fields", provider, record.len()),
        );
        println!("{}", self.formatter.format_geo_table(&record));
        Ok(())
    }

    /// Fire the latency probe and render rows as settlements arrive
    async fn run_speedtest(&self) -> Result<()> {
        let probe = self.build_probe();
        self.logger.info(
            "probe",
            &format!("firing {} probes", probe.targets().len()),
        );

        println!("{}", self.formatter.speedtest_header());
        let mut rx = probe.run();
        while let Some(result) = rx.recv().await {
            self.logger.debug(
                "probe",
                &format!(
                    "{} settled after {:.2}ms (success={})",
                    result.name, result.duration_ms, result.success
                ),
            );
            println!("{}", self.formatter.format_probe_row(&result));
        }

        println!();
        println!("{}", self.formatter.speedtest_footnote());
        Ok(())
    }

    /// Startup behavior: the probe fires first so its requests are in flight
    /// while the sequential IP and geolocation flow runs; settlements are
    /// drained afterwards. The two halves are independent: a failed IP chain
    /// never suppresses the speed test table.
    async fn run_startup(&self) -> Result<()> {
        let probe = self.build_probe();
        let mut rx = probe.run();

        let outcome = self.run_check_ip(AddressFamily::default()).await;
        self.finish_startup(outcome, &mut rx).await
    }

    /// Render the speed test table, then surface the held IP-chain outcome.
    /// Every settlement prints whatever the chain did.
    async fn finish_startup(
        &self,
        outcome: Result<()>,
        rx: &mut mpsc::Receiver<ProbeResult>,
    ) -> Result<()> {
        println!();
        println!("{}", self.formatter.speedtest_header());
        while let Some(result) = rx.recv().await {
            println!("{}", self.formatter.format_probe_row(&result));
        }
        println!();
        println!("{}", self.formatter.speedtest_footnote());
        outcome
    }
}
