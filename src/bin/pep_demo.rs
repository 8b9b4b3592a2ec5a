use clap::Parser;
use polymorphic_encryption::{
    authority::KeyAuthority,
    roles::{Endpoint, Issuer, Relay},
    MAX_IDENTIFIER_LEN,
};
use tracing::info;

/// Runs one identifier through activation, transformation and decryption.
#[derive(Parser, Debug)]
#[command(
    about = "Polymorphic encryption walkthrough: issuer -> relay -> endpoint",
    author,
    version
)]
struct Cli {
    /// Identifier to activate (at most 16 bytes)
    #[arg(long = "identifier", default_value = "BSN1234")]
    identifier: String,

    /// Issuer identifier
    #[arg(long = "issuer", default_value = "AS1")]
    issuer: String,

    /// Relay the identifier is activated for
    #[arg(long = "relay", default_value = "AP1")]
    relay: String,

    /// Endpoint the relay transforms for
    #[arg(long = "endpoint", default_value = "SP1")]
    endpoint: String,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("pep-demo failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(cli)?;

    let mut kma = KeyAuthority::new()?;
    let mut issuer = Issuer::new(cli.issuer.as_str());
    let mut relay = Relay::new(cli.relay.as_str());
    let mut endpoint = Endpoint::new(cli.endpoint.as_str());

    kma.register_issuer(&mut issuer);
    kma.register_relay(&mut relay)?;
    kma.register_endpoint(&mut endpoint)?;

    info!(identifier = %cli.identifier, "activating identifier");
    let polymorphic = issuer.activate(cli.identifier.as_bytes(), relay.id())?;
    info!(cryptogram = %polymorphic, "cryptogram after activation");

    let encrypted = relay.transform(&polymorphic, endpoint.id())?;
    info!(cryptogram = %encrypted, "cryptogram after transform");

    let decrypted = endpoint.decrypt(&encrypted)?;
    println!("decrypted identifier: {}", String::from_utf8_lossy(&decrypted));
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), String> {
    if cli.identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(format!(
            "identifier must be at most {} bytes, got {}",
            MAX_IDENTIFIER_LEN,
            cli.identifier.len()
        ));
    }
    for (label, id) in [("issuer", &cli.issuer), ("relay", &cli.relay), ("endpoint", &cli.endpoint)] {
        if id.is_empty() {
            return Err(format!("{} identifier must not be empty", label));
        }
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}
