use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zipquery_core::{
    config::{Config, Providers},
    outcome::Outcome,
    providers::{
        postal_pincode_in::{PincodeResponse, PostalPincodeIn},
        postcodes_io::{PostcodeSearchResponse, PostcodesIo},
        smarty::{Smarty, StreetCandidate, ZipLookupResult},
        via_cep::{ViaCep, ViaCepAddress},
    },
    service::{CodeLookup, ComponentLookup},
    transport::ApiTransport,
};

#[derive(Parser)]
#[command(author, version, about = "zipquery CLI smoke tool", long_about = None)]
struct Cli {
    /// Optional JSON or TOML config file (HTTP timeouts, credential env names)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a Brazilian address by CEP via ViaCep
    Cep {
        /// 8-digit CEP, hyphen optional (e.g. 14810-100)
        code: String,
    },
    /// Search Brazilian addresses by state, city and street via ViaCep
    CepSearch {
        state: String,
        city: String,
        street: String,
    },
    /// Look up US city/state candidates by ZIP code via Smarty
    /// (requires SMARTY_AUTH_ID and SMARTY_AUTH_TOKEN)
    UsZip { code: String },
    /// Search US street-address candidates via Smarty
    UsStreet {
        street: String,
        city: String,
        state: String,
    },
    /// Look up Indian post offices by 6-digit PIN via Postalpincode.in
    Pincode { code: String },
    /// Search UK postcode data via Postcodes.io
    Postcode { code: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let transport = ApiTransport::from_config(&cfg.http)?;

    match cli.command {
        Commands::Cep { code } => {
            let service = ViaCep::new(transport);
            let outcome = service.query_by_code::<ViaCepAddress>(&code).await?;
            render(outcome, print_via_cep_address);
        }
        Commands::CepSearch {
            state,
            city,
            street,
        } => {
            let service = ViaCep::new(transport);
            let outcome = service
                .query_by_components::<ViaCepAddress>(&state, &city, &street)
                .await?;
            render(outcome, |rows| {
                println!("{} address(es) found", rows.len());
                for row in rows {
                    print_via_cep_address(row);
                }
            });
        }
        Commands::UsZip { code } => {
            let service = smarty_from_env(transport, &cfg.providers)?;
            let outcome = service.query_by_code::<Vec<ZipLookupResult>>(&code).await?;
            render(outcome, |rows| {
                for row in rows {
                    for cs in &row.city_states {
                        println!(
                            "{}, {}",
                            cs.city.as_deref().unwrap_or("?"),
                            cs.state_abbreviation.as_deref().unwrap_or("?"),
                        );
                    }
                }
            });
        }
        Commands::UsStreet {
            street,
            city,
            state,
        } => {
            let service = smarty_from_env(transport, &cfg.providers)?;
            let outcome = service
                .query_by_components::<StreetCandidate>(&state, &city, &street)
                .await?;
            render(outcome, |rows| {
                println!("{} candidate(s) found", rows.len());
                for row in rows {
                    println!(
                        "{} | {}",
                        row.delivery_line_1.as_deref().unwrap_or("?"),
                        row.last_line.as_deref().unwrap_or("?"),
                    );
                }
            });
        }
        Commands::Pincode { code } => {
            let service = PostalPincodeIn::new(transport);
            let outcome = service.query_by_code::<PincodeResponse>(&code).await?;
            render(outcome, |response| {
                println!("{}", response.message.as_deref().unwrap_or("(no message)"));
                for office in response.post_offices.as_deref().unwrap_or(&[]) {
                    println!(
                        "{} - {}, {}",
                        office.name.as_deref().unwrap_or("?"),
                        office.district.as_deref().unwrap_or("?"),
                        office.state.as_deref().unwrap_or("?"),
                    );
                }
            });
        }
        Commands::Postcode { code } => {
            let service = PostcodesIo::new(transport);
            let outcome = service.query_by_code::<PostcodeSearchResponse>(&code).await?;
            render(outcome, |response| {
                for info in response.result.as_deref().unwrap_or(&[]) {
                    println!(
                        "{} - {}, {}",
                        info.postcode.as_deref().unwrap_or("?"),
                        info.region.as_deref().unwrap_or("?"),
                        info.country.as_deref().unwrap_or("?"),
                    );
                }
            });
        }
    }

    Ok(())
}

fn smarty_from_env(transport: ApiTransport, providers: &Providers) -> anyhow::Result<Smarty> {
    let (id_env, token_env) = match &providers.smarty {
        Some(cfg) => (cfg.auth_id_env.as_str(), cfg.auth_token_env.as_str()),
        None => ("SMARTY_AUTH_ID", "SMARTY_AUTH_TOKEN"),
    };
    let auth_id = std::env::var(id_env).map_err(|_| anyhow::anyhow!("{id_env} is not set"))?;
    let auth_token =
        std::env::var(token_env).map_err(|_| anyhow::anyhow!("{token_env} is not set"))?;
    Ok(Smarty::new(transport, auth_id, auth_token)?)
}

fn render<T>(outcome: Outcome<T>, on_value: impl FnOnce(T)) {
    outcome.match_with(on_value, |err| {
        eprintln!("{err}");
        if let Some(body) = err.response_body() {
            eprintln!("  body: {}", truncate(body, 300));
        }
    });
}

fn print_via_cep_address(address: ViaCepAddress) {
    println!(
        "{} - {}, {} ({})",
        address.street.as_deref().unwrap_or("?"),
        address.city.as_deref().unwrap_or("?"),
        address.state.as_deref().unwrap_or("?"),
        address.zip_code.as_deref().unwrap_or("?"),
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t = s.chars().take(max).collect::<String>();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}
