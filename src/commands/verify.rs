//! Verify a customer submission against the database

use std::process::ExitCode;

use regtools::config::Config;
use regtools::output::{OutputMode, VerifyFailure, VerifyResult};
use regtools::verifier::{PgCustomerStore, Verification, VerifyError, VerifyRequest, Verifier};

use crate::cli::DbArgs;

/// Apply connection flags on top of the loaded config
pub fn apply_db_args(config: &mut Config, args: DbArgs) {
    let db = &mut config.database;
    if let Some(host) = args.host {
        db.host = host;
    }
    if let Some(port) = args.port {
        db.port = port;
    }
    if let Some(database) = args.database {
        db.database = database;
    }
    if let Some(user) = args.user {
        db.user = user;
    }
    if let Some(password) = args.password {
        db.password = password;
    }
}

/// Run the submission verifier
///
/// Exits 0 when a record was found and reported, 1 otherwise.
pub fn verify(
    customer_id: Option<String>,
    minutes_back: Option<u32>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let request = VerifyRequest {
        customer_id: customer_id.filter(|id| !id.is_empty()),
        minutes_back: minutes_back.unwrap_or(config.verifier.minutes_back),
    };
    let verifier = Verifier::from_config(&config.verifier);

    match run(&verifier, &request, config) {
        Ok(verification) => {
            VerifyResult::from(&verification).render(mode);
            Ok(ExitCode::SUCCESS)
        },
        Err(err) => {
            log::debug!("Verification failed ({}): {err:?}", err.kind());
            VerifyFailure::from(&err).render(mode);
            Ok(ExitCode::FAILURE)
        },
    }
}

fn run(
    verifier: &Verifier,
    request: &VerifyRequest,
    config: &Config,
) -> Result<Verification, VerifyError> {
    let mut store = PgCustomerStore::connect(&config.database)?;
    let verification = verifier.verify(&mut store, request)?;
    store.close()?;
    Ok(verification)
}
