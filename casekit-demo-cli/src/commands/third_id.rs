//! Correlation token commands

use anyhow::{bail, Result};
use casekit_lib::{IdPrefix, ThirdId};

use crate::ui;

fn parse_kind(kind: &str) -> Result<IdPrefix> {
    match kind {
        "payment" => Ok(IdPrefix::Payment),
        "order" => Ok(IdPrefix::Order),
        other => bail!("Unknown token kind '{}', expected 'payment' or 'order'", other),
    }
}

/// Mint a payment or order correlation token.
pub fn generate(kind: &str) -> Result<()> {
    ui::header("Generate Correlation Token");

    let prefix = parse_kind(kind)?;
    let token = ThirdId::generate(prefix);

    ui::success(&format!("Minted {}", token));
    ui::key_value("Prefix", prefix.as_str());
    ui::key_value("Date (yyMMdd)", token.date_part());
    ui::key_value("Suffix", token.suffix());
    ui::info("Uniqueness is millisecond-probabilistic; stores report duplicate inserts");

    Ok(())
}

/// Validate and decompose a correlation token.
pub fn inspect(candidate: &str) -> Result<()> {
    ui::header("Inspect Correlation Token");
    ui::key_value("Candidate", candidate);

    let token = match ThirdId::parse(candidate) {
        Ok(token) => token,
        Err(err) => bail!("rejected: {}", err),
    };

    let kind = match token.prefix() {
        IdPrefix::Payment => "payment (third_id for order/payData)",
        IdPrefix::Order => "order (third_id for order/orderData)",
    };

    ui::success("Well-formed token");
    ui::key_value("Kind", kind);
    ui::key_value("Date (yyMMdd)", token.date_part());
    ui::key_value("Suffix", token.suffix());

    Ok(())
}
