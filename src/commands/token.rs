//! Token commands: mint unsigned development tokens, inspect claims.

use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use gatehouse_auth::{Claims, ClaimsDecoder, TokenEncoder};
use gatehouse_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Create an unsigned token for local development
    Mint {
        /// User ID claim
        #[arg(long)]
        user_id: String,
        /// Email claim
        #[arg(long, default_value = "")]
        email: String,
        /// Name claim
        #[arg(long, default_value = "")]
        name: String,
        /// Phone claim
        #[arg(long, default_value = "")]
        phone: String,
        /// Role ID claim
        #[arg(long, default_value = "")]
        role_id: String,
        /// Role name claim
        #[arg(long, default_value = "")]
        role_name: String,
        /// Role attributes as a JSON object
        #[arg(long)]
        role_data: Option<String>,
    },
    /// Show the claims a token carries
    Inspect {
        /// Token to decode
        token: String,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Mint {
            user_id,
            email,
            name,
            phone,
            role_id,
            role_name,
            role_data,
        } => {
            let role_data = match role_data {
                Some(raw) => parse_role_data(raw)?,
                None => Map::new(),
            };

            let claims = Claims {
                user_id: user_id.clone(),
                email: email.clone(),
                name: name.clone(),
                phone: phone.clone(),
                role_id: role_id.clone(),
                role_name: role_name.clone(),
                role_data,
            };

            let token = TokenEncoder::new().unsigned(&claims)?;
            println!("{}", token);
        }
        TokenCommand::Inspect { token } => {
            let claims = ClaimsDecoder::new()
                .decode(token)
                .map_err(|e| AppError::validation(format!("Token could not be decoded: {e}")))?;

            match format {
                OutputFormat::Json => output::print_json(&claims),
                OutputFormat::Table => {
                    output::print_kv("User ID", &claims.user_id);
                    output::print_kv("Email", &claims.email);
                    output::print_kv("Name", &claims.name);
                    output::print_kv("Phone", &claims.phone);
                    output::print_kv("Role ID", &claims.role_id);
                    output::print_kv("Role", &claims.role_name);
                    output::print_kv("Role data", &Value::Object(claims.role_data).to_string());
                }
            }
        }
    }

    Ok(())
}

fn parse_role_data(raw: &str) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::validation("--role-data must be a JSON object")),
    }
}
