//! Folio password hasher
//!
//! Prints an Argon2id hash for the users file. The password is read from
//! stdin unless `--password` is given.
//!
//! Usage:
//!   echo -n 'secret' | folio-hash-password
//!   folio-hash-password --name "Sam Doe" --email sam@example.com --role Developer < pw.txt

use clap::Parser;
use std::io::{self, BufRead};

use folio::auth::hash_password;

#[derive(Parser, Debug)]
#[command(name = "folio-hash-password")]
#[command(about = "Hash a password for the Folio users file")]
#[command(version)]
struct Args {
    /// Password to hash (read from stdin when omitted)
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Print a complete user record with this name
    #[arg(long, requires = "email")]
    name: Option<String>,

    /// E-mail for the user record
    #[arg(long, requires = "name")]
    email: Option<String>,

    /// Role for the user record
    #[arg(long, default_value = "Member")]
    role: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let password = match args.password {
        Some(p) => p,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(&['\r', '\n'][..]).to_string()
        }
    };

    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    let hash = hash_password(&password)?;

    match (args.name, args.email) {
        (Some(name), Some(email)) => {
            let record = serde_json::json!({
                "name": name,
                "email": email,
                "role": args.role,
                "passwordHash": hash,
                "active": true,
            });
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        _ => println!("{}", hash),
    }

    Ok(())
}
