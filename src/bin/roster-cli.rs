use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(about = "Command-line client for the roster relay API", long_about = None)]
struct Cli {
    /// Base URL including the API prefix.
    #[arg(short, long, default_value = "http://localhost:5000/api")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every student
    Students,
    /// Add a student
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        roll: String,
        #[arg(long)]
        parent_phone: String,
        #[arg(long)]
        section: String,
        #[arg(long)]
        key: String,
        /// JSON value, e.g. '{"paid": 1200}'
        #[arg(long, default_value = "null")]
        fees: String,
        /// JSON value
        #[arg(long, default_value = "null")]
        performance: String,
    },
    /// Update name, parent phone or performance for a roll
    Update {
        roll: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        parent_phone: Option<String>,
        /// JSON value
        #[arg(long)]
        performance: Option<String>,
    },
    /// Delete a student by roll
    Delete { roll: String },
    /// Send one message
    Send {
        to: String,
        message: String,
    },
    /// Send the same message to several numbers
    BulkSend {
        message: String,
        #[arg(required = true)]
        numbers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Students => client.get(format!("{}/students", base)).send().await?,
        Commands::Add {
            name,
            roll,
            parent_phone,
            section,
            key,
            fees,
            performance,
        } => {
            let body = json!({
                "name": name,
                "roll": roll,
                "parentPhone": parent_phone,
                "section": section,
                "key": key,
                "fees": parse_json_arg(&fees),
                "performance": parse_json_arg(&performance),
            });
            client.post(format!("{}/student", base)).json(&body).send().await?
        }
        Commands::Update {
            roll,
            name,
            parent_phone,
            performance,
        } => {
            let mut body = serde_json::Map::new();
            if let Some(name) = name {
                body.insert("name".into(), Value::String(name));
            }
            if let Some(phone) = parent_phone {
                body.insert("parentPhone".into(), Value::String(phone));
            }
            if let Some(performance) = performance {
                body.insert("performance".into(), parse_json_arg(&performance));
            }
            client
                .put(format!("{}/student/{}", base, roll))
                .json(&body)
                .send()
                .await?
        }
        Commands::Delete { roll } => {
            client
                .delete(format!("{}/student/{}", base, roll))
                .send()
                .await?
        }
        Commands::Send { to, message } => {
            client
                .post(format!("{}/whatsapp/send", base))
                .json(&json!({ "to": to, "message": message }))
                .send()
                .await?
        }
        Commands::BulkSend { message, numbers } => {
            client
                .post(format!("{}/whatsapp/bulk-send", base))
                .json(&json!({ "numbers": numbers, "message": message }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

/// Accept JSON, fall back to a plain string.
fn parse_json_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => {
            if !status.is_success() {
                eprintln!("Error: API returned status {}", status);
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(_) => {
            eprintln!("Error: API returned status {}", status);
            eprintln!("Response: {}", text);
        }
    }
    Ok(())
}
