use colored::*;
use serde_json::json;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "📦 Load Tracking Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: URL base de la API
    let base_url = get_base_url()?;
    let client = reqwest::Client::new();

    // Paso 2: Verificar que la API responde
    check_health(&client, &base_url).await?;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 📃 Listar cargas");
        println!("2. ➕ Crear carga de prueba");
        println!("3. 🔄 Transicionar estado de una carga");
        println!("4. 📅 Ver celda IN/OUT de un día");
        println!("5. 🗂  Ver tablero de un día");
        println!("6. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-6): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        let choice = choice.trim();

        let result = match choice {
            "1" => list_loads(&client, &base_url).await,
            "2" => create_sample_load(&client, &base_url).await,
            "3" => transition_load(&client, &base_url).await,
            "4" => show_calendar_cell(&client, &base_url).await,
            "5" => show_board(&client, &base_url).await,
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{} {}", "❌ Error:".bright_red(), e);
        }
    }

    Ok(())
}

fn get_base_url() -> Result<String, Box<dyn std::error::Error>> {
    print!(
        "{}",
        "URL base de la API (enter = http://localhost:5000/api): ".bright_yellow()
    );
    io::stdout().flush()?;
    let mut url = String::new();
    io::stdin().read_line(&mut url)?;
    let url = url.trim();

    Ok(if url.is_empty() {
        "http://localhost:5000/api".to_string()
    } else {
        url.trim_end_matches('/').to_string()
    })
}

fn prompt(label: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", format!("{}: ", label).bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

async fn check_health(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🔍 Verificando API...".bright_cyan());
    let response = client.get(format!("{}/health", base_url)).send().await?;

    if response.status().is_success() {
        println!("{}", "✅ API disponible".bright_green());
        Ok(())
    } else {
        Err(format!("la API respondió {}", response.status()).into())
    }
}

async fn list_loads(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let loads: serde_json::Value = client
        .get(format!("{}/loads", base_url))
        .send()
        .await?
        .json()
        .await?;

    let loads = loads.as_array().cloned().unwrap_or_default();
    println!();
    println!("{}", format!("📃 {} cargas", loads.len()).bright_green().bold());
    for load in loads {
        println!(
            "   {} {} {} → {}",
            load["id"].as_str().unwrap_or("?").bright_white(),
            format!("[{}]", load["status"].as_str().unwrap_or("?")).bright_cyan(),
            load["sender"]["company"].as_str().unwrap_or("?"),
            load["receiver"]["company"].as_str().unwrap_or("?"),
        );
    }
    Ok(())
}

async fn create_sample_load(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = json!({
        "sender": { "company": "Alpha Corp", "address": "123 Main St", "contact": "John" },
        "receiver": { "company": "Beta Inc", "address": "456 Oak Ave", "contact": "Jane" },
        "items": [{ "description": "Electronics", "quantity": 50 }],
        "expectedDeliveryDate": chrono::Utc::now().format("%Y-%m-%d").to_string(),
    });

    let response = client
        .post(format!("{}/loads", base_url))
        .json(&payload)
        .send()
        .await?;
    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if status.is_success() {
        println!(
            "{} {}",
            "✅ Carga creada:".bright_green(),
            body["id"].as_str().unwrap_or("?")
        );
    } else {
        println!("{}", serde_json::to_string_pretty(&body)?.bright_red());
    }
    Ok(())
}

async fn transition_load(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = prompt("Id de la carga")?;
    let status = prompt("Estado destino (ej: in_transit_to_warehouse)")?;
    let date = prompt("Fecha efectiva YYYY-MM-DD (enter = ahora)")?;

    let mut payload = json!({ "status": status });
    if !date.is_empty() {
        payload["actualDate"] = json!(date);
    }

    let response = client
        .patch(format!("{}/loads/{}/status", base_url, id))
        .json(&payload)
        .send()
        .await?;
    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if status.is_success() {
        println!(
            "{} {}",
            "✅ Nuevo estado:".bright_green(),
            body["status"].as_str().unwrap_or("?").bright_cyan()
        );
    } else {
        println!("{}", serde_json::to_string_pretty(&body)?.bright_red());
    }
    Ok(())
}

async fn show_calendar_cell(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let date = prompt("Día YYYY-MM-DD")?;
    let cell: serde_json::Value = client
        .get(format!("{}/loads/calendar/{}", base_url, date))
        .send()
        .await?
        .json()
        .await?;

    let count = |key: &str| cell[key].as_array().map(|a| a.len()).unwrap_or(0);
    println!();
    println!("{}", format!("📅 {}", date).bright_green().bold());
    println!("   📥 IN:  {}", count("in"));
    println!("   📤 OUT: {}", count("out"));
    Ok(())
}

async fn show_board(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let date = prompt("Día YYYY-MM-DD")?;
    let board: serde_json::Value = client
        .get(format!("{}/loads/board/{}", base_url, date))
        .send()
        .await?
        .json()
        .await?;

    println!();
    println!("{}", format!("🗂  Tablero {}", date).bright_green().bold());
    for column in board.as_array().cloned().unwrap_or_default() {
        let loads = column["loads"].as_array().map(|a| a.len()).unwrap_or(0);
        println!(
            "   {:28} {}",
            column["status"].as_str().unwrap_or("?").bright_cyan(),
            loads
        );
    }
    Ok(())
}
