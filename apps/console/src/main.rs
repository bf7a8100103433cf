use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use client_core::{
    rest::RestCollectionClient, CollectionState, DeleteConfirmer, Notice, ProductForm,
    ProductListController,
};
use shared::domain::{Product, ProductId};
use tokio::sync::broadcast;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the inventory API, e.g. http://127.0.0.1:8000/api
    #[arg(long)]
    server_url: Option<String>,
}

struct PromptConfirmer;

impl DeleteConfirmer for PromptConfirmer {
    fn confirm_delete(&self, product: &Product) -> bool {
        match read_line(&format!(
            "Deseja realmente apagar este produto? ({}) [s/N] ",
            product.name
        )) {
            Ok(Some(answer)) => answer.trim().eq_ignore_ascii_case("s"),
            _ => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let client = Arc::new(RestCollectionClient::new(settings.server_url.clone()));
    let controller = ProductListController::start(client, Arc::new(PromptConfirmer)).await;
    let mut notices = controller.subscribe_notices();

    println!("Inventory Dashboard — {}", settings.server_url);
    println!("Comandos: r (atualizar), a (adicionar), d <id> (remover), q (sair)");
    drain_notices(&mut notices);
    render(&controller.snapshot().await);

    loop {
        let Some(line) = read_line("> ")? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "r" | "refresh" => controller.refresh().await,
            "a" | "add" => {
                let mut form = ProductForm {
                    name: prompt("Nome: ")?,
                    price: prompt("Preço (R$): ")?,
                    in_stock: !prompt("Em estoque? [S/n] ")?.eq_ignore_ascii_case("n"),
                };
                controller.submit_create(&mut form).await;
            }
            "d" | "delete" => match rest.parse::<i64>() {
                Ok(id) => {
                    controller.delete_item(ProductId(id)).await;
                }
                Err(_) => println!("Uso: d <id>"),
            },
            "q" | "quit" => break,
            other => println!("Comando desconhecido: {other}"),
        }

        drain_notices(&mut notices);
        render(&controller.snapshot().await);
    }

    Ok(())
}

fn read_line(prompt_text: &str) -> io::Result<Option<String>> {
    print!("{prompt_text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn prompt(prompt_text: &str) -> io::Result<String> {
    Ok(read_line(prompt_text)?
        .map(|line| line.trim().to_string())
        .unwrap_or_default())
}

fn drain_notices(notices: &mut broadcast::Receiver<Notice>) {
    loop {
        match notices.try_recv() {
            Ok(Notice::Success(message)) => println!("[ok] {message}"),
            Ok(Notice::Error(message)) => println!("[erro] {message}"),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
}

fn render(state: &CollectionState) {
    if state.loading {
        println!("Carregando...");
    }
    if state.saving {
        println!("Salvando...");
    }
    if let Some(error) = &state.last_error {
        println!("[erro] {error}");
    }
    if state.items.is_empty() && !state.loading {
        println!("Nenhum produto cadastrado.");
        return;
    }
    for product in &state.items {
        let badge = if product.in_stock {
            "Em estoque"
        } else {
            "Fora de estoque"
        };
        println!(
            "  #{:<4} {:<24} R$ {:>8.2}  {}",
            product.id.0, product.name, product.price, badge
        );
    }
}
