use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

mod config;
mod encoder;
mod forwarder;
mod generator;
mod history;
mod models;
mod studio;
mod traits;

use config::AppConfig;
use forwarder::SheetForwarder;
use generator::{GeminiClient, PostGenerator};
use history::{HistoryStore, SqliteBackend};
use models::RecipePost;
use studio::Studio;

#[derive(Parser)]
#[command(
    name = "recipe-studio",
    about = "Генератор Instagram-постов для проекта «Вкусно. Просто. Полезно.»"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a post from recipe text and/or images
    Generate {
        /// Recipe text
        #[arg(long)]
        text: Option<String>,
        /// Recipe image file, may be repeated
        #[arg(long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,
        /// Forward the generated post to the sheet right away
        #[arg(long)]
        forward: bool,
    },
    /// List past generations
    History,
    /// Replay a past generation by id
    Show { id: i64 },
    /// Forward a past generation to the sheet by id
    Forward { id: i64 },
    /// Wipe the generation history
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let generator = PostGenerator::new(Arc::new(GeminiClient::new(&config.gemini)));
    let history = HistoryStore::new(Arc::new(SqliteBackend::new(&config.history_db_url).await?));
    let forwarder = SheetForwarder::new(config.sheet_webhook_url.clone());
    let mut studio = Studio::new(generator, history, forwarder);

    match cli.command {
        Command::Generate {
            text,
            images,
            forward,
        } => {
            let batch = encoder::encode_batch(&images).await;
            for failure in &batch.failures {
                warn!(
                    "skipping image {}: {}",
                    failure.path.display(),
                    failure.error
                );
            }

            match studio
                .generate(text.unwrap_or_default(), batch.attachments)
                .await
            {
                Ok(record) => print_post(&record.result),
                Err(_) => {
                    eprintln!(
                        "Ошибка: {}",
                        studio.last_error().unwrap_or("неизвестная ошибка")
                    );
                    std::process::exit(1);
                }
            }

            if forward {
                studio
                    .forward()
                    .await
                    .context("Не удалось отправить данные в таблицу")?;
                println!("Отправлено в таблицу.");
            }
        }
        Command::History => {
            let records = studio.list_history().await;
            if records.is_empty() {
                println!("Ваша история генераций пуста.");
            }
            for record in &records {
                let title = if record.result.title.is_empty() {
                    "Без заголовка"
                } else {
                    &record.result.title
                };
                println!(
                    "{}  {}  {}",
                    record.id,
                    record.created_at.format("%d.%m.%Y %H:%M"),
                    title
                );
            }
        }
        Command::Show { id } => match studio.load_record(id).await {
            Some(record) => {
                if !record.request.free_text.is_empty() {
                    println!("== Исходный текст");
                    println!("{}\n", record.request.free_text);
                }
                for attachment in &record.request.attachments {
                    println!("== Изображение: {} ({})", attachment.name, attachment.mime_type);
                }
                print_post(&record.result);
            }
            None => anyhow::bail!("запись {id} не найдена в истории"),
        },
        Command::Forward { id } => {
            if studio.load_record(id).await.is_none() {
                anyhow::bail!("запись {id} не найдена в истории");
            }
            studio
                .forward()
                .await
                .context("Не удалось отправить данные в таблицу")?;
            println!("Отправлено в таблицу.");
        }
        Command::Clear => {
            studio.clear_history().await;
            println!("История очищена.");
        }
    }

    Ok(())
}

/// Result panel: one block per non-empty field, same labels the form used
fn print_post(post: &RecipePost) {
    print_section("Номер", &post.number);
    print_section("Заголовок", &post.title);
    print_section("Текст рецепта", &post.recipe);
    print_section("Совет", &post.tip);
    print_section("КБЖУ", &post.kbju);
    print_section("Диеты/Показания", &post.diets);
    print_section("Хэштеги", &post.hashtags);
    print_section("Промпт для визуала", &post.image_prompt);
}

fn print_section(title: &str, content: &str) {
    if content.is_empty() {
        return;
    }
    println!("== {title}");
    println!("{content}\n");
}
