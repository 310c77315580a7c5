//! Command handlers: interactive dialogue loops and history views.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::info;

use mindgauge_ai::{
    ChatSession, GigaChatClient, GigaChatConfig, StepOutcome, TestRunner, TokenManager,
};
use mindgauge_common::{AssistantError, Result, TestType};
use mindgauge_store::{FileCredentialStore, JsonResultStore};

use crate::cli::Command;

/// Environment variable holding the operator-supplied authorization key.
const CREDENTIAL_ENV: &str = "GIGACHAT_AUTHORIZATION_KEY";

pub async fn run(command: Command) -> Result<()> {
    let store = Arc::new(FileCredentialStore::open_default()?);
    let client = Arc::new(GigaChatClient::new(GigaChatConfig::from_env()));
    let auth = TokenManager::new(store, client.clone());
    let results = JsonResultStore::open_default()?;

    // An operator-supplied key takes precedence over the stored one.
    if let Ok(key) = std::env::var(CREDENTIAL_ENV) {
        if !key.is_empty() {
            auth.set_credential(&key).await;
            info!("authorization credential taken from environment");
        }
    }

    match command {
        Command::Test { test_type } => {
            ensure_credential(&auth).await?;
            run_test(&auth, client.as_ref(), &results, test_type).await
        }
        Command::Chat => {
            ensure_credential(&auth).await?;
            run_chat(&auth, client.as_ref()).await
        }
        Command::History { test_type } => show_history(&results, test_type),
        Command::Show { id } => show_result(&results, id),
        Command::Credential { value } => {
            auth.set_credential(&value).await;
            println!("Токен сохранен");
            Ok(())
        }
    }
}

/// Ask for the authorization key on stdin when none is configured yet,
/// mirroring the one-time entry flow of the original client.
async fn ensure_credential(auth: &TokenManager) -> Result<()> {
    if auth.has_credential() {
        return Ok(());
    }

    println!("Авторизация GigaChat: введите authorization key (base64).");
    print!("> ");
    io::stdout().flush()?;

    let mut key = String::new();
    io::stdin().read_line(&mut key)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AssistantError::Other("Токен не может быть пустым".into()));
    }
    auth.set_credential(key).await;
    println!("Токен сохранен");
    Ok(())
}

async fn run_test(
    auth: &TokenManager,
    chat: &GigaChatClient,
    sink: &JsonResultStore,
    test_type: TestType,
) -> Result<()> {
    println!("=== {} ===", test_type.title());
    println!("(пустая строка для выхода)\n");

    let mut runner = TestRunner::new(test_type);
    let greeting = runner.begin(auth, chat).await?;
    println!("{greeting}\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let answer = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let answer = answer.trim();
        if answer.is_empty() {
            break;
        }

        match runner.answer(auth, chat, sink, answer).await {
            Ok(StepOutcome::NextQuestion(question)) => println!("\n{question}\n"),
            Ok(StepOutcome::Finished(result)) => {
                println!("\n{}\n", result.verdict);
                println!("{}", result.details);
                println!("Результат сохранен в истории.");
                return Ok(());
            }
            // Transport failures surface here; the dialogue stays open for
            // a manual retry.
            Err(e) => eprintln!("\nОшибка: {e}\nПопробуйте ответить еще раз.\n"),
        }
    }

    println!("Тест прерван.");
    Ok(())
}

async fn run_chat(auth: &TokenManager, chat: &GigaChatClient) -> Result<()> {
    println!("=== AI Чат ===");
    println!("(пустая строка для выхода, /reset — начать заново)\n");

    let mut session = ChatSession::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let message = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let message = message.trim();
        if message.is_empty() {
            break;
        }
        if message == "/reset" {
            session.reset();
            println!("История очищена.\n");
            continue;
        }

        match session.send(auth, chat, message).await {
            Ok(reply) => println!("\n{reply}\n"),
            Err(e) => eprintln!("\nОшибка: {e}\n"),
        }
    }

    Ok(())
}

fn show_history(results: &JsonResultStore, test_type: Option<TestType>) -> Result<()> {
    let records = match test_type {
        Some(t) => results.by_type(t)?,
        None => results.all()?,
    };

    if records.is_empty() {
        println!("История пуста.");
        return Ok(());
    }

    for record in records {
        println!(
            "#{:<4} {}  {}  (вопросов: {})",
            record.id,
            record.result.created_at.format("%Y-%m-%d %H:%M"),
            record.result.test_type.title(),
            record.result.turn_count,
        );
        println!("      {}", preview(&record.result.verdict, 100));
    }
    Ok(())
}

fn show_result(results: &JsonResultStore, id: u64) -> Result<()> {
    match results.by_id(id)? {
        Some(record) => {
            println!("=== {} ===", record.result.test_type.title());
            println!("{}", record.result.created_at.format("%Y-%m-%d %H:%M"));
            println!("{}\n", record.result.details);
            println!("{}", record.result.verdict);
            Ok(())
        }
        None => Err(AssistantError::Other(format!("результат #{id} не найден"))),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut preview: String = flat.chars().take(max_chars).collect();
    preview.push('…');
    preview
}
