use kanal::{AsyncReceiver, AsyncSender};
use lexicard_types::{AppEvent, Language, WordEntry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
commands:
  add <word>      add a word to your library
  capture         add the currently selected text
  list            show your library
  detail <word>   show translation, definition and pronunciation
  remove <word>   remove a word
  lang <code>     set target language (es, zh)
  quiz            start a quiz
  answer <text>   answer the current quiz question
  quit            exit";

/// Line-oriented terminal front end: parses user intents, renders app
/// updates. All state lives on the other side of the channels.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    if !atty::is(atty::Stream::Stdin) {
        tracing::warn!("stdin is not a terminal; interactive prompt may misbehave");
    }

    println!("lexicard - vocabulary flashcards");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),

            event = app_to_ui_rx.recv() => {
                render(&event?);
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    ui_to_app_tx.send(AppEvent::Quit).await.ok();
                    return Ok(());
                };

                if line.trim().is_empty() {
                    continue;
                }

                match parse_command(&line) {
                    Ok(event) => {
                        let quitting = matches!(event, AppEvent::Quit);
                        ui_to_app_tx.send(event).await?;
                        if quitting {
                            return Ok(());
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
        }
    }
}

/// Maps one input line to a user intent.
pub fn parse_command(line: &str) -> Result<AppEvent, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "add" if !rest.is_empty() => Ok(AppEvent::AddWord(rest.to_string())),
        "add" => Err("usage: add <word>".to_string()),
        "capture" => Ok(AppEvent::CaptureWord),
        "list" => Ok(AppEvent::ListWords),
        "detail" | "show" if !rest.is_empty() => Ok(AppEvent::ShowDetails(rest.to_string())),
        "detail" | "show" => Err("usage: detail <word>".to_string()),
        "remove" if !rest.is_empty() => Ok(AppEvent::RemoveWord(rest.to_string())),
        "remove" => Err("usage: remove <word>".to_string()),
        "lang" => match Language::from_code(rest) {
            Some(language) => Ok(AppEvent::SetLanguage(language)),
            None => {
                let codes: Vec<String> = Language::ALL
                    .iter()
                    .map(|l| format!("{} ({})", l.code(), l.name()))
                    .collect();
                Err(format!("usage: lang <code>: {}", codes.join(", ")))
            }
        },
        "quiz" => Ok(AppEvent::StartQuiz),
        "answer" if !rest.is_empty() => Ok(AppEvent::SubmitAnswer(rest.to_string())),
        "answer" => Err("usage: answer <text>".to_string()),
        "quit" | "exit" => Ok(AppEvent::Quit),
        "help" => Err(HELP.to_string()),
        _ => Err(format!("unknown command \"{command}\", try `help`")),
    }
}

fn render(event: &AppEvent) {
    match event {
        AppEvent::WordAdded(entry) => {
            println!("Added \"{}\" to your library.", entry.original_word);
        }
        AppEvent::WordRemoved(word) => println!("Removed \"{word}\"."),
        AppEvent::Library(entries) => render_library(entries),
        AppEvent::Details { entry, language } => render_details(entry, *language),
        AppEvent::LanguageChanged(language) => {
            println!("Target language set to {language}.");
        }
        AppEvent::Loading(message) => println!("{message}"),
        AppEvent::QuizQuestionReady { question, number } => {
            println!();
            println!(
                "Question {number}: What is the English translation of: {}?",
                question.word_to_guess
            );
            println!("(answer with: answer <text>)");
        }
        AppEvent::QuizFeedback {
            correct,
            correct_answer,
            score,
            answered,
        } => {
            if *correct {
                println!("Correct! 🎉");
            } else {
                println!("Not quite. The correct English translation is: {correct_answer}");
            }
            println!("Score: {score}/{answered}");
        }
        AppEvent::QuizFinished(summary) => {
            println!();
            println!("Quiz Complete!");
            println!("Your score: {} / {}", summary.score, summary.answered);
            if summary.skipped > 0 {
                let plural = if summary.skipped == 1 { "" } else { "s" };
                println!(
                    "({} word{plural} skipped due to loading issues)",
                    summary.skipped
                );
            }
        }
        AppEvent::QuizUnavailable(message) | AppEvent::Notice(message) => println!("{message}"),
        // Intents never arrive on this side.
        other => tracing::debug!("unexpected event in UI loop: {other:?}"),
    }
}

fn render_library(entries: &[WordEntry]) {
    if entries.is_empty() {
        println!("Your library is empty. Use `add <word>` or `capture` to grow it.");
        return;
    }

    println!("Your library ({} words, newest first):", entries.len());
    for entry in entries {
        let languages: Vec<&str> = entry
            .details_by_language
            .keys()
            .map(|l| l.code())
            .collect();
        if languages.is_empty() {
            println!("  {}", entry.original_word);
        } else {
            println!("  {} [{}]", entry.original_word, languages.join(", "));
        }
    }
}

fn render_details(entry: &WordEntry, language: Language) {
    let Some(details) = entry.details_for(language) else {
        println!("No details loaded for \"{}\".", entry.original_word);
        return;
    };

    println!();
    println!("{} ({})", entry.original_word, language);
    println!("  translation:    {}", details.translation);
    println!("  definition:     {}", details.definition);
    println!("  example:        {}", details.example_sentence);
    if let Some(example) = &details.target_language_example_sentence {
        println!("  example ({}): {example}", language.code());
    }
    println!("  pronunciation:  {}", details.english_pronunciation);
    println!(
        "  pronunciation ({}): {}",
        language.code(),
        details.target_language_pronunciation
    );
    if details.english_pronunciation_audio.is_some()
        || details.target_language_pronunciation_audio.is_some()
    {
        println!("  (pronunciation audio available)");
    }
}
