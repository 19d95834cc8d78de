use anyhow::Result;
use clap::Parser;
use promptstudio::app::Studio;
use promptstudio::models::{AspectRatio, Config};
use std::io::{self, BufRead, Write};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "promptstudio")]
#[command(about = "Generate an image from a prompt, then refine it with follow-up edits")]
struct CliArgs {
    /// Directory where saved images are written (overrides OUTPUT_DIR).
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Generate(String),
    Aspect(AspectRatio),
    Edit(String),
    SaveOriginal,
    SaveEdited,
    Help,
    Quit,
}

/// Parses one REPL line; `Ok(None)` for blank input.
fn parse_command(line: &str) -> std::result::Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword {
        "generate" => ReplCommand::Generate(rest.to_string()),
        "edit" => ReplCommand::Edit(rest.to_string()),
        "aspect" => ReplCommand::Aspect(rest.parse()?),
        "save" => match rest {
            "original" => ReplCommand::SaveOriginal,
            "edited" => ReplCommand::SaveEdited,
            other => {
                return Err(format!(
                    "Unknown save target '{}'. Expected 'original' or 'edited'",
                    other
                ))
            }
        },
        "help" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'", other)),
    };
    Ok(Some(command))
}

fn print_help() {
    println!("Commands:");
    println!("  generate <prompt>   generate an image from a text prompt");
    println!("  aspect <ratio>      set the aspect ratio (1:1, 16:9, 9:16, 4:3, 3:4)");
    println!("  edit <instruction>  edit the generated image");
    println!("  save original       write the generated image to disk");
    println!("  save edited         write the edited image to disk");
    println!("  quit                leave the studio");
}

fn report_save(result: promptstudio::Result<Option<std::path::PathBuf>>) {
    match result {
        Ok(Some(path)) => println!("Saved to {}", path.display()),
        Ok(None) => println!("Nothing to save yet"),
        Err(e) => println!("Save failed: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptstudio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    info!("Saving images under {}", config.output_dir);
    let mut studio = Studio::from_config(&config);
    let mut aspect_ratio = AspectRatio::default();

    println!("promptstudio - type 'help' for commands");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(ReplCommand::Generate(prompt))) => {
                studio.generate(&prompt, aspect_ratio).await;
            }
            Ok(Some(ReplCommand::Aspect(ratio))) => {
                aspect_ratio = ratio;
                println!("Aspect ratio set to {}", ratio);
            }
            Ok(Some(ReplCommand::Edit(instruction))) => {
                studio.edit(&instruction).await;
            }
            Ok(Some(ReplCommand::SaveOriginal)) => report_save(studio.save_original()),
            Ok(Some(ReplCommand::SaveEdited)) => report_save(studio.save_edited()),
            Ok(Some(ReplCommand::Help)) => print_help(),
            Ok(Some(ReplCommand::Quit)) => break,
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}
