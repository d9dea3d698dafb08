use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use quizlink::protocol::share_link;
use quizlink::{
    config, load_questions_from_json, logging, App, Config, Difficulty, GeminiGenerator,
    QuestionGenerator, QuizError, Workbench,
};
use url::Url;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log file for the interactive mode (defaults to the temp dir)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build, review and take quizzes interactively (the default)
    Tui {
        /// JSON file to preload questions from
        #[arg(short, long)]
        questions: Option<PathBuf>,

        /// Share link to open directly in quiz mode
        #[arg(short, long)]
        link: Option<String>,
    },
    /// Print a share link for a JSON question file
    Encode {
        /// JSON file to load the questions from
        #[arg(short, long)]
        questions: PathBuf,

        /// Label stored in the link
        #[arg(short, long)]
        slug: Option<String>,

        /// Base URL the link is built on (overrides the config)
        #[arg(short, long)]
        base_url: Option<String>,
    },
    /// Print the questions of a share link as a JSON array (slug on stderr)
    Decode {
        /// Share link
        url: String,
    },
    /// Generate questions and print them as JSON
    Generate {
        /// Topic of the questions
        #[arg(short, long)]
        topic: String,

        /// Number of questions
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Difficulty level
        #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, QuizError> {
    let mut config = Config::load(args.config.as_deref())?;
    if args.log_file.is_some() {
        config.log_file = args.log_file;
    }

    match args.command.unwrap_or(Command::Tui {
        questions: None,
        link: None,
    }) {
        Command::Tui { questions, link } => run_tui(&config, questions, link).await,
        Command::Encode {
            questions,
            slug,
            base_url,
        } => {
            logging::init_stderr();
            let base = match base_url {
                Some(raw) => config::parse_base_url(&raw)?,
                None => config.share_base_url()?,
            };
            let questions = load_questions_from_json(questions)?;
            println!("{}", share_link::encode(&questions, slug.as_deref(), &base));
            Ok(ExitCode::SUCCESS)
        }
        Command::Decode { url } => {
            logging::init_stderr();
            let Some(shared) = share_link::decode_str(&url) else {
                eprintln!("The link does not contain a quiz");
                return Ok(ExitCode::FAILURE);
            };
            if let Some(slug) = &shared.slug {
                eprintln!("slug: {}", slug);
            }
            println!("{}", serde_json::to_string_pretty(&shared.questions)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            topic,
            count,
            difficulty,
        } => {
            logging::init_stderr();
            let generator = GeminiGenerator::new(&config.generator)?;
            let request = quizlink::authoring::GenerationRequest {
                topic,
                count,
                difficulty,
            };
            let questions = generator.generate(&request).await?;
            println!("{}", serde_json::to_string_pretty(&questions)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_tui(
    config: &Config,
    questions: Option<PathBuf>,
    link: Option<String>,
) -> Result<ExitCode, QuizError> {
    logging::init_file(&config.log_file())?;

    let mut app = App::new(config.share_base_url()?);
    if let Some(path) = questions {
        app.load_questions(load_questions_from_json(path)?);
    }
    if let Some(link) = link {
        let opened = Url::parse(&link).is_ok_and(|url| app.open_shared_link(&url));
        if !opened {
            tracing::warn!("command line link did not contain a quiz");
            app.set_status("The link does not contain a quiz");
        }
    }

    let generator = GeminiGenerator::new(&config.generator)?;
    let app = Workbench::new(app, Arc::new(generator)).run().await?;

    if let Some(link) = app.copied_link() {
        println!("{}", link);
    }
    Ok(ExitCode::SUCCESS)
}
