use std::{error::Error, path::PathBuf, time::Duration};

use clap::Parser as _;
use conkit::input::{CharParser, FromStrParser, InputRequest, RequestOptions, TextParser};
use conkit::loading::{AsyncLoadingMessage, LoadingMessage, LoadingOptions, LoadingStyle};

/// Interactive tour of conkit's input requests and loading messages.
#[derive(clap::Parser, Debug)]
#[command(name = "conkit", version)]
struct Args {
    /// Animation style: periods, lines or rotary-line
    #[arg(long, default_value_t = LoadingStyle::Periods)]
    style: LoadingStyle,

    /// Time each animation frame stays on screen
    #[arg(long, default_value_t = 250)]
    delay_ms: u64,

    /// JSON file with loading options, overrides --style and --delay-ms
    #[arg(long)]
    options: Option<PathBuf>,

    /// Run the animation as a tokio task instead of a thread
    #[arg(long)]
    async_loading: bool,

    /// Seconds of simulated work shown with the animation
    #[arg(long, default_value_t = 3)]
    work_secs: u64,
}

fn print_banner() {
    println!("------------------------------------------------------------");
    println!("  ██████  ██████  ███    ██ ██   ██ ██ ████████ ");
    println!(" ██      ██    ██ ████   ██ ██  ██  ██    ██    ");
    println!(" ██      ██    ██ ██ ██  ██ █████   ██    ██    ");
    println!(" ██      ██    ██ ██  ██ ██ ██  ██  ██    ██    ");
    println!("  ██████  ██████  ██   ████ ██   ██ ██    ██    ");
    println!("                  VERSION: {}", env!("CARGO_PKG_VERSION"));
    println!("------------------------------------------------------------");
}

fn loading_options(args: &Args, name: &str) -> Result<LoadingOptions, Box<dyn Error>> {
    let mut options = match &args.options {
        Some(path) => LoadingOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => LoadingOptions {
            message: None,
            style: args.style,
            frame_delay_ms: args.delay_ms,
        },
    };

    if options.message.is_none() {
        options.message = Some(format!("Preparing your profile, {}", name));
    }

    Ok(options)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    print_banner();

    let input = InputRequest::global();

    input.configure(
        RequestOptions::new()
            .request_message("Name: ")
            .error_message("The name can't be blank, try again!"),
    );
    let name = input
        .request_when(TextParser, |name: &String| !name.trim().is_empty())?
        .unwrap_or_default();

    input.configure(
        RequestOptions::new()
            .request_message("Age: ")
            .error_message("Enter a valid age"),
    );
    let age = input.request_when(FromStrParser::<i32>::new(), |age: &i32| *age >= 0)?;

    input.configure(
        RequestOptions::new()
            .skippable(true)
            .request_message("Nickname (Enter to skip): "),
    );
    let nickname = input.request()?;

    input.configure(
        RequestOptions::new()
            .request_message("Continue? (y/n): ")
            .error_message("Answer with y or n, try again!"),
    );
    let confirm = input.request_when(CharParser, |c: &char| matches!(c, 'y' | 'n'))?;

    // No more questions from here on.
    input.close();

    if confirm != Some('y') {
        println!("Bye!");
        return Ok(());
    }

    let options = loading_options(&args, &name)?;
    let work = Duration::from_secs(args.work_secs);
    log::info!("simulating {:?} of work with {} animation", work, options.style);

    if args.async_loading {
        let mut loading = AsyncLoadingMessage::new().with_options(options);
        loading.toggle().await;
        tokio::time::sleep(work).await;
        loading.toggle().await;
    } else {
        let mut loading = LoadingMessage::new().with_options(options);
        loading.toggle();
        tokio::time::sleep(work).await;
        loading.toggle();
    }

    println!("Name: {}", name);
    println!("Age: {}", age.map(|a| a.to_string()).unwrap_or_default());
    println!(
        "Nickname: {}",
        nickname.unwrap_or_else(|| "(none)".to_string())
    );

    Ok(())
}
