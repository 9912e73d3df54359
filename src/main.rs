mod actions;
mod parser;
mod utils;

use actions::{Request, Response};
use anyhow::Error;
use books::BooksController;
use clap::Parser;
use config::Config;
use controller::error::ErrorKind;
use controller::{acknowledger, Pager};
use parser::MenuOption;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

macro_rules! prompt {
    ($ed:ident) => {{
        use rustyline::error::ReadlineError;

        match $ed.readline(PROMPT) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str())?;
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                println!("Exiting...Good bye!");
                break;
            }

            Err(e) => Err(e),
        }
    }};
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = "> ";

/// Query and extend the books database from the terminal
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database url, takes precedence over DATABASE_URL and the config file
    #[arg(long)]
    database_url: Option<String>,

    /// Log every query
    #[arg(short, long)]
    verbose: bool,

    /// Print whole results without waiting between pages, implied when
    /// stdin or stdout isn't a terminal
    #[arg(long)]
    no_pause: bool,
}

fn print_menu() {
    for (i, option) in MenuOption::NUMBERED.iter().enumerate() {
        println!("{}) {}", i + 1, option.description());
    }

    println!("Q) {}", MenuOption::Quit.description());
}

fn show(response: Response, config: &Config, no_pause: bool) {
    match response {
        Response::Message(msg) => println!("{}", msg),

        Response::Table(lines) => {
            // Terminal size is read again every time, it may have changed
            let mut pager = Pager::for_terminal(
                io::stdout(),
                acknowledger(no_pause),
                config.pager.default_height,
            );

            if let Err(e) = pager.page(&lines) {
                log::error!("Couldn't page output: {}", e);
            }
        }
    }
}

fn main_menu(
    controller: &mut BooksController,
    config: &Config,
    no_pause: bool,
) -> Result<(), Error> {
    let mut rl = rustyline::DefaultEditor::new()?;
    print_menu();

    loop {
        let line: String = prompt!(rl)?;

        let option = match parser::parse_line(&line) {
            Some(option) => option,
            None if line.trim().is_empty() => continue,
            None => {
                println!("Invalid option!");
                print_menu();
                continue;
            }
        };

        match option {
            MenuOption::Quit => {
                println!("Bye!");
                break;
            }

            MenuOption::Help => print_menu(),

            option => {
                let proto = match utils::build_prototype(&mut rl, actions::fields_for(option))? {
                    Some(proto) => proto,
                    None => continue,
                };

                let request = match Request::from_prototype(option, &proto) {
                    Ok(Some(request)) => request,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("Error: {}", e);
                        continue;
                    }
                };

                log::debug!("Running {:?}", request);
                match actions::execute(controller, &request) {
                    Ok(response) => show(response, config, no_pause),
                    Err(e) => match e.downcast_ref::<ErrorKind>() {
                        Some(kind) if kind.is_constraint() => println!("Rejected: {}", kind),
                        _ => println!("Error: {}", e),
                    },
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let vars: HashMap<String, String> = dotenv::vars().collect();

    let mut config = Config::load_or_default(args.config.as_ref())?;
    config.apply_env(&vars);
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        config.log_level()?
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    println!("Welcome to bookshelf {}", VERSION);

    let mut controller = match BooksController::from_config(&config) {
        Ok(controller) => controller,
        Err(e) => {
            log::error!("Couldn't connect to the database: {}", e);
            return Err(e);
        }
    };

    main_menu(&mut controller, &config, args.no_pause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pauses_unless_asked_not_to() -> Result<(), Error> {
        let args = Args::try_parse_from(["bookshelf"])?;
        assert!(!args.no_pause);

        let args = Args::try_parse_from(["bookshelf", "--no-pause", "-v"])?;
        assert!(args.no_pause);
        assert!(args.verbose);

        Ok(())
    }
}
