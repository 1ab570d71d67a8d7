use clap::{Args, Parser, Subcommand};
use thinklink_application::{
    AdminService, AggregationStatus, CancellationFlag, GameService, SessionService,
};
use thinklink_core::{AppError, AppResult, VersionInfo};
use thinklink_domain::{
    ALL_CATEGORIES, ALL_LEVELS, DEFAULT_DISPLAY_PAGE_SIZE, DISPLAY_PAGE_SIZES, LoginCredentials,
    QuestionDeck, QuestionFilter, SignupRequest, resolve_role,
};
use tracing::info;

/// ThinkLink question-bank client.
#[derive(Debug, Parser)]
#[command(name = "thinklink", version, arg_required_else_help = true)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// One client command.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the client version and build number
    Version,
    /// Sign in and store the session
    Login {
        /// Registered mobile number
        mobile: String,
        /// Account password
        password: String,
    },
    /// Create an account and sign in
    Signup {
        /// Display name
        full_name: String,
        /// Mobile number, at least 10 characters
        mobile: String,
        /// Password, at least 8 characters
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and capabilities
    Whoami {
        /// Fetch the profile from the backend first
        #[arg(long)]
        refresh: bool,
    },
    /// Fetch every matching question
    Search(SearchArgs),
    /// List question categories
    Categories,
    /// List difficulty levels
    Levels,
    /// Question statistics (admin panel)
    Stats,
    /// Roles with user counts (admin panel)
    Roles,
}

/// Filter and display options of `search`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct SearchArgs {
    /// Free-text title search
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub search: String,
    /// Category name; "All Categories" means any
    #[arg(long, value_name = "NAME", default_value = ALL_CATEGORIES)]
    pub category: String,
    /// Difficulty level; "All" means any
    #[arg(long, value_name = "LEVEL", default_value = ALL_LEVELS)]
    pub level: String,
    /// Questions shown per page
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_DISPLAY_PAGE_SIZE,
        value_parser = parse_page_size
    )]
    pub page_size: usize,
}

impl SearchArgs {
    /// Builds the question filter from the selections.
    #[must_use]
    pub fn filter(&self) -> QuestionFilter {
        QuestionFilter::from_selection(&self.search, &self.category, &self.level)
    }
}

fn parse_page_size(value: &str) -> Result<usize, String> {
    let page_size = value
        .parse::<usize>()
        .map_err(|error| format!("'{value}' is not a number: {error}"))?;

    if DISPLAY_PAGE_SIZES.contains(&page_size) {
        Ok(page_size)
    } else {
        Err(format!("must be one of {DISPLAY_PAGE_SIZES:?}"))
    }
}

/// Services a command runs against.
pub struct CliServices {
    pub session: SessionService,
    pub game: GameService,
    pub admin: AdminService,
}

/// Executes one command, writing results to stdout.
pub async fn run(command: Command, services: &CliServices) -> AppResult<()> {
    match command {
        Command::Version => println!("{}", VersionInfo::current().full_version()),
        Command::Login { mobile, password } => {
            let credentials = LoginCredentials::new(mobile, password)?;
            let user = services.session.login(&credentials).await?;
            println!(
                "logged in as {} ({})",
                user.full_name,
                resolve_role(Some(&user))
            );
        }
        Command::Signup {
            full_name,
            mobile,
            password,
        } => {
            let request = SignupRequest::new(full_name, mobile, password)?;
            let user = services.session.signup(&request).await?;
            println!("account created for {}", user.full_name);
        }
        Command::Logout => {
            services.session.logout().await;
            println!("logged out");
        }
        Command::Whoami { refresh } => whoami(services, refresh).await?,
        Command::Search(args) => search(services, &args.filter(), args.page_size).await?,
        Command::Categories => {
            let choices = services.game.load_choices().await;
            print_choices(&choices.categories, choices.from_fallback);
        }
        Command::Levels => {
            let choices = services.game.load_choices().await;
            print_choices(&choices.levels, choices.from_fallback);
        }
        Command::Stats => {
            let actor = services.session.current_user().await?;
            let stats = services.admin.question_stats(actor.as_ref()).await?;
            println!("total questions: {}", stats.total_questions);
            for bucket in &stats.category_stats {
                println!("  category {:<20} {}", bucket.key, bucket.count);
            }
            for bucket in &stats.level_stats {
                println!("  level    {:<20} {}", bucket.key, bucket.count);
            }
        }
        Command::Roles => {
            let actor = services.session.current_user().await?;
            for entry in services.admin.roles_with_counts(actor.as_ref()).await? {
                println!(
                    "{:<24} {:<16} {} users",
                    entry.role.id, entry.role.role_const, entry.user_count
                );
            }
        }
    }

    Ok(())
}

async fn whoami(services: &CliServices, refresh: bool) -> AppResult<()> {
    let user = if refresh {
        Some(services.session.refresh_profile().await?)
    } else {
        services.session.current_user().await?
    };

    let Some(user) = user else {
        println!("not logged in");
        return Ok(());
    };

    let permissions = services.session.permissions().await?;
    println!("{} ({})", user.full_name, user.mobile);
    println!("role: {}", resolve_role(Some(&user)));
    let granted: Vec<&str> = permissions
        .granted()
        .into_iter()
        .map(|capability| capability.as_str())
        .collect();
    if granted.is_empty() {
        println!("capabilities: none");
    } else {
        println!("capabilities: {}", granted.join(", "));
    }

    Ok(())
}

async fn search(services: &CliServices, filter: &QuestionFilter, page_size: usize) -> AppResult<()> {
    if !services.session.is_authenticated().await {
        return Err(AppError::Unauthorized(
            "please log in to search questions".to_owned(),
        ));
    }

    let round = services
        .game
        .start_round(filter, page_size, &CancellationFlag::new())
        .await?;

    info!(
        status = round.status.as_str(),
        questions = round.deck.len(),
        "search finished"
    );
    print_deck(&round.deck);
    println!("{}", describe_status(&round.status, round.deck.len()));

    Ok(())
}

fn print_deck(deck: &QuestionDeck) {
    if deck.is_empty() {
        println!("no questions found");
        return;
    }

    println!(
        "page {} of {} ({} questions)",
        deck.current_page(),
        deck.total_pages(),
        deck.len()
    );
    for (index, question) in deck.current_page_questions().iter().enumerate() {
        println!(
            "{}. {} [{} / {}]",
            deck.question_number(index),
            question.title,
            question.category,
            question.level
        );
        println!("   {}", question.answer);
    }
}

fn print_choices(values: &[String], from_fallback: bool) {
    for value in values {
        println!("{value}");
    }
    if from_fallback {
        println!("(backend unavailable, showing defaults)");
    }
}

fn describe_status(status: &AggregationStatus, collected: usize) -> String {
    match status {
        AggregationStatus::Complete | AggregationStatus::Empty => {
            format!("search complete: {collected} questions")
        }
        AggregationStatus::Partial {
            failed_page,
            message,
        } => format!(
            "search incomplete: page {failed_page} failed ({message}); showing {collected} questions"
        ),
        AggregationStatus::PageLimitReached { pages_fetched } => format!(
            "search truncated after {pages_fetched} pages; showing {collected} questions"
        ),
        AggregationStatus::Cancelled { pages_fetched } => {
            format!("search cancelled after {pages_fetched} pages")
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use clap::error::ErrorKind;
    use thinklink_application::AggregationStatus;
    use thinklink_domain::QuestionFilter;

    use super::{Cli, Command, SearchArgs, describe_status};

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("thinklink").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    fn search_args(result: Result<Command, clap::Error>) -> SearchArgs {
        match result {
            Ok(Command::Search(args)) => args,
            other => panic!("expected search arguments, got {other:?}"),
        }
    }

    #[test]
    fn no_arguments_prints_help() {
        let error = parse(&[]).err().map(|error| error.kind());
        assert_eq!(
            error,
            Some(ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand)
        );
    }

    #[test]
    fn login_takes_two_positionals() {
        assert_eq!(
            parse(&["login", "0123456789", "secret-pass"]).ok(),
            Some(Command::Login {
                mobile: "0123456789".to_owned(),
                password: "secret-pass".to_owned(),
            })
        );
        assert!(parse(&["login", "0123456789"]).is_err());
    }

    #[test]
    fn whoami_accepts_refresh_flag() {
        assert_eq!(
            parse(&["whoami", "--refresh"]).ok(),
            Some(Command::Whoami { refresh: true })
        );
        assert_eq!(
            parse(&["whoami"]).ok(),
            Some(Command::Whoami { refresh: false })
        );
    }

    #[test]
    fn search_defaults_to_unfiltered() {
        let args = search_args(parse(&["search"]));

        assert_eq!(args.filter(), QuestionFilter::default());
        assert_eq!(args.page_size, 1);
    }

    #[test]
    fn search_maps_all_sentinels_to_unfiltered() {
        let args = search_args(parse(&[
            "search",
            "--category",
            "All Categories",
            "--level",
            "All",
            "--page-size",
            "10",
        ]));

        assert_eq!(args.filter(), QuestionFilter::default());
        assert_eq!(args.page_size, 10);
    }

    #[test]
    fn search_builds_filter_from_flags() {
        let args = search_args(parse(&[
            "search",
            "--search",
            " rivers ",
            "--category",
            "Geography",
            "--level",
            "Hard",
        ]));

        let filter = args.filter();
        assert_eq!(filter.search(), Some("rivers"));
        assert_eq!(filter.category(), Some("Geography"));
        assert_eq!(filter.level(), Some("Hard"));
    }

    #[test]
    fn search_rejects_unknown_page_size_and_flags() {
        assert_eq!(
            parse(&["search", "--page-size", "7"]).err().map(|error| error.kind()),
            Some(ErrorKind::ValueValidation)
        );
        assert_eq!(
            parse(&["search", "--sort", "asc"]).err().map(|error| error.kind()),
            Some(ErrorKind::UnknownArgument)
        );
        assert!(parse(&["search", "--level"]).is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_eq!(
            parse(&["play"]).err().map(|error| error.kind()),
            Some(ErrorKind::InvalidSubcommand)
        );
    }

    #[test]
    fn partial_status_names_the_failed_page() {
        let status = AggregationStatus::Partial {
            failed_page: 3,
            message: "Server busy".to_owned(),
        };

        assert_eq!(
            describe_status(&status, 200),
            "search incomplete: page 3 failed (Server busy); showing 200 questions"
        );
    }
}
