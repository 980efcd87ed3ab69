use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomUserError, InquireError, Text, validator::Validation};
use tracing::debug;
use weather_core::{
    Config, Endpoint, Phase, Widget, provider::providers_from_config, render,
};

use crate::{logger, present::Presenter};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather or Not: current weather for a city")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print everything at once, without the reveal effects.
    #[arg(long, global = true)]
    pub no_animation: bool,

    /// Endpoint to start on, "test" or "live". Defaults to the configured one.
    #[arg(long, global = true)]
    pub endpoint: Option<Endpoint>,

    /// Without a subcommand, start the interactive lookup.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the URL of an endpoint.
    Configure {
        /// Endpoint name, "test" or "live".
        endpoint: Endpoint,
    },

    /// Look up one city and exit.
    Show {
        /// City name.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        logger::init_cli_logger(self.verbose);
        let presenter = Presenter::new(!self.no_animation);

        match self.command {
            Some(Command::Configure { endpoint }) => {
                configure(endpoint)?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Show { city }) => {
                let mut widget = build_widget(self.endpoint)?;
                show(&mut widget, &presenter, city).await
            }
            None => {
                let mut widget = build_widget(self.endpoint)?;
                interactive(&mut widget, &presenter).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn build_widget(endpoint: Option<Endpoint>) -> anyhow::Result<Widget> {
    let config = Config::load()?;
    let endpoint = match endpoint {
        Some(endpoint) => endpoint,
        None => config.initial_endpoint()?,
    };

    for id in Endpoint::all() {
        debug!(endpoint = %id, configured = config.is_endpoint_configured(*id), "Endpoint");
    }

    Ok(Widget::new(providers_from_config(&config), endpoint))
}

fn configure(endpoint: Endpoint) -> anyhow::Result<()> {
    // Only what is on disk; environment overrides must not be saved.
    let mut config = Config::load_file()?;
    let current = config.endpoints.get(endpoint.as_str()).map(|cfg| cfg.url.clone());

    let prompt = format!("URL for the '{endpoint}' endpoint:");
    let mut text = Text::new(&prompt)
        .with_help_message("Requests are sent as GET <url>?query=<city>")
        .with_validator(|input: &str| -> Result<Validation, CustomUserError> {
            let input = input.trim();
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("URL must start with http:// or https://".into()))
            }
        });
    if let Some(current) = current.as_deref() {
        text = text.with_initial_value(current);
    }
    let url = text.prompt().context("Failed to read endpoint URL")?;

    config.upsert_endpoint_url(endpoint, url.trim().to_string());

    if config.initial_endpoint()? != endpoint {
        let make_default = Confirm::new(&format!("Start on '{endpoint}' by default?"))
            .with_default(false)
            .prompt()
            .context("Failed to read confirmation")?;
        if make_default {
            config.set_default_endpoint(endpoint);
        }
    }

    config.save()?;
    println!("Saved '{endpoint}' endpoint to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(widget: &mut Widget, presenter: &Presenter, city: String) -> anyhow::Result<ExitCode> {
    widget.set_city(city);
    lookup(widget, presenter).await?;

    if widget.phase() == Phase::ShowingResult {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn interactive(widget: &mut Widget, presenter: &Presenter) -> anyhow::Result<()> {
    presenter.title(&render::title(&mut rand::rng())).await;
    println!("Endpoint: {}. Type /toggle to switch, /quit to leave.", widget.endpoint());

    loop {
        let input = match Text::new("City:")
            .with_placeholder("Please Enter a City")
            .with_initial_value(widget.city())
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        match parse_input(input) {
            Action::Quit => break,
            Action::Toggle => println!("Endpoint switched to {}", widget.toggle_endpoint()),
            Action::ShowEndpoint => println!("Endpoint: {}", widget.endpoint()),
            Action::Lookup(city) => {
                widget.set_city(city);
                lookup(widget, presenter).await?;
            }
        }
    }

    Ok(())
}

/// What one line typed at the city prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Quit,
    Toggle,
    ShowEndpoint,
    /// Anything else is a city, blank included; the widget decides.
    Lookup(String),
}

fn parse_input(input: String) -> Action {
    match input.trim() {
        "/quit" | "/exit" => return Action::Quit,
        "/toggle" => return Action::Toggle,
        "/endpoint" => return Action::ShowEndpoint,
        _ => {}
    }

    Action::Lookup(input)
}

async fn lookup(widget: &mut Widget, presenter: &Presenter) -> anyhow::Result<()> {
    if let Some(submission) = widget.begin_submit() {
        presenter.pending(submission.city(), submission.endpoint());
        let outcome = submission.run().await;
        widget.apply(outcome);
    }

    presenter.show(widget).await.context("Failed to write to terminal")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.endpoint.is_none());
    }

    #[test]
    fn show_takes_city_and_global_endpoint() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris", "--endpoint", "live"]).unwrap();
        assert_eq!(cli.endpoint, Some(Endpoint::Live));
        assert!(matches!(cli.command, Some(Command::Show { ref city }) if city == "Paris"));
    }

    #[test]
    fn slash_commands_map_to_actions() {
        assert_eq!(parse_input("/quit".into()), Action::Quit);
        assert_eq!(parse_input(" /exit ".into()), Action::Quit);
        assert_eq!(parse_input("/toggle".into()), Action::Toggle);
        assert_eq!(parse_input("/endpoint".into()), Action::ShowEndpoint);
    }

    #[test]
    fn other_input_is_a_lookup_as_typed() {
        assert_eq!(parse_input("Paris".into()), Action::Lookup("Paris".into()));
        assert_eq!(parse_input(" New York ".into()), Action::Lookup(" New York ".into()));
        assert_eq!(parse_input("   ".into()), Action::Lookup("   ".into()));
        assert_eq!(parse_input("/toggle Paris".into()), Action::Lookup("/toggle Paris".into()));
    }

    #[test]
    fn city_after_toggle_targets_the_other_endpoint() {
        let mut widget = Widget::new(Default::default(), Endpoint::Test);

        for line in ["/toggle", "Paris"] {
            match parse_input(line.to_string()) {
                Action::Toggle => {
                    widget.toggle_endpoint();
                }
                Action::Lookup(city) => widget.set_city(city),
                other => panic!("unexpected action {other:?}"),
            }
        }

        let submission = widget.begin_submit().expect("city was typed");
        assert_eq!(submission.endpoint(), Endpoint::Live);
        assert_eq!(submission.city(), "Paris");
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        assert!(Cli::try_parse_from(["weather", "configure", "staging"]).is_err());
    }
}
