use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use govuk_render::semantics::parse_attributes;
use govuk_render::{
    encode_attributes, encode_i18n_attributes, escape_html, AttributesInput, Component,
    I18nRequest,
};

/// Encode HTML attributes and render design-system components.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log more detail to stderr (-v for debug, -vv for trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode attribute literals such as `type=radio checked?=true`.
    Attrs {
        /// Attribute literals: `name=value`, `name?=value` (optional), `name`, `name?`.
        literals: Vec<String>,
        /// Pre-formatted attribute markup, printed unchanged.
        #[arg(long, conflicts_with = "literals")]
        raw: Option<String>,
    },
    /// Encode translation data attributes.
    I18n {
        /// Translation key.
        #[arg(short, long)]
        key: String,
        /// Single message.
        #[arg(short, long)]
        message: Option<String>,
        /// Plural form as `rule=message`. Repeatable; replaces --message.
        #[arg(short, long = "plural", value_parser = parse_plural)]
        plurals: Vec<(String, String)>,
    },
    /// Escape text for use in HTML.
    Escape {
        text: String,
    },
    /// Render a component from JSON params.
    Render {
        /// One of: button, character-count, error-message, hint, label.
        component: Component,
        /// JSON params file. Reads stdin when omitted.
        #[arg(short, long)]
        params: Option<PathBuf>,
    },
}

fn parse_plural(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((rule, message)) if !rule.is_empty() => Ok((rule.to_owned(), message.to_owned())),
        _ => Err(format!("expected `rule=message`, got `{}`", s)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_params(path: Option<&PathBuf>) -> Result<String> {
    return match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read params from {}", path.display())),
        None => {
            let mut params = String::new();
            io::stdin()
                .read_to_string(&mut params)
                .context("failed to read params from stdin")?;
            Ok(params)
        }
    };
}

fn run(command: Command) -> Result<String> {
    return match command {
        Command::Attrs { literals, raw } => {
            let input = match raw {
                Some(raw) => AttributesInput::from(raw),
                // Parse errors hold `Rc` line text, so they are flattened to a message here.
                None => AttributesInput::from(
                    parse_attributes(literals.as_slice()).map_err(|err| anyhow!("{}", err))?,
                ),
            };
            Ok(encode_attributes(Some(&input)))
        }
        Command::I18n {
            key,
            message,
            plurals,
        } => {
            let mut request = I18nRequest::new(key);
            if let Some(message) = message {
                request = request.with_message(message);
            }
            for (rule, message) in plurals {
                request = request.with_plural(rule, message);
            }
            Ok(encode_i18n_attributes(&request))
        }
        Command::Escape { text } => Ok(escape_html(&text)),
        Command::Render { component, params } => {
            let params = read_params(params.as_ref())?;
            debug!(%component, bytes = params.len(), "read params");
            let html = component
                .render_json(&params)
                .with_context(|| format!("invalid params for {}", component))?;
            Ok(html.into_string())
        }
    };
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    info!(command = ?args.command, "running");

    let output = run(args.command)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let args = Args::try_parse_from(std::iter::once("govuk-render").chain(args.iter().copied()))?;
        run(args.command)
    }

    #[test]
    fn test_attrs_command() {
        assert_eq!(
            run_args(&["attrs", "type=radio", "checked?=true", "data-x?=false"]).unwrap(),
            " type=\"radio\" checked"
        );
        assert_eq!(
            run_args(&["attrs", "--raw", " data-x=\"y\""]).unwrap(),
            " data-x=\"y\""
        );
        assert!(run_args(&["attrs", "=oops"]).is_err());
    }

    #[test]
    fn test_i18n_command() {
        assert_eq!(
            run_args(&["i18n", "-k", "k", "--plural", "other=M1", "--plural", "one=M2"]).unwrap(),
            " data-i18n.k.other=\"M1\" data-i18n.k.one=\"M2\""
        );
        assert_eq!(run_args(&["i18n", "--key", "k"]).unwrap(), "");
        assert!(run_args(&["i18n", "--key", "k", "--plural", "=x"]).is_err());
    }

    #[test]
    fn test_escape_command() {
        assert_eq!(run_args(&["escape", "<a & b>"]).unwrap(), "&#60;a &#38; b&#62;");
    }

    #[test]
    fn test_render_command_from_file() {
        let path = std::env::temp_dir().join(format!("govuk-render-{}.json", std::process::id()));
        fs::write(&path, r#"{"text": "Continue"}"#).unwrap();
        let output = run_args(&["render", "button", "--params", path.to_str().unwrap()]);
        fs::remove_file(&path).unwrap();
        assert!(output.unwrap().starts_with("<button type=\"submit\""));
        assert!(run_args(&["render", "accordion"]).is_err());
    }

    #[test]
    fn test_parse_plural() {
        assert_eq!(
            parse_plural("one=a=b"),
            Ok(("one".to_owned(), "a=b".to_owned()))
        );
        assert!(parse_plural("no-separator").is_err());
    }
}
