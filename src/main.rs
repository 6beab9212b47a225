use clap::{ArgGroup, Args, Parser, Subcommand};
use searchbar::app::editor;
use searchbar::app::{self, AppConfig};
use searchbar::config::{self, SearchBarDefaults};
#[cfg(feature = "harness")]
use searchbar::harness;
use searchbar::logging;
use searchbar::ui::theme;
use searchbar::widget::SearchBarProps;

/// Interactive demo for the terminal search bar widget.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Initial controlled value pushed into the search bar.
    #[arg(long, default_value = "")]
    value: String,

    /// Placeholder override. Defaults to the config file value.
    #[arg(long)]
    placeholder: Option<String>,

    /// Start with the search bar disabled.
    #[arg(long, default_value_t = false)]
    disabled: bool,

    /// Escape inside the input clears it and fires the cancel callback.
    #[arg(long, default_value_t = false)]
    cancel_on_escape: bool,

    /// Stretch the search bar across the whole screen width.
    #[arg(long, default_value_t = false)]
    full_width: bool,

    #[cfg(feature = "harness")]
    /// Replay `--harness-script` and print the final frame to stdout.
    #[arg(long, default_value_t = false)]
    harness_dump: bool,

    #[cfg(feature = "harness")]
    /// `;`-separated steps, e.g. `focus;type:serde;key:enter`.
    #[arg(long, default_value = "focus;type:  hello  ;blur;focus;key:enter")]
    harness_script: String,

    #[cfg(feature = "harness")]
    /// Harness frame width.
    #[arg(long, default_value_t = 120)]
    harness_width: u16,

    #[cfg(feature = "harness")]
    /// Harness frame height.
    #[arg(long, default_value_t = 30)]
    harness_height: u16,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect or edit searchbar configuration.
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("config_action")
        .required(true)
        .multiple(false)
        .args(["edit", "path"])
))]
struct ConfigCommand {
    /// Open the config file in $VISUAL/$EDITOR/nvim/vim/vi.
    #[arg(long)]
    edit: bool,

    /// Print the config file path.
    #[arg(long)]
    path: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    if let Some(Command::Config(command)) = cli.command.take() {
        return handle_config_command(command);
    }

    let config = config::load_or_create()?;
    theme::apply(config.theme);

    if let Err(err) = config::log_path().and_then(|path| logging::init(&path)) {
        eprintln!("searchbar: logging disabled: {err:#}");
    }

    let props = build_props(&cli, &config.search_bar);

    #[cfg(feature = "harness")]
    if cli.harness_dump {
        let dump = harness::render_script_dump(
            props,
            &cli.harness_script,
            cli.harness_width,
            cli.harness_height,
        )?;
        println!("{dump}");
        return Ok(());
    }

    app::run(AppConfig {
        props,
        search_delay: config.search_bar.search_delay,
    })
    .await
}

fn build_props(cli: &Cli, defaults: &SearchBarDefaults) -> SearchBarProps {
    SearchBarProps {
        value: cli.value.clone(),
        disabled: cli.disabled,
        cancel_on_escape: cli.cancel_on_escape || defaults.cancel_on_escape,
        placeholder: cli
            .placeholder
            .clone()
            .unwrap_or_else(|| defaults.placeholder.clone()),
        search_icon: defaults.search_icon.clone(),
        close_icon: defaults.close_icon.clone(),
        full_width: cli.full_width || defaults.full_width,
        ..SearchBarProps::default()
    }
}

fn handle_config_command(command: ConfigCommand) -> anyhow::Result<()> {
    let path = config::ensure_config_file()?;

    if command.path {
        println!("{}", path.display());
        return Ok(());
    }

    if command.edit {
        editor::edit_file_with_system_editor(path.as_path())?;
        return Ok(());
    }

    Ok(())
}
