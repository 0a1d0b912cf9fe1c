use clap::Parser;
use menutree::BackPolicy;
use menutree::core::config;
use menutree::core::{MenuError, MenuId, NavEvent, Navigator, RunOutcome, ScriptedFrontend};
use menutree::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menutree", about = "Keyboard-driven hierarchical terminal menus")]
struct Args {
    /// Config file to use instead of ~/.menutree/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where "Back" leads from a submenu linked under several parents
    #[arg(short, long, value_enum)]
    back_policy: Option<BackPolicy>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<LevelFilter>,

    /// Run headless, feeding these events instead of reading the keyboard
    /// (e.g. `down,down,enter,back`)
    #[arg(long, value_delimiter = ',')]
    replay: Option<Vec<NavEvent>>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .map_err(io::Error::other)?;
    let resolved = config::resolve(&file_config, args.back_policy, args.log_level);

    // Initialize file logger; the terminal is in raw mode, so nothing goes to stderr
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "menutree starting up (back policy: {})",
        resolved.back_policy.label()
    );

    let mut navigator = Navigator::new(resolved.navigator_options()).map_err(io::Error::other)?;
    let main_menu = build_demo(&mut navigator).map_err(io::Error::other)?;
    navigator.show(main_menu).map_err(io::Error::other)?;

    let outcome = match args.replay {
        Some(events) => replay(&mut navigator, events)?,
        None => tui::run(&mut navigator, &resolved)?,
    };

    if outcome == RunOutcome::Exit {
        log::info!("Exit requested, terminating");
        std::process::exit(0);
    }
    log::info!("menutree stopped");
    Ok(())
}

fn replay(navigator: &mut Navigator, events: Vec<NavEvent>) -> io::Result<RunOutcome> {
    let mut frontend = ScriptedFrontend::new(events);
    let outcome = navigator.run(&mut frontend)?;
    if let Some(frame) = frontend.last_frame() {
        println!("menu:        {}", frame.title.as_deref().unwrap_or("-"));
        println!("highlighted: {}", frame.highlighted.as_deref().unwrap_or("-"));
        println!("status:      {}", frame.status);
    }
    Ok(outcome)
}

/// Main
/// ├── Item 1, Item 2
/// ├── Submenu ─ Subitem 1..4, Submenu ─ (empty)
/// ├── Greetings ("world") ─ Hello, Shout
/// └── Stop
fn build_demo(navigator: &mut Navigator) -> Result<MenuId, MenuError> {
    let status = navigator.status_line();
    let stop = navigator.stop_handle();

    let main_menu = navigator.create_menu("Main")?;
    let submenu = navigator.create_menu("Submenu")?;
    let another = navigator.create_menu("Another")?;
    let greetings = navigator.create_menu_with_args("Greetings", (3u32,))?;

    let (s1, s2) = (status.clone(), status.clone());
    navigator
        .edit(main_menu)?
        .action("Item 1", move || s1.set("Test"))?
        .describe("Writes Test to the status line")?
        .action("Item 2", move || s2.set("Test1"))?
        .describe("Writes Test1 to the status line")?
        .submenu("Submenu", submenu)?
        .submenu_with("Greetings", greetings, ("world".to_string(),))?
        .describe("Actions fed by arguments from above")?
        .action("Stop", move || stop.request())?
        .describe("Leave the loop without exiting")?;

    for label in ["Subitem 1", "Subitem 2", "Subitem 3", "Subitem 4"] {
        let s = status.clone();
        navigator.add_action(submenu, label, move || s.set(format!("{label} selected")))?;
    }
    navigator.add_submenu(submenu, "Submenu", another)?;

    let (hello, shout) = (status.clone(), status);
    navigator
        .edit(greetings)?
        .action("Hello", move |name: String, times: u32| {
            let greeting = format!("Hello {name}");
            hello.set(std::iter::repeat_n(greeting, times as usize).collect::<Vec<_>>().join(", "))
        })?
        .action_with(
            "Shout",
            move |name: String, times: u32, suffix: &'static str| {
                shout.set(format!("HELLO {}{}", name.to_uppercase(), suffix.repeat(times as usize)))
            },
            ("!",),
        )?;

    Ok(main_menu)
}
