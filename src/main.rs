mod ui;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, ExecutableCommand};
use log::LevelFilter;
use lunar_lander::audio::{AudioSink, RodioSink, SilentSink, SoundBoard};
use lunar_lander::clock::FixedStep;
use lunar_lander::controls::{ControlKey, ControlState};
use lunar_lander::settings::SettingsSource;
use lunar_lander::{GameContext, MenuKey, Scene, SceneEvent, SceneMachine, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    mute: bool,
}

#[derive(Debug, PartialEq)]
enum CliAction {
    Run(CliArgs),
    Help,
    Version,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliAction, String> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliAction::Help),
            "--version" | "-v" => return Ok(CliAction::Version),
            "--mute" => parsed.mute = true,
            "--config" => match args.next() {
                Some(path) => parsed.config = Some(PathBuf::from(path)),
                None => return Err("--config requires a path".to_string()),
            },
            "--log-file" => match args.next() {
                Some(path) => parsed.log_file = Some(PathBuf::from(path)),
                None => return Err("--log-file requires a path".to_string()),
            },
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(CliAction::Run(parsed))
}

fn print_help() {
    println!("Lunar Lander - Terminal Landing Game\n");
    println!("Usage: lunar-lander [options]\n");
    println!("Options:");
    println!("  --config <path>    Load settings from this JSON file");
    println!("  --log-file <path>  Append logs to this file (filter with RUST_LOG)");
    println!("  --mute             Disable all audio");
    println!("  --version          Show version information");
    println!("  --help             Show this help message");
}

/// Route logs to a file; the terminal belongs to the game. Without a file
/// logging stays off.
fn init_logging(path: Option<&Path>) {
    let Some(path) = path else {
        log::set_max_level(LevelFilter::Off);
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            log::set_max_level(LevelFilter::Off);
            return;
        }
    };
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    if let Err(e) = result {
        eprintln!("Warning: logger already initialized: {}", e);
    }
}

fn open_audio(settings: &Settings) -> Box<dyn AudioSink> {
    if !settings.audio.enabled {
        log::info!("Audio disabled");
        return Box::new(SilentSink);
    }
    match RodioSink::open(&settings.audio) {
        Some(sink) => Box::new(sink),
        None => Box::new(SilentSink),
    }
}

fn main() -> io::Result<()> {
    let action = match parse_args(std::env::args().skip(1)) {
        Ok(action) => action,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'lunar-lander --help' for usage.");
            std::process::exit(2);
        }
    };
    let cli = match action {
        CliAction::Help => {
            print_help();
            return Ok(());
        }
        CliAction::Version => {
            println!("lunar-lander {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        CliAction::Run(cli) => cli,
    };

    let (mut settings, source) = match Settings::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if cli.log_file.is_some() {
        settings.log_file = cli.log_file;
    }
    if cli.mute {
        settings.audio.enabled = false;
    }

    init_logging(settings.log_file.as_deref());
    match &source {
        SettingsSource::File(path) => log::info!("Settings loaded from {}", path.display()),
        SettingsSource::Defaults => log::info!("Using default settings"),
    }

    let mut sound_board = SoundBoard::new(open_audio(&settings));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(cursor::Hide)?;
    let enhanced_keys = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced_keys {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &settings, &mut sound_board);
    sound_board.stop_all();

    // Restore terminal even if the loop failed
    if enhanced_keys {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(cursor::Show)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        log::error!("Exited with error: {}", e);
    }
    log::info!("Goodbye");
    result
}

fn run<S: AudioSink>(
    terminal: &mut Tui,
    settings: &Settings,
    sound_board: &mut SoundBoard<S>,
) -> io::Result<()> {
    let mut machine = SceneMachine::new();
    let mut ctx = GameContext::new(settings.session_config(), StdRng::from_entropy());
    let mut controls = ControlState::new();
    let mut clock = FixedStep::default();
    let frame_duration = settings.frame_duration();
    let mut last_frame = Instant::now();
    let mut next_frame = last_frame + frame_duration;

    sound_board.start_music();

    while !machine.is_terminated() {
        terminal.draw(|f| ui::draw(f, machine.scene()))?;

        // Collect input until the frame deadline
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                let events = handle_key(key, &mut machine, &mut ctx, &mut controls);
                dispatch(&events, terminal, &machine, settings, sound_board, &mut controls)?;
            }
            if machine.is_terminated() {
                return Ok(());
            }
        }

        // Simulation runs at its own fixed rate regardless of frame_rate
        let now = Instant::now();
        let due = clock.advance(now - last_frame);
        last_frame = now;
        for _ in 0..due {
            let events = machine.tick(controls.snapshot());
            controls.advance();
            let touchdown = events
                .iter()
                .any(|e| matches!(e, SceneEvent::Landed { .. } | SceneEvent::Crashed));
            dispatch(&events, terminal, &machine, settings, sound_board, &mut controls)?;
            if touchdown {
                clock.reset();
                last_frame = Instant::now();
                break;
            }
        }

        next_frame += frame_duration;
        // Don't try to catch up after a stall
        let now = Instant::now();
        if next_frame < now {
            next_frame = now + frame_duration;
        }
    }
    Ok(())
}

fn handle_key(
    key: KeyEvent,
    machine: &mut SceneMachine,
    ctx: &mut GameContext<StdRng>,
    controls: &mut ControlState,
) -> Vec<SceneEvent> {
    if key.kind == KeyEventKind::Release {
        if let Some(control) = control_key(key.code) {
            controls.release(control);
        }
        return Vec::new();
    }

    if let Some(menu) = menu_key(&key) {
        return machine.handle_key(menu, ctx);
    }

    if matches!(machine.scene(), Scene::Playing(_)) {
        if let Some(control) = control_key(key.code) {
            controls.press(control);
        }
    }
    Vec::new()
}

fn menu_key(key: &KeyEvent) -> Option<MenuKey> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(MenuKey::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MenuKey::Abort),
        KeyCode::Enter => Some(MenuKey::Confirm),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| MenuKey::Choice(d as u8)),
        _ => None,
    }
}

fn control_key(code: KeyCode) -> Option<ControlKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(ControlKey::RotateLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(ControlKey::RotateRight),
        KeyCode::Up | KeyCode::Char(' ') => Some(ControlKey::Thrust),
        _ => None,
    }
}

/// Forward scene events to audio and handle front-end side effects.
fn dispatch<S: AudioSink>(
    events: &[SceneEvent],
    terminal: &mut Tui,
    machine: &SceneMachine,
    settings: &Settings,
    sound_board: &mut SoundBoard<S>,
    controls: &mut ControlState,
) -> io::Result<()> {
    for event in events {
        sound_board.handle(event);
        match event {
            SceneEvent::SessionStarted(_)
            | SceneEvent::Aborted
            | SceneEvent::ReturnedToTitle => controls.clear(),
            SceneEvent::Landed { .. } | SceneEvent::Crashed => {
                controls.clear();
                if let Scene::EndResult { session, .. } = machine.scene() {
                    terminal.draw(|f| ui::draw_session(f, session))?;
                }
                std::thread::sleep(settings.touchdown_pause());
                drain_input()?;
            }
            SceneEvent::ThrustEngaged | SceneEvent::ThrustCut | SceneEvent::Quit => {}
        }
    }
    Ok(())
}

/// Discard keys pressed during the touchdown pause.
fn drain_input() -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    Ok(())
}
