//! Interactive deadbolt emulator.
//!
//! Wires the access controller to a console-backed annunciator and lock,
//! with the card reader and keypad driven from stdin. The main loop is the
//! cooperative polling cycle of the firmware: every 100 ms it services the
//! timed sub-states, polls each input device once, feeds any event into the
//! controller, and executes the resulting commands.
//!
//! Console input:
//!
//! ```text
//! card 52C31C2F    present a card to the reader
//! 0000 / 12AB      press keycap characters (digits 0-9, letters A-D)
//! clr / ent        press the control keys
//! reset            restore the factory default password
//! quit             exit the emulator
//! ```

use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use deadbolt_access::{AccessController, CardRegistry, Command, CredentialStore};
use deadbolt_core::{KeyEvent, constants::POLL_INTERVAL_MS};
use deadbolt_hardware::{
    console::{ConsoleAnnunciator, ConsoleLock},
    mock::{MockCardReader, MockCardReaderHandle, MockKeypad, MockKeypadHandle},
    traits::{AnnunciatorDevice, CardReaderDevice, KeypadDevice, LockDevice},
};

/// The one card enrolled in the minimal deployment.
const REGISTERED_CARD: &str = "52C31C2F";

/// Loop-level requests from the console that are not device events.
#[derive(Debug)]
enum ConsoleRequest {
    /// A card was swiped but the identifier was malformed.
    UnreadableCard,

    /// Restore the factory default password.
    ResetCredentials,

    /// Shut the emulator down.
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (mut reader, reader_handle) = MockCardReader::new();
    let (mut keypad, keypad_handle) = MockKeypad::new();
    let mut annunciator = ConsoleAnnunciator::new();
    let mut lock = ConsoleLock::new();

    for info in [
        reader.get_info().await?,
        keypad.get_info().await?,
        annunciator.get_info().await?,
        lock.get_info().await?,
    ] {
        info!(name = %info.name, model = %info.model, "device attached");
    }

    let registry = CardRegistry::single(REGISTERED_CARD.parse()?);
    let mut controller = AccessController::new(registry, CredentialStore::volatile());

    info!(version = deadbolt_core::VERSION, card = REGISTERED_CARD, "deadbolt emulator ready");
    print_usage();

    let (request_tx, mut request_rx) = mpsc::channel::<ConsoleRequest>(4);
    tokio::spawn(read_console(reader_handle, keypad_handle, request_tx));

    execute(&mut annunciator, &mut lock, controller.boot()).await?;

    let mut interval = time::interval(Duration::from_millis(POLL_INTERVAL_MS));
    loop {
        interval.tick().await;
        let now = Instant::now();

        // Timed sub-states first: alarm pulses and the post-grant re-lock
        let mut commands = controller.tick(now);

        // At most one card and one keypad event per cycle
        match reader.try_read().await {
            Ok(Some(card)) => commands.extend(controller.on_card(&card, now)),
            Ok(None) => {}
            Err(e) => {
                // The console task is gone; nothing can arrive anymore
                debug!(error = %e, "card reader detached, shutting down");
                break;
            }
        }

        match keypad.try_read_key().await {
            Ok(Some(key)) => commands.extend(controller.on_key(key, now)),
            Ok(None) => {}
            Err(e) => {
                debug!(error = %e, "keypad detached, shutting down");
                break;
            }
        }

        let mut quit = false;
        while let Ok(request) = request_rx.try_recv() {
            match request {
                ConsoleRequest::UnreadableCard => {
                    commands.extend(controller.on_unreadable_card(now));
                }
                ConsoleRequest::ResetCredentials => {
                    commands.extend(controller.reset_credentials());
                }
                ConsoleRequest::Quit => quit = true,
            }
        }

        execute(&mut annunciator, &mut lock, commands).await?;

        if quit {
            break;
        }
    }

    info!(
        transitions = controller.history().len(),
        "deadbolt emulator stopped"
    );
    Ok(())
}

/// Execute controller commands against the output devices, in order.
async fn execute<A, L>(annunciator: &mut A, lock: &mut L, commands: Vec<Command>) -> Result<()>
where
    A: AnnunciatorDevice,
    L: LockDevice,
{
    for command in commands {
        match command {
            Command::Beep => annunciator.beep().await?,
            Command::Show { line, text } => annunciator.show(line, &text).await?,
            Command::SetLock(position) => lock.set_position(position).await?,
        }
    }
    Ok(())
}

/// Translate console lines into device events and loop requests.
///
/// Runs until stdin closes or `quit` is entered; dropping the device
/// handles afterwards lets the poll loop observe the disconnect.
async fn read_console(
    reader: MockCardReaderHandle,
    keypad: MockKeypadHandle,
    requests: mpsc::Sender<ConsoleRequest>,
) {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            match token.to_ascii_uppercase().as_str() {
                "CARD" => {
                    let Some(id) = tokens.next() else {
                        warn!("usage: card <8-hex-id>");
                        continue;
                    };
                    if reader.present(id).await.is_err() {
                        // Malformed identifier: surface it as an unreadable
                        // card so the feedback matches a rejected one
                        if requests.send(ConsoleRequest::UnreadableCard).await.is_err() {
                            return;
                        }
                    }
                }
                "CLR" => {
                    if keypad.press(KeyEvent::Clear).await.is_err() {
                        return;
                    }
                }
                "ENT" => {
                    if keypad.press(KeyEvent::Enter).await.is_err() {
                        return;
                    }
                }
                "RESET" => {
                    if requests.send(ConsoleRequest::ResetCredentials).await.is_err() {
                        return;
                    }
                }
                "QUIT" | "EXIT" => {
                    let _ = requests.send(ConsoleRequest::Quit).await;
                    return;
                }
                "HELP" | "?" => print_usage(),
                keycaps => {
                    for c in keycaps.chars() {
                        match KeyEvent::from_char(c) {
                            Some(key) => {
                                if keypad.press(key).await.is_err() {
                                    return;
                                }
                            }
                            // Unknown symbols are no-ops, never errors
                            None => warn!(symbol = %c, "not a keypad character, ignored"),
                        }
                    }
                }
            }
        }
    }

    info!("console input closed");
}

fn print_usage() {
    println!("commands:");
    println!("  card <8-hex-id>   present a card (registered: {REGISTERED_CARD})");
    println!("  0-9 a-d           press keypad characters (e.g. 00000000)");
    println!("  clr / ent         clear or submit the entry");
    println!("  reset             restore the factory default password");
    println!("  quit              exit");
}
