use std::sync::Arc;

use async_std::channel::{Receiver, unbounded};
use async_std::{io, task};
use backend_gateway::{BackendGateway, HttpBackendGateway};
use clap::Parser;
use core_types::events::{InventoryEvent, Notification, NotificationLevel};
use service::inventory_controller::{InventoryCommand, InventoryController};
use service::view_models::{DocumentTableViewModel, TablePlaceholder};

mod logging;

#[derive(Parser, Debug)]
struct Cli {
    /// Base URL of the document backend
    #[arg(long, default_value = "http://localhost:8000")]
    server: String,

    /// Maximum number of documents fetched per load
    #[arg(long, default_value_t = 500)]
    limit: u32,

    /// Initial folder filter
    #[arg(long)]
    folder: Option<String>,

    /// Initial file type filter (e.g. pdf)
    #[arg(long)]
    file_type: Option<String>,
}

enum CliAction {
    Dispatch(InventoryCommand),
    Help,
    Quit,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    task::block_on(async {
        let args = Cli::parse();
        tracing::info!(server = %args.server, limit = args.limit, "starting document inventory client");

        let gateway = Arc::new(HttpBackendGateway::new(&args.server)?);
        let (event_tx, event_rx) = unbounded();
        let mut controller = InventoryController::new(gateway, args.limit, event_tx);

        if args.folder.is_some() {
            controller
                .handle(InventoryCommand::SetFolderFilter(args.folder))
                .await;
        }
        if args.file_type.is_some() {
            controller
                .handle(InventoryCommand::SetFileTypeFilter(args.file_type))
                .await;
        } else if controller.filter().folder_name.is_none() {
            controller.handle(InventoryCommand::Reload).await;
        }

        let stdin = io::stdin();
        pump_events(&mut controller, &event_rx, &stdin).await?;
        print_help();

        loop {
            print!("> ");
            flush_stdout()?;

            let mut line = String::new();
            if stdin.read_line(&mut line).await? == 0 {
                break;
            }
            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            match parse_command(input) {
                Some(CliAction::Quit) => break,
                Some(CliAction::Help) => print_help(),
                Some(CliAction::Dispatch(command)) => {
                    controller.handle(command).await;
                    pump_events(&mut controller, &event_rx, &stdin).await?;
                }
                None => {
                    println!("Unknown command: {}", input);
                    print_help();
                }
            }
        }
        Ok(())
    })
}

/// Drain controller events, re-rendering and answering confirmation prompts
/// until none are left.
async fn pump_events<G: BackendGateway>(
    controller: &mut InventoryController<G>,
    event_rx: &Receiver<InventoryEvent>,
    stdin: &io::Stdin,
) -> io::Result<()> {
    loop {
        let mut needs_render = false;
        let mut pending_prompt = None;

        while let Ok(event) = event_rx.try_recv() {
            match event {
                InventoryEvent::Notified(notification) => print_notification(&notification),
                InventoryEvent::ConfirmationRequired { message, .. } => {
                    pending_prompt = Some(message);
                }
                InventoryEvent::ConfirmationClosed => {}
                InventoryEvent::DocumentsLoaded { .. }
                | InventoryEvent::SelectionChanged { .. }
                | InventoryEvent::LoadFailed { .. } => needs_render = true,
            }
        }

        if needs_render {
            render_table(&controller.table());
        }

        let Some(message) = pending_prompt else {
            return Ok(());
        };

        print!("{} [y/N] ", message);
        flush_stdout()?;
        let mut answer = String::new();
        stdin.read_line(&mut answer).await?;
        if answer.trim().eq_ignore_ascii_case("y") {
            controller.handle(InventoryCommand::Confirm).await;
        } else {
            controller.handle(InventoryCommand::Cancel).await;
        }
        // loop again to pick up the events the answer produced
    }
}

fn parse_command(input: &str) -> Option<CliAction> {
    let mut parts = input.split_whitespace();
    let action = match parts.next()? {
        "toggle" | "t" => {
            CliAction::Dispatch(InventoryCommand::ToggleSelect(parts.next()?.parse().ok()?))
        }
        "all" | "a" => CliAction::Dispatch(InventoryCommand::ToggleSelectAll),
        "delete" | "d" => {
            CliAction::Dispatch(InventoryCommand::RequestDelete(parts.next()?.parse().ok()?))
        }
        "delete-selected" | "ds" => CliAction::Dispatch(InventoryCommand::RequestBatchDelete),
        "reload" | "r" => CliAction::Dispatch(InventoryCommand::Reload),
        "folder" | "f" => CliAction::Dispatch(InventoryCommand::SetFolderFilter(
            parts.next().map(str::to_string),
        )),
        "type" => CliAction::Dispatch(InventoryCommand::SetFileTypeFilter(
            parts.next().map(str::to_string),
        )),
        "help" | "h" | "?" => CliAction::Help,
        "quit" | "q" | "exit" => CliAction::Quit,
        _ => return None,
    };
    Some(action)
}

fn render_table(table: &DocumentTableViewModel) {
    println!();
    match table.placeholder {
        Some(TablePlaceholder::LoadFailed) => {
            println!("Failed to load the document list.");
        }
        Some(TablePlaceholder::Empty) => {
            println!("No documents.");
        }
        None => {
            println!(
                "{:<4} {:>6}  {:<40} {:<8} {:<20} {:>7} {:>7}",
                "", "id", "title", "type", "folder", "chunks", "images"
            );
            for row in &table.rows {
                println!(
                    "{:<4} {:>6}  {:<40} {:<8} {:<20} {:>7} {:>7}",
                    if row.selected { "[x]" } else { "[ ]" },
                    row.id,
                    truncated(&row.title, 40),
                    row.kind_label,
                    truncated(&row.folder_name, 20),
                    row.chunk_count,
                    row.image_count
                );
            }
        }
    }
    println!(
        "{} documents, {} selected{}",
        table.total_count,
        table.selected_count,
        if table.all_selected { " (all)" } else { "" }
    );
    if !table.folder_options.is_empty() {
        println!("Folders: {}", table.folder_options.join(", "));
    }
}

fn print_notification(notification: &Notification) {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Warning => "warning",
        NotificationLevel::Error => "error",
    };
    println!("[{}] {}", tag, notification.message);
}

fn print_help() {
    println!("Commands:");
    println!("  toggle <id>       select or deselect a document");
    println!("  all               select everything, or clear if all selected");
    println!("  delete <id>       delete one document");
    println!("  delete-selected   delete every selected document");
    println!("  folder [name]     filter by folder (no name clears the filter)");
    println!("  type [ext]        filter by file type (no ext clears the filter)");
    println!("  reload            fetch the list again");
    println!("  quit");
}

fn truncated(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn flush_stdout() -> std::io::Result<()> {
    use std::io::Write;
    std::io::stdout().flush()
}
