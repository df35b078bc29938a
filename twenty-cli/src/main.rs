use clap::Parser;

mod args;
mod cmd;
mod commands;
mod config;
mod exit_codes;
mod logging;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "twenty", version, about = "Twenty CRM command line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Get {
            object,
            id,
            output,
            api,
        } => cmd::record::get_cmd(&object, &id, output, api).await,
        Command::List {
            object,
            limit,
            filters,
            output,
            api,
        } => cmd::record::list_cmd(&object, limit, &filters, output, api).await,
        Command::Create {
            object,
            data,
            output,
            api,
        } => cmd::record::create_cmd(&object, &data, output, api).await,
        Command::Update {
            object,
            id,
            data,
            output,
            api,
        } => cmd::record::update_cmd(&object, &id, &data, output, api).await,
        Command::Delete {
            object,
            id,
            output,
            api,
        } => cmd::record::delete_cmd(&object, &id, output, api).await,
        Command::Search {
            query,
            object_types,
            limit,
            output,
            api,
        } => cmd::search::search_cmd(&query, &object_types, limit, output, api).await,
        Command::Upsert {
            object,
            field,
            value,
            data,
            output,
            api,
        } => cmd::upsert::upsert_cmd(&object, &field, &value, &data, output, api).await,
        Command::BulkCreate {
            object,
            items,
            output,
            api,
        } => cmd::bulk::bulk_create_cmd(&object, &items, output, api).await,
        Command::BulkUpdate {
            object,
            items,
            output,
            api,
        } => cmd::bulk::bulk_update_cmd(&object, &items, output, api).await,
        Command::BulkDelete {
            object,
            ids,
            output,
            api,
        } => cmd::bulk::bulk_delete_cmd(&object, &ids, output, api).await,
        Command::Doctor { output, api } => cmd::doctor::doctor_cmd(output, api).await,
    }
}
