use crate::cli::Commands;
use anyhow::Result;
use nsboot_namespace::NetnsReady;

pub mod exec;
pub mod hold;
pub mod show;

/// Dispatch command to appropriate handler
pub async fn dispatch(command: Commands, ready: NetnsReady) -> Result<()> {
    match command {
        Commands::Show { pid, json } => show::execute(&ready, pid, json),

        Commands::Hold => hold::execute(&ready).await,

        Commands::Exec { command } => exec::execute(ready, &command),
    }
}
